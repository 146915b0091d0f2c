use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{dec, Decimal};
use serde::Deserialize;

use crate::calendar::DateBoundaries;
use crate::error::InvoiceError;

/// Days between issue and due date
pub const DUE_DAYS: u32 = 15;

const VAT_RATE: u8 = 21;

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Invoicing {
    /// Prices given on the command line already contain VAT
    pub include_vat: bool,
}

impl Invoicing {
    pub fn vat_rate(&self) -> u8 {
        if self.include_vat {
            VAT_RATE
        } else {
            0
        }
    }

    /// Price per unit as sent to Fakturoid, VAT backed out when included
    pub fn unit_price(&self, price: Price) -> Result<Decimal, InvoiceError> {
        if !self.include_vat {
            return Ok(price.0);
        }
        price
            .0
            .checked_mul(dec!(100))
            .and_then(|p| p.checked_div(dec!(121)))
            .ok_or_else(|| InvoiceError::InvalidPrice {
                given: price.to_string(),
            })
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Price(Decimal);

impl Price {
    pub fn parse(token: &str) -> Result<Self, InvoiceError> {
        let invalid = || InvoiceError::InvalidPrice {
            given: token.to_string(),
        };
        let amount = Decimal::from_str(token.trim()).map_err(|_| invalid())?;
        if amount <= Decimal::ZERO {
            return Err(invalid());
        }
        Ok(Self(amount))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct BillingPeriod {
    pub month: NaiveDate,
    pub issued_on: NaiveDate,
}

impl BillingPeriod {
    pub fn containing(today: NaiveDate) -> Self {
        let issued_on = today
            .end_of_month()
            .expect("last day of a valid month");
        Self {
            month: today,
            issued_on,
        }
    }

    /// Line text, doubles as the search query for this month's invoice
    pub fn line_name(&self) -> String {
        format!(
            "Services according to agreement in month {}",
            self.month.format("%B %Y")
        )
    }

    pub fn directory(&self) -> String {
        self.month.format("%Y-%m").to_string()
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, issued {}", self.month.format("%B %Y"), self.issued_on)
    }
}
