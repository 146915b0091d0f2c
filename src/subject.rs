use std::str::FromStr;

use serde::Deserialize;
use strum::VariantNames;
use strum_macros::{Display, EnumString, VariantNames};

use crate::error::InvoiceError;

#[derive(
    Display,
    EnumString,
    VariantNames,
    Debug,
    PartialEq,
    Eq,
    Clone,
    Copy,
)]
#[strum(serialize_all = "lowercase")]
pub enum Subject {
    Fcs,
    Be,
}

impl Subject {
    pub fn parse(token: &str) -> Result<Self, InvoiceError> {
        Self::from_str(token).map_err(|_| InvoiceError::InvalidSubject {
            given: token.to_string(),
            accepted: Self::VARIANTS
                .iter()
                .map(|v| format!("\"{}\"", v))
                .collect::<Vec<_>>()
                .join(" and "),
        })
    }
}

/// Fakturoid subject ids of the billed entities
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Subjects {
    pub fcs: u64,
    pub be: u64,
}

impl Subjects {
    pub fn id_of(&self, subject: Subject) -> u64 {
        match subject {
            Subject::Fcs => self.fcs,
            Subject::Be => self.be,
        }
    }
}
