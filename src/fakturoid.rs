use chrono::NaiveDate;
use const_format::formatcp;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://app.fakturoid.cz/api/v2";

const USER_AGENT: &str =
    formatcp!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP Error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("{method} {url} answered {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("PDF of invoice {id} is not rendered yet")]
    PdfNotReady { id: u64 },
}

/// Invoice line as sent to Fakturoid. Carrying the `id` of an existing line
/// updates it instead of appending a new one.
#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct LineDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub vat_rate: u8,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
}

#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct InvoiceDraft {
    pub subject_id: u64,
    pub issued_on: NaiveDate,
    pub due: u32,
    pub lines: Vec<LineDraft>,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Line {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// The parts of a Fakturoid invoice this tool looks at
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Invoice {
    pub id: u64,
    pub subject_id: u64,
    pub variable_symbol: String,
    #[serde(default)]
    pub lines: Vec<Line>,
}

pub trait InvoiceApi {
    /// Full text search over all invoice fields
    fn search_invoices(&self, query: &str) -> Result<Vec<Invoice>, ApiError>;

    fn create_invoice(&self, draft: &InvoiceDraft) -> Result<Invoice, ApiError>;

    fn update_invoice(
        &self,
        id: u64,
        draft: &InvoiceDraft,
    ) -> Result<Invoice, ApiError>;

    fn invoice_pdf(&self, id: u64) -> Result<Vec<u8>, ApiError>;
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Credentials {
    /// Account name as it appears in Fakturoid URLs
    pub slug: String,
    pub email: String,
    pub api_key: SecretString,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub struct FakturoidClient {
    http: Client,
    account_url: String,
    email: String,
    api_key: SecretString,
}

impl FakturoidClient {
    pub fn new(credentials: &Credentials) -> Result<Self, ApiError> {
        // Fakturoid asks for a contact address in the user agent
        let http = Client::builder()
            .user_agent(format!("{} ({})", USER_AGENT, credentials.email))
            .build()?;

        Ok(Self {
            http,
            account_url: account_url(credentials),
            email: credentials.email.clone(),
            api_key: credentials.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.account_url, path)
    }

    fn send(
        &self,
        method: &'static str,
        url: String,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        debug!(method, url = %url, "Fakturoid request");
        let response = request
            .basic_auth(&self.email, Some(self.api_key.expose_secret()))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Status {
                method,
                url,
                status,
                body,
            });
        }
        Ok(response)
    }
}

fn account_url(credentials: &Credentials) -> String {
    format!(
        "{}/accounts/{}",
        credentials.base_url.trim_end_matches('/'),
        credentials.slug
    )
}

impl InvoiceApi for FakturoidClient {
    fn search_invoices(&self, query: &str) -> Result<Vec<Invoice>, ApiError> {
        let url = self.url("invoices/search.json");
        let request = self.http.get(&url).query(&[("query", query)]);
        Ok(self.send("GET", url, request)?.json()?)
    }

    fn create_invoice(&self, draft: &InvoiceDraft) -> Result<Invoice, ApiError> {
        let url = self.url("invoices.json");
        let request = self.http.post(&url).json(draft);
        Ok(self.send("POST", url, request)?.json()?)
    }

    fn update_invoice(
        &self,
        id: u64,
        draft: &InvoiceDraft,
    ) -> Result<Invoice, ApiError> {
        let url = self.url(&format!("invoices/{}.json", id));
        let request = self.http.patch(&url).json(draft);
        Ok(self.send("PATCH", url, request)?.json()?)
    }

    fn invoice_pdf(&self, id: u64) -> Result<Vec<u8>, ApiError> {
        let url = self.url(&format!("invoices/{}/download.pdf", id));
        let request = self.http.get(&url);
        let response = self.send("GET", url, request)?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(ApiError::PdfNotReady { id });
        }
        Ok(response.bytes()?.to_vec())
    }
}
