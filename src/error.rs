use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::fakturoid::ApiError;

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("Unknown subject '{given}', only {accepted} supported")]
    InvalidSubject { given: String, accepted: String },

    #[error("Price has to be a valid number greater than 0, got '{given}'")]
    InvalidPrice { given: String },

    #[error("Configuration error in {}: {reason}", .path.display())]
    Configuration { path: PathBuf, reason: String },

    #[error("Fakturoid request failed: {source}")]
    Remote {
        #[from]
        source: ApiError,
    },

    #[error(
        "Invoice {invoice_id} saved in Fakturoid, \
         but its PDF could not be downloaded: {source}"
    )]
    PdfDownload {
        invoice_id: u64,
        source: ApiError,
    },

    #[error("Unable to write {}: {source}", .path.display())]
    Filesystem { path: PathBuf, source: io::Error },
}
