use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::billing::{BillingPeriod, Price, DUE_DAYS};
use crate::calendar::Clock;
use crate::config::Config;
use crate::error::InvoiceError;
use crate::fakturoid::{Invoice, InvoiceApi, InvoiceDraft, LineDraft};
use crate::subject::Subject;

/// Outcome of a successful run
#[derive(Debug, PartialEq, Clone)]
pub struct Generated {
    pub invoice_id: u64,
    pub pdf: PathBuf,
}

pub struct Workflow<'a, A: InvoiceApi, C: Clock> {
    pub api: &'a A,
    pub clock: &'a C,
    pub config: &'a Config,
    pub invoices_dir: &'a Path,
    /// Fakturoid renders PDFs asynchronously after a save
    pub pdf_delay: Duration,
}

impl<'a, A: InvoiceApi, C: Clock> Workflow<'a, A, C> {
    pub fn generate(
        &self,
        subject: &str,
        price: &str,
    ) -> Result<Generated, InvoiceError> {
        let subject = Subject::parse(subject)?;
        let price = Price::parse(price)?;
        let subject_id = self.config.subjects.id_of(subject);
        let invoicing = &self.config.invoicing;
        let unit_price = invoicing.unit_price(price)?;
        let period = BillingPeriod::containing(self.clock.today());
        info!(%subject, subject_id, %price, %period, "Generating invoice");

        let line_name = period.line_name();
        let existing = find_existing(self.api, subject_id, &line_name)?;

        let line = LineDraft {
            id: existing.as_ref().and_then(first_line_id),
            name: line_name,
            vat_rate: invoicing.vat_rate(),
            unit_price,
        };
        let draft = InvoiceDraft {
            subject_id,
            issued_on: period.issued_on,
            due: DUE_DAYS,
            lines: vec![line],
        };

        let saved = match existing {
            None => {
                info!("Creating a new invoice");
                self.api.create_invoice(&draft)?
            }
            Some(invoice) => {
                info!(id = invoice.id, "Updating invoice of this month");
                self.api.update_invoice(invoice.id, &draft)?
            }
        };
        info!(id = saved.id, "Invoice saved");

        thread::sleep(self.pdf_delay);
        let pdf = self.api.invoice_pdf(saved.id).map_err(|source| {
            InvoiceError::PdfDownload {
                invoice_id: saved.id,
                source,
            }
        })?;

        let path = pdf_path(
            self.invoices_dir,
            &period,
            subject,
            &saved.variable_symbol,
        );
        write_pdf(&path, &pdf)?;
        info!(bytes = pdf.len(), "PDF written");

        Ok(Generated {
            invoice_id: saved.id,
            pdf: path,
        })
    }
}

/// Search matches any invoice field, so the subject is checked again here
fn find_existing<A: InvoiceApi>(
    api: &A,
    subject_id: u64,
    line_name: &str,
) -> Result<Option<Invoice>, InvoiceError> {
    let found = api.search_invoices(line_name)?;
    debug!(candidates = found.len(), "Searched for invoice of this month");
    Ok(found
        .into_iter()
        .find(|invoice| invoice.subject_id == subject_id))
}

fn first_line_id(invoice: &Invoice) -> Option<u64> {
    match invoice.lines.first() {
        Some(line) => {
            debug!(line_id = line.id, name = %line.name, "Reusing line");
            Some(line.id)
        }
        None => {
            warn!(id = invoice.id, "Existing invoice has no lines, appending");
            None
        }
    }
}

pub fn pdf_path(
    invoices_dir: &Path,
    period: &BillingPeriod,
    subject: Subject,
    variable_symbol: &str,
) -> PathBuf {
    invoices_dir
        .join(period.directory())
        .join(format!("{}_{}.pdf", subject, variable_symbol))
}

fn write_pdf(path: &Path, pdf: &[u8]) -> Result<(), InvoiceError> {
    let fs_error = |source| InvoiceError::Filesystem {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(fs_error)?;
    }
    fs::write(path, pdf).map_err(fs_error)
}
