use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;

/* Argument Stucture
 *
 * fakturoid-invoice [-c config] [-o invoices-dir] [--pdf-delay secs] [-v]
 *     <fcs | be> <price>
 */

/// Create or update this month's invoice in Fakturoid and download its PDF
#[derive(Parser)]
#[clap(name = "fakturoid-invoice", version)]
pub struct Opts {
    #[clap(short, long, default_value="config.lexpr",
        value_hint=ValueHint::FilePath)]
    pub config: PathBuf,

    /// Directory the PDFs are stored under, one folder per month
    #[clap(short = 'o', long, default_value="invoices",
        value_hint=ValueHint::DirPath)]
    pub invoices_dir: PathBuf,

    /// Seconds to wait for Fakturoid to render the PDF
    #[clap(long, default_value_t = 3)]
    pub pdf_delay: u64,

    /// Increase logging verbosity, may be repeated
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subject to invoice: be | fcs
    pub subject: String,

    /// Price of the services, VAT included if configured so
    pub price: String,
}
