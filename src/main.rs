/*
 * Monthly invoice for one of the billed subjects
 *
 * Steps:
 *  - Validate the subject and price given on the command line
 *  - Compute this month's line text and the last day of the month as the
 *    issue date
 *  - Back out VAT from the price if configured to do so
 *  - Search Fakturoid for an invoice of this month and subject
 *      - Found: update it, keeping its line so no duplicate line is added
 *      - Not found: create a new one
 *  - Give Fakturoid a moment to render, then download the PDF into
 *    <invoices>/<YYYY-MM>/<subject>_<variable symbol>.pdf
 */

mod billing;
mod calendar;
mod cli;
mod config;
mod error;
mod fakturoid;
mod run;
mod subject;

use std::process;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::calendar::SystemClock;
use crate::cli::Opts;
use crate::config::Config;
use crate::error::InvoiceError;
use crate::fakturoid::FakturoidClient;
use crate::run::Workflow;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate(opts: &Opts) -> Result<(), InvoiceError> {
    let config = Config::load(&opts.config)?;
    let api = FakturoidClient::new(&config.fakturoid)?;

    let workflow = Workflow {
        api: &api,
        clock: &SystemClock,
        config: &config,
        invoices_dir: &opts.invoices_dir,
        pdf_delay: Duration::from_secs(opts.pdf_delay),
    };
    let generated = workflow.generate(&opts.subject, &opts.price)?;

    println!("Invoice saved in Fakturoid: {}", generated.invoice_id);
    println!("Invoice PDF generated: {}", generated.pdf.display());
    Ok(())
}

fn main() {
    let opts = Opts::parse();
    init_logging(opts.verbose);

    if let Err(error) = generate(&opts) {
        eprintln!("{}", error);
        process::exit(1);
    }
}
