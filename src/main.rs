mod config;
mod db;
mod engine;
mod error;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::Result;
use tracing::{error, info};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    logging::init(&config)?;

    let ledger = db::Ledger::open(&config.db_path)?;
    let today = chrono::Local::now().date_naive();
    info!(%today, db = %config.db_path.display(), "budgetcal started");

    let result = match args.len() {
        1 => run::as_tui(&ledger, &config, today),
        2.. => run::as_cli(&args, &ledger, &config, today),
        _ => {
            eprintln!("Usage: budgetcal [command]");
            Ok(())
        }
    };

    finish(result, ledger.close())
}

/// A failure while running wins over a failure to close the database, which
/// is only logged in that case.
fn finish(result: Result<()>, closed: Result<()>) -> Result<()> {
    match (result, closed) {
        (Err(run_err), Err(close_err)) => {
            error!(error = %close_err, "failed to close ledger after an error");
            Err(run_err)
        }
        (Err(run_err), Ok(())) => Err(run_err),
        (Ok(()), closed) => closed,
    }
}
