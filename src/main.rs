use atm_ledger::application::teller::{Response, Teller};
use atm_ledger::config::Config;
use atm_ledger::domain::ports::LedgerRef;
use atm_ledger::infrastructure::in_memory::InMemoryLedger;
use atm_ledger::interfaces::csv::request_reader::RequestReader;
use atm_ledger::interfaces::json::response_writer::ResponseWriter;
use atm_ledger::telemetry;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Read};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    telemetry::init(config.env);

    info!(env = %config.env, "starting ATM ledger");
    debug!("debug messages are enabled");

    let ledger: LedgerRef = Arc::new(InMemoryLedger::with_lock_timeout(config.lock_timeout()));
    let teller = Teller::new(ledger);

    let source: Box<dyn Read> = match &config.input {
        Some(path) => Box::new(File::open(path).into_diagnostic()?),
        None => Box::new(io::stdin().lock()),
    };
    let reader = RequestReader::new(source);

    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    let mut handled = 0u64;
    for (request_id, request) in (1u64..).zip(reader.requests()) {
        let response = match request {
            Ok(request) => teller.handle(request_id, request).await,
            Err(e) => {
                error!(request_id, error = %e, "failed to decode request");
                Response::error(request_id, format!("failed to decode request: {e}"))
            }
        };
        writer.write_response(&response)?;
        handled += 1;
    }
    writer.flush()?;

    match teller.ledger().len().await {
        Ok(accounts) => info!(requests = handled, accounts, "ATM ledger stopped"),
        Err(e) => warn!(requests = handled, error = %e, "ATM ledger stopped"),
    }
    Ok(())
}
