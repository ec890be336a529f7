use crate::domain::account::AccountId;
use miette::Diagnostic;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum LedgerError {
    #[error("account {0} not found")]
    #[diagnostic(code(ledger::account_not_found))]
    AccountNotFound(AccountId),

    #[error("account with username {0:?} already exists")]
    #[diagnostic(code(ledger::account_exists))]
    AccountExists(String),

    #[error("insufficient funds: requested {requested}, available {available}")]
    #[diagnostic(code(ledger::insufficient_funds))]
    InsufficientFunds { requested: f64, available: f64 },

    #[error("invalid amount: {0}")]
    #[diagnostic(
        code(ledger::invalid_amount),
        help("amounts must be finite and non-negative")
    )]
    InvalidAmount(f64),

    #[error("invalid account name: {0}")]
    #[diagnostic(code(ledger::invalid_name))]
    InvalidName(String),

    #[error("timed out after {0:?} waiting for lock")]
    #[diagnostic(code(ledger::timeout))]
    Timeout(Duration),

    #[error("malformed request: {0}")]
    #[diagnostic(code(ledger::malformed_request))]
    MalformedRequest(String),

    #[error("CSV error: {0}")]
    #[diagnostic(code(ledger::csv))]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(ledger::io))]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(ledger::json))]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
