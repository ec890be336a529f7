use crate::domain::account::{AccountId, Balance};
use crate::domain::ports::LedgerRef;
use crate::domain::request::{Command, Request};
use crate::error::{LedgerError, Result};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    Error,
}

/// The outcome of a single request, ready to be rendered.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Response {
    pub request_id: u64,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<AccountId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Balance>,
}

impl Response {
    pub fn ok(request_id: u64, message: String) -> Self {
        Self {
            request_id,
            status: Status::Ok,
            message: Some(message),
            error: None,
            id: None,
            balance: None,
        }
    }

    pub fn error(request_id: u64, error: impl Into<String>) -> Self {
        Self {
            request_id,
            status: Status::Error,
            message: None,
            error: Some(error.into()),
            id: None,
            balance: None,
        }
    }

    fn with_account(mut self, id: AccountId, balance: Option<Balance>) -> Self {
        self.id = Some(id);
        self.balance = balance;
        self
    }
}

/// Translates requests into ledger calls.
///
/// The teller awaits every ledger call on the caller's own task; concurrency
/// comes from many tasks sharing one teller, not from the teller itself.
pub struct Teller {
    ledger: LedgerRef,
}

impl Teller {
    pub fn new(ledger: LedgerRef) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &LedgerRef {
        &self.ledger
    }

    /// Handles one request. Failures are reported in the response, never
    /// returned as errors.
    pub async fn handle(&self, request_id: u64, request: Request) -> Response {
        let op = request.op;
        match self.execute(request_id, request).await {
            Ok(response) => {
                info!(request_id, %op, "request handled");
                response
            }
            Err(e) => {
                match &e {
                    LedgerError::Timeout(_) => {
                        warn!(request_id, %op, error = %e, "request timed out")
                    }
                    LedgerError::Io(_) | LedgerError::Csv(_) | LedgerError::Json(_) => {
                        error!(request_id, %op, error = %e, "request failed")
                    }
                    _ => info!(request_id, %op, error = %e, "request rejected"),
                }
                Response::error(request_id, e.to_string())
            }
        }
    }

    async fn execute(&self, request_id: u64, request: Request) -> Result<Response> {
        let response = match Command::try_from(request)? {
            Command::CreateAccount { name } => {
                let id = self.ledger.create_account(&name).await?;
                Response::ok(request_id, format!("account {name} with id {id} created"))
                    .with_account(id, Some(Balance::ZERO))
            }
            Command::Deposit { id, amount } => {
                let balance = self.ledger.deposit(id, amount).await?;
                Response::ok(
                    request_id,
                    format!("made deposit {amount:.6} to account {id}. new balance: {balance}"),
                )
                .with_account(id, Some(balance))
            }
            Command::Withdraw { id, amount } => {
                let balance = self.ledger.withdraw(id, amount).await?;
                Response::ok(
                    request_id,
                    format!("withdrawn {amount:.6} from account {id}. new balance: {balance}"),
                )
                .with_account(id, Some(balance))
            }
            Command::Balance { id } => {
                let balance = self.ledger.balance(id).await?;
                Response::ok(
                    request_id,
                    format!("current balance of an account {id}: {balance}"),
                )
                .with_account(id, Some(balance))
            }
        };
        Ok(response)
    }
}
