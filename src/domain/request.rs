use super::account::AccountId;
use crate::error::LedgerError;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Deposit,
    Withdraw,
    Balance,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Operation::Create => "create",
            Operation::Deposit => "deposit",
            Operation::Withdraw => "withdraw",
            Operation::Balance => "balance",
        };
        f.write_str(op)
    }
}

/// A raw request as it arrives from the outside world.
///
/// Fields an operation does not use may be absent.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Request {
    pub op: Operation,
    pub id: Option<AccountId>,
    pub name: Option<String>,
    pub amount: Option<f64>,
}

/// A request that carries every field its operation needs.
#[derive(Debug, PartialEq, Clone)]
pub enum Command {
    CreateAccount { name: String },
    Deposit { id: AccountId, amount: f64 },
    Withdraw { id: AccountId, amount: f64 },
    Balance { id: AccountId },
}

impl TryFrom<Request> for Command {
    type Error = LedgerError;

    fn try_from(request: Request) -> Result<Self, Self::Error> {
        let missing = |field: &str| {
            LedgerError::MalformedRequest(format!("{} missing {}", request.op, field))
        };

        match request.op {
            Operation::Create => {
                let name = request.name.clone().ok_or_else(|| missing("name"))?;
                Ok(Command::CreateAccount { name })
            }
            Operation::Deposit => Ok(Command::Deposit {
                id: request.id.ok_or_else(|| missing("id"))?,
                amount: request.amount.ok_or_else(|| missing("amount"))?,
            }),
            Operation::Withdraw => Ok(Command::Withdraw {
                id: request.id.ok_or_else(|| missing("id"))?,
                amount: request.amount.ok_or_else(|| missing("amount"))?,
            }),
            Operation::Balance => Ok(Command::Balance {
                id: request.id.ok_or_else(|| missing("id"))?,
            }),
        }
    }
}
