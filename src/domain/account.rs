use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};

/// Permanent identifier of an account: its position in the ledger.
///
/// Assigned densely from 0 at creation time and never reused or reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub usize);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The amount of money held by an account.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(pub f64);

impl Balance {
    pub const ZERO: Self = Self(0.0);

    pub fn new(amount: f64) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// A validated operation amount: finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(LedgerError::InvalidAmount(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

/// A single named balance cell.
///
/// The balance lives behind the account's own guard. Every operation holds the
/// guard for its whole duration, so a check-then-act sequence such as a
/// withdrawal can never interleave with another operation on the same account.
#[derive(Debug)]
pub struct Account {
    name: String,
    balance: Mutex<Balance>,
    lock_timeout: Option<Duration>,
}

impl Account {
    /// Creates a zero-balance account that waits indefinitely for its guard.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_lock_timeout(name, None)
    }

    /// Creates a zero-balance account whose operations fail with
    /// [`LedgerError::Timeout`] if the guard is not acquired within `timeout`.
    pub fn with_lock_timeout(name: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            name: name.into(),
            balance: Mutex::new(Balance::ZERO),
            lock_timeout: timeout,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    async fn lock(&self) -> Result<MutexGuard<'_, Balance>> {
        match self.lock_timeout {
            Some(limit) => tokio::time::timeout(limit, self.balance.lock())
                .await
                .map_err(|_| LedgerError::Timeout(limit)),
            None => Ok(self.balance.lock().await),
        }
    }

    /// Holds the guard until the returned value is dropped.
    #[cfg(test)]
    pub(crate) async fn hold(&self) -> MutexGuard<'_, Balance> {
        self.balance.lock().await
    }

    /// Adds `amount` to the balance and returns the new balance.
    pub async fn deposit(&self, amount: f64) -> Result<Balance> {
        let amount = Amount::new(amount)?;
        let mut balance = self.lock().await?;

        let updated = *balance + amount.into();
        if !updated.value().is_finite() {
            return Err(LedgerError::InvalidAmount(amount.value()));
        }
        *balance = updated;
        Ok(updated)
    }

    /// Subtracts `amount` if the balance covers it, otherwise leaves the
    /// balance untouched and fails with [`LedgerError::InsufficientFunds`].
    pub async fn withdraw(&self, amount: f64) -> Result<Balance> {
        let amount = Amount::new(amount)?;
        let mut balance = self.lock().await?;

        let requested = Balance::from(amount);
        if *balance < requested {
            return Err(LedgerError::InsufficientFunds {
                requested: amount.value(),
                available: balance.value(),
            });
        }
        *balance = *balance - requested;
        Ok(*balance)
    }

    pub async fn balance(&self) -> Result<Balance> {
        Ok(*self.lock().await?)
    }
}
