use super::account::{AccountId, Balance};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The contract the request-handling layer depends on.
///
/// Implementations own every account; callers refer to accounts only through
/// the identifier returned by [`Ledger::create_account`].
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn create_account(&self, name: &str) -> Result<AccountId>;
    async fn deposit(&self, id: AccountId, amount: f64) -> Result<Balance>;
    async fn withdraw(&self, id: AccountId, amount: f64) -> Result<Balance>;
    async fn balance(&self, id: AccountId) -> Result<Balance>;
    /// Number of accounts created so far.
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

pub type LedgerRef = Arc<dyn Ledger>;
