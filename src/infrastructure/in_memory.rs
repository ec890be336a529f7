use crate::domain::account::{Account, AccountId, Balance};
use crate::domain::ports::Ledger;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct Registry {
    accounts: Vec<Arc<Account>>,
    names: HashMap<String, AccountId>,
}

/// An append-only, in-memory ledger of accounts.
///
/// The account sequence sits behind a structural `RwLock` that is held
/// exclusively only by `create_account`. Lookups hold it shared just long
/// enough to clone the account's `Arc`, then release it before awaiting the
/// account's own guard, so operations on different accounts never wait on
/// each other. Accounts are boxed in `Arc`s, which keeps them in place when
/// the sequence grows.
///
/// `Clone` shares the underlying ledger.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    registry: Arc<RwLock<Registry>>,
    lock_timeout: Option<Duration>,
}

impl InMemoryLedger {
    /// Creates a new, empty ledger whose operations wait indefinitely for locks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty ledger whose operations fail with
    /// [`LedgerError::Timeout`] when a lock is not acquired within `timeout`.
    pub fn with_lock_timeout(timeout: Option<Duration>) -> Self {
        Self {
            registry: Arc::default(),
            lock_timeout: timeout,
        }
    }

    async fn read(&self) -> Result<RwLockReadGuard<'_, Registry>> {
        match self.lock_timeout {
            Some(limit) => tokio::time::timeout(limit, self.registry.read())
                .await
                .map_err(|_| LedgerError::Timeout(limit)),
            None => Ok(self.registry.read().await),
        }
    }

    async fn write(&self) -> Result<RwLockWriteGuard<'_, Registry>> {
        match self.lock_timeout {
            Some(limit) => tokio::time::timeout(limit, self.registry.write())
                .await
                .map_err(|_| LedgerError::Timeout(limit)),
            None => Ok(self.registry.write().await),
        }
    }

    /// Resolves `id` to its account, checking bounds first.
    async fn resolve(&self, id: AccountId) -> Result<Arc<Account>> {
        let registry = self.read().await?;
        registry
            .accounts
            .get(id.0)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(id))
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn create_account(&self, name: &str) -> Result<AccountId> {
        if name.trim().is_empty() {
            return Err(LedgerError::InvalidName("username is empty".to_string()));
        }

        let mut registry = self.write().await?;
        if registry.names.contains_key(name) {
            return Err(LedgerError::AccountExists(name.to_string()));
        }

        let id = AccountId(registry.accounts.len());
        registry
            .accounts
            .push(Arc::new(Account::with_lock_timeout(name, self.lock_timeout)));
        registry.names.insert(name.to_string(), id);

        debug!(%id, name, "account created");
        Ok(id)
    }

    async fn deposit(&self, id: AccountId, amount: f64) -> Result<Balance> {
        let account = self.resolve(id).await?;
        let balance = account.deposit(amount).await?;
        debug!(%id, amount, %balance, "deposit applied");
        Ok(balance)
    }

    async fn withdraw(&self, id: AccountId, amount: f64) -> Result<Balance> {
        let account = self.resolve(id).await?;
        let balance = account.withdraw(amount).await?;
        debug!(%id, amount, %balance, "withdrawal applied");
        Ok(balance)
    }

    async fn balance(&self, id: AccountId) -> Result<Balance> {
        let balance = self.resolve(id).await?.balance().await?;
        debug!(%id, %balance, "balance read");
        Ok(balance)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.read().await?.accounts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_account_gets_id_zero() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.is_empty().await.unwrap());

        assert_eq!(ledger.create_account("alice").await.unwrap(), AccountId(0));
        assert_eq!(ledger.create_account("bob").await.unwrap(), AccountId(1));
        assert_eq!(ledger.len().await.unwrap(), 2);
        assert_eq!(ledger.balance(AccountId(1)).await.unwrap(), Balance::ZERO);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let ledger = InMemoryLedger::new();
        ledger.create_account("alice").await.unwrap();

        assert!(matches!(
            ledger.create_account("alice").await,
            Err(LedgerError::AccountExists(name)) if name == "alice"
        ));

        // The rejected create does not consume an identifier.
        assert_eq!(ledger.create_account("bob").await.unwrap(), AccountId(1));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let ledger = InMemoryLedger::new();
        assert!(matches!(
            ledger.create_account("").await,
            Err(LedgerError::InvalidName(_))
        ));
        assert!(matches!(
            ledger.create_account("   ").await,
            Err(LedgerError::InvalidName(_))
        ));
        assert!(ledger.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_id_mutates_nothing() {
        let ledger = InMemoryLedger::new();
        let a = ledger.create_account("alice").await.unwrap();
        ledger.create_account("bob").await.unwrap();
        ledger.deposit(a, 10.0).await.unwrap();

        let unknown = AccountId(5);
        assert!(matches!(
            ledger.deposit(unknown, 1.0).await,
            Err(LedgerError::AccountNotFound(id)) if id == unknown
        ));
        assert!(matches!(
            ledger.withdraw(unknown, 1.0).await,
            Err(LedgerError::AccountNotFound(_))
        ));
        assert!(matches!(
            ledger.balance(unknown).await,
            Err(LedgerError::AccountNotFound(_))
        ));

        assert_eq!(ledger.len().await.unwrap(), 2);
        assert_eq!(ledger.balance(a).await.unwrap(), Balance::new(10.0));
        assert_eq!(ledger.balance(AccountId(1)).await.unwrap(), Balance::ZERO);
    }

    #[tokio::test]
    async fn test_insufficient_funds_propagated() {
        let ledger = InMemoryLedger::new();
        let id = ledger.create_account("alice").await.unwrap();
        ledger.deposit(id, 5.0).await.unwrap();

        assert!(matches!(
            ledger.withdraw(id, 6.0).await,
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(ledger.balance(id).await.unwrap(), Balance::new(5.0));
    }

    #[tokio::test]
    async fn test_bob_scenario() {
        let ledger = InMemoryLedger::new();
        let bob = ledger.create_account("bob").await.unwrap();
        assert_eq!(bob, AccountId(0));

        assert_eq!(ledger.deposit(bob, 100.0).await.unwrap(), Balance::new(100.0));
        assert_eq!(ledger.withdraw(bob, 40.0).await.unwrap(), Balance::new(60.0));
        assert!(matches!(
            ledger.withdraw(bob, 1000.0).await,
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(ledger.balance(bob).await.unwrap(), Balance::new(60.0));
    }

    #[tokio::test]
    async fn test_create_times_out_while_registry_is_held() {
        let ledger = InMemoryLedger::with_lock_timeout(Some(Duration::from_millis(20)));
        let id = ledger.create_account("alice").await.unwrap();

        let held = ledger.registry.write().await;
        assert!(matches!(
            ledger.create_account("bob").await,
            Err(LedgerError::Timeout(_))
        ));
        assert!(matches!(
            ledger.deposit(id, 1.0).await,
            Err(LedgerError::Timeout(_))
        ));
        drop(held);

        assert_eq!(ledger.create_account("bob").await.unwrap(), AccountId(1));
        assert_eq!(ledger.balance(id).await.unwrap(), Balance::ZERO);
    }

    #[tokio::test]
    async fn test_len_times_out_while_registry_is_held() {
        let ledger = InMemoryLedger::with_lock_timeout(Some(Duration::from_millis(20)));
        ledger.create_account("alice").await.unwrap();

        let held = ledger.registry.write().await;
        assert!(matches!(ledger.len().await, Err(LedgerError::Timeout(_))));
        assert!(matches!(
            ledger.is_empty().await,
            Err(LedgerError::Timeout(_))
        ));
        drop(held);

        assert_eq!(ledger.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_held_account_does_not_block_others() {
        let ledger = InMemoryLedger::with_lock_timeout(Some(Duration::from_millis(50)));
        let a = ledger.create_account("alice").await.unwrap();
        let b = ledger.create_account("bob").await.unwrap();

        let alice = ledger.resolve(a).await.unwrap();
        let held = alice.hold().await;

        assert_eq!(ledger.deposit(b, 1.0).await.unwrap(), Balance::new(1.0));
        assert_eq!(ledger.balance(b).await.unwrap(), Balance::new(1.0));
        assert_eq!(ledger.create_account("carol").await.unwrap(), AccountId(2));
        assert!(matches!(
            ledger.deposit(a, 1.0).await,
            Err(LedgerError::Timeout(_))
        ));

        drop(held);
        assert_eq!(ledger.deposit(a, 1.0).await.unwrap(), Balance::new(1.0));
    }

    #[tokio::test]
    async fn test_clones_share_accounts() {
        let ledger = InMemoryLedger::new();
        let other = ledger.clone();

        let id = ledger.create_account("alice").await.unwrap();
        other.deposit(id, 3.0).await.unwrap();
        assert_eq!(ledger.balance(id).await.unwrap(), Balance::new(3.0));
    }
}
