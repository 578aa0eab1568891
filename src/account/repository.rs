use anyhow::{Result, bail};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::model::Account;

/// Where accounts live. A durable store slots in behind the same two operations.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find(&self, id: &str) -> Result<Option<Account>>;
    async fn update(&self, id: &str, balance: Decimal) -> Result<()>;
}

/// Accounts held in process memory, shared between connections.
///
/// Each call takes the lock on its own; nothing is held between a `find` and the `update`
/// that follows it, so two top-ups racing on one account can lose an update.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.id.clone(), account))
            .collect();
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
        }
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find(&self, id: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(id).cloned())
    }

    async fn update(&self, id: &str, balance: Decimal) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(id) {
            Some(account) => {
                account.balance = Some(balance);
                Ok(())
            }
            None => bail!("account '{}' does not exist", id),
        }
    }
}
