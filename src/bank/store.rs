//! Account storage. Accounts live in memory for the lifetime of the process.
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use tracing::debug;

use crate::bank::{Account, AccountId, BankError};

/// Storage contract consumed by the accounts service.
pub trait AccountStore: Send + Sync {
    /// Inserts a new account. Returns an error if the id is already taken.
    fn create(&self, account: Account) -> Result<(), BankError>;

    /// Looks up an account by id. Absence is not an error at this layer.
    fn get(&self, id: &str) -> Option<Account>;

    /// Overwrites the stored record for `account.id()`.
    fn update(&self, account: Account);

    /// Snapshot of every stored account, ordered by id.
    fn accounts(&self) -> Vec<Account>;
}

/// A store backed by a `HashMap` behind a read-write lock.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn create(&self, account: Account) -> Result<(), BankError> {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        if accounts.contains_key(account.id()) {
            return Err(BankError::DuplicateAccount(account.id().to_owned()));
        }
        debug!(account = account.id(), "account created");
        accounts.insert(account.id().to_owned(), account);
        Ok(())
    }

    fn get(&self, id: &str) -> Option<Account> {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn update(&self, account: Account) {
        self.accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(account.id().to_owned(), account);
    }

    fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        accounts
    }
}
