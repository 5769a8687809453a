use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{check_balances, check_transfer, Storage};
use crate::models::{
    dto::{NewAccount, UpdateAccount},
    error::Result,
    Account, Error,
};

/// `Storage` kept in a map, mirroring the column defaults of the `account` table
#[derive(Default)]
pub struct MemoryDatabase {
    rows: Mutex<Rows>,
    /// Number of storage calls served, so tests can assert a request never got this far
    calls: AtomicUsize,
}

#[derive(Default)]
struct Rows {
    accounts: BTreeMap<i32, Account>,
    next_id: i32,
}

impl MemoryDatabase {
    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for MemoryDatabase {
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn create_account(&self, new_account: &NewAccount) -> Result<Account> {
        self.touch();
        let mut rows = self.rows.lock().await;
        rows.next_id += 1;
        let id = rows.next_id;
        let account = Account {
            id,
            first_name: new_account.first_name.clone(),
            last_name: new_account.last_name.clone(),
            number: id,
            balance: id,
            created_at: Utc::now().naive_utc(),
        };
        rows.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>> {
        self.touch();
        Ok(self.rows.lock().await.accounts.get(&id).cloned())
    }

    async fn get_accounts(&self) -> Result<Vec<Account>> {
        self.touch();
        Ok(self.rows.lock().await.accounts.values().cloned().collect())
    }

    async fn delete_account(&self, id: i32) -> Result<bool> {
        self.touch();
        Ok(self.rows.lock().await.accounts.remove(&id).is_some())
    }

    async fn update_account(&self, id: i32, changes: &UpdateAccount) -> Result<Option<Account>> {
        self.touch();
        let mut rows = self.rows.lock().await;
        Ok(rows.accounts.get_mut(&id).map(|account| {
            account.first_name = changes.first_name.clone();
            account.last_name = changes.last_name.clone();
            account.clone()
        }))
    }

    async fn transfer(&self, from: i32, to: i32, amount: i32) -> Result<(Account, Account)> {
        self.touch();
        check_transfer(from, to, amount)?;
        let mut rows = self.rows.lock().await;
        let missing = |id: i32| Error::not_found(format!("Account {id} not found"));
        let source = rows.accounts.get(&from).ok_or_else(|| missing(from))?;
        let target = rows.accounts.get(&to).ok_or_else(|| missing(to))?;
        check_balances(source, target, amount)?;

        let mut debited = source.clone();
        let mut credited = target.clone();
        debited.balance -= amount;
        credited.balance += amount;
        rows.accounts.insert(from, debited.clone());
        rows.accounts.insert(to, credited.clone());
        Ok((debited, credited))
    }
}
