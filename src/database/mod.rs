use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{debug, info};

use crate::models::{
    dto::{NewAccount, UpdateAccount},
    error::Result,
    Account, Error,
};

#[cfg(test)]
pub mod memory;

const ACCOUNT_COLUMNS: &str = "id, first_name, last_name, number, balance, created_at";

/// Connects to a PostgreSQL database with the given `db_url`, returning a connection pool for accessing it
pub async fn connect_sqlx(db_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .idle_timeout(Duration::from_secs(30))
        .max_connections(32)
        .min_connections(4)
        .connect(db_url)
        .await
}

/// Data access over the `account` table
#[async_trait]
pub trait Storage: Send + Sync {
    /// Creates the `account` table if it does not exist yet
    async fn init(&self) -> Result<()>;
    async fn create_account(&self, new_account: &NewAccount) -> Result<Account>;
    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>>;
    async fn get_accounts(&self) -> Result<Vec<Account>>;
    /// `Ok(false)` means no row had this id
    async fn delete_account(&self, id: i32) -> Result<bool>;
    async fn update_account(&self, id: i32, changes: &UpdateAccount) -> Result<Option<Account>>;
    /// Moves `amount` from one balance to another, all or nothing.
    /// Returns the debited and credited accounts, in that order.
    async fn transfer(&self, from: i32, to: i32, amount: i32) -> Result<(Account, Account)>;
}

/// Rejects transfers that can never succeed, before any row is touched
pub fn check_transfer(from: i32, to: i32, amount: i32) -> Result<()> {
    if amount <= 0 {
        return Err(Error::bad_request("transfer amount must be positive"));
    }
    if from == to {
        return Err(Error::bad_request(
            "cannot transfer between the same account",
        ));
    }
    Ok(())
}

/// Checks the locked source and target rows of a transfer
pub fn check_balances(source: &Account, target: &Account, amount: i32) -> Result<()> {
    if source.balance < amount {
        return Err(Error::bad_request(format!(
            "insufficient funds in account {}",
            source.id
        )));
    }
    if target.balance.checked_add(amount).is_none() {
        return Err(Error::bad_request(format!(
            "balance of account {} would overflow",
            target.id
        )));
    }
    Ok(())
}

pub struct PostgreDatabase {
    sqlx_db: PgPool,
}

impl PostgreDatabase {
    pub fn new(sqlx_db: PgPool) -> Self {
        PostgreDatabase { sqlx_db }
    }
}

#[async_trait]
impl Storage for PostgreDatabase {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS account(
                id serial primary key,
                first_name varchar(50),
                last_name varchar(50),
                number serial,
                balance serial,
                created_at timestamp
            )
            "#,
        )
        .execute(&self.sqlx_db)
        .await?;
        info!("account table ready");
        Ok(())
    }

    /// Insert a new account; id, number and balance come from the column defaults
    async fn create_account(&self, new_account: &NewAccount) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO account (first_name, last_name, created_at)
            VALUES ($1, $2, $3)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&new_account.first_name)
        .bind(&new_account.last_name)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.sqlx_db)
        .await?;
        Ok(account)
    }

    /// Get an account by ID
    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.sqlx_db)
        .await?;
        Ok(row)
    }

    async fn get_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account ORDER BY id"
        ))
        .fetch_all(&self.sqlx_db)
        .await?;
        Ok(rows)
    }

    async fn delete_account(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&self.sqlx_db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_account(&self, id: i32, changes: &UpdateAccount) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE account
            SET first_name = $1,
                last_name = $2
            WHERE id = $3
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(id)
        .fetch_optional(&self.sqlx_db)
        .await?;
        Ok(row)
    }

    async fn transfer(&self, from: i32, to: i32, amount: i32) -> Result<(Account, Account)> {
        check_transfer(from, to, amount)?;

        // Dropping `tx` without commit rolls everything back
        let mut tx = self.sqlx_db.begin().await?;

        // Lock in id order so concurrent opposite transfers cannot deadlock
        let locked = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = ANY($1) ORDER BY id FOR UPDATE"
        ))
        .bind(vec![from, to])
        .fetch_all(&mut *tx)
        .await?;

        let find = |id: i32| {
            locked
                .iter()
                .find(|account| account.id == id)
                .ok_or_else(|| Error::not_found(format!("Account {id} not found")))
        };
        check_balances(find(from)?, find(to)?, amount)?;

        let update = format!(
            "UPDATE account SET balance = balance + $1 WHERE id = $2 RETURNING {ACCOUNT_COLUMNS}"
        );
        let debited = sqlx::query_as::<_, Account>(&update)
            .bind(-amount)
            .bind(from)
            .fetch_one(&mut *tx)
            .await?;
        let credited = sqlx::query_as::<_, Account>(&update)
            .bind(amount)
            .bind(to)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(from, to, amount, "transfer committed");
        Ok((debited, credited))
    }
}
