// Credential store: account persistence keyed by email

use async_trait::async_trait;
use sqlx::PgPool;

use crate::accounts::models::Account;
use crate::auth::models::Role;
use crate::store::StoreError;

/// Account persistence consumed by the account handlers and validation rules.
///
/// Lookup misses are `Ok(None)`; a write the store refused is `Ok(None)` /
/// `Ok(false)` or a `StoreError`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn find_by_id(&self, account_id: i32) -> Result<Option<Account>, StoreError>;

    /// Insert a Client account; email uniqueness is enforced here too
    async fn register(
        &self,
        firstname: &str,
        lastname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Account>, StoreError>;

    async fn update_profile(
        &self,
        firstname: &str,
        lastname: &str,
        email: &str,
        account_id: i32,
    ) -> Result<Option<Account>, StoreError>;

    async fn update_password(&self, password_hash: &str, account_id: i32)
        -> Result<bool, StoreError>;

    async fn delete(&self, account_id: i32) -> Result<bool, StoreError>;

    async fn list_by_role(&self, role: Role) -> Result<Vec<Account>, StoreError>;
}

const ACCOUNT_COLUMNS: &str =
    "account_id, account_firstname, account_lastname, account_email, account_password, account_type";

/// PostgreSQL account store
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM account WHERE LOWER(account_email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM account WHERE LOWER(account_email) = LOWER($1)",
            ACCOUNT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_id(&self, account_id: i32) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM account WHERE account_id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn register(
        &self,
        firstname: &str,
        lastname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO account (account_firstname, account_lastname, account_email, account_password, account_type) \
             VALUES ($1, $2, LOWER($3), $4, 'Client') RETURNING {}",
            ACCOUNT_COLUMNS
        ))
        .bind(firstname)
        .bind(lastname)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn update_profile(
        &self,
        firstname: &str,
        lastname: &str,
        email: &str,
        account_id: i32,
    ) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "UPDATE account SET account_firstname = $1, account_lastname = $2, account_email = LOWER($3) \
             WHERE account_id = $4 RETURNING {}",
            ACCOUNT_COLUMNS
        ))
        .bind(firstname)
        .bind(lastname)
        .bind(email)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn update_password(
        &self,
        password_hash: &str,
        account_id: i32,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE account SET account_password = $1 WHERE account_id = $2")
            .bind(password_hash)
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, account_id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM account WHERE account_id = $1")
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<Account>, StoreError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM account WHERE account_type = $1 ORDER BY account_lastname, account_firstname",
            ACCOUNT_COLUMNS
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }
}
