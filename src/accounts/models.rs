// Account data models

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::models::Role;
use crate::validation::parse_str;

const REDACTED: &str = "<redacted>";

/// Account database model
#[derive(Clone, FromRow)]
pub struct Account {
    pub account_id: i32,
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
    pub account_password: String,
    pub account_type: Role,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("account_id", &self.account_id)
            .field("account_firstname", &self.account_firstname)
            .field("account_lastname", &self.account_lastname)
            .field("account_email", &self.account_email)
            .field("account_password", &REDACTED)
            .field("account_type", &self.account_type)
            .finish()
    }
}

/// Account fields safe to show in views (excludes the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub account_id: i32,
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
    pub account_type: Role,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.account_id,
            account_firstname: account.account_firstname,
            account_lastname: account.account_lastname,
            account_email: account.account_email,
            account_type: account.account_type,
        }
    }
}

/// Registration form, after validation
#[derive(Deserialize)]
pub struct RegisterForm {
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
    pub account_password: String,
}

/// Login form, after validation
#[derive(Deserialize)]
pub struct LoginForm {
    pub account_email: String,
    pub account_password: String,
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("account_firstname", &self.account_firstname)
            .field("account_lastname", &self.account_lastname)
            .field("account_email", &self.account_email)
            .field("account_password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("account_email", &self.account_email)
            .field("account_password", &REDACTED)
            .finish()
    }
}

/// Profile update form, after validation
#[derive(Debug, Deserialize)]
pub struct UpdateAccountForm {
    #[serde(deserialize_with = "parse_str")]
    pub account_id: i32,
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
}

/// Password change form, after validation
#[derive(Deserialize)]
pub struct UpdatePasswordForm {
    #[serde(deserialize_with = "parse_str")]
    pub account_id: i32,
    pub account_password: String,
}

impl fmt::Debug for UpdatePasswordForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdatePasswordForm")
            .field("account_id", &self.account_id)
            .field("account_password", &REDACTED)
            .finish()
    }
}

/// Delete confirmation form; the echoed account fields are the re-confirmation
#[derive(Debug, Deserialize)]
pub struct DeleteAccountForm {
    #[serde(deserialize_with = "parse_str")]
    pub account_id: i32,
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
}
