// Account module
// Registration, login/logout, profile and password updates, and
// administrator account management

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{Account, AccountSummary};
pub use repository::{AccountStore, PgAccountStore};
