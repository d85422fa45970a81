// Authentication data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account privilege level stored in the `account_type` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_type")]
pub enum Role {
    Client,
    Employee,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Client => "Client",
            Role::Employee => "Employee",
            Role::Admin => "Admin",
        };
        f.write_str(name)
    }
}
