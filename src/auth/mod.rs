// Authentication module
// Password hashing, signed session tokens carried in the `jwt` cookie, and the
// access guard (authentication + authorization gates) for protected routes

pub mod cookie;
pub mod error;
pub mod middleware;
pub mod models;
pub mod password;
pub mod permissions;
pub mod token;

pub use cookie::SessionCookie;
pub use error::AuthError;
pub use middleware::{authentication_gate, authorization_gate, AuthenticatedAccount, OptionalAccount};
pub use models::Role;
pub use password::PasswordService;
pub use permissions::RoutePermissions;
pub use token::{SessionClaims, TokenService};
