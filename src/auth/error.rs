// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::auth::{cookie::SessionCookie, models::Role};
use crate::error::ErrorPage;
use crate::views::flash;

pub const LOGIN_PATH: &str = "/account/login";
pub const LOGIN_REQUIRED_NOTICE: &str = "Please log in.";

/// Authentication and authorization error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    /// Role is not in the route's allow-list
    #[error("Insufficient permissions: role '{actual}' is not allowed")]
    InsufficientPermissions { allowed: Vec<Role>, actual: Role },

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Password hashing error")]
    PasswordHashError,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::ExpiredToken => {
                StatusCode::SEE_OTHER
            }
            AuthError::InsufficientPermissions { .. } => StatusCode::FORBIDDEN,
            AuthError::TokenGenerationError(_) | AuthError::PasswordHashError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// True for the failures of the authentication gate
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::ExpiredToken
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::MissingToken => {
                warn!("Missing session token for protected route");
            }
            AuthError::InvalidToken => warn!("Invalid session token"),
            AuthError::ExpiredToken => warn!("Expired session token"),
            AuthError::InsufficientPermissions { allowed, actual } => {
                warn!("Authorization failed: role '{}' not in {:?}", actual, allowed);
                return ErrorPage::response(
                    StatusCode::FORBIDDEN,
                    "Access forbidden. Your account type may not view this page.",
                );
            }
            AuthError::TokenGenerationError(msg) => {
                error!("Token generation error: {}", msg);
                return ErrorPage::response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Sorry, there was an error processing the request.",
                );
            }
            AuthError::PasswordHashError => {
                error!("Password hashing error");
                return ErrorPage::response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Sorry, there was an error processing the request.",
                );
            }
        }

        // Authentication gate failures: drop the stale cookie and send to login
        let mut response = flash::redirect_with_notices(LOGIN_PATH, &[LOGIN_REQUIRED_NOTICE]);
        SessionCookie::append_clear(response.headers_mut());
        response
    }
}
