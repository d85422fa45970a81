// Error handling module
// Process-wide error type and the error-page middleware that renders it

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::auth::AuthError;
use crate::store::StoreError;
use crate::views::{NavLink, RenderError, ViewModel};
use crate::AppState;

pub const CRASH_MESSAGE: &str = "Oh no! There was a crash. Maybe try a different route?";
pub const NOT_FOUND_MESSAGE: &str = "Sorry, we appear to have lost that page.";

/// Main error type for request handling
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Marker left on a response that should be replaced by the error view.
///
/// Carries only the client-safe message.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorPage {
    pub fn response(status: StatusCode, message: impl Into<String>) -> Response {
        let page = ErrorPage {
            status,
            message: message.into(),
        };
        let mut response = (status, page.message.clone()).into_response();
        response.extensions_mut().insert(page);
        response
    }

    pub fn title(&self) -> String {
        match self.status {
            StatusCode::NOT_FOUND => "404 Not Found".to_string(),
            StatusCode::FORBIDDEN => "403 Forbidden".to_string(),
            status => format!("{} Server Error", status.as_u16()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound { resource } => {
                debug!("Resource not found: {}", resource);
                ErrorPage::response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
            }
            AppError::Auth(err) => err.into_response(),
            AppError::Store(err) => {
                error!("Store error: {:?}", err);
                ErrorPage::response(StatusCode::INTERNAL_SERVER_ERROR, CRASH_MESSAGE)
            }
            AppError::Render(err) => {
                error!("Render error: {}", err);
                ErrorPage::response(StatusCode::INTERNAL_SERVER_ERROR, CRASH_MESSAGE)
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ErrorPage::response(StatusCode::INTERNAL_SERVER_ERROR, CRASH_MESSAGE)
            }
        }
    }
}

/// Middleware: replace marked error responses with the rendered error view
pub async fn render_error_pages(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    // The error view must render even when the store is down
    let model = match state.view_model(page.title()).await {
        Ok(model) => model,
        Err(_) => ViewModel::new(page.title(), NavLink::from_classifications(&[])),
    };
    let model = model.with_data("message", &page.message);
    state.render("errors/error", page.status, model)
}

/// Parse a numeric path segment; anything else is a missing page
pub fn parse_path_id(raw: &str, resource: &'static str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(AppError::NotFound { resource })
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound { resource: "Page" }
}
