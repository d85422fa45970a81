// Server-side views: view models, template rendering, notices, formatting

pub mod flash;
pub mod format;
pub mod model;
pub mod renderer;

pub use flash::Flash;
pub use model::{NavLink, ViewModel};
pub use renderer::{RenderError, Renderer, TeraRenderer};

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::error::AppError;
use crate::AppState;

impl AppState {
    /// Base view model for a page: title plus the classification navigation
    pub async fn view_model(&self, title: impl Into<String>) -> Result<ViewModel, AppError> {
        let classifications = self.inventory.list_classifications().await?;
        Ok(ViewModel::new(title, NavLink::from_classifications(&classifications)))
    }

    /// Render a view; every handler path ends here exactly once
    pub fn render(&self, view: &str, status: StatusCode, model: ViewModel) -> Response {
        match self.renderer.render(view, &model) {
            Ok(html) => {
                let mut response = (status, Html(html)).into_response();
                if model.consumed_flash() {
                    flash::append_clear(response.headers_mut());
                }
                response
            }
            Err(e) => {
                error!("Failed to render view {}: {}", view, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
