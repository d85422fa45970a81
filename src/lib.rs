// Dealership inventory web application
// Server-rendered account and inventory pages over PostgreSQL

pub mod accounts;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod inventory;
pub mod store;
pub mod validation;
pub mod views;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use accounts::{handlers as account, AccountStore};
use auth::{
    authentication_gate, authorization_gate, PasswordService, RoutePermissions, SessionCookie,
    TokenService,
};
use config::{Environment, SigningKey};
use error::{not_found, render_error_pages};
use inventory::{handlers as inv, InventoryStore};
use views::Renderer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub inventory: Arc<dyn InventoryStore>,
    pub tokens: Arc<TokenService>,
    pub hasher: PasswordService,
    pub renderer: Arc<dyn Renderer>,
    pub cookie: SessionCookie,
    pub permissions: RoutePermissions,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        inventory: Arc<dyn InventoryStore>,
        renderer: Arc<dyn Renderer>,
        signing_key: SigningKey,
        environment: Environment,
    ) -> Self {
        let tokens = TokenService::new(signing_key);
        let cookie = SessionCookie::new(environment, tokens.ttl_seconds());
        Self {
            accounts,
            inventory,
            tokens: Arc::new(tokens),
            hasher: PasswordService::new(),
            renderer,
            cookie,
            permissions: RoutePermissions::default(),
        }
    }
}

/// Build the application router.
///
/// Protected routes pass the authentication gate, then the authorization
/// gate, before any extractor or handler runs.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/account/", get(account::management_view))
        .route("/account/update/:account_id", get(account::update_view))
        .route("/account/update", post(account::update))
        .route("/account/update-password", post(account::update_password))
        .route("/account/employees", get(account::employees_view))
        .route("/account/delete/:account_id", get(account::delete_view))
        .route("/account/delete", post(account::delete))
        .route("/inv/", get(inv::management_view))
        .route(
            "/inv/add-classification",
            get(inv::add_classification_view).post(inv::add_classification),
        )
        .route(
            "/inv/add-inventory",
            get(inv::add_inventory_view).post(inv::add_inventory),
        )
        .route("/inv/edit/:inv_id", get(inv::edit_inventory_view))
        .route("/inv/update", post(inv::update_inventory))
        .route("/inv/delete/:inv_id", get(inv::delete_inventory_view))
        .route("/inv/delete", post(inv::delete_inventory))
        // Added last so it runs first
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authorization_gate,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authentication_gate,
        ));

    Router::new()
        .route("/", get(inv::home))
        .route("/inv/type/:classification_id", get(inv::classification_view))
        .route("/inv/detail/:inv_id", get(inv::vehicle_view))
        .route("/account/login", get(account::login_view).post(account::login))
        .route(
            "/account/register",
            get(account::register_view).post(account::register),
        )
        .route("/account/logout", get(account::logout))
        .merge(protected)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            render_error_pages,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
