// Access guard: authentication and authorization gates for protected routes

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, MatchedPath, State},
    http::{request::Parts, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::debug;

use crate::auth::{
    cookie::SessionCookie,
    error::AuthError,
    permissions::RoutePermissions,
    token::{SessionClaims, TokenService},
};
use crate::AppState;

/// Authentication gate as a pure function: NoToken, InvalidToken and
/// ExpiredToken all reject; a valid token yields its claims.
pub fn authenticate(
    headers: &HeaderMap,
    tokens: &TokenService,
    now: i64,
) -> Result<SessionClaims, AuthError> {
    let token = SessionCookie::token_from(headers).ok_or(AuthError::MissingToken)?;
    tokens.verify_at(&token, now)
}

/// Authorization gate as a pure function over the permission table
pub fn authorize(
    permissions: &RoutePermissions,
    route: &str,
    claims: &SessionClaims,
) -> Result<(), AuthError> {
    permissions.authorize(route, claims)
}

/// Middleware: verify the `jwt` cookie and attach the claims to the request
pub async fn authentication_gate(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let endpoint = request.uri().path().to_string();
    match authenticate(request.headers(), &state.tokens, Utc::now().timestamp()) {
        Ok(claims) => {
            debug!(
                "Authenticated account_id={} for endpoint={}",
                claims.account_id, endpoint
            );
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Middleware: compare the attached claims' role with the route allow-list
pub async fn authorization_gate(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(claims) = request.extensions().get::<SessionClaims>() else {
        return AuthError::MissingToken.into_response();
    };
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    if let Err(err) = authorize(&state.permissions, &route, claims) {
        return err.into_response();
    }

    debug!(
        "Authorization successful: account_id={}, role={}, route={}",
        claims.account_id, claims.account_type, route
    );
    next.run(request).await
}

/// Claims of the caller on a route behind the authentication gate
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedAccount
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .map(AuthenticatedAccount)
            .ok_or(AuthError::MissingToken)
    }
}

/// Claims of the caller on a public route, if the cookie verifies
#[derive(Debug, Clone)]
pub struct OptionalAccount(pub Option<SessionClaims>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalAccount {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<SessionClaims>() {
            return Ok(OptionalAccount(Some(claims.clone())));
        }
        let claims = authenticate(&parts.headers, &state.tokens, Utc::now().timestamp()).ok();
        Ok(OptionalAccount(claims))
    }
}
