// `Validated<F>` extractor: runs a form's rule table before the handler sees it

use axum::{
    async_trait,
    extract::{Form, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

use crate::auth::token::SessionClaims;
use crate::error::AppError;
use crate::validation::pipeline::{self, CheckContext, FieldRule, Outcome};
use crate::validation::{FormValues, ValidationErrorSet};
use crate::AppState;

/// A form type together with its rule table and the view that shows it
pub trait FormSpec: DeserializeOwned + Send + 'static {
    /// View re-rendered when validation fails
    const VIEW: &'static str;

    fn rules() -> &'static [FieldRule];

    fn title(values: &FormValues) -> String;

    /// Whether the view needs the classification list (select boxes)
    fn needs_classifications() -> bool {
        false
    }
}

/// A form that passed every rule; `values` holds the sanitized strings
#[derive(Debug)]
pub struct Validated<F> {
    pub form: F,
    pub values: FormValues,
}

#[async_trait]
impl<F> FromRequest<AppState> for Validated<F>
where
    F: FormSpec,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let account = request.extensions().get::<SessionClaims>().cloned();
        let Form(raw) = Form::<HashMap<String, String>>::from_request(request, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let ctx = CheckContext {
            accounts: state.accounts.as_ref(),
            inventory: state.inventory.as_ref(),
        };
        let outcome = pipeline::run(F::rules(), &raw, ctx)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        match outcome {
            Outcome::Valid(values) => {
                let form = serde_json::from_value::<F>(values.to_json()).map_err(|e| {
                    AppError::Internal(format!("validated form did not deserialize: {}", e))
                        .into_response()
                })?;
                Ok(Self { form, values })
            }
            Outcome::Invalid { values, errors } => {
                debug!("Rejected submission for view={}", F::VIEW);
                Err(rerender::<F>(state, values, errors, account).await)
            }
        }
    }
}

/// Re-render the originating view with the sanitized values and the errors
async fn rerender<F: FormSpec>(
    state: &AppState,
    values: FormValues,
    errors: ValidationErrorSet,
    account: Option<SessionClaims>,
) -> Response {
    let model = match state.view_model(F::title(&values)).await {
        Ok(model) => model,
        Err(e) => return e.into_response(),
    };
    let mut model = model
        .with_values(&values)
        .with_errors(errors)
        .with_account(account);

    if F::needs_classifications() {
        match state.inventory.list_classifications().await {
            Ok(classifications) => model = model.with_data("classifications", classifications),
            Err(e) => return AppError::from(e).into_response(),
        }
    }

    state.render(F::VIEW, StatusCode::OK, model)
}
