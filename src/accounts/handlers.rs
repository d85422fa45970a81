// HTTP handlers for account endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, info, warn};

use crate::accounts::models::{
    Account, AccountSummary, DeleteAccountForm, LoginForm, RegisterForm, UpdateAccountForm,
    UpdatePasswordForm,
};
use crate::auth::{
    error::LOGIN_PATH, AuthError, AuthenticatedAccount, OptionalAccount, Role, SessionClaims,
    SessionCookie,
};
use crate::error::{parse_path_id, AppError};
use crate::store::unique_as_none;
use crate::validation::Validated;
use crate::views::{flash, Flash};
use crate::AppState;

pub const ACCOUNT_HOME: &str = "/account/";
pub const CREDENTIALS_NOTICE: &str = "Please check your credentials and try again.";
pub const REGISTRATION_FAILED_NOTICE: &str = "Sorry, the registration failed.";
pub const PROCESSING_FAILED_NOTICE: &str = "Sorry, there was an error processing the registration.";
pub const UPDATE_FAILED_NOTICE: &str = "Sorry, the account update failed.";
pub const PASSWORD_UPDATED_NOTICE: &str = "Congratulations, you updated your password.";
pub const DELETE_FAILED_NOTICE: &str = "Sorry, the delete failed.";

/// Admins may change any account; everyone else only their own
fn ensure_can_modify(claims: &SessionClaims, account_id: i32) -> Result<(), AppError> {
    if claims.role() == Role::Admin || claims.account_id == account_id {
        return Ok(());
    }
    warn!(
        "account_id={} attempted to modify account_id={}",
        claims.account_id, account_id
    );
    Err(AuthError::InsufficientPermissions {
        allowed: vec![Role::Admin],
        actual: claims.role(),
    }
    .into())
}

async fn load_account(state: &AppState, account_id: i32) -> Result<Account, AppError> {
    state
        .accounts
        .find_by_id(account_id)
        .await?
        .ok_or(AppError::NotFound { resource: "Account" })
}

/// Login view
/// GET /account/login
pub async fn login_view(
    State(state): State<AppState>,
    OptionalAccount(account): OptionalAccount,
    flash: Flash,
) -> Result<Response, AppError> {
    let model = state
        .view_model("Login")
        .await?
        .with_flash(flash)
        .with_account(account);
    Ok(state.render("account/login", StatusCode::OK, model))
}

/// Process login
/// POST /account/login
pub async fn login(
    State(state): State<AppState>,
    Validated { form, values }: Validated<LoginForm>,
) -> Result<Response, AppError> {
    let verified = match state.accounts.find_by_email(&form.account_email).await? {
        Some(account)
            if state
                .hasher
                .verify_password(&form.account_password, &account.account_password) =>
        {
            Some(account)
        }
        Some(_) => None,
        None => {
            state.hasher.verify_missing(&form.account_password);
            None
        }
    };

    let Some(account) = verified else {
        debug!("Login rejected");
        let model = state
            .view_model("Login")
            .await?
            .with_notice(CREDENTIALS_NOTICE)
            .with_value("account_email", values.value("account_email"));
        return Ok(state.render("account/login", StatusCode::BAD_REQUEST, model));
    };

    let token = state.tokens.issue(&account)?;
    info!("account_id={} logged in", account.account_id);
    let mut response = Redirect::to(ACCOUNT_HOME).into_response();
    state.cookie.append_set(response.headers_mut(), &token);
    Ok(response)
}

/// Clear the session cookie
/// GET /account/logout
pub async fn logout() -> Response {
    let mut response = Redirect::to(LOGIN_PATH).into_response();
    SessionCookie::append_clear(response.headers_mut());
    response
}

/// Registration view
/// GET /account/register
pub async fn register_view(
    State(state): State<AppState>,
    OptionalAccount(account): OptionalAccount,
    flash: Flash,
) -> Result<Response, AppError> {
    let model = state
        .view_model("Register")
        .await?
        .with_flash(flash)
        .with_account(account);
    Ok(state.render("account/register", StatusCode::OK, model))
}

/// Process registration
/// POST /account/register
pub async fn register(
    State(state): State<AppState>,
    Validated { form, values }: Validated<RegisterForm>,
) -> Result<Response, AppError> {
    let hash = match state.hasher.hash_password(&form.account_password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Registration hashing failed: {}", e);
            let model = state
                .view_model("Register")
                .await?
                .with_notice(PROCESSING_FAILED_NOTICE)
                .with_values(&values);
            return Ok(state.render(
                "account/register",
                StatusCode::INTERNAL_SERVER_ERROR,
                model,
            ));
        }
    };

    let registered = unique_as_none(
        state
            .accounts
            .register(
                &form.account_firstname,
                &form.account_lastname,
                &form.account_email,
                &hash,
            )
            .await,
    )?;

    match registered {
        Some(account) => {
            info!("Registered account_id={}", account.account_id);
            let model = state.view_model("Login").await?.with_notice(format!(
                "Congratulations, you're registered {}. Please log in.",
                account.account_firstname
            ));
            Ok(state.render("account/login", StatusCode::CREATED, model))
        }
        None => {
            let model = state
                .view_model("Register")
                .await?
                .with_notice(REGISTRATION_FAILED_NOTICE)
                .with_values(&values);
            Ok(state.render("account/register", StatusCode::NOT_IMPLEMENTED, model))
        }
    }
}

/// Account management view
/// GET /account/
pub async fn management_view(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    flash: Flash,
) -> Result<Response, AppError> {
    let model = state
        .view_model("Account Management")
        .await?
        .with_flash(flash)
        .with_account(Some(claims));
    Ok(state.render("account/account-management", StatusCode::OK, model))
}

/// Account update view, prefilled from the stored account
/// GET /account/update/:account_id
pub async fn update_view(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    Path(account_id): Path<String>,
    flash: Flash,
) -> Result<Response, AppError> {
    let account_id = parse_path_id(&account_id, "Account")?;
    ensure_can_modify(&claims, account_id)?;
    let account = load_account(&state, account_id).await?;

    let model = state
        .view_model("Edit Account")
        .await?
        .with_flash(flash)
        .with_account(Some(claims))
        .with_value("account_id", account.account_id.to_string())
        .with_value("account_firstname", account.account_firstname)
        .with_value("account_lastname", account.account_lastname)
        .with_value("account_email", account.account_email);
    Ok(state.render("account/update-account", StatusCode::OK, model))
}

/// Process a profile update
/// POST /account/update
pub async fn update(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    Validated { form, values }: Validated<UpdateAccountForm>,
) -> Result<Response, AppError> {
    ensure_can_modify(&claims, form.account_id)?;

    let updated = unique_as_none(
        state
            .accounts
            .update_profile(
                &form.account_firstname,
                &form.account_lastname,
                &form.account_email,
                form.account_id,
            )
            .await,
    )?;

    let Some(account) = updated else {
        let model = state
            .view_model("Edit Account")
            .await?
            .with_notice(UPDATE_FAILED_NOTICE)
            .with_account(Some(claims))
            .with_values(&values);
        return Ok(state.render(
            "account/update-account",
            StatusCode::NOT_IMPLEMENTED,
            model,
        ));
    };

    let notices = [
        "Congratulations, you updated your account information.".to_string(),
        format!("First Name: {}", account.account_firstname),
        format!("Last Name: {}", account.account_lastname),
        format!("Email: {}", account.account_email),
    ];
    let mut response = flash::redirect_with_notices(ACCOUNT_HOME, &notices);

    // The session claims carry the profile; refresh them for the caller's own account
    if account.account_id == claims.account_id {
        let token = state.tokens.issue(&account)?;
        state.cookie.append_set(response.headers_mut(), &token);
    }
    info!("Updated account_id={}", account.account_id);
    Ok(response)
}

/// Process a password change
/// POST /account/update-password
pub async fn update_password(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    Validated { form, values }: Validated<UpdatePasswordForm>,
) -> Result<Response, AppError> {
    ensure_can_modify(&claims, form.account_id)?;

    let (status, notice) = match state.hasher.hash_password(&form.account_password) {
        Ok(hash) => {
            if state.accounts.update_password(&hash, form.account_id).await? {
                info!("Updated password for account_id={}", form.account_id);
                return Ok(flash::redirect_with_notices(
                    ACCOUNT_HOME,
                    &[PASSWORD_UPDATED_NOTICE],
                ));
            }
            (StatusCode::NOT_IMPLEMENTED, UPDATE_FAILED_NOTICE)
        }
        Err(e) => {
            warn!("Password hashing failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, PROCESSING_FAILED_NOTICE)
        }
    };

    let model = state
        .view_model("Edit Account")
        .await?
        .with_notice(notice)
        .with_account(Some(claims))
        .with_value("account_id", values.value("account_id"));
    Ok(state.render("account/update-account", status, model))
}

/// Employee list
/// GET /account/employees
pub async fn employees_view(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    flash: Flash,
) -> Result<Response, AppError> {
    let employees: Vec<AccountSummary> = state
        .accounts
        .list_by_role(Role::Employee)
        .await?
        .into_iter()
        .map(AccountSummary::from)
        .collect();

    let model = state
        .view_model("Employee Management")
        .await?
        .with_flash(flash)
        .with_account(Some(claims))
        .with_data("employees", employees);
    Ok(state.render("account/employee-management", StatusCode::OK, model))
}

/// Delete confirmation view
/// GET /account/delete/:account_id
pub async fn delete_view(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    Path(account_id): Path<String>,
) -> Result<Response, AppError> {
    let account_id = parse_path_id(&account_id, "Account")?;
    let account = load_account(&state, account_id).await?;

    let model = state
        .view_model("Delete Account")
        .await?
        .with_account(Some(claims))
        .with_value("account_id", account.account_id.to_string())
        .with_value("account_firstname", account.account_firstname)
        .with_value("account_lastname", account.account_lastname)
        .with_value("account_email", account.account_email);
    Ok(state.render("account/delete-account", StatusCode::OK, model))
}

/// Process an account delete
/// POST /account/delete
pub async fn delete(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    Validated { form, values }: Validated<DeleteAccountForm>,
) -> Result<Response, AppError> {
    if state.accounts.delete(form.account_id).await? {
        info!(
            "account_id={} deleted account_id={}",
            claims.account_id, form.account_id
        );
        let notice = format!(
            "Congratulations, you deleted {} {} from the database.",
            form.account_firstname, form.account_lastname
        );
        return Ok(flash::redirect_with_notices(ACCOUNT_HOME, &[notice]));
    }

    let model = state
        .view_model("Delete Account")
        .await?
        .with_notice(DELETE_FAILED_NOTICE)
        .with_account(Some(claims))
        .with_values(&values);
    Ok(state.render("account/delete-account", StatusCode::NOT_IMPLEMENTED, model))
}
