// HTTP handlers for the public catalogue and inventory management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use tracing::info;

use crate::auth::{AuthenticatedAccount, OptionalAccount};
use crate::error::{parse_path_id, AppError};
use crate::inventory::models::{
    ClassificationForm, DeleteVehicleForm, InventoryItem, UpdateVehicleForm, VehicleCard,
    VehicleDetail, VehicleForm,
};
use crate::store::unique_as_none;
use crate::validation::Validated;
use crate::views::{flash, Flash, ViewModel};
use crate::AppState;

pub const MANAGEMENT_HOME: &str = "/inv/";
pub const NO_VEHICLES_NOTICE: &str = "Sorry, no matching vehicles could be found.";
pub const CLASSIFICATION_FAILED_NOTICE: &str = "Sorry, adding the classification failed";
pub const INVENTORY_FAILED_NOTICE: &str = "Sorry, adding the inventory failed";
pub const UPDATE_FAILED_NOTICE: &str = "Sorry, the update failed.";
pub const DELETE_SUCCESS_NOTICE: &str = "The deletion was successful.";
pub const DELETE_FAILED_NOTICE: &str = "Sorry, the delete failed.";

async fn load_vehicle(state: &AppState, inv_id: &str) -> Result<InventoryItem, AppError> {
    let inv_id = parse_path_id(inv_id, "Vehicle")?;
    state
        .inventory
        .get_by_vehicle_id(inv_id)
        .await?
        .ok_or(AppError::NotFound { resource: "Vehicle" })
}

/// Prefill an edit form from a stored vehicle
fn with_vehicle_values(model: ViewModel, item: &InventoryItem) -> ViewModel {
    model
        .with_value("inv_id", item.inv_id.to_string())
        .with_value("inv_make", item.inv_make.as_str())
        .with_value("inv_model", item.inv_model.as_str())
        .with_value("inv_year", item.inv_year.as_str())
        .with_value("inv_description", item.inv_description.as_str())
        .with_value("inv_price", item.inv_price.to_string())
        .with_value("inv_miles", item.inv_miles.to_string())
        .with_value("inv_color", item.inv_color.as_str())
        .with_value("classification_id", item.classification_id.to_string())
}

async fn with_classifications(state: &AppState, model: ViewModel) -> Result<ViewModel, AppError> {
    let classifications = state.inventory.list_classifications().await?;
    Ok(model.with_data("classifications", classifications))
}

/// Home page
/// GET /
pub async fn home(
    State(state): State<AppState>,
    OptionalAccount(account): OptionalAccount,
    flash: Flash,
) -> Result<Response, AppError> {
    let model = state
        .view_model("Home")
        .await?
        .with_flash(flash)
        .with_account(account);
    Ok(state.render("index", StatusCode::OK, model))
}

/// Vehicles in one classification
/// GET /inv/type/:classification_id
pub async fn classification_view(
    State(state): State<AppState>,
    OptionalAccount(account): OptionalAccount,
    Path(classification_id): Path<String>,
) -> Result<Response, AppError> {
    let classification_id = parse_path_id(&classification_id, "Classification")?;
    let classification = state
        .inventory
        .get_classification(classification_id)
        .await?
        .ok_or(AppError::NotFound { resource: "Classification" })?;

    let vehicles = state
        .inventory
        .list_by_classification(classification_id)
        .await?;
    let cards: Vec<VehicleCard> = vehicles.iter().map(VehicleCard::from).collect();

    let mut model = state
        .view_model(format!("{} vehicles", classification.classification_name))
        .await?
        .with_account(account)
        .with_data("vehicles", cards);
    if vehicles.is_empty() {
        model = model.with_notice(NO_VEHICLES_NOTICE);
    }
    Ok(state.render("inventory/classification", StatusCode::OK, model))
}

/// Vehicle detail page
/// GET /inv/detail/:inv_id
pub async fn vehicle_view(
    State(state): State<AppState>,
    OptionalAccount(account): OptionalAccount,
    Path(inv_id): Path<String>,
) -> Result<Response, AppError> {
    let item = load_vehicle(&state, &inv_id).await?;
    let model = state
        .view_model(item.display_name())
        .await?
        .with_account(account)
        .with_data("vehicle", VehicleDetail::from(&item));
    Ok(state.render("inventory/vehicle", StatusCode::OK, model))
}

/// Inventory management page
/// GET /inv/
pub async fn management_view(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    flash: Flash,
) -> Result<Response, AppError> {
    let model = state
        .view_model("Vehicle Management")
        .await?
        .with_flash(flash)
        .with_account(Some(claims));
    let model = with_classifications(&state, model).await?;
    Ok(state.render("inventory/management", StatusCode::OK, model))
}

/// Add classification view
/// GET /inv/add-classification
pub async fn add_classification_view(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
) -> Result<Response, AppError> {
    let model = state
        .view_model("Add New Classification")
        .await?
        .with_account(Some(claims));
    Ok(state.render("inventory/add-classification", StatusCode::OK, model))
}

/// Process a new classification
/// POST /inv/add-classification
pub async fn add_classification(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    Validated { form, values }: Validated<ClassificationForm>,
) -> Result<Response, AppError> {
    let inserted = unique_as_none(
        state
            .inventory
            .insert_classification(&form.classification_name)
            .await,
    )?;

    match inserted {
        Some(classification) => {
            info!(
                "Added classification_id={} ({})",
                classification.classification_id, classification.classification_name
            );
            // Navigation is rebuilt after the insert so the new entry shows
            let model = state
                .view_model("Vehicle Management")
                .await?
                .with_account(Some(claims))
                .with_notice(format!(
                    "Congratulations, you added {} to the database.",
                    classification.classification_name
                ));
            let model = with_classifications(&state, model).await?;
            Ok(state.render("inventory/management", StatusCode::CREATED, model))
        }
        None => {
            let model = state
                .view_model("Add New Classification")
                .await?
                .with_account(Some(claims))
                .with_notice(CLASSIFICATION_FAILED_NOTICE)
                .with_values(&values);
            Ok(state.render(
                "inventory/add-classification",
                StatusCode::NOT_IMPLEMENTED,
                model,
            ))
        }
    }
}

/// Add vehicle view
/// GET /inv/add-inventory
pub async fn add_inventory_view(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
) -> Result<Response, AppError> {
    let model = state
        .view_model("Add New Vehicle")
        .await?
        .with_account(Some(claims));
    let model = with_classifications(&state, model).await?;
    Ok(state.render("inventory/add-inventory", StatusCode::OK, model))
}

/// Process a new vehicle
/// POST /inv/add-inventory
pub async fn add_inventory(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    Validated { form, values }: Validated<VehicleForm>,
) -> Result<Response, AppError> {
    match state.inventory.insert_inventory(&form).await? {
        Some(inv_id) => {
            info!("Added inv_id={}", inv_id);
            let model = state
                .view_model("Vehicle Management")
                .await?
                .with_account(Some(claims))
                .with_notice(format!(
                    "Congratulations, you added {} {} to the database.",
                    form.inv_make, form.inv_model
                ));
            let model = with_classifications(&state, model).await?;
            Ok(state.render("inventory/management", StatusCode::CREATED, model))
        }
        None => {
            let model = state
                .view_model("Add New Vehicle")
                .await?
                .with_account(Some(claims))
                .with_notice(INVENTORY_FAILED_NOTICE)
                .with_values(&values);
            let model = with_classifications(&state, model).await?;
            Ok(state.render(
                "inventory/add-inventory",
                StatusCode::NOT_IMPLEMENTED,
                model,
            ))
        }
    }
}

/// Edit vehicle view
/// GET /inv/edit/:inv_id
pub async fn edit_inventory_view(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    Path(inv_id): Path<String>,
) -> Result<Response, AppError> {
    let item = load_vehicle(&state, &inv_id).await?;
    let model = state
        .view_model(format!("Edit {}", item.display_name()))
        .await?
        .with_account(Some(claims));
    let model = with_vehicle_values(with_classifications(&state, model).await?, &item);
    Ok(state.render("inventory/edit-inventory", StatusCode::OK, model))
}

/// Process a vehicle update
/// POST /inv/update
pub async fn update_inventory(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    Validated { form, values }: Validated<UpdateVehicleForm>,
) -> Result<Response, AppError> {
    match state
        .inventory
        .update_inventory(form.inv_id, &form.vehicle)
        .await?
    {
        Some(item) => {
            info!("Updated inv_id={}", item.inv_id);
            let notice = format!("The {} was successfully updated.", item.display_name());
            Ok(flash::redirect_with_notices(MANAGEMENT_HOME, &[notice]))
        }
        None => {
            let model = state
                .view_model(format!(
                    "Edit {} {}",
                    form.vehicle.inv_make, form.vehicle.inv_model
                ))
                .await?
                .with_account(Some(claims))
                .with_notice(UPDATE_FAILED_NOTICE)
                .with_values(&values);
            let model = with_classifications(&state, model).await?;
            Ok(state.render(
                "inventory/edit-inventory",
                StatusCode::NOT_IMPLEMENTED,
                model,
            ))
        }
    }
}

/// Delete confirmation view
/// GET /inv/delete/:inv_id
pub async fn delete_inventory_view(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    Path(inv_id): Path<String>,
) -> Result<Response, AppError> {
    let item = load_vehicle(&state, &inv_id).await?;
    let model = state
        .view_model(format!("Delete {}", item.display_name()))
        .await?
        .with_account(Some(claims));
    let model = with_vehicle_values(model, &item);
    Ok(state.render("inventory/delete-confirm", StatusCode::OK, model))
}

/// Process a vehicle delete
/// POST /inv/delete
pub async fn delete_inventory(
    State(state): State<AppState>,
    AuthenticatedAccount(claims): AuthenticatedAccount,
    Validated { form, values }: Validated<DeleteVehicleForm>,
) -> Result<Response, AppError> {
    if state.inventory.delete_inventory(form.inv_id).await? {
        info!("Deleted inv_id={}", form.inv_id);
        return Ok(flash::redirect_with_notices(
            MANAGEMENT_HOME,
            &[DELETE_SUCCESS_NOTICE],
        ));
    }

    let model = state
        .view_model(format!("Delete {} {}", form.inv_make, form.inv_model))
        .await?
        .with_account(Some(claims))
        .with_notice(DELETE_FAILED_NOTICE)
        .with_values(&values);
    Ok(state.render(
        "inventory/delete-confirm",
        StatusCode::NOT_IMPLEMENTED,
        model,
    ))
}
