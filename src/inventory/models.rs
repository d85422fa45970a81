// Inventory data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::parse_str;
use crate::views::format;

pub const DEFAULT_IMAGE: &str = "/images/vehicles/no-image.png";
pub const DEFAULT_THUMBNAIL: &str = "/images/vehicles/no-image-tn.png";

/// Vehicle category shown in the navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Classification {
    pub classification_id: i32,
    pub classification_name: String,
}

/// Inventory row joined with its classification name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct InventoryItem {
    pub inv_id: i32,
    pub inv_make: String,
    pub inv_model: String,
    pub inv_year: String,
    pub inv_description: String,
    pub inv_image: String,
    pub inv_thumbnail: String,
    pub inv_price: i32,
    pub inv_miles: i32,
    pub inv_color: String,
    pub classification_id: i32,
    pub classification_name: String,
}

impl InventoryItem {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.inv_make, self.inv_model)
    }
}

/// Card in the classification grid
#[derive(Debug, Clone, Serialize)]
pub struct VehicleCard {
    pub inv_id: i32,
    pub name: String,
    pub thumbnail: String,
    pub price: String,
}

impl From<&InventoryItem> for VehicleCard {
    fn from(item: &InventoryItem) -> Self {
        Self {
            inv_id: item.inv_id,
            name: item.display_name(),
            thumbnail: item.inv_thumbnail.clone(),
            price: format::usd_whole(i64::from(item.inv_price)),
        }
    }
}

/// Vehicle detail panel
#[derive(Debug, Clone, Serialize)]
pub struct VehicleDetail {
    pub heading: String,
    pub image: String,
    pub price: String,
    pub miles: String,
    pub description: String,
    pub color: String,
}

impl From<&InventoryItem> for VehicleDetail {
    fn from(item: &InventoryItem) -> Self {
        Self {
            heading: format!("{} {} {}", item.inv_year, item.inv_make, item.inv_model),
            image: item.inv_image.clone(),
            price: format::usd(i64::from(item.inv_price)),
            miles: format::grouped(i64::from(item.inv_miles)),
            description: item.inv_description.clone(),
            color: item.inv_color.clone(),
        }
    }
}

/// Vehicle fields written by insert and update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VehicleForm {
    pub inv_make: String,
    pub inv_model: String,
    pub inv_year: String,
    pub inv_description: String,
    #[serde(deserialize_with = "parse_str")]
    pub inv_price: i32,
    #[serde(deserialize_with = "parse_str")]
    pub inv_miles: i32,
    pub inv_color: String,
    #[serde(deserialize_with = "parse_str")]
    pub classification_id: i32,
}

/// Update form: the vehicle fields plus the row id
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVehicleForm {
    #[serde(deserialize_with = "parse_str")]
    pub inv_id: i32,
    #[serde(flatten)]
    pub vehicle: VehicleForm,
}

/// Add classification form
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationForm {
    pub classification_name: String,
}

/// Delete confirmation form
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteVehicleForm {
    #[serde(deserialize_with = "parse_str")]
    pub inv_id: i32,
    pub inv_make: String,
    pub inv_model: String,
}
