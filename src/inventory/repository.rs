// Inventory and classification persistence

use async_trait::async_trait;
use sqlx::PgPool;

use crate::inventory::models::{
    Classification, InventoryItem, VehicleForm, DEFAULT_IMAGE, DEFAULT_THUMBNAIL,
};
use crate::store::StoreError;

#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn list_classifications(&self) -> Result<Vec<Classification>, StoreError>;

    async fn get_classification(
        &self,
        classification_id: i32,
    ) -> Result<Option<Classification>, StoreError>;

    async fn classification_exists(&self, name: &str) -> Result<bool, StoreError>;

    async fn insert_classification(&self, name: &str)
        -> Result<Option<Classification>, StoreError>;

    async fn list_by_classification(
        &self,
        classification_id: i32,
    ) -> Result<Vec<InventoryItem>, StoreError>;

    async fn get_by_vehicle_id(&self, inv_id: i32) -> Result<Option<InventoryItem>, StoreError>;

    /// Insert a vehicle with the placeholder images; returns the new id
    async fn insert_inventory(&self, vehicle: &VehicleForm) -> Result<Option<i32>, StoreError>;

    async fn update_inventory(
        &self,
        inv_id: i32,
        vehicle: &VehicleForm,
    ) -> Result<Option<InventoryItem>, StoreError>;

    async fn delete_inventory(&self, inv_id: i32) -> Result<bool, StoreError>;
}

const ITEM_SELECT: &str = "SELECT i.inv_id, i.inv_make, i.inv_model, i.inv_year, i.inv_description, \
     i.inv_image, i.inv_thumbnail, i.inv_price, i.inv_miles, i.inv_color, \
     i.classification_id, c.classification_name \
     FROM inventory AS i JOIN classification AS c ON i.classification_id = c.classification_id";

/// PostgreSQL inventory store
#[derive(Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn list_classifications(&self) -> Result<Vec<Classification>, StoreError> {
        let rows = sqlx::query_as::<_, Classification>(
            "SELECT classification_id, classification_name FROM classification ORDER BY classification_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get_classification(
        &self,
        classification_id: i32,
    ) -> Result<Option<Classification>, StoreError> {
        let row = sqlx::query_as::<_, Classification>(
            "SELECT classification_id, classification_name FROM classification WHERE classification_id = $1",
        )
        .bind(classification_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn classification_exists(&self, name: &str) -> Result<bool, StoreError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM classification WHERE classification_name = $1)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    async fn insert_classification(
        &self,
        name: &str,
    ) -> Result<Option<Classification>, StoreError> {
        let row = sqlx::query_as::<_, Classification>(
            "INSERT INTO classification (classification_name) VALUES ($1) \
             RETURNING classification_id, classification_name",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_classification(
        &self,
        classification_id: i32,
    ) -> Result<Vec<InventoryItem>, StoreError> {
        let rows = sqlx::query_as::<_, InventoryItem>(&format!(
            "{} WHERE i.classification_id = $1 ORDER BY i.inv_make, i.inv_model",
            ITEM_SELECT
        ))
        .bind(classification_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get_by_vehicle_id(&self, inv_id: i32) -> Result<Option<InventoryItem>, StoreError> {
        let row = sqlx::query_as::<_, InventoryItem>(&format!("{} WHERE i.inv_id = $1", ITEM_SELECT))
            .bind(inv_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn insert_inventory(&self, vehicle: &VehicleForm) -> Result<Option<i32>, StoreError> {
        let id: Option<(i32,)> = sqlx::query_as(
            r#"
            INSERT INTO inventory (inv_make, inv_model, inv_year, inv_description, inv_image,
                                   inv_thumbnail, inv_price, inv_miles, inv_color, classification_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING inv_id
            "#,
        )
        .bind(&vehicle.inv_make)
        .bind(&vehicle.inv_model)
        .bind(&vehicle.inv_year)
        .bind(&vehicle.inv_description)
        .bind(DEFAULT_IMAGE)
        .bind(DEFAULT_THUMBNAIL)
        .bind(vehicle.inv_price)
        .bind(vehicle.inv_miles)
        .bind(&vehicle.inv_color)
        .bind(vehicle.classification_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id.map(|row| row.0))
    }

    async fn update_inventory(
        &self,
        inv_id: i32,
        vehicle: &VehicleForm,
    ) -> Result<Option<InventoryItem>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET inv_make = $1, inv_model = $2, inv_year = $3, inv_description = $4,
                inv_price = $5, inv_miles = $6, inv_color = $7, classification_id = $8
            WHERE inv_id = $9
            "#,
        )
        .bind(&vehicle.inv_make)
        .bind(&vehicle.inv_model)
        .bind(&vehicle.inv_year)
        .bind(&vehicle.inv_description)
        .bind(vehicle.inv_price)
        .bind(vehicle.inv_miles)
        .bind(&vehicle.inv_color)
        .bind(vehicle.classification_id)
        .bind(inv_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let row = sqlx::query_as::<_, InventoryItem>(&format!("{} WHERE i.inv_id = $1", ITEM_SELECT))
            .bind(inv_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    async fn delete_inventory(&self, inv_id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM inventory WHERE inv_id = $1")
            .bind(inv_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
