// In-memory store adapters for handler tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::accounts::{models::Account, repository::AccountStore};
use crate::auth::models::Role;
use crate::inventory::{
    models::{Classification, InventoryItem, VehicleForm, DEFAULT_IMAGE, DEFAULT_THUMBNAIL},
    repository::InventoryStore,
};
use crate::store::StoreError;

fn lock_poisoned() -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".to_string())
}

/// Account store backed by a vector; email is unique case-insensitively
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
    fail_writes: AtomicBool,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write return a store failure
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }

    /// Seed an account directly, bypassing registration
    pub fn seed(&self, firstname: &str, lastname: &str, email: &str, hash: &str, role: Role) -> Account {
        let mut accounts = self.accounts.lock().unwrap();
        let account = Account {
            account_id: accounts.iter().map(|a| a.account_id).max().unwrap_or(0) + 1,
            account_firstname: firstname.to_string(),
            account_lastname: lastname.to_string(),
            account_email: email.to_lowercase(),
            account_password: hash.to_string(),
            account_type: role,
        };
        accounts.push(account.clone());
        account
    }

    pub fn len(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub fn get(&self, account_id: i32) -> Option<Account> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.account_id == account_id)
            .cloned()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.lock().map_err(|_| lock_poisoned())?;
        Ok(accounts
            .iter()
            .find(|a| a.account_email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, account_id: i32) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.lock().map_err(|_| lock_poisoned())?;
        Ok(accounts.iter().find(|a| a.account_id == account_id).cloned())
    }

    async fn register(
        &self,
        firstname: &str,
        lastname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.check_writable()?;
        let mut accounts = self.accounts.lock().map_err(|_| lock_poisoned())?;
        if accounts.iter().any(|a| a.account_email.eq_ignore_ascii_case(email)) {
            return Err(StoreError::UniqueViolation("account_email_unique".to_string()));
        }
        let account = Account {
            account_id: accounts.iter().map(|a| a.account_id).max().unwrap_or(0) + 1,
            account_firstname: firstname.to_string(),
            account_lastname: lastname.to_string(),
            account_email: email.to_lowercase(),
            account_password: password_hash.to_string(),
            account_type: Role::Client,
        };
        accounts.push(account.clone());
        Ok(Some(account))
    }

    async fn update_profile(
        &self,
        firstname: &str,
        lastname: &str,
        email: &str,
        account_id: i32,
    ) -> Result<Option<Account>, StoreError> {
        self.check_writable()?;
        let mut accounts = self.accounts.lock().map_err(|_| lock_poisoned())?;
        if accounts
            .iter()
            .any(|a| a.account_id != account_id && a.account_email.eq_ignore_ascii_case(email))
        {
            return Err(StoreError::UniqueViolation("account_email_unique".to_string()));
        }
        Ok(accounts
            .iter_mut()
            .find(|a| a.account_id == account_id)
            .map(|account| {
                account.account_firstname = firstname.to_string();
                account.account_lastname = lastname.to_string();
                account.account_email = email.to_lowercase();
                account.clone()
            }))
    }

    async fn update_password(
        &self,
        password_hash: &str,
        account_id: i32,
    ) -> Result<bool, StoreError> {
        self.check_writable()?;
        let mut accounts = self.accounts.lock().map_err(|_| lock_poisoned())?;
        match accounts.iter_mut().find(|a| a.account_id == account_id) {
            Some(account) => {
                account.account_password = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, account_id: i32) -> Result<bool, StoreError> {
        self.check_writable()?;
        let mut accounts = self.accounts.lock().map_err(|_| lock_poisoned())?;
        let before = accounts.len();
        accounts.retain(|a| a.account_id != account_id);
        Ok(accounts.len() < before)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.lock().map_err(|_| lock_poisoned())?;
        Ok(accounts
            .iter()
            .filter(|a| a.account_type == role)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct InventoryTables {
    classifications: Vec<Classification>,
    vehicles: Vec<InventoryItem>,
}

/// Inventory store backed by vectors; classification names are unique
#[derive(Default)]
pub struct MemoryInventoryStore {
    tables: Mutex<InventoryTables>,
    fail_writes: AtomicBool,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }

    pub fn seed_classification(&self, name: &str) -> Classification {
        let mut tables = self.tables.lock().unwrap();
        let classification = Classification {
            classification_id: tables
                .classifications
                .iter()
                .map(|c| c.classification_id)
                .max()
                .unwrap_or(0)
                + 1,
            classification_name: name.to_string(),
        };
        tables.classifications.push(classification.clone());
        classification
    }

    pub fn classification_count(&self) -> usize {
        self.tables.lock().unwrap().classifications.len()
    }

    pub fn vehicle_count(&self) -> usize {
        self.tables.lock().unwrap().vehicles.len()
    }

    pub fn vehicle(&self, inv_id: i32) -> Option<InventoryItem> {
        self.tables
            .lock()
            .unwrap()
            .vehicles
            .iter()
            .find(|v| v.inv_id == inv_id)
            .cloned()
    }
}

fn build_item(inv_id: i32, vehicle: &VehicleForm, classification: &Classification) -> InventoryItem {
    InventoryItem {
        inv_id,
        inv_make: vehicle.inv_make.clone(),
        inv_model: vehicle.inv_model.clone(),
        inv_year: vehicle.inv_year.clone(),
        inv_description: vehicle.inv_description.clone(),
        inv_image: DEFAULT_IMAGE.to_string(),
        inv_thumbnail: DEFAULT_THUMBNAIL.to_string(),
        inv_price: vehicle.inv_price,
        inv_miles: vehicle.inv_miles,
        inv_color: vehicle.inv_color.clone(),
        classification_id: classification.classification_id,
        classification_name: classification.classification_name.clone(),
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn list_classifications(&self) -> Result<Vec<Classification>, StoreError> {
        let tables = self.tables.lock().map_err(|_| lock_poisoned())?;
        let mut rows = tables.classifications.clone();
        rows.sort_by(|a, b| a.classification_name.cmp(&b.classification_name));
        Ok(rows)
    }

    async fn get_classification(
        &self,
        classification_id: i32,
    ) -> Result<Option<Classification>, StoreError> {
        let tables = self.tables.lock().map_err(|_| lock_poisoned())?;
        Ok(tables
            .classifications
            .iter()
            .find(|c| c.classification_id == classification_id)
            .cloned())
    }

    async fn classification_exists(&self, name: &str) -> Result<bool, StoreError> {
        let tables = self.tables.lock().map_err(|_| lock_poisoned())?;
        Ok(tables
            .classifications
            .iter()
            .any(|c| c.classification_name == name))
    }

    async fn insert_classification(
        &self,
        name: &str,
    ) -> Result<Option<Classification>, StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().map_err(|_| lock_poisoned())?;
        if tables.classifications.iter().any(|c| c.classification_name == name) {
            return Err(StoreError::UniqueViolation("classification_name_unique".to_string()));
        }
        let classification = Classification {
            classification_id: tables
                .classifications
                .iter()
                .map(|c| c.classification_id)
                .max()
                .unwrap_or(0)
                + 1,
            classification_name: name.to_string(),
        };
        tables.classifications.push(classification.clone());
        Ok(Some(classification))
    }

    async fn list_by_classification(
        &self,
        classification_id: i32,
    ) -> Result<Vec<InventoryItem>, StoreError> {
        let tables = self.tables.lock().map_err(|_| lock_poisoned())?;
        Ok(tables
            .vehicles
            .iter()
            .filter(|v| v.classification_id == classification_id)
            .cloned()
            .collect())
    }

    async fn get_by_vehicle_id(&self, inv_id: i32) -> Result<Option<InventoryItem>, StoreError> {
        let tables = self.tables.lock().map_err(|_| lock_poisoned())?;
        Ok(tables.vehicles.iter().find(|v| v.inv_id == inv_id).cloned())
    }

    async fn insert_inventory(&self, vehicle: &VehicleForm) -> Result<Option<i32>, StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().map_err(|_| lock_poisoned())?;
        let Some(classification) = tables
            .classifications
            .iter()
            .find(|c| c.classification_id == vehicle.classification_id)
            .cloned()
        else {
            return Ok(None);
        };
        let inv_id = tables.vehicles.iter().map(|v| v.inv_id).max().unwrap_or(0) + 1;
        tables.vehicles.push(build_item(inv_id, vehicle, &classification));
        Ok(Some(inv_id))
    }

    async fn update_inventory(
        &self,
        inv_id: i32,
        vehicle: &VehicleForm,
    ) -> Result<Option<InventoryItem>, StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().map_err(|_| lock_poisoned())?;
        let Some(classification) = tables
            .classifications
            .iter()
            .find(|c| c.classification_id == vehicle.classification_id)
            .cloned()
        else {
            return Ok(None);
        };
        Ok(tables
            .vehicles
            .iter_mut()
            .find(|v| v.inv_id == inv_id)
            .map(|row| {
                let mut updated = build_item(inv_id, vehicle, &classification);
                updated.inv_image = row.inv_image.clone();
                updated.inv_thumbnail = row.inv_thumbnail.clone();
                *row = updated.clone();
                updated
            }))
    }

    async fn delete_inventory(&self, inv_id: i32) -> Result<bool, StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.lock().map_err(|_| lock_poisoned())?;
        let before = tables.vehicles.len();
        tables.vehicles.retain(|v| v.inv_id != inv_id);
        Ok(tables.vehicles.len() < before)
    }
}
