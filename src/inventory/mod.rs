// Inventory module
// Classification navigation, public vehicle pages and staff inventory management

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{Classification, InventoryItem};
pub use repository::{InventoryStore, PgInventoryStore};
