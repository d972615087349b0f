//! Equipment catalog models and the fixed-asset quantity rule

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Equipment category; `fixed_asset` gates the quantity-pinning rule
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentCategory {
    pub id: i32,
    pub name: String,
    pub fixed_asset: bool,
}

/// Catalog item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub stock_quantity: i32,
    /// Whether the item is offered to requesters
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Item joined with its category, as used by validation and listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ItemWithCategory {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub category_name: String,
    pub fixed_asset: bool,
    pub stock_quantity: i32,
    pub approved: bool,
}

/// Requester-facing item projection with the display quantity already pinned
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemPublic {
    pub id: i32,
    pub name: String,
    pub category_name: String,
    pub fixed_asset: bool,
    /// One unit per request for fixed assets, otherwise available stock
    pub quantity: i32,
}

impl From<ItemWithCategory> for ItemPublic {
    fn from(item: ItemWithCategory) -> Self {
        ItemPublic {
            id: item.id,
            name: item.name,
            category_name: item.category_name,
            fixed_asset: item.fixed_asset,
            quantity: pinned_quantity(item.fixed_asset, item.stock_quantity),
        }
    }
}

/// Create category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 2, message = "Category name must be at least 2 characters"))]
    pub name: String,
    #[serde(default)]
    pub fixed_asset: bool,
}

/// Create item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 2, message = "Item name must be at least 2 characters"))]
    pub name: String,
    pub category_id: i32,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default = "default_approved")]
    pub approved: bool,
}

fn default_approved() -> bool {
    true
}

/// Update item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub stock_quantity: Option<i32>,
    pub approved: Option<bool>,
}

/// The fixed-asset quantity rule, applied in exactly this one place.
///
/// Fixed-asset items go out one unit per request regardless of the quantity
/// asked for or held in stock.
pub fn pinned_quantity(fixed_asset: bool, requested: i32) -> i32 {
    if fixed_asset {
        1
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_asset_quantity_is_always_one() {
        assert_eq!(pinned_quantity(true, 1), 1);
        assert_eq!(pinned_quantity(true, 5), 1);
        assert_eq!(pinned_quantity(true, 100), 1);
    }

    #[test]
    fn consumable_quantity_is_preserved() {
        assert_eq!(pinned_quantity(false, 1), 1);
        assert_eq!(pinned_quantity(false, 3), 3);
        assert_eq!(pinned_quantity(false, 42), 42);
    }

    #[test]
    fn public_projection_pins_display_quantity() {
        let fixed = ItemWithCategory {
            id: 1,
            name: "Laptop".to_string(),
            category_id: 1,
            category_name: "Fixed Asset".to_string(),
            fixed_asset: true,
            stock_quantity: 12,
            approved: true,
        };
        let consumable = ItemWithCategory {
            id: 2,
            name: "Notebook".to_string(),
            category_id: 2,
            category_name: "Consumable".to_string(),
            fixed_asset: false,
            stock_quantity: 40,
            approved: true,
        };
        assert_eq!(ItemPublic::from(fixed).quantity, 1);
        assert_eq!(ItemPublic::from(consumable).quantity, 40);
    }
}
