//! Equipment catalog repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{map_unique_violation, AppError, AppResult},
    models::item::{EquipmentCategory, Item, ItemWithCategory},
};

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_category(&self, id: i32) -> AppResult<EquipmentCategory> {
        sqlx::query_as::<_, EquipmentCategory>(
            "SELECT * FROM equipment_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn list_categories(&self) -> AppResult<Vec<EquipmentCategory>> {
        let categories = sqlx::query_as::<_, EquipmentCategory>(
            "SELECT * FROM equipment_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn create_category(
        &self,
        name: &str,
        fixed_asset: bool,
    ) -> AppResult<EquipmentCategory> {
        sqlx::query_as::<_, EquipmentCategory>(
            "INSERT INTO equipment_categories (name, fixed_asset) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(fixed_asset)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Category name already exists"))
    }

    pub async fn get_item(&self, id: i32) -> AppResult<Item> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
    }

    /// All items joined with their category (admin view)
    pub async fn list_items(&self) -> AppResult<Vec<ItemWithCategory>> {
        let items = sqlx::query_as::<_, ItemWithCategory>(
            r#"
            SELECT i.id, i.name, i.category_id, c.name AS category_name,
                   c.fixed_asset, i.stock_quantity, i.approved
            FROM items i
            JOIN equipment_categories c ON c.id = i.category_id
            ORDER BY i.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Approved items only, for requester-facing listings
    pub async fn list_approved(&self) -> AppResult<Vec<ItemWithCategory>> {
        let items = sqlx::query_as::<_, ItemWithCategory>(
            r#"
            SELECT i.id, i.name, i.category_id, c.name AS category_name,
                   c.fixed_asset, i.stock_quantity, i.approved
            FROM items i
            JOIN equipment_categories c ON c.id = i.category_id
            WHERE i.approved = TRUE
            ORDER BY i.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Fetch the given items with their category, used by line-item
    /// validation; missing ids are simply absent from the result.
    pub async fn get_many_with_category(
        &self,
        ids: &[i32],
    ) -> AppResult<Vec<ItemWithCategory>> {
        let items = sqlx::query_as::<_, ItemWithCategory>(
            r#"
            SELECT i.id, i.name, i.category_id, c.name AS category_name,
                   c.fixed_asset, i.stock_quantity, i.approved
            FROM items i
            JOIN equipment_categories c ON c.id = i.category_id
            WHERE i.id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn create_item(
        &self,
        name: &str,
        category_id: i32,
        stock_quantity: i32,
        approved: bool,
    ) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, category_id, stock_quantity, approved)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(category_id)
        .bind(stock_quantity)
        .bind(approved)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn update_item(
        &self,
        id: i32,
        name: Option<&str>,
        category_id: Option<i32>,
        stock_quantity: Option<i32>,
        approved: Option<bool>,
    ) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = COALESCE($2, name),
                category_id = COALESCE($3, category_id),
                stock_quantity = COALESCE($4, stock_quantity),
                approved = COALESCE($5, approved)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(category_id)
        .bind(stock_quantity)
        .bind(approved)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
    }
}
