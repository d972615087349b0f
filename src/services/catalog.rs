//! Equipment catalog service

use crate::{
    error::AppResult,
    models::item::{
        CreateCategory, CreateItem, EquipmentCategory, Item, ItemPublic, ItemWithCategory,
        UpdateItem,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_categories(&self) -> AppResult<Vec<EquipmentCategory>> {
        self.repository.items.list_categories().await
    }

    pub async fn create_category(&self, payload: CreateCategory) -> AppResult<EquipmentCategory> {
        self.repository
            .items
            .create_category(&payload.name, payload.fixed_asset)
            .await
    }

    /// Admin view: every item with its raw stock quantity
    pub async fn list_items(&self) -> AppResult<Vec<ItemWithCategory>> {
        self.repository.items.list_items().await
    }

    /// Requester view: approved items only, display quantity pinned for
    /// fixed assets (the `From` conversion applies the shared rule)
    pub async fn list_available(&self) -> AppResult<Vec<ItemPublic>> {
        let items = self.repository.items.list_approved().await?;
        Ok(items.into_iter().map(ItemPublic::from).collect())
    }

    pub async fn create_item(&self, payload: CreateItem) -> AppResult<Item> {
        self.repository.items.get_category(payload.category_id).await?;

        self.repository
            .items
            .create_item(
                &payload.name,
                payload.category_id,
                payload.stock_quantity,
                payload.approved,
            )
            .await
    }

    pub async fn update_item(&self, id: i32, payload: UpdateItem) -> AppResult<Item> {
        if let Some(category_id) = payload.category_id {
            self.repository.items.get_category(category_id).await?;
        }

        self.repository
            .items
            .update_item(
                id,
                payload.name.as_deref(),
                payload.category_id,
                payload.stock_quantity,
                payload.approved,
            )
            .await
    }
}
