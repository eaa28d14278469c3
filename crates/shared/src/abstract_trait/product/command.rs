use crate::{
    catalog::SaleUpdate,
    domain::{
        requests::{CreateProductRequest, UpdateProductRequest},
        responses::{MessageResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Product,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError>;
    async fn update_product(
        &self,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError>;
    async fn delete_product(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn delete_all_products(&self) -> Result<u64, RepositoryError>;
    /// Deletes every product and inserts `items`, all in one transaction.
    async fn replace_all(
        &self,
        items: &[CreateProductRequest],
    ) -> Result<Vec<Product>, RepositoryError>;
    async fn reset_tags(&self) -> Result<u64, RepositoryError>;
    async fn mark_featured(&self, ids: &[Uuid]) -> Result<u64, RepositoryError>;
    async fn mark_new(&self, ids: &[Uuid]) -> Result<u64, RepositoryError>;
    async fn mark_on_sale(&self, update: &SaleUpdate) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn update_product(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError>;
    async fn delete_product(&self, id: &str) -> Result<MessageResponse, ServiceError>;
}
