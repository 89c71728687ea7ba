use crate::models::Product;
use crate::services::store::{ProductFilter, ProductQuery, ProductSort, ProductStore};
use metrics::counter;
use service_core::error::AppError;
use std::sync::Arc;

/// Size of the flash-sale list.
pub const FLASH_SALE_LIMIT: i64 = 6;
/// Size of the most-popular list.
pub const MOST_POPULAR_LIMIT: i64 = 5;

/// Read-only catalog queries over an injected [`ProductStore`].
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.run("list", ProductQuery::all()).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, AppError> {
        counter!("catalog_queries_total", "operation" => "get").increment(1);
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product not found")))
    }

    /// Products with the highest `discount_percentage`, best first.
    pub async fn flash_sale(&self) -> Result<Vec<Product>, AppError> {
        self.run(
            "flash_sale",
            ProductQuery::top(ProductSort::DiscountPercentageDesc, FLASH_SALE_LIMIT),
        )
        .await
    }

    /// Products with the highest `rating`, best first.
    pub async fn most_popular(&self) -> Result<Vec<Product>, AppError> {
        self.run(
            "most_popular",
            ProductQuery::top(ProductSort::RatingDesc, MOST_POPULAR_LIMIT),
        )
        .await
    }

    /// With an empty filter this is the same query as [`Self::list_products`].
    pub async fn filter_products(&self, filter: ProductFilter) -> Result<Vec<Product>, AppError> {
        self.run("filter", ProductQuery::filtered(filter)).await
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.store.health_check().await
    }

    async fn run(
        &self,
        operation: &'static str,
        query: ProductQuery,
    ) -> Result<Vec<Product>, AppError> {
        counter!("catalog_queries_total", "operation" => operation).increment(1);
        tracing::debug!(operation, ?query, "Running catalog query");
        self.store.find(&query).await
    }
}
