//! Product persistence.
//!
//! Routes never talk to MongoDB directly: they describe what they need as a
//! [`ProductQuery`] and hand it to whichever [`ProductStore`] the application
//! was started with.

pub mod memory;
pub mod mongo;
pub mod unavailable;

use crate::models::Product;
use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use service_core::error::AppError;

pub use memory::InMemoryProductStore;
pub use mongo::MongoProductStore;
pub use unavailable::UnavailableStore;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>, AppError>;

    /// Fails with [`AppError::BadRequest`] when `id` is not a valid ObjectId.
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Equality constraints; every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub brand_name: Option<String>,
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn to_document(&self) -> Document {
        let mut filter = doc! {};
        if let Some(brand_name) = &self.brand_name {
            filter.insert("brand_name", brand_name.as_str());
        }
        if let Some(category) = &self.category {
            filter.insert("category", category.as_str());
        }
        filter
    }

    pub fn matches(&self, product: &Product) -> bool {
        fn field_matches(wanted: &Option<String>, actual: &Option<String>) -> bool {
            wanted.is_none() || wanted == actual
        }
        field_matches(&self.brand_name, &product.brand_name)
            && field_matches(&self.category, &product.category)
    }
}

/// Descending rankings offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    DiscountPercentageDesc,
    RatingDesc,
}

impl ProductSort {
    pub fn field(self) -> &'static str {
        match self {
            ProductSort::DiscountPercentageDesc => "discount_percentage",
            ProductSort::RatingDesc => "rating",
        }
    }

    pub fn to_document(self) -> Document {
        let mut sort = Document::new();
        sort.insert(self.field(), -1);
        sort
    }

    pub fn key(self, product: &Product) -> Option<f64> {
        match self {
            ProductSort::DiscountPercentageDesc => product.discount_percentage,
            ProductSort::RatingDesc => product.rating,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub sort: Option<ProductSort>,
    pub limit: Option<i64>,
}

impl ProductQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filtered(filter: ProductFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn top(sort: ProductSort, limit: i64) -> Self {
        Self {
            filter: ProductFilter::default(),
            sort: Some(sort),
            limit: Some(limit),
        }
    }

    pub fn find_options(&self) -> Option<FindOptions> {
        if self.sort.is_none() && self.limit.is_none() {
            return None;
        }
        Some(
            FindOptions::builder()
                .sort(self.sort.map(ProductSort::to_document))
                .limit(self.limit)
                .build(),
        )
    }
}
