use super::{ProductQuery, ProductStore};
use crate::models::Product;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::cmp::Ordering;

/// Store backed by a vector, for local runs and tests.
///
/// Ranked queries order like MongoDB does for a descending sort: numbers
/// first, then NaN, then products missing the sort attribute. Ties keep
/// insertion order.
#[derive(Default)]
pub struct InMemoryProductStore {
    products: Vec<Product>,
}

impl InMemoryProductStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

/// Total order for a descending sort. MongoDB ranks missing values below
/// NaN and NaN below every other number.
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    let rank = |value: Option<f64>| match value {
        None => (0, 0.0),
        Some(v) if v.is_nan() => (1, 0.0),
        Some(v) => (2, v),
    };
    let (rank_a, value_a) = rank(a);
    let (rank_b, value_b) = rank(b);
    rank_b.cmp(&rank_a).then_with(|| value_b.total_cmp(&value_a))
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>, AppError> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| query.filter.matches(p))
            .cloned()
            .collect();

        if let Some(sort) = query.sort {
            products.sort_by(|a, b| descending(sort.key(a), sort.key(b)));
        }

        if let Some(limit) = query.limit.filter(|l| *l > 0) {
            products.truncate(limit as usize);
        }

        Ok(products)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let oid = ObjectId::parse_str(id).map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!("Invalid product id '{}': {}", id, e))
        })?;
        Ok(self.products.iter().find(|p| p.id == oid).cloned())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
