use super::{ProductQuery, ProductStore};
use crate::models::Product;
use async_trait::async_trait;
use service_core::error::AppError;

/// Stand-in used when no MongoDB client could be created at startup.
///
/// The process keeps serving; every catalog call fails and health checks
/// report the service as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

#[async_trait]
impl ProductStore for UnavailableStore {
    async fn find(&self, _query: &ProductQuery) -> Result<Vec<Product>, AppError> {
        Err(AppError::ServiceUnavailable)
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Product>, AppError> {
        Err(AppError::ServiceUnavailable)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(AppError::ServiceUnavailable)
    }
}
