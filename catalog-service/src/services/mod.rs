pub mod catalog;
pub mod metrics;
pub mod store;

pub use catalog::{CatalogService, FLASH_SALE_LIMIT, MOST_POPULAR_LIMIT};
pub use metrics::{get_metrics, init_metrics};
pub use store::{
    InMemoryProductStore, MongoProductStore, ProductFilter, ProductQuery, ProductSort,
    ProductStore, UnavailableStore,
};
