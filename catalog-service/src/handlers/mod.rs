pub mod health;
pub mod products;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use products::{filter_products, flash_sale, get_product, list_products, most_popular};
