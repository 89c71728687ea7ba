pub mod products;

pub use products::{ProductFilterParams, ProductResponse};
