use crate::models::Product;
use crate::services::ProductFilter;
use serde::{Deserialize, Serialize};

/// JSON shape of a product. The id is the 24-hex ObjectId string under `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            title: product.title,
            price: product.price,
            discount_price: product.discount_price,
            discount_percentage: product.discount_percentage,
            image_url: product.image_url,
            rating: product.rating,
            brand_name: product.brand_name,
            category: product.category,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductFilterParams {
    pub brand: Option<String>,
    pub category: Option<String>,
}

impl From<ProductFilterParams> for ProductFilter {
    fn from(params: ProductFilterParams) -> Self {
        // `?brand=` carries no constraint
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
        ProductFilter {
            brand_name: non_empty(params.brand),
            category: non_empty(params.category),
        }
    }
}
