//! Shared fixtures for catalog-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use catalog_service::models::Product;
use catalog_service::services::{InMemoryProductStore, ProductStore};
use catalog_service::startup::{build_router, AppState};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tower::ServiceExt;

pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            product: Product {
                id: ObjectId::new(),
                title: Some(title.to_string()),
                price: Some(100.0),
                discount_price: Some(100.0),
                discount_percentage: Some(0.0),
                image_url: Some(format!("https://cdn.example.com/{}.png", title)),
                rating: Some(0.0),
                brand_name: None,
                category: None,
            },
        }
    }

    pub fn brand(mut self, brand: &str) -> Self {
        self.product.brand_name = Some(brand.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.product.category = Some(category.to_string());
        self
    }

    pub fn discount(mut self, percentage: f64) -> Self {
        self.product.discount_percentage = Some(percentage);
        self.product.discount_price = self.product.price.map(|p| p * (1.0 - percentage / 100.0));
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.product.rating = Some(rating);
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}

pub fn router_with_store(store: Arc<dyn ProductStore>) -> Router {
    build_router(AppState::new(store))
}

pub fn router_with(products: Vec<Product>) -> Router {
    router_with_store(Arc::new(InMemoryProductStore::new(products)))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is not JSON")
    };
    (status, json)
}

pub fn ids(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|p| p["_id"].as_str().unwrap().to_string())
        .collect()
}

pub fn numbers(body: &serde_json::Value, field: &str) -> Vec<f64> {
    body.as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|p| p[field].as_f64().unwrap())
        .collect()
}
