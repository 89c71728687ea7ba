use crate::dtos::{ProductFilterParams, ProductResponse};
use crate::startup::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use service_core::error::AppError;

/// Replaces any store failure with the route's fixed 500 message, logging
/// the cause. Not-found passes through untouched.
fn fetch_failed(message: &'static str) -> impl Fn(AppError) -> AppError {
    move |err| match err {
        AppError::NotFound(_) => err,
        err => {
            tracing::error!(error = %err, "{}", message);
            AppError::FetchFailed(message.to_string())
        }
    }
}

fn respond(products: Vec<crate::models::Product>) -> Json<Vec<ProductResponse>> {
    Json(products.into_iter().map(ProductResponse::from).collect())
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state
        .catalog
        .list_products()
        .await
        .map_err(fetch_failed("Failed to fetch products"))?;
    Ok(respond(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .catalog
        .get_product(&product_id)
        .await
        .map_err(fetch_failed("Failed to fetch product"))?;
    Ok(Json(ProductResponse::from(product)))
}

pub async fn flash_sale(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state
        .catalog
        .flash_sale()
        .await
        .map_err(fetch_failed("Failed to fetch flash-sale products"))?;
    Ok(respond(products))
}

pub async fn most_popular(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state
        .catalog
        .most_popular()
        .await
        .map_err(fetch_failed("Failed to fetch popular products"))?;
    Ok(respond(products))
}

/// Any query string that does not read as at most one `brand` and one
/// `category` (e.g. a repeated key) fails like a store error.
pub async fn filter_products(
    State(state): State<AppState>,
    params: Result<Query<ProductFilterParams>, QueryRejection>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    const MESSAGE: &str = "Failed to fetch filtered products";

    let Query(params) = params.map_err(|rejection| {
        tracing::error!(error = %rejection, "{}", MESSAGE);
        AppError::FetchFailed(MESSAGE.to_string())
    })?;

    let products = state
        .catalog
        .filter_products(params.into())
        .await
        .map_err(fetch_failed(MESSAGE))?;
    Ok(respond(products))
}
