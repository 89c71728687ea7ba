mod common;

use axum::http::StatusCode;
use catalog_service::dtos::ProductResponse;
use catalog_service::services::UnavailableStore;
use common::{get, ids, numbers, router_with, router_with_store, ProductBuilder};
use std::sync::Arc;

fn assert_non_increasing(values: &[f64]) {
    assert!(
        values.windows(2).all(|w| w[0] >= w[1]),
        "not sorted descending: {:?}",
        values
    );
}

#[tokio::test]
async fn list_returns_every_product() {
    let products: Vec<_> = (0..4)
        .map(|i| ProductBuilder::new(&format!("item-{}", i)).build())
        .collect();
    let expected: Vec<String> = products.iter().map(|p| p.id.to_hex()).collect();

    let (status, body) = get(router_with(products), "/api/products").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), expected);
}

#[tokio::test]
async fn list_on_empty_store_is_an_empty_array() {
    let (status, body) = get(router_with(vec![]), "/api/products").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn get_by_id_returns_that_product() {
    let wanted = ProductBuilder::new("mop")
        .brand("Acme")
        .category("cleaning")
        .discount(25.0)
        .rating(4.2)
        .build();
    let products = vec![ProductBuilder::new("bucket").build(), wanted.clone()];

    let (status, body) = get(
        router_with(products),
        &format!("/api/products/{}", wanted.id.to_hex()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let product: ProductResponse = serde_json::from_value(body).unwrap();
    assert_eq!(product, ProductResponse::from(wanted));
}

#[tokio::test]
async fn get_by_unknown_id_is_404() {
    let (status, body) = get(
        router_with(vec![ProductBuilder::new("mop").build()]),
        "/api/products/000000000000000000000000",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "error": "Product not found" }));
}

#[tokio::test]
async fn get_by_malformed_id_is_500() {
    let (status, body) = get(router_with(vec![]), "/api/products/not-an-object-id").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": "Failed to fetch product" }));
}

#[tokio::test]
async fn flash_sale_returns_six_highest_discounts_descending() {
    let products = [10.0, 50.0, 30.0, 90.0, 5.0, 20.0, 70.0]
        .into_iter()
        .map(|d| ProductBuilder::new(&format!("d{}", d)).discount(d).build())
        .collect();

    let (status, body) = get(router_with(products), "/api/products/flash-sale").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        numbers(&body, "discount_percentage"),
        vec![90.0, 70.0, 50.0, 30.0, 20.0, 10.0]
    );
}

#[tokio::test]
async fn flash_sale_with_few_products_returns_them_all() {
    let products = vec![
        ProductBuilder::new("a").discount(15.0).build(),
        ProductBuilder::new("b").discount(45.0).build(),
    ];

    let (status, body) = get(router_with(products), "/api/products/flash-sale").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(numbers(&body, "discount_percentage"), vec![45.0, 15.0]);
}

#[tokio::test]
async fn most_popular_returns_at_most_five_by_rating() {
    let products = [3.5, 4.9, 1.2, 4.9, 2.8, 5.0, 0.5, 4.0]
        .into_iter()
        .enumerate()
        .map(|(i, r)| ProductBuilder::new(&format!("p{}", i)).rating(r).build())
        .collect();

    let (status, body) = get(router_with(products), "/api/products/most-popular").await;

    assert_eq!(status, StatusCode::OK);
    let ratings = numbers(&body, "rating");
    assert_eq!(ratings.len(), 5);
    assert_non_increasing(&ratings);
    assert_eq!(ratings, vec![5.0, 4.9, 4.9, 4.0, 3.5]);
}

#[tokio::test]
async fn filter_without_parameters_equals_list() {
    let products: Vec<_> = vec![
        ProductBuilder::new("a").brand("Acme").build(),
        ProductBuilder::new("b").brand("Zenith").category("garden").build(),
        ProductBuilder::new("c").build(),
    ];
    let app = router_with(products);

    let (_, all) = get(app.clone(), "/api/products").await;
    let (status, filtered) = get(app.clone(), "/api/products/filter").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered, all);

    let (_, empty_values) = get(app, "/api/products/filter?brand=&category=").await;
    assert_eq!(empty_values, all);
}

#[tokio::test]
async fn filter_by_brand_returns_only_that_brand() {
    let first = ProductBuilder::new("sponge").brand("Acme").build();
    let second = ProductBuilder::new("brush").brand("Acme").build();
    let products = vec![
        first.clone(),
        ProductBuilder::new("gloves").brand("Zenith").build(),
        second.clone(),
    ];

    let (status, body) = get(router_with(products), "/api/products/filter?brand=Acme").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![first.id.to_hex(), second.id.to_hex()]);
}

#[tokio::test]
async fn filter_by_brand_is_an_exact_match() {
    let products = vec![
        ProductBuilder::new("a").brand("Acme").build(),
        ProductBuilder::new("b").brand("Acme Pro").build(),
        ProductBuilder::new("c").brand("acme").build(),
    ];

    let (_, body) = get(router_with(products), "/api/products/filter?brand=Acme").await;

    assert_eq!(ids(&body).len(), 1);
    assert_eq!(body[0]["brand_name"], "Acme");
}

#[tokio::test]
async fn filter_by_brand_and_category_requires_both() {
    let wanted = ProductBuilder::new("a").brand("Acme").category("kitchen").build();
    let products = vec![
        wanted.clone(),
        ProductBuilder::new("b").brand("Acme").category("garden").build(),
        ProductBuilder::new("c").brand("Zenith").category("kitchen").build(),
    ];

    let (status, body) = get(
        router_with(products),
        "/api/products/filter?brand=Acme&category=kitchen",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![wanted.id.to_hex()]);
}

#[tokio::test]
async fn filter_by_category_alone() {
    let products = vec![
        ProductBuilder::new("a").category("garden").build(),
        ProductBuilder::new("b").category("kitchen").build(),
        ProductBuilder::new("c").category("garden").build(),
    ];

    let (_, body) = get(router_with(products), "/api/products/filter?category=garden").await;

    let categories: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["garden", "garden"]);
}

#[tokio::test]
async fn repeated_filter_parameter_is_a_json_500() {
    let products = vec![
        ProductBuilder::new("a").brand("Acme").build(),
        ProductBuilder::new("b").brand("Zenith").build(),
    ];

    for uri in [
        "/api/products/filter?brand=Acme&brand=Zenith",
        "/api/products/filter?category=garden&category=kitchen",
    ] {
        let (status, body) = get(router_with(products.clone()), uri).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Failed to fetch filtered products" }),
            "{}",
            uri
        );
    }
}

#[tokio::test]
async fn unreachable_store_yields_route_specific_500s() {
    let cases = [
        ("/api/products", "Failed to fetch products"),
        ("/api/products/65a1f0c2e4b0a1b2c3d4e5f6", "Failed to fetch product"),
        ("/api/products/flash-sale", "Failed to fetch flash-sale products"),
        ("/api/products/most-popular", "Failed to fetch popular products"),
        ("/api/products/filter?brand=Acme", "Failed to fetch filtered products"),
    ];

    for (uri, message) in cases {
        let app = router_with_store(Arc::new(UnavailableStore));
        let (status, body) = get(app, uri).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body, serde_json::json!({ "error": message }), "{}", uri);
    }
}
