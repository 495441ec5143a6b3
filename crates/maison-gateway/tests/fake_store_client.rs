//! Integration tests for `FakeStoreClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers every gateway operation on the happy path
//! and every error variant a request can surface.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use maison_gateway::{CatalogGateway, FakeStoreClient, GatewayError};

fn test_client(base_url: &str) -> FakeStoreClient {
    FakeStoreClient::new(base_url, 5, "maison-test/0.1").expect("failed to build test client")
}

fn product_json(id: u64, price: f64, category: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "price": price,
        "description": "A test product.",
        "category": category,
        "image": format!("https://fakestoreapi.com/img/{id}.jpg"),
        "rating": { "rate": 4.1, "count": 259 }
    })
}

// ---------------------------------------------------------------------------
// fetch_all
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_returns_normalized_products_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(2, 22.3, "men's clothing"),
            product_json(1, 109.95, "men's clothing"),
        ])))
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .fetch_all()
        .await
        .expect("expected Ok");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, "2");
    assert_eq!(products[1].id, "1");
    assert_eq!(products[1].name, "Product 1");
    assert_eq!(products[1].price, Decimal::from_str("109.95").unwrap());
    assert_eq!(products[1].images, vec!["https://fakestoreapi.com/img/1.jpg"]);
}

#[tokio::test]
async fn fetch_all_returns_empty_vec_for_empty_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let products = test_client(&server.uri()).fetch_all().await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn fetch_all_skips_products_that_fail_normalization() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, 10.0, "jewelery"),
            product_json(2, -4.0, "jewelery"),
            product_json(3, 30.0, "jewelery"),
        ])))
        .mount(&server)
        .await;

    let products = test_client(&server.uri()).fetch_all().await.unwrap();
    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[tokio::test]
async fn fetch_all_propagates_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_all().await;
    match result {
        Err(GatewayError::UnexpectedStatus { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected GatewayError::UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_all_propagates_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_all().await;
    assert!(
        matches!(result, Err(GatewayError::Deserialize { .. })),
        "expected GatewayError::Deserialize, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// fetch_by_category
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_by_category_requests_category_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/category/jewelery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(5, 695.0, "jewelery"),
            product_json(6, 168.0, "jewelery"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .fetch_by_category("jewelery")
        .await
        .unwrap();

    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p.category == "jewelery"));
}

#[tokio::test]
async fn fetch_by_category_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/category/lamps"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_by_category("lamps").await;
    assert!(
        matches!(result, Err(GatewayError::NotFound { .. })),
        "expected GatewayError::NotFound, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// fetch_by_id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_by_id_returns_single_product() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(3, 55.99, "men's clothing")))
        .mount(&server)
        .await;

    let product = test_client(&server.uri()).fetch_by_id("3").await.unwrap();
    assert_eq!(product.id, "3");
    assert_eq!(product.price, Decimal::from_str("55.99").unwrap());
    assert!((product.rating - 4.1).abs() < f64::EPSILON);
}

#[tokio::test]
async fn fetch_by_id_empty_body_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/999"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_by_id("999").await;
    assert!(
        matches!(result, Err(GatewayError::NotFound { .. })),
        "expected GatewayError::NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_by_id_null_body_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/998"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_by_id("998").await;
    assert!(
        matches!(result, Err(GatewayError::NotFound { .. })),
        "expected GatewayError::NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_by_id_rejects_non_numeric_id_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_by_id("chair-7").await;
    assert!(
        matches!(result, Err(GatewayError::InvalidProductId { ref id }) if id == "chair-7"),
        "expected GatewayError::InvalidProductId, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// fetch_categories
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_categories_returns_names_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "electronics",
            "jewelery",
            "men's clothing",
            "women's clothing"
        ])))
        .mount(&server)
        .await;

    let categories = test_client(&server.uri()).fetch_categories().await.unwrap();
    assert_eq!(
        categories,
        vec!["electronics", "jewelery", "men's clothing", "women's clothing"]
    );
}

#[tokio::test]
async fn gateway_does_not_retry_failed_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_categories().await;
    assert!(matches!(
        result,
        Err(GatewayError::UnexpectedStatus { status: 500, .. })
    ));
}
