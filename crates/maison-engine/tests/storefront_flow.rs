//! End-to-end storefront session against a mocked Fake Store API.

use std::str::FromStr;

use maison_core::{AppConfig, Environment, FetchOrdering, FetchStatus, FilterPatch, SortBy};
use maison_engine::{Rejection, Storefront};
use maison_gateway::FakeStoreClient;
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base_url: &str) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "debug".to_string(),
        catalog_base_url: base_url.to_string(),
        request_timeout_secs: 5,
        user_agent: "maison-test/0.1".to_string(),
        fetch_ordering: FetchOrdering::LatestRequest,
        related_products_limit: 2,
    }
}

fn product_json(id: u64, price: f64, category: &str, rate: f64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "price": price,
        "description": "A test product.",
        "category": category,
        "image": format!("https://fakestoreapi.com/img/{id}.jpg"),
        "rating": { "rate": rate, "count": 10 }
    })
}

async fn mock_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, 10.0, "a", 3.0),
            product_json(2, 20.0, "a", 5.0),
            product_json(3, 30.0, "b", 4.0),
            product_json(4, 15.5, "a", 4.0),
            product_json(5, 12.0, "a", 2.0),
        ])))
        .mount(server)
        .await;
}

fn storefront(server: &MockServer) -> Storefront<FakeStoreClient> {
    Storefront::from_config(&config(&server.uri())).expect("storefront should build")
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[tokio::test]
async fn browse_filter_and_checkout() {
    let server = MockServer::start().await;
    mock_catalog(&server).await;
    let shop = storefront(&server);

    assert!(shop.catalog.load_all().await.is_applied());
    shop.catalog.set_filters(
        FilterPatch::new()
            .category("a")
            .sort_by(SortBy::RatingDesc),
    );
    let view: Vec<String> = shop
        .catalog
        .read(|s| s.filtered_items().iter().map(|p| p.id.clone()).collect());
    assert_eq!(view, vec!["2", "4", "1", "5"]);

    let top = shop
        .catalog
        .read(|s| s.filtered_items().first().cloned())
        .expect("filtered view should not be empty");
    shop.catalog.select_product(top.clone());

    let related: Vec<String> = shop.related_products().into_iter().map(|p| p.id).collect();
    assert_eq!(related, vec!["1", "4"]);

    shop.add_to_cart(&top, 2).unwrap();
    shop.add_to_cart(&top, 1).unwrap();
    assert_eq!(shop.add_to_cart(&top, 0), Err(Rejection::NonPositiveQuantity));
    assert!(shop.toggle_like(&top));

    let summary = shop.checkout_summary();
    assert_eq!(summary.lines.len(), 1);
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.total, dec("60"));
    assert!(shop.liked.is_liked("2"));
}

#[tokio::test]
async fn price_range_then_clear_restores_catalog_order() {
    let server = MockServer::start().await;
    mock_catalog(&server).await;
    let shop = storefront(&server);

    shop.catalog.load_all().await;
    shop.catalog.set_filters(FilterPatch::new().category("a"));
    shop.catalog
        .set_filters(FilterPatch::new().price_range(dec("12"), dec("20")));

    let view: Vec<String> = shop
        .catalog
        .read(|s| s.filtered_items().iter().map(|p| p.id.clone()).collect());
    assert_eq!(view, vec!["2", "4", "5"]);

    shop.catalog.set_filters(FilterPatch::new().any_category());
    let view: Vec<String> = shop
        .catalog
        .read(|s| s.filtered_items().iter().map(|p| p.id.clone()).collect());
    assert_eq!(view, vec!["2", "4", "5"]);

    shop.catalog.clear_filters();
    let view: Vec<String> = shop
        .catalog
        .read(|s| s.filtered_items().iter().map(|p| p.id.clone()).collect());
    assert_eq!(view, vec!["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn unknown_product_id_fails_detail_channel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/404"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;
    let shop = storefront(&server);

    shop.catalog.load_by_id("404").await;

    shop.catalog.read(|s| {
        assert!(s.selected_product().is_none());
        let message = s.detail_status().error().expect("detail should fail");
        assert!(message.starts_with("not found"), "got: {message}");
    });
}

#[tokio::test]
async fn non_numeric_product_id_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let shop = storefront(&server);

    shop.catalog.load_by_id("oak-chair").await;

    let status = shop.catalog.read(|s| s.detail_status().clone());
    assert!(
        matches!(status, FetchStatus::Failed(ref m) if m.contains("oak-chair")),
        "got: {status:?}"
    );
}

#[tokio::test]
async fn server_error_leaves_list_failed_and_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/category/b"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let shop = storefront(&server);

    assert!(shop.catalog.load_by_category("b").await.is_applied());

    let snapshot = shop.catalog.snapshot();
    assert!(snapshot.items().is_empty());
    assert_eq!(
        snapshot.list_status().error().map(|m| m.contains("500")),
        Some(true)
    );
}

#[tokio::test]
async fn categories_come_from_the_categories_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a", "b"])))
        .mount(&server)
        .await;
    let shop = storefront(&server);

    shop.catalog.load_categories().await;
    assert_eq!(shop.catalog.snapshot().categories(), ["a", "b"]);
}

#[test]
fn from_config_rejects_bad_base_url() {
    let result = Storefront::from_config(&config("not a url"));
    assert!(result.is_err());
}
