mod common;

use std::sync::Arc;

use common::{init_test_logging, CannedBackend};
use shopfront::feed::{filter_products, BannerCarousel, FeedError, ProductFeed};
use shopfront::primitives::http_client::HttpError;
use tokio_test::{assert_err, assert_ok};

const BASE_URL: &str = "http://172.16.53.247:5000";

const CATEGORIES: &str = r#"[
    {"id": 1, "name": "Thời trang", "image": "http://cdn.test/c1.png"},
    {"id": 2, "name": "Điện thoại", "image": "http://cdn.test/c2.png"}
]"#;

const PRODUCTS: &str = r#"[
    {"id": "p1", "name": "iPhone 15", "image": "http://cdn.test/p1.png", "price": 22990000},
    {"id": "p2", "name": "Ốp lưng iPhone", "image": "http://cdn.test/p2.png", "price": 99000},
    {"id": "p3", "name": "Áo khoác", "image": "http://cdn.test/p3.png", "price": 350000}
]"#;

fn backend() -> CannedBackend {
    CannedBackend::new()
        .respond("http://172.16.53.247:5000/categories", CATEGORIES)
        .respond("http://172.16.53.247:5000/products", PRODUCTS)
}

#[tokio::test]
async fn test_home_feed_then_search() {
    init_test_logging();
    let feed = ProductFeed::new(Arc::new(backend()), BASE_URL);

    let home = assert_ok!(feed.load_home().await);
    assert_eq!(home.categories.len(), 2);
    assert_eq!(home.categories[0].id, "1");
    assert_eq!(home.products.len(), 3);

    let found = filter_products(home.products.clone(), "iphone");
    let ids: Vec<_> = found.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p1", "p2"]);

    assert_eq!(filter_products(home.products, "").len(), 3);
}

#[tokio::test]
async fn test_missing_categories_endpoint_still_loads_products() {
    init_test_logging();
    let backend = CannedBackend::new().respond("http://172.16.53.247:5000/products", PRODUCTS);
    let feed = ProductFeed::new(Arc::new(backend), BASE_URL);

    let home = assert_ok!(feed.load_home().await);
    assert!(home.categories.is_empty());
    assert_eq!(home.products.len(), 3);
}

#[tokio::test]
async fn test_offline_backend() {
    init_test_logging();
    let feed = ProductFeed::new(Arc::new(CannedBackend::offline()), BASE_URL);

    let err = assert_err!(feed.load_home().await);
    assert!(matches!(err, FeedError::Http(HttpError::NoConnectivity)));
    assert_eq!(err.to_string(), "No internet connectivity");
}

#[test]
fn test_banner_carousel_cycles() {
    let carousel = BannerCarousel::new();
    let count = carousel.banners().len();
    let first = carousel.current().unwrap();

    for _ in 0..count {
        carousel.advance();
    }

    assert_eq!(carousel.current(), Some(first));
    assert_eq!(carousel.interval_ms(), 10_000);
}
