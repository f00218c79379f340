//! Integration tests for `StorefrontClient` and the catalog load policy.
//!
//! Uses `wiremock` to stand up a local GraphQL endpoint for each test so no
//! real network traffic is made. Covers the happy paths (single page,
//! cursor pagination, page cap), every error variant the client can
//! surface, and the degraded-mode decisions of `load_catalog`.

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voltige_storefront::{load_catalog, CatalogOutcome, StorefrontClient, StorefrontError};

const GRAPHQL_PATH: &str = "/api/2024-01/graphql.json";
const TOKEN: &str = "shpat_test_token";

fn test_client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(&server.uri(), TOKEN, "2024-01", 5, "voltige-test/0.1")
        .expect("failed to build test StorefrontClient")
}

/// A products page body with one minimal product per handle.
fn products_body(handles: &[&str], has_next: bool, cursor: Option<&str>) -> serde_json::Value {
    let edges: Vec<serde_json::Value> = handles
        .iter()
        .map(|handle| {
            json!({
                "node": {
                    "id": format!("gid://shopify/Product/{handle}"),
                    "title": handle,
                    "handle": handle,
                    "description": "",
                    "productType": "Trottinettes électriques",
                    "vendor": "Xiaomi",
                    "tags": ["Xiaomi"],
                    "availableForSale": true,
                    "createdAt": "2024-03-01T09:30:00Z",
                    "priceRange": {
                        "minVariantPrice": { "amount": "499.0", "currencyCode": "EUR" }
                    },
                    "images": { "edges": [] },
                    "variants": { "edges": [{ "node": {
                        "id": format!("gid://shopify/ProductVariant/{handle}-1"),
                        "title": "Default Title",
                        "price": { "amount": "499.0", "currencyCode": "EUR" },
                        "compareAtPrice": null,
                        "availableForSale": true,
                        "selectedOptions": []
                    } }] }
                }
            })
        })
        .collect();

    json!({
        "data": {
            "products": {
                "pageInfo": { "hasNextPage": has_next, "endCursor": cursor },
                "edges": edges
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_products_flattens_a_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Storefront-Access-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(
            &["trottinette-xiaomi-mi-pro-2"],
            false,
            None,
        )))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_all_products(None, 100, 20).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let products = result.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].handle, "trottinette-xiaomi-mi-pro-2");
    assert_eq!(products[0].variants.len(), 1, "variants should be flattened");
    assert_eq!(products[0].vendor.as_deref(), Some("Xiaomi"));
}

#[tokio::test]
async fn fetch_all_products_follows_cursors_across_pages() {
    let server = MockServer::start().await;

    // Page 2: matched by the cursor in the request body.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "after": "cursor-2" } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&products_body(&["produit-b"], false, None)),
        )
        .mount(&server)
        .await;

    // Page 1: no cursor yet.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "after": null } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&products_body(&["produit-a"], true, Some("cursor-2"))),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_all_products(None, 100, 20).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let products = result.unwrap();
    assert_eq!(products.len(), 2, "expected 2 products across 2 pages");
    assert_eq!(products[0].handle, "produit-a");
    assert_eq!(products[1].handle, "produit-b");
}

#[tokio::test]
async fn fetch_all_products_truncates_at_the_page_cap() {
    let server = MockServer::start().await;

    // The server always advertises another page; the cap must stop us.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&products_body(&["produit"], true, Some("encore"))),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_all_products(None, 100, 2).await;

    assert!(result.is_ok(), "expected truncated Ok, got: {result:?}");
    assert_eq!(
        result.unwrap().len(),
        2,
        "expected exactly max_pages pages of products"
    );
}

#[tokio::test]
async fn fetch_all_products_forwards_the_search_term() {
    let server = MockServer::start().await;

    // Only a request whose variables carry the term gets an answer.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "query": "xiaomi" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(
            &["accelerateur-xiaomi"],
            false,
            None,
        )))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_all_products(Some("xiaomi"), 100, 20).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(result.unwrap()[0].handle, "accelerateur-xiaomi");
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_all_products(None, 100, 20).await;

    match result.unwrap_err() {
        StorefrontError::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, 30),
        other => panic!("expected StorefrontError::RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_without_retry_after_defaults_to_60s() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_all_products(None, 100, 20).await;

    match result.unwrap_err() {
        StorefrontError::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, 60),
        other => panic!("expected StorefrontError::RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_all_products(None, 100, 20).await;

    match result.unwrap_err() {
        StorefrontError::UnexpectedStatus { status, .. } => assert_eq!(status, 503),
        other => panic!("expected StorefrontError::UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn graphql_errors_are_collected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "data": null,
            "errors": [
                { "message": "Field 'producds' doesn't exist on type 'QueryRoot'" },
                { "message": "syntax error" }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_all_products(None, 100, 20).await;

    match result.unwrap_err() {
        StorefrontError::GraphQl { messages, .. } => {
            assert_eq!(messages.len(), 2);
            assert!(messages[0].contains("producds"));
        }
        other => panic!("expected StorefrontError::GraphQl, got: {other:?}"),
    }
}

#[tokio::test]
async fn missing_data_is_its_own_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "data": null })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_all_products(None, 100, 20).await;

    assert!(
        matches!(result.unwrap_err(), StorefrontError::MissingData { .. }),
        "expected StorefrontError::MissingData"
    );
}

#[tokio::test]
async fn malformed_json_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_all_products(None, 100, 20).await;

    assert!(
        matches!(result.unwrap_err(), StorefrontError::Deserialize { .. }),
        "expected StorefrontError::Deserialize"
    );
}

#[tokio::test]
async fn second_page_failure_fails_the_whole_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("cursor-fail"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "after": null } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&products_body(&["produit-a"], true, Some("cursor-fail"))),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_all_products(None, 100, 20).await;

    assert!(
        matches!(
            result.unwrap_err(),
            StorefrontError::UnexpectedStatus { status: 500, .. }
        ),
        "expected the page-2 failure to propagate"
    );
}

// ---------------------------------------------------------------------------
// Degraded-mode policy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unconfigured_storefront_serves_the_fallback_catalog() {
    let outcome = load_catalog(None, "", 100, 20).await.unwrap();

    match &outcome {
        CatalogOutcome::Degraded { products, reason } => {
            assert!(!products.is_empty());
            assert_eq!(reason.to_string(), "storefront not configured");
        }
        other => panic!("expected Degraded, got: {other:?}"),
    }
    assert_eq!(outcome.source().label(), "fallback");
}

#[tokio::test]
async fn empty_result_with_a_term_is_no_matches_not_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[], false, None)))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let outcome = load_catalog(Some(&client), "inexistant", 100, 20)
        .await
        .unwrap();

    match outcome {
        CatalogOutcome::NoMatches { ref term } => assert_eq!(term, "inexistant"),
        other => panic!("expected NoMatches, got: {other:?}"),
    }
}

#[tokio::test]
async fn empty_full_catalog_degrades_to_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(&[], false, None)))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let outcome = load_catalog(Some(&client), "", 100, 20).await.unwrap();

    match outcome {
        CatalogOutcome::Degraded { ref reason, .. } => {
            assert_eq!(reason.to_string(), "live catalog is empty");
        }
        other => panic!("expected Degraded, got: {other:?}"),
    }
}

#[tokio::test]
async fn upstream_failure_without_a_term_degrades_to_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let outcome = load_catalog(Some(&client), "", 100, 20).await.unwrap();

    match outcome {
        CatalogOutcome::Degraded {
            ref products,
            ref reason,
        } => {
            assert!(!products.is_empty());
            assert!(reason.to_string().contains("upstream fetch failed"));
        }
        other => panic!("expected Degraded, got: {other:?}"),
    }
}

#[tokio::test]
async fn upstream_failure_with_a_term_propagates_the_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = load_catalog(Some(&client), "xiaomi", 100, 20).await;

    assert!(
        matches!(
            result.unwrap_err(),
            StorefrontError::UnexpectedStatus { status: 502, .. }
        ),
        "a failed search must surface the error, not fake an answer"
    );
}

#[tokio::test]
async fn live_products_keep_the_live_source_marker() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_body(
            &["trottinette-xiaomi-mi-pro-2"],
            false,
            None,
        )))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let outcome = load_catalog(Some(&client), "", 100, 20).await.unwrap();

    assert!(matches!(outcome, CatalogOutcome::Live(_)));
    assert_eq!(outcome.source().label(), "live");
    assert_eq!(outcome.products().len(), 1);
}
