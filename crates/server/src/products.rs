//! Read-only product catalog API.
//!
//! Endpoints:
//! - `GET /api/v1/products`      — list products matching the supplied filters
//! - `GET /api/v1/products/{id}` — fetch a single product by id
//!
//! Listing never fails: unusable filter values are dropped during coercion in
//! [`ProductFilter::from_params`], so the worst case is an empty array.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use shelf_core::{Catalog, FilterParams, Product, ProductFilter, ProductId};
use tracing::{info, warn};

#[derive(Clone)]
pub struct ProductsState {
    catalog: Arc<Catalog>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/products/{id}", get(get_product))
        .with_state(ProductsState { catalog })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn list_products(
    Query(params): Query<FilterParams>,
    State(state): State<ProductsState>,
) -> Json<Vec<Product>> {
    let filter = ProductFilter::from_params(&params);
    let matches = filter.apply(&state.catalog);

    info!(
        event_name = "api.products.list",
        returned = matches.len(),
        limit = filter.limit,
        "product list query served"
    );

    Json(matches.into_iter().cloned().collect())
}

async fn get_product(
    Path(id): Path<String>,
    State(state): State<ProductsState>,
) -> Result<Json<Product>, (StatusCode, Json<ApiError>)> {
    let product_id = ProductId(id);

    match state.catalog.get(&product_id) {
        Some(product) => {
            info!(
                event_name = "api.products.get",
                product_id = %product_id.0,
                "product fetched by id"
            );
            Ok(Json(product.clone()))
        }
        None => {
            warn!(
                event_name = "api.products.get_miss",
                product_id = %product_id.0,
                "product id not present in catalog"
            );
            Err(not_found(&product_id))
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(product_id: &ProductId) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError { error: format!("product `{}` not found", product_id.0) }),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use rust_decimal::Decimal;
    use shelf_core::DEFAULT_LIMIT;
    use tower::ServiceExt;

    use super::*;

    fn state() -> State<ProductsState> {
        let catalog = Catalog::builtin().expect("builtin catalog");
        State(ProductsState { catalog: Arc::new(catalog) })
    }

    fn params(
        q: Option<&str>,
        category: Option<&str>,
        price_min: Option<&str>,
        price_max: Option<&str>,
        limit: Option<&str>,
    ) -> Query<FilterParams> {
        Query(FilterParams {
            q: q.map(str::to_string),
            category: category.map(str::to_string),
            price_min: price_min.map(str::to_string),
            price_max: price_max.map(str::to_string),
            limit: limit.map(str::to_string),
        })
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|product| product.id.0.as_str()).collect()
    }

    #[tokio::test]
    async fn list_combines_filters_conjunctively() {
        let Json(products) =
            list_products(params(Some("coding"), Some("laptop"), None, Some("60000"), None), state())
                .await;

        assert_eq!(ids(&products), vec!["p1"]);
        assert_eq!(products[0].price, Decimal::new(52_000, 0));
    }

    #[tokio::test]
    async fn list_without_params_returns_catalog_order_up_to_default_limit() {
        let Json(products) = list_products(params(None, None, None, None, None), state()).await;

        assert!(!products.is_empty());
        assert!(products.len() <= DEFAULT_LIMIT);
        assert_eq!(products[0].id.0, "p1");
    }

    #[tokio::test]
    async fn list_returns_empty_array_for_inverted_price_window() {
        let Json(products) =
            list_products(params(None, None, Some("50000"), Some("100"), None), state()).await;

        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn list_with_explicit_limit_returns_exactly_the_capped_prefix() {
        let Json(products) =
            list_products(params(None, None, None, None, Some("5")), state()).await;

        assert_eq!(ids(&products), vec!["p1", "p2", "p3", "p4", "p5"]);
    }

    #[tokio::test]
    async fn get_returns_the_full_record() {
        let result = get_product(Path("p10".to_string()), state()).await;

        let Json(product) = result.expect("p10 exists");
        assert_eq!(product.id.0, "p10");
        assert_eq!(product.name, "Sony WH-1000XM5");
        assert!(product.tags.iter().any(|tag| tag == "noise-cancelling"));
    }

    #[tokio::test]
    async fn get_miss_returns_not_found_with_explicit_body() {
        let result = get_product(Path("p999".to_string()), state()).await;

        let (status, Json(body)) = result.err().expect("missing id should be an error");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "product `p999` not found");
    }

    // -----------------------------------------------------------------------
    // Routing tests
    // -----------------------------------------------------------------------

    fn test_router() -> Router {
        let catalog = Catalog::builtin().expect("builtin catalog");
        router(Arc::new(catalog))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router response");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = serde_json::from_slice(&bytes).expect("json body");
        (status, value)
    }

    #[tokio::test]
    async fn list_route_parses_query_string_filters() {
        let (status, body) = get_json("/api/v1/products?category=laptop&priceMax=60000&q=coding").await;

        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().expect("array body");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], "p1");
    }

    #[tokio::test]
    async fn list_route_ignores_malformed_numeric_params() {
        let (status, body) = get_json("/api/v1/products?priceMax=cheap&limit=lots").await;

        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().expect("array body");
        assert_eq!(items.len(), 12);
    }

    #[tokio::test]
    async fn get_route_reports_missing_ids_as_not_found() {
        let (status, body) = get_json("/api/v1/products/does-not-exist").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "product `does-not-exist` not found");
    }
}
