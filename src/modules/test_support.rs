//! Helpers for exercising module routers against a memory catalog.

use std::sync::Arc;

use axum::{body::Body, http::Request, http::StatusCode, Router};
use http_body_util::BodyExt;
use library_db::{memory::Fixture, memory::MemoryStore, Catalog};
use library_kernel::{settings::Settings, ModuleRegistry};
use tower::ServiceExt;

const LIBRARY_FIXTURE: &str = include_str!("../../fixtures/library.json");

pub fn catalog_from(tables: serde_json::Value) -> Catalog {
    let fixture: Fixture = serde_json::from_value(tables).unwrap();
    Catalog::new(Arc::new(MemoryStore::new(fixture)))
}

/// Catalog over `fixtures/library.json`
pub fn library_catalog() -> Catalog {
    catalog_from(serde_json::from_str(LIBRARY_FIXTURE).unwrap())
}

/// Full application router with default settings
pub fn router_for(catalog: Catalog) -> Router {
    let settings = Settings::default();
    let mut registry = ModuleRegistry::new();
    super::register_all(&mut registry, catalog, &settings).unwrap();
    library_http::build_router(&registry, &settings)
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}
