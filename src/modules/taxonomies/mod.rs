pub mod models;
mod routes;

use async_trait::async_trait;
use axum::{routing::get, Router};
use library_db::Catalog;
use library_kernel::{InitCtx, Module};
use serde_json::json;

pub use routes::TERM_NOT_FOUND;

#[derive(Clone)]
pub struct TaxonomiesState {
    pub catalog: Catalog,
}

/// Taxonomies module: author and category listings plus single-term lookup
pub struct TaxonomiesModule {
    state: TaxonomiesState,
}

impl TaxonomiesModule {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            state: TaxonomiesState { catalog },
        }
    }
}

fn term_list_path(summary: &str, tag: &str) -> serde_json::Value {
    json!({
        "get": {
            "summary": summary,
            "tags": [tag],
            "parameters": [
                {
                    "name": "s",
                    "in": "query",
                    "description": "Case-insensitive name substring",
                    "schema": { "type": "string" }
                },
                {
                    "name": "id",
                    "in": "query",
                    "description": "Return only this term, unwrapped, when it matches",
                    "schema": { "type": "integer" }
                }
            ],
            "responses": {
                "200": {
                    "description": "Terms in use, ordered by name",
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "object",
                                "properties": {
                                    "data": {
                                        "oneOf": [
                                            {
                                                "type": "array",
                                                "items": { "$ref": "#/components/schemas/Term" }
                                            },
                                            { "$ref": "#/components/schemas/Term" }
                                        ]
                                    }
                                },
                                "required": ["data"]
                            }
                        }
                    }
                }
            }
        }
    })
}

#[async_trait]
impl Module for TaxonomiesModule {
    fn name(&self) -> &'static str {
        "taxonomies"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.environment(),
            backend = self.state.catalog.backend(),
            "taxonomies module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/authors", get(routes::list_authors))
            .route("/categories", get(routes::list_categories))
            .route("/taxonomies/{id}", get(routes::get_term))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/authors": term_list_path("List authors in use", "Authors"),
                "/categories": term_list_path("List categories in use", "Categories"),
                "/taxonomies/{id}": {
                    "get": {
                        "summary": "Look up a single term",
                        "tags": ["Taxonomies"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The term",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "data": { "$ref": "#/components/schemas/TermSummary" }
                                            },
                                            "required": ["data"]
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No term with this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Term": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string" },
                            "slug": { "type": "string" },
                            "count": { "type": "integer" }
                        },
                        "required": ["id", "name", "slug", "count"]
                    },
                    "TermSummary": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string" },
                            "slug": { "type": "string" }
                        },
                        "required": ["id", "name", "slug"]
                    }
                }
            }
        }))
    }
}

/// Create a new instance of the taxonomies module
pub fn create_module(catalog: Catalog) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(TaxonomiesModule::new(catalog))
}
