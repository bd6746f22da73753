pub mod models;
mod routes;

use async_trait::async_trait;
use axum::{routing::get, Router};
use library_db::Catalog;
use library_kernel::{settings::LibrarySettings, InitCtx, Module};
use serde_json::json;

/// Shared state of the book handlers
#[derive(Clone)]
pub struct BooksState {
    pub catalog: Catalog,
    pub library: LibrarySettings,
}

/// Books module: paginated listing of published books
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(catalog: Catalog, library: LibrarySettings) -> Self {
        Self {
            state: BooksState { catalog, library },
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.environment(),
            backend = self.state.catalog.backend(),
            default_limit = self.state.library.default_limit,
            max_limit = self.state.library.max_limit,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/books", get(routes::list_books))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List published books, newest first",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "s",
                                "in": "query",
                                "description": "Case-insensitive title substring",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "termId",
                                "in": "query",
                                "description": "Only books related to this taxonomy term",
                                "schema": { "type": "integer" }
                            },
                            {
                                "name": "limit",
                                "in": "query",
                                "description": "Page size",
                                "schema": { "type": "integer" }
                            },
                            {
                                "name": "lastId",
                                "in": "query",
                                "description": "Id of the last book of the previous page",
                                "schema": { "type": "integer" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Page of books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "data": {
                                                    "type": "array",
                                                    "items": {
                                                        "$ref": "#/components/schemas/Book"
                                                    }
                                                }
                                            },
                                            "required": ["data"]
                                        }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
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
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "title": { "type": "string" },
                            "authors": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Author" }
                            },
                            "thumbnail": {
                                "type": ["string", "null"],
                                "description": "URL of the book's attachment"
                            }
                        },
                        "required": ["id", "title", "authors", "thumbnail"]
                    },
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string" }
                        },
                        "required": ["id", "name"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(catalog: Catalog, library: LibrarySettings) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(catalog, library))
}

#[cfg(test)]
mod tests {
    use crate::modules::test_support::{catalog_from, get_json, library_catalog, router_for};
    use axum::http::StatusCode;
    use serde_json::json;

    fn ids(body: &serde_json::Value) -> Vec<u64> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|book| book["id"].as_u64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn single_book_with_relations() {
        let catalog = catalog_from(json!({
            "posts": [
                {"id": 5, "post_title": "Dune", "post_type": "book", "post_status": "publish"},
                {"id": 6, "post_type": "attachment", "post_status": "inherit", "post_parent": 5, "guid": "http://x/dune.jpg"}
            ],
            "terms": [{"term_id": 2, "name": "Herbert", "slug": "herbert"}],
            "term_taxonomy": [{"term_taxonomy_id": 2, "term_id": 2, "taxonomy": "author", "count": 1}],
            "term_relationships": [{"object_id": 5, "term_taxonomy_id": 2}]
        }));

        let (status, body) = get_json(router_for(catalog), "/library/v1/books").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"data": [{
                "id": 5,
                "title": "Dune",
                "authors": [{"id": 2, "name": "Herbert"}],
                "thumbnail": "http://x/dune.jpg"
            }]})
        );
    }

    #[tokio::test]
    async fn lists_only_published_books_newest_first() {
        let (status, body) = get_json(router_for(library_catalog()), "/library/v1/books").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![9, 7, 5]);
        assert_eq!(body["data"][1]["thumbnail"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn search_and_term_filters_combine() {
        let router = router_for(library_catalog());

        let (_, body) = get_json(router.clone(), "/library/v1/books?s=DUNE").await;
        assert_eq!(ids(&body), vec![7, 5]);

        let (_, body) = get_json(router.clone(), "/library/v1/books?termId=4").await;
        assert_eq!(ids(&body), vec![9, 5]);

        let (_, body) = get_json(router, "/library/v1/books?s=dune&termId=4").await;
        assert_eq!(ids(&body), vec![5]);
    }

    #[tokio::test]
    async fn cursor_pagination() {
        let router = router_for(library_catalog());

        let (_, body) = get_json(router.clone(), "/library/v1/books?limit=2").await;
        assert_eq!(ids(&body), vec![9, 7]);

        let (_, body) = get_json(router, "/library/v1/books?limit=2&lastId=7").await;
        assert_eq!(ids(&body), vec![5]);
    }

    #[tokio::test]
    async fn malformed_numbers_are_ignored() {
        let (status, body) = get_json(
            router_for(library_catalog()),
            "/library/v1/books?termId=abc&limit=&lastId=-1",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![9, 7, 5]);
    }

    #[tokio::test]
    async fn repeated_parameters_use_the_last_value() {
        let router = router_for(library_catalog());

        let (status, body) =
            get_json(router.clone(), "/library/v1/books?termId=5&termId=4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![9, 5]);

        let (status, body) = get_json(router, "/library/v1/books?termId=4&termId=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": []}));
    }

    #[tokio::test]
    async fn search_keeps_padding() {
        let (status, body) =
            get_json(router_for(library_catalog()), "/library/v1/books?s=dune%20").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![7]);
        assert_eq!(body["data"][0]["title"], "Dune Messiah");
    }

    #[tokio::test]
    async fn no_match_returns_empty_data() {
        let (status, body) = get_json(
            router_for(library_catalog()),
            "/library/v1/books?s=neuromancer",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": []}));
    }
}
