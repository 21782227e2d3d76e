pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{InitCtx, Module};
use serde_json::json;

use store::BookStore;

/// Books module serving the in-memory catalog
pub struct BooksModule {
    store: Arc<BookStore>,
}

impl BooksModule {
    /// Module over the seed catalog
    pub fn new() -> Self {
        Self::with_store(Arc::new(BookStore::seeded()))
    }

    pub fn with_store(store: Arc<BookStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<BookStore> {
        &self.store
    }
}

impl Default for BooksModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.store.len().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "text/plain": {
                        "schema": { "type": "string" }
                    }
                }
            })
        };
        let book = json!({
            "description": "Book",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Book" }
                }
            }
        });
        let book_list = json!({
            "description": "List of books",
            "content": {
                "application/json": {
                    "schema": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Book" }
                    }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        }]);
        let form_body = |required: bool| {
            json!({
                "content": {
                    "application/x-www-form-urlencoded": {
                        "schema": {
                            "$ref": "#/components/schemas/BookForm"
                        }
                    }
                },
                "required": required
            })
        };

        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": book_list.clone(),
                            "400": error("Method is not allowed")
                        }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "responses": {
                            "200": book.clone(),
                            "400": error("Invalid book ID"),
                            "404": error("Book not found")
                        }
                    }
                },
                "/books/create": {
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": form_body(true),
                        "responses": {
                            "200": book.clone(),
                            "400": error("Title and author are required fields")
                        }
                    }
                },
                "/books/update/{id}": {
                    "put": {
                        "summary": "Update the non-empty fields of a book",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "requestBody": form_body(false),
                        "responses": {
                            "200": book,
                            "400": error("Invalid book ID"),
                            "404": error("Book not found")
                        }
                    }
                },
                "/books/delete/{id}": {
                    "delete": {
                        "summary": "Delete a book and return the remaining ones",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "200": book_list,
                            "400": error("Invalid book ID"),
                            "404": error("Book not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Unique identifier for the book"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the book"
                            },
                            "author": {
                                "type": "string",
                                "description": "Author of the book"
                            },
                            "desc": {
                                "type": "string",
                                "description": "Free-form description"
                            }
                        },
                        "required": ["id", "title", "author", "desc"]
                    },
                    "BookForm": {
                        "type": "object",
                        "description": "title and author are required on create",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "desc": { "type": "string" }
                        }
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
        let books = self.store.len().await;
        tracing::info!(module = self.name(), books, "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_every_route() {
        let spec = BooksModule::new().openapi().unwrap();
        let paths = spec["paths"].as_object().unwrap();

        for (path, method) in [
            ("/books", "get"),
            ("/books/{id}", "get"),
            ("/books/create", "post"),
            ("/books/update/{id}", "put"),
            ("/books/delete/{id}", "delete"),
        ] {
            assert!(paths[path][method].is_object(), "{method} {path}");
        }
        assert!(spec["components"]["schemas"]["Book"].is_object());
    }

    #[tokio::test]
    async fn shares_store_with_caller() {
        let store = Arc::new(BookStore::new(Vec::new()));
        let module = BooksModule::with_store(store.clone());
        assert!(Arc::ptr_eq(module.store(), &store));
        assert!(module.store().is_empty().await);
    }
}
