//! HTTP routes for the Books module.

mod form;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use bookstore_http::{error::AppError, router::strict};

use super::models::{Book, BookForm, BookPatch, NewBook};
use super::store::BookStore;
use form::Submitted;

const INVALID_ID: &str = "Invalid book ID";
const NOT_FOUND: &str = "Book not found";
const MISSING_FIELDS: &str = "Title and author are required fields";

/// Build the Books router over `store`.
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/books", strict(get(list_books)))
        .route("/books/create", strict(post(create_book)))
        .route("/books/{id}", strict(get(get_book)))
        .route("/books/update/{id}", strict(put(update_book)))
        .route("/books/delete/{id}", strict(delete(delete_book)))
        .fallback(unmatched_book_path)
        .with_state(store)
}

/// Method a path under `/books/` is served with, picked by longest prefix.
fn id_route_method(path: &str) -> Option<Method> {
    if path.starts_with("/books/update/") {
        Some(Method::PUT)
    } else if path.starts_with("/books/delete/") {
        Some(Method::DELETE)
    } else if path.starts_with("/books/") {
        Some(Method::GET)
    } else {
        None
    }
}

/// Paths under an id route that no `{id}` pattern matched: an empty id
/// (`/books/`) or one spanning several segments (`/books/1/2`).
async fn unmatched_book_path(method: Method, uri: Uri) -> Response {
    match id_route_method(uri.path()) {
        Some(declared) if declared != method => AppError::method_not_allowed().into_response(),
        Some(_) => AppError::bad_request(INVALID_ID).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::bad_request(INVALID_ID))
}

async fn list_books(State(store): State<Arc<BookStore>>) -> Json<Vec<Book>> {
    Json(store.list().await)
}

async fn get_book(
    State(store): State<Arc<BookStore>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&raw_id)?;

    store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

async fn create_book(
    State(store): State<Arc<BookStore>>,
    Submitted(form): Submitted<BookForm>,
) -> Result<Json<Book>, AppError> {
    let new_book =
        NewBook::from_form(form).ok_or_else(|| AppError::bad_request(MISSING_FIELDS))?;

    let book = store.create(new_book).await;
    tracing::info!(book_id = book.id, title = %book.title, "book created");

    Ok(Json(book))
}

async fn update_book(
    State(store): State<Arc<BookStore>>,
    Path(raw_id): Path<String>,
    Submitted(form): Submitted<BookForm>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&raw_id)?;

    let book = store
        .update(id, BookPatch::from_form(form))
        .await
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    tracing::info!(book_id = id, "book updated");

    Ok(Json(book))
}

async fn delete_book(
    State(store): State<Arc<BookStore>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Book>>, AppError> {
    let id = parse_id(&raw_id)?;

    let remaining = store
        .delete(id)
        .await
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    tracing::info!(book_id = id, remaining = remaining.len(), "book deleted");

    Ok(Json(remaining))
}
