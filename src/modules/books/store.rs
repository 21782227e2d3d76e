//! In-memory book repository.
//!
//! All reads share the lock; every mutation holds the write lock across its
//! lookup and update so concurrent handlers never observe a half-applied change.

use tokio::sync::RwLock;

use super::models::{seed_books, Book, BookPatch, NewBook};

struct Catalog {
    books: Vec<Book>,
    /// Next id to hand out. Only ever grows, so deleted ids are never reused.
    next_id: i64,
}

/// Ordered collection of books shared by every request handler.
pub struct BookStore {
    catalog: RwLock<Catalog>,
}

impl BookStore {
    /// Create a store holding `books` in the given order.
    pub fn new(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self {
            catalog: RwLock::new(Catalog { books, next_id }),
        }
    }

    /// Create a store pre-filled with the seed catalog.
    pub fn seeded() -> Self {
        Self::new(seed_books())
    }

    pub async fn list(&self) -> Vec<Book> {
        self.catalog.read().await.books.clone()
    }

    pub async fn len(&self) -> usize {
        self.catalog.read().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// First book whose id matches.
    pub async fn get(&self, id: i64) -> Option<Book> {
        let catalog = self.catalog.read().await;
        catalog.books.iter().find(|b| b.id == id).cloned()
    }

    /// Append a new book and return it with its assigned id.
    pub async fn create(&self, new_book: NewBook) -> Book {
        let mut catalog = self.catalog.write().await;
        let id = catalog.next_id;
        catalog.next_id += 1;

        let book = new_book.into_book(id);
        catalog.books.push(book.clone());
        book
    }

    /// Apply `patch` to the book with `id`, returning the updated record.
    pub async fn update(&self, id: i64, patch: BookPatch) -> Option<Book> {
        let mut catalog = self.catalog.write().await;
        let book = catalog.books.iter_mut().find(|b| b.id == id)?;
        patch.apply(book);
        Some(book.clone())
    }

    /// Remove the book with `id` and return the books that remain.
    pub async fn delete(&self, id: i64) -> Option<Vec<Book>> {
        let mut catalog = self.catalog.write().await;
        let index = catalog.books.iter().position(|b| b.id == id)?;
        catalog.books.remove(index);
        Some(catalog.books.clone())
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::seeded()
    }
}
