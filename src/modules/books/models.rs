use serde::{Deserialize, Serialize};

/// Description stored when a book is created without one.
pub const DEFAULT_DESC: &str = "Book doesn't have description";

/// Domain model for the Books module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier for the book
    pub id: i64,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Free-form description
    pub desc: String,
}

impl Book {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            desc: desc.into(),
        }
    }
}

/// Records the catalog starts with.
pub fn seed_books() -> Vec<Book> {
    (1..=3)
        .map(|n| {
            Book::new(
                n,
                format!("Book {n}"),
                format!("Author {n}"),
                format!("Desc {n}"),
            )
        })
        .collect()
}

/// Form fields as submitted by the client; every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub desc: Option<String>,
}

impl BookForm {
    /// Fill fields missing from `self` with the ones in `fallback`.
    pub fn or(self, fallback: BookForm) -> BookForm {
        BookForm {
            title: self.title.or(fallback.title),
            author: self.author.or(fallback.author),
            desc: self.desc.or(fallback.desc),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Validated input for creating a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub desc: String,
}

impl NewBook {
    /// Returns `None` when `title` or `author` is missing or empty.
    pub fn from_form(form: BookForm) -> Option<Self> {
        let title = non_empty(form.title)?;
        let author = non_empty(form.author)?;
        let desc = non_empty(form.desc).unwrap_or_else(|| DEFAULT_DESC.to_string());

        Some(Self {
            title,
            author,
            desc,
        })
    }

    pub(crate) fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            desc: self.desc,
        }
    }
}

/// Partial update; only the fields that are set overwrite the stored book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub desc: Option<String>,
}

impl BookPatch {
    /// Empty strings count as "not provided".
    pub fn from_form(form: BookForm) -> Self {
        Self {
            title: non_empty(form.title),
            author: non_empty(form.author),
            desc: non_empty(form.desc),
        }
    }

    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(desc) = self.desc {
            book.desc = desc;
        }
    }
}
