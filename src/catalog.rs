use chrono::Utc;

use crate::error::CatalogError;
use crate::models::{generate_book_id, Book, BookFilter, BookSummary, NewBook};

/// In-memory, insertion-ordered collection of books.
///
/// Operations are synchronous and take `&mut self` for writes; callers that
/// share a catalog across tasks must serialise access themselves.
#[derive(Debug, Default)]
pub struct BookCatalog {
    books: Vec<Book>,
}

impl BookCatalog {
    pub fn new() -> Self {
        BookCatalog::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Validates and appends a new book, returning its generated ID.
    pub fn insert(&mut self, new_book: NewBook) -> Result<String, CatalogError> {
        new_book.validate()?;

        let id = self.unused_id();
        self.books.push(Book::new(id.clone(), new_book, Utc::now()));

        if !self.contains(&id) {
            return Err(CatalogError::Internal(format!(
                "book {id} missing right after insert"
            )));
        }

        Ok(id)
    }

    pub fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .iter()
            .filter(|book| filter.matches(book))
            .map(BookSummary::from)
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<Book, CatalogError> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Unknown IDs are reported before any validation failure.
    pub fn update(&mut self, id: &str, new_book: NewBook) -> Result<(), CatalogError> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        new_book.validate()?;
        book.apply(new_book, Utc::now());

        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), CatalogError> {
        let index = self
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        self.books.remove(index);

        Ok(())
    }

    fn contains(&self, id: &str) -> bool {
        self.books.iter().any(|book| book.id == id)
    }

    fn unused_id(&self) -> String {
        loop {
            let id = generate_book_id();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}
