use crate::error::CatalogError;
use crate::models::{Book, BookFilter, BookSummary, NewBook};
use std::future::Future;

pub trait BookRepo {
    fn list_books(
        &self,
        filter: BookFilter,
    ) -> impl Future<Output = Result<Vec<BookSummary>, CatalogError>> + Send;

    fn get_book(&self, id: &str) -> impl Future<Output = Result<Book, CatalogError>> + Send;

    /// Returns the ID generated for the new book
    fn insert_book(&self, new_book: NewBook)
        -> impl Future<Output = Result<String, CatalogError>> + Send;

    fn update_book(
        &self,
        id: &str,
        new_book: NewBook,
    ) -> impl Future<Output = Result<(), CatalogError>> + Send;

    fn delete_book(&self, id: &str) -> impl Future<Output = Result<(), CatalogError>> + Send;
}
