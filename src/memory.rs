use std::sync::{Arc, PoisonError, RwLock};

use crate::catalog::BookCatalog;
use crate::error::CatalogError;
use crate::models::{Book, BookFilter, BookSummary, NewBook};
use crate::repo::BookRepo;

/// Shared handle to a single process-wide catalog.
///
/// Reads take the lock shared and writes take it exclusively, so each update or
/// delete is applied atomically against the state it observed.
#[derive(Clone, Default)]
pub struct InMemoryBookRepo {
    catalog: Arc<RwLock<BookCatalog>>,
}

impl InMemoryBookRepo {
    pub fn new(catalog: BookCatalog) -> Self {
        InMemoryBookRepo {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> CatalogError {
    CatalogError::Internal("catalog lock poisoned by a panicked request".to_string())
}

impl BookRepo for InMemoryBookRepo {
    async fn list_books(&self, filter: BookFilter) -> Result<Vec<BookSummary>, CatalogError> {
        let catalog = self.catalog.read().map_err(poisoned)?;
        Ok(catalog.list(&filter))
    }

    async fn get_book(&self, id: &str) -> Result<Book, CatalogError> {
        let catalog = self.catalog.read().map_err(poisoned)?;
        catalog.get(id)
    }

    async fn insert_book(&self, new_book: NewBook) -> Result<String, CatalogError> {
        let mut catalog = self.catalog.write().map_err(poisoned)?;
        catalog.insert(new_book)
    }

    async fn update_book(&self, id: &str, new_book: NewBook) -> Result<(), CatalogError> {
        let mut catalog = self.catalog.write().map_err(poisoned)?;
        catalog.update(id, new_book)
    }

    async fn delete_book(&self, id: &str) -> Result<(), CatalogError> {
        let mut catalog = self.catalog.write().map_err(poisoned)?;
        catalog.delete(id)
    }
}
