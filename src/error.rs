use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name required")]
    NameRequired,

    #[error("readPage exceeds pageCount")]
    ReadPageExceedsPageCount,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid book: {0}")]
    Validation(#[from] ValidationError),

    #[error("no book found with ID: {0}")]
    NotFound(String),

    #[error("catalog inconsistency: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("BOOKSHELF_PORT must be a port number, got {0:?}")]
    InvalidPort(String),
}
