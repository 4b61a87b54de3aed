mod api;
mod catalog;
mod config;
mod error;
mod memory;
mod models;
mod repo;

use std::net::SocketAddr;

use axum::{serve::Serve, Router};
use tokio::net::TcpListener;
use tracing::info;

pub use api::build_app;
pub use catalog::BookCatalog;
pub use config::ServerConfig;
pub use error::{CatalogError, ConfigError, ValidationError};
pub use memory::InMemoryBookRepo;
pub use models::{Book, BookFilter, BookQuery, FlagFilter, BookSummary, NewBook};
pub use repo::BookRepo;

/// Binds the listener and returns its address alongside the server future.
///
/// Every server starts with an empty catalog.
pub async fn start_server(
    config: &ServerConfig,
) -> std::io::Result<(SocketAddr, Serve<TcpListener, Router, Router>)> {
    let repo = InMemoryBookRepo::new(BookCatalog::new());

    let router = build_app(repo);

    let listener = TcpListener::bind(config.address()).await?;
    let local_addr = listener.local_addr()?;
    info!("Listening on {}", local_addr);

    Ok((local_addr, axum::serve(listener, router)))
}
