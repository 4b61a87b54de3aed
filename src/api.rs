use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::{CatalogError, ValidationError};
use crate::models::{Book, BookFilter, BookQuery, BookSummary, NewBook};
use crate::repo::BookRepo;

#[derive(Clone)]
struct AppState<R> {
    repo: R,
}

pub fn build_app<R>(repo: R) -> Router
where
    R: BookRepo + Send + Sync + Clone + 'static,
{
    Router::new()
        .route("/books", get(list_books::<R>).post(insert_book::<R>))
        .route(
            "/books/{id}",
            get(get_book::<R>)
                .put(update_book::<R>)
                .delete(delete_book::<R>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { repo })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum ResponseStatus {
    Success,
    Fail,
    Error,
}

/// Body shared by every response; only successes carry `data`
#[derive(Serialize)]
struct Envelope<T> {
    status: ResponseStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookIdData {
    book_id: String,
}

#[derive(Serialize)]
struct BooksData {
    books: Vec<BookSummary>,
}

#[derive(Serialize)]
struct BookData {
    book: Book,
}

fn success<T: Serialize>(status: StatusCode, message: &str, data: Option<T>) -> Response {
    let body = Envelope {
        status: ResponseStatus::Success,
        message: message.to_string(),
        data,
    };
    (status, Json(body)).into_response()
}

/// What the request was trying to do, used to phrase failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    List,
    Get,
    Update,
    Delete,
}

impl Action {
    fn failure_prefix(self) -> &'static str {
        match self {
            Action::Add => "Failed to add book",
            Action::List => "Failed to list books",
            Action::Get => "Failed to retrieve book",
            Action::Update => "Failed to update book",
            Action::Delete => "Failed to delete book",
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn fail(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    fn from_catalog(action: Action, err: CatalogError) -> Self {
        let prefix = action.failure_prefix();
        match err {
            CatalogError::Validation(ValidationError::NameRequired) => ApiError::fail(
                StatusCode::BAD_REQUEST,
                format!("{prefix}. Please provide the book name"),
            ),
            CatalogError::Validation(ValidationError::ReadPageExceedsPageCount) => ApiError::fail(
                StatusCode::BAD_REQUEST,
                format!("{prefix}. readPage must not be greater than pageCount"),
            ),
            CatalogError::NotFound(_) if action == Action::Get => {
                ApiError::fail(StatusCode::NOT_FOUND, "Book not found")
            }
            CatalogError::NotFound(_) => {
                ApiError::fail(StatusCode::NOT_FOUND, format!("{prefix}. Id not found"))
            }
            CatalogError::Internal(detail) => {
                error!("{prefix}: {detail}");
                ApiError::fail(StatusCode::INTERNAL_SERVER_ERROR, prefix)
            }
        }
    }

    fn bad_body(action: Action, rejection: JsonRejection) -> Self {
        info!("Rejected request body: {}", rejection.body_text());
        ApiError::fail(
            StatusCode::BAD_REQUEST,
            format!("{}. {}", action.failure_prefix(), rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.status.is_server_error() {
            ResponseStatus::Error
        } else {
            ResponseStatus::Fail
        };
        let body: Envelope<()> = Envelope {
            status,
            message: self.message,
            data: None,
        };
        (self.status, Json(body)).into_response()
    }
}

async fn list_books<R: BookRepo>(
    State(state): State<AppState<R>>,
    query: Result<Query<BookQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let filter = match query {
        Ok(Query(query)) => BookFilter::from(query),
        Err(rejection) => {
            info!(
                "Undecodable query string, matching no books: {}",
                rejection.body_text()
            );
            BookFilter::match_nothing()
        }
    };

    let books = state
        .repo
        .list_books(filter)
        .await
        .map_err(|e| ApiError::from_catalog(Action::List, e))?;

    info!("Retrieved {} books from the catalog", books.len());

    Ok(success(
        StatusCode::OK,
        "Books retrieved successfully",
        Some(BooksData { books }),
    ))
}

async fn get_book<R: BookRepo>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    match state.repo.get_book(&id).await {
        Ok(book) => {
            info!("Retrieved book from catalog: {:?}", book);
            Ok(success(
                StatusCode::OK,
                "Book retrieved successfully",
                Some(BookData { book }),
            ))
        }
        Err(err) => {
            info!("No book found in catalog with ID: {}", id);
            Err(ApiError::from_catalog(Action::Get, err))
        }
    }
}

async fn insert_book<R: BookRepo>(
    State(state): State<AppState<R>>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(new_book) =
        payload.map_err(|rejection| ApiError::bad_body(Action::Add, rejection))?;

    match state.repo.insert_book(new_book).await {
        Ok(book_id) => {
            info!("Inserted book into the catalog with ID: {}", book_id);
            Ok(success(
                StatusCode::CREATED,
                "Book added successfully",
                Some(BookIdData { book_id }),
            ))
        }
        Err(err) => {
            info!("Rejected new book: {}", err);
            Err(ApiError::from_catalog(Action::Add, err))
        }
    }
}

async fn update_book<R: BookRepo>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(new_book) = match payload {
        Ok(payload) => payload,
        // An unknown ID is reported ahead of any problem with the body
        Err(rejection) => match state.repo.get_book(&id).await {
            Err(err @ CatalogError::NotFound(_)) => {
                info!("Tried to update non-existent book with ID: {}", id);
                return Err(ApiError::from_catalog(Action::Update, err));
            }
            Err(err) => return Err(ApiError::from_catalog(Action::Update, err)),
            Ok(_) => return Err(ApiError::bad_body(Action::Update, rejection)),
        },
    };

    match state.repo.update_book(&id, new_book).await {
        Ok(()) => {
            info!("Updated book in catalog with ID: {}", id);
            Ok(success::<()>(StatusCode::OK, "Book updated successfully", None))
        }
        Err(err @ CatalogError::NotFound(_)) => {
            info!("Tried to update non-existent book with ID: {}", id);
            Err(ApiError::from_catalog(Action::Update, err))
        }
        Err(err) => {
            info!("Rejected update of book {}: {}", id, err);
            Err(ApiError::from_catalog(Action::Update, err))
        }
    }
}

async fn delete_book<R: BookRepo>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    match state.repo.delete_book(&id).await {
        Ok(()) => {
            info!("Deleted book from catalog with ID: {}", id);
            Ok(success::<()>(StatusCode::OK, "Book deleted successfully", None))
        }
        Err(err) => {
            info!("Tried to delete non-existent book with ID: {}", id);
            Err(ApiError::from_catalog(Action::Delete, err))
        }
    }
}
