use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::ValidationError;

pub const BOOK_ID_LENGTH: usize = 16;

const BOOK_ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Builds a stored book from an already validated payload.
    pub(crate) fn new(id: String, new_book: NewBook, now: DateTime<Utc>) -> Self {
        Book {
            id,
            name: new_book.name.unwrap_or_default(),
            year: new_book.year,
            author: new_book.author,
            summary: new_book.summary,
            publisher: new_book.publisher,
            page_count: new_book.page_count,
            read_page: new_book.read_page,
            finished: new_book.page_count == new_book.read_page,
            reading: new_book.reading.unwrap_or(false),
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Overwrites everything except `id` and `inserted_at`.
    pub(crate) fn apply(&mut self, new_book: NewBook, now: DateTime<Utc>) {
        self.name = new_book.name.unwrap_or_default();
        self.year = new_book.year;
        self.author = new_book.author;
        self.summary = new_book.summary;
        self.publisher = new_book.publisher;
        self.page_count = new_book.page_count;
        self.read_page = new_book.read_page;
        self.finished = new_book.page_count == new_book.read_page;
        self.reading = new_book.reading.unwrap_or(false);
        self.updated_at = now;
    }
}

// Payload for both insert and update; `finished` is never accepted from callers
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    pub reading: Option<bool>,
}

impl NewBook {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if matches!(self.name.as_deref(), None | Some("")) {
            return Err(ValidationError::NameRequired);
        }
        if self.read_page > self.page_count {
            return Err(ValidationError::ReadPageExceedsPageCount);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        BookSummary {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Constraint on a boolean field taken from the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagFilter {
    Is(bool),
    /// A value that is neither `0`/`1` nor `false`/`true`; matches no book
    Unrecognised,
}

impl FlagFilter {
    fn accepts(self, value: bool) -> bool {
        matches!(self, FlagFilter::Is(expected) if expected == value)
    }
}

/// Conjunctive constraints for listing. `None` leaves a field unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub name: Option<String>,
    pub reading: Option<FlagFilter>,
    pub finished: Option<FlagFilter>,
}

impl BookFilter {
    /// Filter for a query string that could not be decoded at all
    pub fn match_nothing() -> Self {
        BookFilter {
            reading: Some(FlagFilter::Unrecognised),
            ..BookFilter::default()
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        let name_matches = self.name.as_ref().map_or(true, |needle| {
            book.name.to_lowercase().contains(&needle.to_lowercase())
        });
        let reading_matches = self.reading.map_or(true, |flag| flag.accepts(book.reading));
        let finished_matches = self.finished.map_or(true, |flag| flag.accepts(book.finished));

        name_matches && reading_matches && finished_matches
    }
}

/// Raw `GET /books` query string, before flag parsing.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BookQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

impl From<BookQuery> for BookFilter {
    fn from(query: BookQuery) -> Self {
        BookFilter {
            name: query.name.filter(|name| !name.is_empty()),
            reading: parse_flag(query.reading.as_deref()),
            finished: parse_flag(query.finished.as_deref()),
        }
    }
}

/// Accepts `1`/`true` and `0`/`false`; empty or missing means no constraint.
fn parse_flag(value: Option<&str>) -> Option<FlagFilter> {
    match value {
        None | Some("") => None,
        Some("1") | Some("true") => Some(FlagFilter::Is(true)),
        Some("0") | Some("false") => Some(FlagFilter::Is(false)),
        Some(_) => Some(FlagFilter::Unrecognised),
    }
}

pub fn generate_book_id() -> String {
    let mut rng = rand::thread_rng();
    (0..BOOK_ID_LENGTH)
        .map(|_| BOOK_ID_ALPHABET[rng.gen_range(0..BOOK_ID_ALPHABET.len())] as char)
        .collect()
}
