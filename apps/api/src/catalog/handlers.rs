//! Axum route handlers for the catalog (book browsing) API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::catalog::{Book, BookList};
use crate::errors::AppError;
use crate::state::AppState;

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    /// Accepted for interface parity; Gutendex pages at its own fixed size.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// GET /api/books
///
/// Proxies a page of catalog search results.
pub async fn handle_list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<BookList>, AppError> {
    if query.page == 0 {
        return Err(AppError::Validation("page must be at least 1".to_string()));
    }
    if query.limit == 0 || query.limit > 50 {
        return Err(AppError::Validation(
            "limit must be between 1 and 50".to_string(),
        ));
    }

    let list = state
        .catalog
        .list_books(query.search.as_deref(), query.page)
        .await
        .map_err(|e| AppError::Catalog(format!("fetching books failed: {e}")))?;

    Ok(Json(list))
}

/// GET /api/books/:id
///
/// Returns metadata for one book. Any upstream failure maps to 404 so a bad
/// id and an unreachable catalog read the same to the client.
pub async fn handle_get_book(
    State(state): State<AppState>,
    Path(book_id): Path<u64>,
) -> Result<Json<Book>, AppError> {
    let book = state
        .catalog
        .get_book(book_id)
        .await
        .map_err(|e| AppError::NotFound(format!("Book {book_id} not found: {e}")))?;

    Ok(Json(book))
}
