//! Axum route handler for the summarize API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::summarize::run_pipeline;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub book_id: u64,
    /// Page up to which the book is summarized, in pipeline page units.
    pub page_number: u32,
    /// Optional explicit text URL; otherwise resolved from the book's formats.
    #[serde(default)]
    pub text_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub book_title: String,
    pub author: String,
    pub page_number: u32,
    /// The clipped text the summary was generated from.
    pub original_text: String,
}

/// POST /api/summarize
///
/// Full pipeline: book lookup → text download → paginate → locate first
/// content page → clip → summarize.
pub async fn handle_summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    if request.page_number == 0 {
        return Err(AppError::Validation(
            "page_number must be at least 1".to_string(),
        ));
    }

    let book = state
        .catalog
        .get_book(request.book_id)
        .await
        .map_err(|e| AppError::NotFound(format!("Book {} not found: {e}", request.book_id)))?;

    let text_url = match request.text_url {
        Some(url) => url,
        None => book
            .text_url()
            .ok_or_else(|| {
                AppError::Validation(
                    "No plain text format available for this book".to_string(),
                )
            })?
            .to_string(),
    };

    let book_text = state
        .catalog
        .download_text(&text_url)
        .await
        .map_err(|e| AppError::Catalog(format!("downloading book text failed: {e}")))?;

    if book_text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "book text is empty".to_string(),
        ));
    }

    info!(
        "Summarizing book {} up to page {} ({} chars of text)",
        request.book_id,
        request.page_number,
        book_text.len()
    );

    let outcome = run_pipeline(&book_text, request.page_number, state.llm.as_ref()).await?;

    let book_title = if book.title.is_empty() {
        "Unknown".to_string()
    } else {
        book.title.clone()
    };

    Ok(Json(SummarizeResponse {
        summary: outcome.summary,
        book_title,
        author: book.primary_author().to_string(),
        page_number: request.page_number,
        original_text: outcome.clipped_text,
    }))
}
