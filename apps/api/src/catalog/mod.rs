//! Catalog — client for the Gutendex index of Project Gutenberg books.
//!
//! Supplies the two inputs the summarize pipeline needs: book metadata
//! (title, author, available formats) and the plain-text content downloaded
//! from the book's `text/plain` format URL.

pub mod handlers;

use std::collections::HashMap;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Timeout for metadata calls (search, detail).
const METADATA_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
/// Timeout for the full-text download; book texts run to megabytes.
const DOWNLOAD_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// One author record as Gutendex returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
}

/// A single book. Only the fields the pipeline reads are typed; everything
/// else Gutendex sends (subjects, languages, download counts, ...) is kept in
/// `extra` so list/detail responses pass through intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub formats: HashMap<String, String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Book {
    /// URL of the first format whose MIME key contains `text/plain`, if any.
    /// Gutendex keys carry charset suffixes (`text/plain; charset=us-ascii`),
    /// so this is a substring match, not an exact one.
    pub fn text_url(&self) -> Option<&str> {
        self.formats
            .iter()
            .find(|(mime, _)| mime.contains("text/plain"))
            .map(|(_, url)| url.as_str())
    }

    pub fn primary_author(&self) -> &str {
        self.authors
            .first()
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown")
    }
}

/// A page of catalog search results, in Gutendex's envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookList {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Book>,
}

/// Gutendex client. Cheap to clone; the inner reqwest client is shared.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetches one page of books, optionally filtered by a search term.
    pub async fn list_books(
        &self,
        search: Option<&str>,
        page: u32,
    ) -> Result<BookList, CatalogError> {
        let mut request = self
            .client
            .get(&self.base_url)
            .timeout(METADATA_TIMEOUT)
            .query(&[("page", page)]);
        if let Some(term) = search {
            request = request.query(&[("search", term)]);
        }

        let list: BookList = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("Catalog list: page={}, results={}", page, list.results.len());
        Ok(list)
    }

    /// Fetches metadata for a single book by catalog id.
    pub async fn get_book(&self, book_id: u64) -> Result<Book, CatalogError> {
        let url = format!("{}{}/", self.base_url, book_id);
        let book = self
            .client
            .get(&url)
            .timeout(METADATA_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(book)
    }

    /// Downloads the plain-text content of a book from its format URL.
    pub async fn download_text(&self, text_url: &str) -> Result<String, CatalogError> {
        let text = self
            .client
            .get(text_url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!("Downloaded book text: {} bytes", text.len());
        Ok(text)
    }
}
