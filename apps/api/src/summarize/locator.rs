//! Content Locator — asks the LLM where the narrative content of a book
//! begins and parses its loosely-formatted answer into a page number.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::AppError;
use crate::llm_client::{GenOptions, LlmError, TextGenerator};
use crate::summarize::prompts::LOCATE_FIRST_CONTENT_PAGE_TEMPLATE;

/// Page number used when the model's answer carries no parseable page token.
/// A deliberate lossy default: models phrase answers unpredictably, and
/// "summarize from the beginning" is the safe reading of an unclear answer.
const FALLBACK_FIRST_PAGE: u32 = 1;

/// First case-insensitive `Page <digits>` token, whitespace flexible.
static PAGE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)page\s*(\d+)").expect("page-number pattern is valid"));

/// Asks the generator for the first content page of `annotated` text
/// (the output of `pagination::paginate`).
///
/// Transport/status failures and empty response payloads propagate as
/// `AppError::Llm`; only a successful-but-unparseable answer falls back to
/// page 1.
pub async fn locate_first_content_page(
    annotated: &str,
    llm: &dyn TextGenerator,
) -> Result<u32, AppError> {
    let prompt = LOCATE_FIRST_CONTENT_PAGE_TEMPLATE.replace("{paginated_text}", annotated);

    let generation = llm
        .generate(&prompt, &GenOptions::default())
        .await
        .map_err(|e| AppError::Llm(format!("locating first content page failed: {e}")))?;

    let answer = generation
        .text()
        .ok_or(LlmError::EmptyContent)
        .map_err(|e| AppError::Llm(format!("locating first content page failed: {e}")))?;

    Ok(parse_first_content_page(answer))
}

/// Best-effort parse of the model's answer. Returns the first `Page <n>`
/// match, or the page-1 fallback when there is none (or the number does not
/// fit in a u32).
pub fn parse_first_content_page(answer: &str) -> u32 {
    PAGE_NUMBER_RE
        .captures(answer)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(FALLBACK_FIRST_PAGE)
}
