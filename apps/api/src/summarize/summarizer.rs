//! Summarizer — turns a clipped text range into a prose summary via the LLM.

use crate::errors::AppError;
use crate::llm_client::{GenOptions, TextGenerator};
use crate::summarize::prompts::SUMMARIZE_TEMPLATE;

/// Returned verbatim when the generator answers without a text payload.
pub const NO_SUMMARY_SENTINEL: &str = "No summary generated";

/// Asks the generator to summarize `clipped` (a raw-text range produced by
/// `pagination::extract_range`) and returns its response verbatim.
/// Generator failure propagates as `AppError::Llm`.
pub async fn summarize_clip(clipped: &str, llm: &dyn TextGenerator) -> Result<String, AppError> {
    let prompt = SUMMARIZE_TEMPLATE.replace("{text}", clipped);

    let generation = llm
        .generate(&prompt, &GenOptions::default())
        .await
        .map_err(|e| AppError::Llm(format!("summary generation failed: {e}")))?;

    Ok(generation
        .text()
        .unwrap_or(NO_SUMMARY_SENTINEL)
        .to_string())
}
