//! Summarize — the book-summarization pipeline.
//!
//! Stages run strictly sequentially, each feeding the next:
//! raw text → `pagination::paginate` → `locator::locate_first_content_page`
//! → `pagination::extract_range` (over the RAW text) → `summarizer::summarize_clip`.
//!
//! The two LLM calls are the only suspension points; everything in between is
//! pure. A failing stage aborts the pipeline — no partial results.

pub mod handlers;
pub mod locator;
pub mod prompts;
pub mod summarizer;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::pagination::{extract_range, paginate};

/// Page size, in characters, used both for the display pagination shown to
/// the LLM and for the clipping offset arithmetic. `paginate` and
/// `extract_range` take the size as independent parameters; this constant is
/// what keeps the two in agreement for the whole pipeline.
pub const MAX_CHARS_PER_PAGE: usize = 3000;

/// Everything the pipeline produced for one request.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub summary: String,
    /// The raw-text range that was summarized; echoed back to the caller.
    pub clipped_text: String,
    pub first_content_page: u32,
}

/// Runs the full pipeline over one book's raw text, summarizing from the
/// first content page (as judged by the LLM) up to `target_page`.
pub async fn run_pipeline(
    text: &str,
    target_page: u32,
    llm: &dyn TextGenerator,
) -> Result<PipelineOutcome, AppError> {
    let annotated = paginate(text, MAX_CHARS_PER_PAGE)?;

    let first_content_page = locator::locate_first_content_page(&annotated, llm).await?;
    tracing::debug!("First content page: {first_content_page}");

    let clipped_text = extract_range(text, first_content_page, MAX_CHARS_PER_PAGE, target_page);

    let summary = summarizer::summarize_clip(&clipped_text, llm).await?;

    Ok(PipelineOutcome {
        summary,
        clipped_text,
        first_content_page,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{GenOptions, Generation, LlmError, TextGenerator};

    /// A `TextGenerator` that replays scripted responses in order and records
    /// every prompt it receives.
    pub struct ScriptedGenerator {
        responses: Mutex<VecDeque<Result<Generation, LlmError>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn replying(texts: &[&str]) -> Self {
            Self {
                responses: Mutex::new(
                    texts
                        .iter()
                        .map(|t| Ok(Generation::new(Some(t.to_string()))))
                        .collect(),
                ),
                prompts: Mutex::new(Vec::new()),
            }
        }

        /// One successful response with no text payload.
        pub fn replying_empty() -> Self {
            Self {
                responses: Mutex::new(VecDeque::from([Ok(Generation::new(None))])),
                prompts: Mutex::new(Vec::new()),
            }
        }

        /// One failed call.
        pub fn failing(error: LlmError) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from([Err(error)])),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            prompt: &str,
            _options: &GenOptions,
        ) -> Result<Generation, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left")
        }
    }
}
