// Cross-cutting prompt fragments. Each module that makes LLM calls defines
// its task prompts in its own prompts.rs; this file holds what they share.

/// System prompt sent with every generation call.
pub const BOOK_ASSISTANT_SYSTEM: &str =
    "You are a helpful assistant that provides concise book summaries.";
