//! Pagination — splits raw book text into fixed-size pages and maps page
//! numbers back to character ranges of the original text.
//!
//! Two operations live here:
//! - `paginate`: produces the annotated text shown to the LLM, with a
//!   `Page {n}` header per page. The exact output format is a contract —
//!   the content locator's prompt and parsing depend on it.
//! - `extract_range`: given a first-content page and a target page, slices
//!   the RAW (unannotated) text to the corresponding character range.
//!
//! All offsets are Unicode scalar values, not bytes. The two operations take
//! the page size as an independent parameter each; the summarize pipeline
//! passes the same constant to both, but nothing here assumes that.

use crate::errors::AppError;

/// Leading separator emitted before the first page of annotated text.
pub const PAGE_SEPARATOR: &str = "----------------------------------------";

/// A break candidate must fall past this fraction of the page to be used.
const MIN_BREAK_FRACTION: f64 = 0.7;

/// Splits `text` into pages of at most `page_size` characters, preferring to
/// cut at a paragraph break (`"\n\n"`) and then at a sentence break (`". "`)
/// when one occurs past 70% of the page. Each page body is trimmed and
/// rendered as `"Page {n}\n\n{body}"`; the result starts with a blank line
/// and a 40-dash separator, and pages are joined by blank lines.
pub fn paginate(text: &str, page_size: usize) -> Result<String, AppError> {
    if page_size == 0 {
        return Err(AppError::Validation(
            "page size must be a positive number of characters".to_string(),
        ));
    }

    let mut pages: Vec<String> = Vec::new();
    let mut remaining = text;
    let mut page_num = 1usize;

    while !remaining.is_empty() {
        let body = if char_len(remaining) <= page_size {
            let body = remaining;
            remaining = "";
            body
        } else {
            let window_end = byte_offset_at(remaining, page_size);
            let window = &remaining[..window_end];
            let threshold = page_size as f64 * MIN_BREAK_FRACTION;

            let cut = break_after(window, "\n\n", threshold)
                .or_else(|| break_after(window, ". ", threshold))
                .unwrap_or(window_end);

            let body = &remaining[..cut];
            remaining = &remaining[cut..];
            body
        };

        pages.push(format!("Page {page_num}\n\n{}", body.trim()));
        page_num += 1;
    }

    Ok(format!("\n\n{}{}", PAGE_SEPARATOR, pages.join("\n\n")))
}

/// Returns the character range of `text` spanning pages
/// `[first_content_page, target_page]`, as a half-open slice
/// `[(first_content_page - 1) * page_size, target_page * page_size)`.
///
/// Both endpoints clamp to the text length; a start at or past the end (or a
/// first page beyond the target page) yields an empty string rather than an
/// error. Operates on the raw text, never on the annotated form.
pub fn extract_range(
    text: &str,
    first_content_page: u32,
    page_size: usize,
    target_page: u32,
) -> String {
    let total = char_len(text);

    let start = (first_content_page.saturating_sub(1) as usize)
        .saturating_mul(page_size)
        .min(total);
    let end = (target_page as usize).saturating_mul(page_size).min(total);

    if start >= end {
        return String::new();
    }

    let start_byte = byte_offset_at(text, start);
    let end_byte = byte_offset_at(text, end);
    text[start_byte..end_byte].to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `n`-th character of `s`, or `s.len()` when `n` is past
/// the end. Keeps slice boundaries off multi-byte characters.
fn byte_offset_at(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

/// Byte offset just past the last occurrence of `delim` in `window` whose
/// character offset is strictly greater than `threshold`. `window` must end
/// on a character boundary of the page being cut.
fn break_after(window: &str, delim: &str, threshold: f64) -> Option<usize> {
    let pos = window.rfind(delim)?;
    let char_pos = window[..pos].chars().count();
    (char_pos as f64 > threshold).then(|| pos + delim.len())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Strips headers/separator from annotated text, returning page bodies.
    fn page_bodies(annotated: &str) -> Vec<String> {
        let after_sep = annotated
            .strip_prefix(&format!("\n\n{PAGE_SEPARATOR}"))
            .expect("annotated text must start with the separator");
        after_sep
            .split("\n\nPage ")
            .map(|chunk| chunk.strip_prefix("Page ").unwrap_or(chunk))
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| {
                // "{n}\n\n{body}"
                let (_, body) = chunk.split_once("\n\n").expect("page header format");
                body.to_string()
            })
            .collect()
    }

    // ── paginate ────────────────────────────────────────────────────────────

    #[test]
    fn test_paginate_rejects_zero_page_size() {
        let err = paginate("some text", 0).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_paginate_short_text_is_single_page() {
        let annotated = paginate("Call me Ishmael.", 3000).unwrap();
        assert_eq!(
            annotated,
            format!("\n\n{PAGE_SEPARATOR}Page 1\n\nCall me Ishmael.")
        );
    }

    #[test]
    fn test_paginate_empty_text_is_separator_only() {
        let annotated = paginate("", 3000).unwrap();
        assert_eq!(annotated, format!("\n\n{PAGE_SEPARATOR}"));
    }

    #[test]
    fn test_paginate_9000_chars_yields_3_pages() {
        let text = "x".repeat(9000);
        let annotated = paginate(&text, 3000).unwrap();
        let bodies = page_bodies(&annotated);
        assert_eq!(bodies.len(), 3);
        assert!(annotated.contains("Page 1\n\n"));
        assert!(annotated.contains("Page 2\n\n"));
        assert!(annotated.contains("Page 3\n\n"));
        assert!(!annotated.contains("Page 4"));
    }

    #[test]
    fn test_paginate_page_numbers_are_sequential() {
        let text = "word ".repeat(2000); // 10_000 chars
        let annotated = paginate(&text, 1000).unwrap();
        let count = page_bodies(&annotated).len();
        for n in 1..=count {
            assert!(annotated.contains(&format!("Page {n}\n\n")));
        }
    }

    #[test]
    fn test_paginate_every_body_within_page_size() {
        // No break candidates at all, so every cut is the hard cap.
        let text = "a".repeat(10_500);
        let annotated = paginate(&text, 1000).unwrap();
        for body in page_bodies(&annotated) {
            assert!(body.chars().count() <= 1000, "body exceeds page size");
        }
    }

    #[test]
    fn test_paginate_round_trip_reconstructs_text() {
        let paragraph = "The quick brown fox jumps over the lazy dog. ".repeat(8);
        let text = format!("{paragraph}\n\n{paragraph}\n\n{paragraph}");
        let annotated = paginate(&text, 500).unwrap();

        // Bodies are trimmed at the cut points, so compare modulo whitespace.
        let rebuilt: String = page_bodies(&annotated).concat();
        let strip_ws = |s: &str| s.split_whitespace().collect::<String>();
        assert_eq!(strip_ws(&rebuilt), strip_ws(&text));
    }

    #[test]
    fn test_paginate_prefers_paragraph_break() {
        // Paragraph break at char 85 of a 100-char page: past the 70 mark.
        let first = "a".repeat(85);
        let text = format!("{first}\n\n{}", "b".repeat(200));
        let annotated = paginate(&text, 100).unwrap();
        let bodies = page_bodies(&annotated);
        assert_eq!(bodies[0], first, "page 1 should end at the paragraph break");
        assert!(bodies[1].starts_with('b'));
    }

    #[test]
    fn test_paginate_ignores_early_paragraph_break() {
        // Break at char 30 is below 0.7 * 100, so the cut is the hard cap.
        let text = format!("{}\n\n{}", "a".repeat(30), "b".repeat(300));
        let annotated = paginate(&text, 100).unwrap();
        let bodies = page_bodies(&annotated);
        assert_eq!(bodies[0].chars().count(), 100);
    }

    #[test]
    fn test_paginate_falls_back_to_sentence_break() {
        // No paragraph break; sentence break ". " ends at char 82.
        let first = format!("{}. ", "a".repeat(80));
        let text = format!("{first}{}", "b".repeat(200));
        let annotated = paginate(&text, 100).unwrap();
        let bodies = page_bodies(&annotated);
        // Body is trimmed, so the trailing ". " loses its space.
        assert_eq!(bodies[0], format!("{}.", "a".repeat(80)));
        assert!(bodies[1].starts_with('b'));
    }

    #[test]
    fn test_paginate_multibyte_text_does_not_split_chars() {
        let text = "日本語のテキスト。".repeat(300); // 2700 chars, 3 bytes each
        let annotated = paginate(&text, 1000).unwrap();
        for body in page_bodies(&annotated) {
            assert!(body.chars().count() <= 1000);
        }
    }

    // ── extract_range ───────────────────────────────────────────────────────

    #[test]
    fn test_extract_from_first_page_collapses_start_to_zero() {
        let text: String = ('a'..='z').cycle().take(10_000).collect();
        for k in 1..=4u32 {
            let end = (k as usize * 3000).min(text.len());
            assert_eq!(extract_range(&text, 1, 3000, k), &text[..end]);
        }
    }

    #[test]
    fn test_extract_middle_range() {
        let pad = "X".repeat(3000 - 12);
        let text = format!("Page1Content{pad}Page2Content{pad}Page3Content{pad}");
        let clipped = extract_range(&text, 2, 3000, 3);
        assert_eq!(clipped, &text[3000..9000]);
        assert!(!clipped.contains("Page1Content"));
        assert!(clipped.contains("Page2Content"));
        assert!(clipped.contains("Page3Content"));
    }

    #[test]
    fn test_extract_end_to_end_scenario() {
        // 9000 chars of filler, locator says page 2, caller asks for page 3.
        let text = "f".repeat(9000);
        let clipped = extract_range(&text, 2, 3000, 3);
        assert_eq!(clipped.len(), 6000);
        assert_eq!(clipped, &text[3000..9000]);
    }

    #[test]
    fn test_extract_first_past_target_is_empty() {
        let text = "x".repeat(9000);
        assert_eq!(extract_range(&text, 3, 3000, 2), "");
        assert_eq!(extract_range(&text, 2, 3000, 2), &text[3000..6000]);
    }

    #[test]
    fn test_extract_start_past_text_end_is_empty() {
        let text = "x".repeat(100);
        assert_eq!(extract_range(&text, 50, 3000, 60), "");
    }

    #[test]
    fn test_extract_end_clamps_to_text_length() {
        let text = "x".repeat(4000);
        assert_eq!(extract_range(&text, 1, 3000, 100), text);
    }

    #[test]
    fn test_extract_zero_first_page_saturates_to_page_one() {
        let text = "x".repeat(5000);
        assert_eq!(extract_range(&text, 0, 3000, 1), extract_range(&text, 1, 3000, 1));
    }

    #[test]
    fn test_extract_empty_text_is_empty() {
        assert_eq!(extract_range("", 1, 3000, 5), "");
    }

    #[test]
    fn test_extract_mismatched_page_sizes_still_clamp() {
        // The extractor must accept a page size different from the one used
        // for display pagination and just do the arithmetic.
        let text = "x".repeat(1000);
        assert_eq!(extract_range(&text, 2, 400, 3), &text[400..1000]);
        assert_eq!(extract_range(&text, 4, 400, 10), "");
    }

    #[test]
    fn test_extract_multibyte_offsets_are_chars() {
        let text = "é".repeat(100); // 2 bytes per char
        let clipped = extract_range(&text, 1, 10, 2);
        assert_eq!(clipped.chars().count(), 20);
        assert_eq!(clipped, "é".repeat(20));
    }
}
