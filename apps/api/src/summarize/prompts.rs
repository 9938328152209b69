// All LLM prompt constants for the summarize module.
// The shared system prompt lives in llm_client::prompts.

/// Content-locator prompt. Replace `{paginated_text}` before sending.
///
/// The embedded text is the annotated output of `pagination::paginate`; the
/// `Page <number>` response format requested here is what
/// `locator::parse_first_content_page` expects back.
pub const LOCATE_FIRST_CONTENT_PAGE_TEMPLATE: &str = "\
You are tasked with figuring out at which point the content text in a book begins. \
Content text includes only the narrative itself and excludes the preface, table of contents, \
dedication, acknowledgments, and other front matter.
Return the page number of the first page of content text.
Your response must be of the form Page <number> where <number> is the page number of the \
first page of content text.

{paginated_text}";

/// Summary prompt. Replace `{text}` with the clipped book text before sending.
pub const SUMMARIZE_TEMPLATE: &str = "\
You are tasked with summarizing text from a book. Focus on key plot points, themes, \
and character development.
Present the output in a nicely formatted manner as shown here:
Sample output:
This summary is about <book_name> by <author_name> and is summarized up to page <page_number>
Key plot points: <plot_points>
Themes: <themes>
Character development: <character_development>

{text}";
