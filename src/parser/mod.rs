pub mod dom;
pub mod tables;

use tracing::{debug, info, warn};

use crate::fetch::Page;
use dom::HtmlDocument;
use tables::TableTokens;

const SNIPPET_CHARS: usize = 400;

/// Parse one page and pull the cell tokens out of its tables.
///
/// A page with no matching tables is logged and yields nothing; it never
/// aborts the run.
pub fn process_page(page: &Page, selector: &str) -> TableTokens {
    let doc = HtmlDocument::parse(&page.html);
    if doc.parse_errors() > 0 {
        debug!("{}: parser recovered from {} errors", page.origin, doc.parse_errors());
    }

    let found = tables::extract_tokens(&doc, selector);
    if found.tables == 0 {
        warn!("No tables matching {:?} in {}", selector, page.origin);
        let snippet: String = page.html.chars().take(SNIPPET_CHARS).collect();
        debug!("First {} chars of {}:\n{}", SNIPPET_CHARS, page.origin, snippet);
    } else if found.rows == 0 {
        warn!(
            "{} elements match {:?} in {} but none contain table rows",
            found.tables, selector, page.origin
        );
    } else {
        info!(
            "{}: {} tables, {} tokens",
            page.origin,
            found.tables,
            found.tokens.len()
        );
    }
    found
}
