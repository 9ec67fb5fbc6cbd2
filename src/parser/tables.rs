use std::sync::LazyLock;

use regex::Regex;

use super::dom::{Document, Element};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const ROW_TAGS: &[&str] = &["tr"];
const CELL_TAGS: &[&str] = &["td", "th"];

/// Tokens pulled from one page, plus how many tables and rows matched.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TableTokens {
    pub tables: usize,
    pub rows: usize,
    pub tokens: Vec<String>,
}

/// Walk every table matched by `selector`, then its rows, then its cells,
/// collecting each non-empty cell value in that order.
pub fn extract_tokens<D: Document>(doc: &D, selector: &str) -> TableTokens {
    let tables = doc.find_all(selector);
    let mut rows = 0;
    let mut tokens = Vec::new();

    for table in &tables {
        for row in table.find_all(ROW_TAGS) {
            rows += 1;
            for cell in row.find_all(CELL_TAGS) {
                let value = normalize_cell(&cell.text());
                if !value.is_empty() {
                    tokens.push(value);
                }
            }
        }
    }

    TableTokens {
        tables: tables.len(),
        rows,
        tokens,
    }
}

/// Collapse whitespace runs (newlines included) to one space and trim, so a
/// cell can never span more than one wordlist line.
pub fn normalize_cell(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

// ── Tests ──
