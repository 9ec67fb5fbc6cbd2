use std::path::PathBuf;

use crate::error::Result;
use crate::fetch::{Fetcher, Source};
use crate::parser;
use crate::settings::Settings;
use crate::wordlist;

/// What a finished run produced.
#[derive(Debug)]
pub struct Summary {
    pub sources: usize,
    pub tables: usize,
    pub tokens: usize,
    pub output: PathBuf,
}

/// Load every source, then extract, then write. Nothing touches the output
/// file unless every source loaded.
pub async fn run(settings: &Settings) -> Result<Summary> {
    let sources: Vec<Source> = settings.sources.iter().map(|s| Source::resolve(s)).collect();
    let fetcher = Fetcher::new(&settings.user_agent, settings.timeout)?;
    let pages = fetcher.load_all(&sources).await?;

    let mut tables = 0;
    let mut tokens = Vec::new();
    for page in &pages {
        let found = parser::process_page(page, &settings.selector);
        tables += found.tables;
        tokens.extend(found.tokens);
    }

    wordlist::write(&settings.output, &tokens)?;

    Ok(Summary {
        sources: pages.len(),
        tables,
        tokens: tokens.len(),
        output: settings.output.clone(),
    })
}
