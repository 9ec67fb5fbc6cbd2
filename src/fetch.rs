use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANG: &str = "en-US,en;q=0.9";

/// Where a page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// An existing path wins, then anything that looks like an http(s) URL.
    /// Everything else is taken as a path and fails when read.
    pub fn resolve(arg: &str) -> Source {
        if Path::new(arg).exists() {
            Source::File(PathBuf::from(arg))
        } else if arg.starts_with("http://") || arg.starts_with("https://") {
            Source::Url(arg.to_string())
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    pub fn label(&self) -> String {
        match self {
            Source::Url(url) => url.clone(),
            Source::File(path) => path.display().to_string(),
        }
    }
}

/// Raw HTML of one source.
#[derive(Debug, Clone)]
pub struct Page {
    pub origin: String,
    pub html: String,
}

pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Load every source in order. Stops at the first failure.
    pub async fn load_all(&self, sources: &[Source]) -> Result<Vec<Page>> {
        let pb = if sources.len() > 1 {
            let pb = ProgressBar::new(sources.len() as u64);
            pb.set_style(
                ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut pages = Vec::with_capacity(sources.len());
        for source in sources {
            pb.set_message(source.label());
            let page = self.load(source).await;
            match page {
                Ok(page) => pages.push(page),
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
        Ok(pages)
    }

    pub async fn load(&self, source: &Source) -> Result<Page> {
        match source {
            Source::Url(url) => self.fetch_url(url).await,
            Source::File(path) => read_file(path).await,
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<Page> {
        info!("Fetching {}", url);
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_HTML)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANG)
            .send()
            .await
            .map_err(|source| Error::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            if status == StatusCode::FORBIDDEN {
                warn!(
                    "{} refused the request (403). Save the page from a browser \
                     and pass the saved .html file as the source instead.",
                    url
                );
            }
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let html = resp.text().await.map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;
        info!("HTTP {} bytes: {}", status.as_u16(), html.len());

        Ok(Page {
            origin: url.to_string(),
            html,
        })
    }
}

async fn read_file(path: &Path) -> Result<Page> {
    let html = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::ReadSource {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Read {} bytes from {}", html.len(), path.display());
    Ok(Page {
        origin: path.display().to_string(),
        html,
    })
}
