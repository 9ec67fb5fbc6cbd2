use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, Map};
use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_URL: &str = "https://en.wikipedia.org/wiki/List_of_Game_Boy_games";
pub const DEFAULT_OUTPUT: &str = "wordlist.txt";
pub const DEFAULT_SELECTOR: &str = "table";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const ENV_PREFIX: &str = "WORDLIST";

/// Values given on the command line. `None` / empty means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub sources: Vec<String>,
    pub output: Option<PathBuf>,
    pub selector: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Layered {
    url: String,
    output: PathBuf,
    selector: String,
    timeout_secs: u64,
    user_agent: String,
}

/// Fully resolved run configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sources: Vec<String>,
    pub output: PathBuf,
    pub selector: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Settings {
    /// Defaults, then `WORDLIST_*` environment variables, then CLI flags.
    pub fn load(overrides: Overrides) -> Result<Self> {
        Self::load_with_env(overrides, None)
    }

    /// Same as [`Settings::load`], reading the environment from `env`
    /// instead of the process when given.
    pub fn load_with_env(
        overrides: Overrides,
        env: Option<Map<String, String>>,
    ) -> Result<Self> {
        let layered: Layered = Config::builder()
            .set_default("url", DEFAULT_URL)?
            .set_default("output", DEFAULT_OUTPUT)?
            .set_default("selector", DEFAULT_SELECTOR)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .set_override_option(
                "output",
                overrides
                    .output
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("selector", overrides.selector)?
            .set_override_option("timeout_secs", overrides.timeout_secs)?
            .set_override_option("user_agent", overrides.user_agent)?
            .build()?
            .try_deserialize()?;

        let sources = if overrides.sources.is_empty() {
            vec![layered.url]
        } else {
            overrides.sources
        };

        let settings = Settings {
            sources,
            output: layered.output,
            selector: layered.selector,
            timeout: Duration::from_secs(layered.timeout_secs),
            user_agent: layered.user_agent,
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.sources.iter().any(|s| s.trim().is_empty()) {
            return Err(Error::Config("empty source".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(Error::Config("empty output path".into()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be at least 1 second".into()));
        }
        scraper::Selector::parse(&self.selector)
            .map_err(|e| Error::Config(format!("bad selector {:?}: {}", self.selector, e)))?;
        Ok(())
    }
}
