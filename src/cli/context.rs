//! Command execution context
//!
//! Loads configuration and builds the shared HTTP transport once per run.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use homeboard::config::Config;
use homeboard::error::{ConfigError, Error, Result};
use homeboard::http::{HttpFetch, ReqwestFetcher, USER_AGENT};
use homeboard::store::CompletionStore;

/// Context for command execution
pub struct CommandContext {
    /// Loaded configuration, or defaults when no file exists
    pub config: Config,
    /// Output format preference
    pub format: OutputFormat,
    /// Chore completion file override
    store_path: Option<String>,
}

impl CommandContext {
    /// Load configuration. A missing config file is not an error here; the
    /// defaults describe a usable dashboard.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = match Config::load_at(opts.config_ref()) {
            Ok(config) => config,
            Err(Error::Config(ConfigError::NotFound)) => {
                debug!("No config file, using defaults");
                Config::default()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            config,
            format: opts.format,
            store_path: opts.store.clone(),
        })
    }

    /// HTTP transport with the fixed contact User-Agent
    pub fn fetcher(&self) -> Result<Arc<dyn HttpFetch>> {
        let fetcher = ReqwestFetcher::new(USER_AGENT).map_err(|e| Error::Other(e.to_string()))?;
        Ok(Arc::new(fetcher))
    }

    /// Where chore completions are kept
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(CompletionStore::default_path()?),
        }
    }

    pub fn open_store(&self) -> Result<CompletionStore> {
        Ok(CompletionStore::open(self.store_path()?))
    }
}
