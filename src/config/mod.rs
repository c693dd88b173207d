use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_LOG_FILE: &str = "workforce-manager.log";

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the REST backend
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// File the tracing subscriber writes to
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables from a `.env` file are loaded first if the file exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config.normalized())
    }

    /// Apply command line overrides on top of the environment
    pub fn with_overrides(mut self, api_url: Option<String>, log_file: Option<String>) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(log_file) = log_file {
            self.log_file = log_file;
        }
        self.normalized()
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_url.trim_end_matches('/').len();
        self.api_url.truncate(trimmed);
        self
    }
}

/// Initialize environment variables and load configuration
pub fn init(api_url: Option<String>, log_file: Option<String>) -> Result<Config> {
    let config = Config::load()?;

    Ok(config.with_overrides(api_url, log_file))
}
