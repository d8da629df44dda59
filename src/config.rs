//! Configuration management for the monitoring API and its client

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Address the API server binds to
    pub host: String,

    /// Port the API server listens on
    pub port: u16,

    /// HTTP worker count, 0 for one per CPU
    pub workers: usize,

    /// JSON file replacing the built-in sample collections
    pub data_file: Option<PathBuf>,

    /// Rows per page in the log browser
    pub logs_per_page: usize,

    /// Base URL the dashboard client talks to
    pub api_base_url: String,

    /// HTTP timeout for client requests
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: 0,
            data_file: None,
            logs_per_page: 15,
            api_base_url: "http://127.0.0.1:8080".to_string(),
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("MONITOR_HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("MONITOR_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }

        if let Some(workers) = lookup("MONITOR_WORKERS") {
            if let Ok(workers) = workers.parse() {
                config.workers = workers;
            }
        }

        if let Some(data_file) = lookup("MONITOR_DATA_FILE") {
            if !data_file.trim().is_empty() {
                config.data_file = Some(PathBuf::from(data_file.trim()));
            }
        }

        if let Some(per_page) = lookup("MONITOR_LOGS_PER_PAGE") {
            if let Ok(per_page) = per_page.parse() {
                config.logs_per_page = per_page;
            }
        }

        if let Some(base_url) = lookup("MONITOR_API_URL") {
            config.api_base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(timeout) = lookup("MONITOR_HTTP_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.http_timeout = Duration::from_secs(seconds);
            }
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }

        if self.logs_per_page == 0 {
            return Err("logs_per_page must be greater than 0".to_string());
        }

        if self.api_base_url.is_empty() {
            return Err("api_base_url cannot be empty".to_string());
        }

        if let Some(path) = &self.data_file {
            if !path.is_file() {
                return Err(format!("data file not found: {}", path.display()));
            }
        }

        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
