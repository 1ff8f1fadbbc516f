use anyhow::{bail, Result};
use std::{env, path::PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
const API_URL_VAR: &str = "LEARNMATE_API_URL";
const SESSION_FILE_VAR: &str = "LEARNMATE_SESSION_FILE";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
}

impl Config {
    /// Reads `.env` (if any) and the process environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let session_file = lookup(SESSION_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_session_file(lookup("HOME")));

        Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            session_file,
        }
    }

    pub fn with_overrides(mut self, api_url: Option<String>, session_file: Option<PathBuf>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(path) = session_file {
            self.session_file = path;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            bail!(
                "{} must be an http(s) URL, got '{}'",
                API_URL_VAR,
                self.api_url
            );
        }
        Ok(())
    }
}

fn default_session_file(home: Option<String>) -> PathBuf {
    match home.filter(|h| !h.is_empty()) {
        Some(home) => PathBuf::from(home).join(".learnmate").join("session.json"),
        None => PathBuf::from(".learnmate").join("session.json"),
    }
}
