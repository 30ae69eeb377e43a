use std::{fs, path::Path, time::Duration};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const SETTINGS_FILE: &str = "seating.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub retry_attempts: u32,
    pub request_timeout_secs: u64,
    pub max_seats_per_room: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            retry_attempts: 1,
            request_timeout_secs: 15,
            max_seats_per_room: 4,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validated API base, without a trailing slash.
    pub fn api_base(&self) -> anyhow::Result<String> {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .with_context(|| format!("invalid api base url '{}'", self.api_base_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow!(
                "api base url must start with http:// or https://, got '{}'",
                self.api_base_url
            ));
        }
        Ok(trimmed.to_string())
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// File values override defaults; environment values override both.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<ClientSettings>(&raw) {
            Ok(file_cfg) => settings = file_cfg,
            Err(err) => warn!("config: ignoring unreadable {}: {err}", path.display()),
        }
    }

    apply_env_overrides(&mut settings, env);
    settings
}

fn apply_env_overrides(settings: &mut ClientSettings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("SEATING_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__RETRY_ATTEMPTS") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.retry_attempts = parsed;
        }
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = env("APP__MAX_SEATS_PER_ROOM") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_seats_per_room = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
