use std::fs;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    backend_url: Option<String>,
    initial_city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub backend_url: String,
    pub initial_city: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".into(),
            initial_city: None,
        }
    }
}

/// Defaults, then `dashboard.toml` from the working directory, then
/// environment overrides.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("dashboard.toml") {
        match toml::from_str::<FileConfig>(&raw) {
            Ok(file_cfg) => apply_file_config(&mut settings, file_cfg),
            Err(err) => tracing::warn!(error = %err, "ignoring malformed dashboard.toml"),
        }
    }

    if let Ok(v) = std::env::var("DASHBOARD_BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Ok(v) = std::env::var("APP__BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Ok(v) = std::env::var("DASHBOARD_INITIAL_CITY") {
        settings.initial_city = Some(v);
    }

    settings
}

fn apply_file_config(settings: &mut Settings, file_cfg: FileConfig) {
    if let Some(v) = file_cfg.backend_url {
        settings.backend_url = v;
    }
    if let Some(v) = file_cfg.initial_city {
        settings.initial_city = Some(v);
    }
}

/// Validate the backend base URL and strip any trailing slash.
pub fn normalize_backend_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw).with_context(|| format!("invalid backend URL {raw:?}"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("backend URL must use http or https, got {:?}", url.scheme());
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
