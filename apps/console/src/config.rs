use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use client_core::StartupPlan;
use serde::Deserialize;
use shared::protocol::DEFAULT_API_BASE;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub api_base: String,
    pub initial_load_delay_ms: u64,
    pub health_interval_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            api_base: DEFAULT_API_BASE.into(),
            initial_load_delay_ms: 1000,
            health_interval_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    api_base: Option<String>,
    initial_load_delay_ms: Option<u64>,
    health_interval_secs: Option<u64>,
}

impl Settings {
    pub fn startup_plan(&self) -> StartupPlan {
        let plan = StartupPlan::new(Duration::from_millis(self.initial_load_delay_ms));
        match self.health_interval_secs {
            Some(secs) if secs > 0 => plan.with_periodic_health(Duration::from_secs(secs)),
            _ => plan,
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then environment variables.
fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.server_url {
                    settings.server_url = v;
                }
                if let Some(v) = file_cfg.api_base {
                    settings.api_base = v;
                }
                if let Some(v) = file_cfg.initial_load_delay_ms {
                    settings.initial_load_delay_ms = v;
                }
                if let Some(v) = file_cfg.health_interval_secs {
                    settings.health_interval_secs = Some(v);
                }
            }
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("STOREFRONT_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__API_BASE") {
        settings.api_base = v;
    }

    if let Some(v) = env("APP__INITIAL_LOAD_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.initial_load_delay_ms = parsed;
        }
    }

    if let Some(v) = env("APP__HEALTH_INTERVAL_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.health_interval_secs = Some(parsed);
        }
    }

    settings
}

pub fn parse_origin(server_url: &str) -> anyhow::Result<Url> {
    let origin = Url::parse(server_url.trim())
        .with_context(|| format!("invalid server url '{server_url}'"))?;
    if !matches!(origin.scheme(), "http" | "https") {
        anyhow::bail!("server url '{server_url}' must use http or https");
    }
    Ok(origin)
}
