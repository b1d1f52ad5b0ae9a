mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = if Path::new(&config_path).exists() {
        debug!("Loading configuration from: {}", config_path);
        let config_str = tokio::fs::read_to_string(&config_path).await?;
        parse(&config_str)?
    } else {
        debug!("No configuration file at {}, using defaults", config_path);
        Config::default()
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok());
    validate(&config)?;

    Ok(config)
}

pub fn parse(yaml: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to an empty mapping
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

/// Rejects settings the server cannot start with.
pub fn validate(config: &Config) -> Result<()> {
    let services = &config.services;
    for (key, url) in [
        ("tryon_url", &services.tryon_url),
        ("chatbot_url", &services.chatbot_url),
        ("occasion_url", &services.occasion_url),
        ("text_to_cloth_url", &services.text_to_cloth_url),
    ] {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::config(format!(
                "services.{key} must be an http(s) URL, got '{url}'"
            )));
        }
    }

    if config.server.max_upload_bytes == 0 {
        return Err(Error::config("server.max_upload_bytes must be greater than zero"));
    }
    if config.server.default_cloth_image.trim().is_empty() {
        return Err(Error::config("server.default_cloth_image cannot be empty"));
    }
    if config.fetch.timeout_secs == 0 {
        return Err(Error::config("fetch.timeout_secs must be greater than zero"));
    }

    Ok(())
}

/// Service addresses and the advisor key can be supplied through the environment.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty("TRYON_URL") {
        config.services.tryon_url = url;
    }
    if let Some(url) = non_empty("CHATBOT_URL") {
        config.services.chatbot_url = url;
    }
    if let Some(url) = non_empty("OCCASION_URL") {
        config.services.occasion_url = url;
    }
    if let Some(url) = non_empty("TEXT_TO_CLOTH_URL") {
        config.services.text_to_cloth_url = url;
    }
    if let Some(key) = non_empty("GEMINI_API_KEY") {
        match config.advisor.as_mut() {
            Some(advisor) => advisor.api_key = key,
            None => config.advisor = Some(AdvisorConfig::with_api_key(key)),
        }
    }
}
