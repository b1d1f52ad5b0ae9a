use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub advisor: Option<AdvisorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
    /// File name of the stock garment, looked up inside `public_dir`.
    #[serde(default = "default_cloth_image")]
    pub default_cloth_image: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_tryon_url")]
    pub tryon_url: String,
    #[serde(default = "default_chatbot_url")]
    pub chatbot_url: String,
    #[serde(default = "default_occasion_url")]
    pub occasion_url: String,
    #[serde(default = "default_text_to_cloth_url")]
    pub text_to_cloth_url: String,
    #[serde(default = "default_api_name")]
    pub api_name: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default = "default_advisor_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_advisor_model")]
    pub model: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl AdvisorConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_advisor_base_url(),
            api_key: api_key.into(),
            model: default_advisor_model(),
            system_prompt: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
            uploads_dir: default_uploads_dir(),
            public_dir: default_public_dir(),
            default_cloth_image: default_cloth_image(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            tryon_url: default_tryon_url(),
            chatbot_url: default_chatbot_url(),
            occasion_url: default_occasion_url(),
            text_to_cloth_url: default_text_to_cloth_url(),
            api_name: default_api_name(),
            api_prefix: default_api_prefix(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("frontend/public")
}

fn default_cloth_image() -> String {
    "image.JPEG".to_string()
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_tryon_url() -> String {
    "https://7395458a587bc50ec3.gradio.live/".to_string()
}

fn default_chatbot_url() -> String {
    "https://fe81ff40040ecfff3c.gradio.live/".to_string()
}

fn default_occasion_url() -> String {
    "https://8c8e6f96c1fe2aefb7.gradio.live/".to_string()
}

fn default_text_to_cloth_url() -> String {
    "https://dhaan-ish-text-to-cloth.hf.space/".to_string()
}

fn default_api_name() -> String {
    "/predict".to_string()
}

fn default_api_prefix() -> String {
    "/gradio_api".to_string()
}

fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join("wizzers-remote")
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_advisor_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_advisor_model() -> String {
    "gemini-pro".to_string()
}
