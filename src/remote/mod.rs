mod client;
mod gradio;
mod output;
mod services;
mod types;

pub use client::RpcClient;
pub use gradio::GradioService;
pub use output::OutputFile;
pub use services::{ChatService, ImageGenerator, Recommender, TryOnService};
pub use types::FileRef;

use crate::config::ServicesConfig;
use std::sync::Arc;

/// The four hosted services the gateway depends on.
#[derive(Clone)]
pub struct RemoteServices {
    pub tryon: Arc<dyn TryOnService>,
    pub image_generator: Arc<dyn ImageGenerator>,
    pub chat: Arc<dyn ChatService>,
    pub recommender: Arc<dyn Recommender>,
}

impl RemoteServices {
    pub fn from_config(config: &ServicesConfig) -> Self {
        let service = |name: &str, url: &str| {
            Arc::new(GradioService::new(
                RpcClient::new(name, url, &config.api_prefix),
                config.api_name.clone(),
                config.cache_dir.clone(),
            ))
        };

        Self {
            tryon: service("tryon", &config.tryon_url),
            image_generator: service("text-to-cloth", &config.text_to_cloth_url),
            chat: service("chatbot", &config.chatbot_url),
            recommender: service("occasion", &config.occasion_url),
        }
    }
}
