use super::output::OutputFile;
use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// Virtual try-on: dresses the person in `origin_image` with the garment in `cloth_image`.
#[async_trait]
pub trait TryOnService: Send + Sync {
    async fn try_on(&self, cloth_image: &Path, origin_image: &Path) -> Result<OutputFile>;
}

/// Text-to-cloth image generation.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<OutputFile>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn chat(&self, text: &str) -> Result<String>;
}

/// Occasion-based outfit recommendation. `None` means the service answered
/// with something other than text.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, query: &str) -> Result<Option<String>>;
}
