use super::{
    client::RpcClient,
    output::OutputFile,
    services::{ChatService, ImageGenerator, Recommender, TryOnService},
};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Adapts a hosted Gradio app to the typed capability traits.
pub struct GradioService {
    client: RpcClient,
    api_name: String,
    cache_dir: PathBuf,
}

impl GradioService {
    pub fn new(client: RpcClient, api_name: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            api_name: api_name.into(),
            cache_dir: cache_dir.into(),
        }
    }

    async fn predict_one(&self, data: Vec<Value>) -> Result<Value> {
        let outputs = self.client.predict(&self.api_name, data).await?;
        outputs
            .into_iter()
            .next()
            .filter(|v| !v.is_null())
            .ok_or_else(|| Error::remote(self.client.name(), "Prediction returned no output"))
    }

    async fn fetch_output(&self, output: &Value) -> Result<OutputFile> {
        let file = self.client.download_file(output, &self.cache_dir).await?;
        debug!("{} output stored at {}", self.client.name(), file.path().display());
        Ok(file)
    }
}

#[async_trait]
impl TryOnService for GradioService {
    async fn try_on(&self, cloth_image: &Path, origin_image: &Path) -> Result<OutputFile> {
        let cloth = self.client.upload_file(cloth_image).await?;
        let origin = self.client.upload_file(origin_image).await?;

        let output = self
            .predict_one(vec![
                serde_json::to_value(cloth)?,
                serde_json::to_value(origin)?,
            ])
            .await?;

        self.fetch_output(&output).await
    }
}

#[async_trait]
impl ImageGenerator for GradioService {
    async fn generate_image(&self, prompt: &str) -> Result<OutputFile> {
        let output = self.predict_one(vec![Value::from(prompt)]).await?;
        self.fetch_output(&output).await
    }
}

#[async_trait]
impl ChatService for GradioService {
    async fn chat(&self, text: &str) -> Result<String> {
        match self.predict_one(vec![Value::from(text)]).await? {
            Value::String(reply) => Ok(reply),
            other => Ok(other.to_string()),
        }
    }
}

#[async_trait]
impl Recommender for GradioService {
    async fn recommend(&self, query: &str) -> Result<Option<String>> {
        match self.predict_one(vec![Value::from(query)]).await? {
            Value::String(items) => Ok(Some(items)),
            _ => Ok(None),
        }
    }
}
