use crate::{
    Error, Result,
    config::Config,
    fetch::ImageFetcher,
    publish::PublicDir,
    remote::{OutputFile, RemoteServices},
    staging::{StagingArea, UploadedFile},
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Drives every endpoint: validates input, stages files, calls the remote
/// service and shapes its result.
pub struct Orchestrator {
    services: RemoteServices,
    fetcher: ImageFetcher,
    staging: StagingArea,
    public: PublicDir,
    default_cloth_image: String,
}

impl Orchestrator {
    pub fn new(
        services: RemoteServices,
        fetcher: ImageFetcher,
        staging: StagingArea,
        public: PublicDir,
        default_cloth_image: impl Into<String>,
    ) -> Self {
        Self {
            services,
            fetcher,
            staging,
            public,
            default_cloth_image: default_cloth_image.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            RemoteServices::from_config(&config.services),
            ImageFetcher::new(&config.fetch)?,
            StagingArea::new(&config.server.uploads_dir),
            PublicDir::new(&config.server.public_dir),
            config.server.default_cloth_image.clone(),
        ))
    }

    pub fn public_dir(&self) -> &PublicDir {
        &self.public
    }

    /// Forwards text to the chatbot and returns its answer verbatim.
    pub async fn predict_text(&self, text: Option<&str>) -> Result<String> {
        let text = require(
            text,
            "Missing 'text' field in request",
            "Text input cannot be empty",
        )?;
        info!("Processing text input: {}", text);

        let result = self.services.chat.chat(text).await?;
        debug!("Prediction result: {}", result);
        Ok(result)
    }

    /// Try-on against the stock garment kept in the public directory.
    pub async fn try_on_default(&self, upload: Option<UploadedFile>) -> Result<PathBuf> {
        let upload = require_upload(upload)?;
        let staged = self.staging.prepare().await?;
        let origin = staged.save_upload(&upload).await?;

        let cloth = self.public.resolve(&self.default_cloth_image);
        if !exists(&cloth).await {
            return Err(Error::missing_artifact("Default cloth image not found"));
        }

        info!("Processing virtual try-on for request {}", staged.id());
        let result = self.services.tryon.try_on(&cloth, &origin).await?;
        self.publish_result(result, "Virtual try-on failed").await
    }

    /// Try-on against a garment image downloaded from `url`.
    ///
    /// The upload is validated before anything is downloaded.
    pub async fn try_on_from_url(
        &self,
        upload: Option<UploadedFile>,
        url: Option<&str>,
    ) -> Result<PathBuf> {
        let upload = require_upload(upload)?;
        let url = require(url, "URL is required", "URL is required")?;
        info!("Processing URL: {}", url);

        let staged = self.staging.prepare().await?;
        let cloth = staged.download_path();
        self.fetcher.fetch(url, &cloth).await?;

        let origin = staged.save_upload(&upload).await?;
        if !exists(&cloth).await {
            return Err(Error::download("Failed to download image from URL"));
        }

        info!("Processing virtual try-on for request {}", staged.id());
        let result = self.services.tryon.try_on(&cloth, &origin).await?;
        self.publish_result(result, "Virtual try-on failed").await
    }

    pub async fn generate_image(&self, prompt: Option<&str>) -> Result<PathBuf> {
        let prompt = require(prompt, "Missing prompt field", "Prompt cannot be empty")?;
        info!("Processing prompt: {}", prompt);

        let result = self.services.image_generator.generate_image(prompt).await?;
        self.publish_result(result, "Text-to-image generation failed").await
    }

    /// Asks for "{color} shirt for {occasion}" and splits the comma separated answer.
    pub async fn recommend(
        &self,
        color: Option<&str>,
        occasion: Option<&str>,
    ) -> Result<Vec<String>> {
        let color = require(color, "Color is required", "Color is required")?;
        let occasion = require(occasion, "Occasion is required", "Occasion is required")?;
        let query = recommendation_query(color, occasion);
        info!("Processing: {}", query);

        match self.services.recommender.recommend(&query).await? {
            Some(answer) if answer.trim().is_empty() => {
                Err(Error::remote("occasion", "Failed to get recommendations"))
            }
            Some(answer) => Ok(split_items(&answer)),
            None => Ok(Vec::new()),
        }
    }

    /// Copies a remote result into the public directory. Dropping `result`
    /// afterwards clears any cached download, whether or not the copy worked.
    async fn publish_result(&self, result: OutputFile, failure: &str) -> Result<PathBuf> {
        let path = result.path();
        if path.as_os_str().is_empty() || !exists(path).await {
            return Err(Error::missing_artifact(failure));
        }
        self.public.publish(path).await
    }
}

pub fn recommendation_query(color: &str, occasion: &str) -> String {
    format!("{color} shirt for {occasion}")
}

pub fn split_items(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn require<'a>(value: Option<&'a str>, missing: &str, blank: &str) -> Result<&'a str> {
    let value = value.ok_or_else(|| Error::invalid_input(missing))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input(blank));
    }
    Ok(trimmed)
}

fn require_upload(upload: Option<UploadedFile>) -> Result<UploadedFile> {
    let upload = upload.ok_or_else(|| Error::invalid_input("No file part"))?;
    if upload.file_name.is_empty() {
        return Err(Error::invalid_input("No selected file"));
    }
    if upload.bytes.is_empty() {
        return Err(Error::invalid_input("Uploaded file is empty"));
    }
    Ok(upload)
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
