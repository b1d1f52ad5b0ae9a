use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use wizzers_rust::{
    Error, Result,
    remote::{ChatService, ImageGenerator, OutputFile, Recommender, TryOnService},
};

/// What a mock remote call should produce.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Return(T),
    Fail(String),
}

impl<T: Clone> Outcome<T> {
    fn resolve(&self, service: &str) -> Result<T> {
        match self {
            Outcome::Return(value) => Ok(value.clone()),
            Outcome::Fail(msg) => Err(Error::remote(service, msg.clone())),
        }
    }
}

/// Arguments seen by the try-on mock, with file contents captured at call time.
#[derive(Debug, Clone)]
pub struct TryOnCall {
    pub cloth_image: PathBuf,
    pub origin_image: PathBuf,
    pub cloth_bytes: Vec<u8>,
    pub origin_bytes: Vec<u8>,
}

/// Mock try-on service
#[derive(Debug)]
pub struct MockTryOn {
    pub outcome: Outcome<PathBuf>,
    pub calls: Mutex<Vec<TryOnCall>>,
}

impl MockTryOn {
    pub fn returning(path: impl Into<PathBuf>) -> Self {
        Self {
            outcome: Outcome::Return(path.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            outcome: Outcome::Fail(msg.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<TryOnCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TryOnService for MockTryOn {
    async fn try_on(&self, cloth_image: &Path, origin_image: &Path) -> Result<OutputFile> {
        let call = TryOnCall {
            cloth_image: cloth_image.to_path_buf(),
            origin_image: origin_image.to_path_buf(),
            cloth_bytes: tokio::fs::read(cloth_image).await.unwrap_or_default(),
            origin_bytes: tokio::fs::read(origin_image).await.unwrap_or_default(),
        };
        self.calls.lock().unwrap().push(call);
        self.outcome.resolve("tryon").map(OutputFile::external)
    }
}

/// Mock text-to-image service
#[derive(Debug)]
pub struct MockImageGenerator {
    pub outcome: Outcome<PathBuf>,
    pub prompts: Mutex<Vec<String>>,
}

impl MockImageGenerator {
    pub fn returning(path: impl Into<PathBuf>) -> Self {
        Self {
            outcome: Outcome::Return(path.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            outcome: Outcome::Fail(msg.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(&self, prompt: &str) -> Result<OutputFile> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.outcome.resolve("text-to-cloth").map(OutputFile::external)
    }
}

/// Mock chatbot service
#[derive(Debug)]
pub struct MockChat {
    pub outcome: Outcome<String>,
    pub inputs: Mutex<Vec<String>>,
}

impl MockChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            outcome: Outcome::Return(reply.to_string()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            outcome: Outcome::Fail(msg.to_string()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatService for MockChat {
    async fn chat(&self, text: &str) -> Result<String> {
        self.inputs.lock().unwrap().push(text.to_string());
        self.outcome.resolve("chatbot")
    }
}

/// Mock occasion recommender
#[derive(Debug)]
pub struct MockRecommender {
    pub outcome: Outcome<Option<String>>,
    pub queries: Mutex<Vec<String>>,
}

impl MockRecommender {
    pub fn replying(items: &str) -> Self {
        Self {
            outcome: Outcome::Return(Some(items.to_string())),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn non_text() -> Self {
        Self {
            outcome: Outcome::Return(None),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            outcome: Outcome::Fail(msg.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Recommender for MockRecommender {
    async fn recommend(&self, query: &str) -> Result<Option<String>> {
        self.queries.lock().unwrap().push(query.to_string());
        self.outcome.resolve("occasion")
    }
}
