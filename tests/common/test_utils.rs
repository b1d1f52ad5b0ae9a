use super::mocks::{MockChat, MockImageGenerator, MockRecommender, MockTryOn};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use wizzers_rust::{
    advisor::Advisor,
    config::FetchConfig,
    fetch::ImageFetcher,
    orchestrator::Orchestrator,
    publish::PublicDir,
    remote::RemoteServices,
    server::{self, AppState},
    staging::StagingArea,
};

pub const BOUNDARY: &str = "wizzers-test-boundary";
pub const DEFAULT_CLOTH: &str = "image.JPEG";

/// Directories and mocks behind a test instance of the gateway.
///
/// Swap any mock before calling `orchestrator()` or `app()`.
pub struct TestEnv {
    pub root: TempDir,
    pub uploads: PathBuf,
    pub public: PathBuf,
    pub remote_store: PathBuf,
    pub cache: PathBuf,
    pub tryon: Arc<MockTryOn>,
    pub image_generator: Arc<MockImageGenerator>,
    pub chat: Arc<MockChat>,
    pub recommender: Arc<MockRecommender>,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp directory");
        let uploads = root.path().join("uploads");
        let public = root.path().join("public");
        let remote_store = root.path().join("remote");
        let cache = root.path().join("cache");
        for dir in [&uploads, &public, &remote_store, &cache] {
            std::fs::create_dir_all(dir).unwrap();
        }

        let tryon_result = remote_store.join("tryon_result.png");
        std::fs::write(&tryon_result, b"tryon-output").unwrap();
        let generated = remote_store.join("generated.png");
        std::fs::write(&generated, b"generated-output").unwrap();

        Self {
            tryon: Arc::new(MockTryOn::returning(tryon_result)),
            image_generator: Arc::new(MockImageGenerator::returning(generated)),
            chat: Arc::new(MockChat::replying("mock reply")),
            recommender: Arc::new(MockRecommender::replying("Shirt,Jacket,Shoes")),
            root,
            uploads,
            public,
            remote_store,
            cache,
        }
    }

    /// Writes a file into the fake remote storage and returns its path.
    pub fn remote_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.remote_store.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    pub fn install_default_cloth(&self, bytes: &[u8]) -> PathBuf {
        let path = self.public.join(DEFAULT_CLOTH);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// The current mocks as a service bundle.
    pub fn services(&self) -> RemoteServices {
        RemoteServices {
            tryon: self.tryon.clone(),
            image_generator: self.image_generator.clone(),
            chat: self.chat.clone(),
            recommender: self.recommender.clone(),
        }
    }

    pub fn orchestrator(&self) -> Orchestrator {
        self.orchestrator_with(self.services())
    }

    pub fn orchestrator_with(&self, services: RemoteServices) -> Orchestrator {
        Orchestrator::new(
            services,
            ImageFetcher::new(&FetchConfig::default()).unwrap(),
            StagingArea::new(&self.uploads),
            PublicDir::new(&self.public),
            DEFAULT_CLOTH,
        )
    }

    pub fn app(&self) -> Router {
        self.app_with(self.services())
    }

    /// Router over arbitrary services, e.g. a real client pointed at wiremock.
    pub fn app_with(&self, services: RemoteServices) -> Router {
        let state = AppState {
            orchestrator: Arc::new(self.orchestrator_with(services)),
            advisor: Arc::new(Advisor::knowledge_only()),
        };
        server::router(state, 16 * 1024 * 1024)
    }

    /// Number of entries left under the uploads directory.
    pub fn staged_entries(&self) -> usize {
        count_entries(&self.uploads)
    }

    /// Number of entries left in the remote download cache.
    pub fn cached_entries(&self) -> usize {
        count_entries(&self.cache)
    }

    pub fn published(&self, name: &str) -> Option<Vec<u8>> {
        std::fs::read(self.public.join(name)).ok()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// One field of a multipart form.
pub struct FormPart<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content: &'a [u8],
}

pub fn file_part<'a>(name: &'a str, file_name: &'a str, content: &'a [u8]) -> FormPart<'a> {
    FormPart {
        name,
        file_name: Some(file_name),
        content,
    }
}

pub fn text_part<'a>(name: &'a str, value: &'a str) -> FormPart<'a> {
    FormPart {
        name,
        file_name: None,
        content: value.as_bytes(),
    }
}

pub fn multipart_request(uri: &str, parts: &[FormPart<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        let name = part.name;
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: image/png\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
