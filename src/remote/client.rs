use super::{
    output::OutputFile,
    types::{EventIdResponse, FileRef, parse_event_stream},
};
use crate::{Error, Result};
use serde_json::{Value, json};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

/// Generic predict-style client for a hosted Gradio app.
///
/// Calls are queued with `POST {base}{prefix}/call/{api}` and the result is
/// read from the event stream at `GET {base}{prefix}/call/{api}/{event_id}`.
/// No request timeout is set; the transport default applies.
#[derive(Debug, Clone)]
pub struct RpcClient {
    name: String,
    api_root: String,
    client: reqwest::Client,
}

impl RpcClient {
    pub fn new(name: impl Into<String>, base_url: &str, api_prefix: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let prefix = api_prefix.trim_matches('/');
        let api_root = if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        };

        Self {
            name: name.into(),
            api_root,
            client: reqwest::Client::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    fn file_url(&self, remote_path: &str) -> String {
        self.endpoint(&format!("file={remote_path}"))
    }

    fn remote_error(&self, msg: impl Into<String>) -> Error {
        Error::remote(&self.name, msg)
    }

    pub async fn predict(&self, api_name: &str, data: Vec<Value>) -> Result<Vec<Value>> {
        let call_url = self.endpoint(&format!("call/{}", api_name.trim_start_matches('/')));
        debug!("Submitting prediction to {} ({} inputs)", call_url, data.len());

        let response = self
            .client
            .post(&call_url)
            .json(&json!({ "data": data }))
            .send()
            .await
            .map_err(|e| self.remote_error(format!("Failed to submit prediction: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.remote_error(format!(
                "Prediction request returned {}: {}",
                status, body
            )));
        }

        let queued: EventIdResponse = response
            .json()
            .await
            .map_err(|e| self.remote_error(format!("Invalid prediction response: {}", e)))?;

        debug!("Prediction queued with event id {}", queued.event_id);

        let stream = self
            .client
            .get(format!("{}/{}", call_url, queued.event_id))
            .send()
            .await
            .map_err(|e| self.remote_error(format!("Failed to read prediction result: {}", e)))?;

        let status = stream.status();
        if !status.is_success() {
            return Err(self.remote_error(format!("Result stream returned {}", status)));
        }

        let body = stream.text().await?;
        self.resolve_stream(&body)
    }

    fn resolve_stream(&self, body: &str) -> Result<Vec<Value>> {
        for event in parse_event_stream(body) {
            match event.event.as_str() {
                "complete" => {
                    let outputs: Vec<Value> = serde_json::from_str(&event.data).map_err(|e| {
                        self.remote_error(format!("Malformed prediction output: {}", e))
                    })?;
                    return Ok(outputs);
                }
                "error" => {
                    let message = match serde_json::from_str::<Value>(&event.data) {
                        Ok(Value::String(msg)) => msg,
                        Ok(Value::Null) => "Prediction failed".to_string(),
                        _ if event.data.trim().is_empty() => "Prediction failed".to_string(),
                        _ => event.data.clone(),
                    };
                    return Err(self.remote_error(message));
                }
                other => debug!("Ignoring '{}' event from {}", other, self.name),
            }
        }

        Err(self.remote_error("Event stream ended without a result"))
    }

    /// Uploads a local file so it can be passed as a predict input.
    pub async fn upload_file(&self, path: &Path) -> Result<FileRef> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.png")
            .to_string();

        debug!("Uploading {} ({} bytes) to {}", file_name, bytes.len(), self.name);

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.clone());
        let form = reqwest::multipart::Form::new().part("files", part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.remote_error(format!("Failed to upload file: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.remote_error(format!("Upload returned {}", status)));
        }

        let paths: Vec<String> = response
            .json()
            .await
            .map_err(|e| self.remote_error(format!("Invalid upload response: {}", e)))?;

        let remote_path = paths
            .into_iter()
            .next()
            .ok_or_else(|| self.remote_error("Upload response contained no paths"))?;

        Ok(FileRef::uploaded(remote_path, file_name))
    }

    /// Fetches a file output into `dest_dir/<unique>/<basename>`.
    ///
    /// The unique directory belongs to the returned [`OutputFile`] and is
    /// removed on drop, including when the download fails part way.
    pub async fn download_file(&self, output: &Value, dest_dir: &Path) -> Result<OutputFile> {
        let (source_url, remote_path) = match output {
            Value::String(path) => (self.file_url(path), path.clone()),
            Value::Object(_) => {
                let file: FileRef = serde_json::from_value(output.clone())?;
                let url = file.url.clone().unwrap_or_else(|| self.file_url(&file.path));
                (url, file.path)
            }
            other => {
                return Err(self.remote_error(format!("Expected a file output, got {}", other)));
            }
        };

        let file_name = Path::new(&remote_path)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "result.png".into());

        let target_dir = dest_dir.join(Uuid::new_v4().to_string());
        tokio::fs::create_dir_all(&target_dir).await?;
        let target = target_dir.join(file_name);
        let output = OutputFile::cached(target_dir, target);

        debug!("Downloading {} output from {}", self.name, source_url);
        self.write_output(&source_url, output.path()).await?;

        Ok(output)
    }

    async fn write_output(&self, source_url: &str, target: &Path) -> Result<()> {
        let mut response = self
            .client
            .get(source_url)
            .send()
            .await
            .map_err(|e| self.remote_error(format!("Failed to fetch output file: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.remote_error(format!("Output file request returned {}", status)));
        }

        let mut file = tokio::fs::File::create(target).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(())
    }
}
