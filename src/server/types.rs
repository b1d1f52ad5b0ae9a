use serde::{Deserialize, Serialize};

// Request fields are optional so a missing field is reported with its own
// message instead of a generic deserialization failure.

#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub result: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccasionRequest {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub selected_occasion: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccasionResponse {
    pub new_items: Vec<String>,
    pub show_recommendations: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdviceRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
