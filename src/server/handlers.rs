use super::{
    error::ApiError,
    types::{
        AdviceRequest, MessageResponse, OccasionRequest, OccasionResponse, PredictRequest,
        PredictResponse, PromptRequest,
    },
};
use crate::{
    Error,
    advisor::{Advice, Advisor},
    orchestrator::Orchestrator,
    staging::UploadedFile,
};
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const UPLOAD_FIELD: &str = "uploadedFile";
pub const URL_FIELD: &str = "url";

const TRY_ON_COPIED: &str = "Result image copied successfully.";

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub advisor: Arc<Advisor>,
}

fn failed(operation: &str, err: Error) -> ApiError {
    if err.is_client_error() {
        warn!("Rejected {} request: {}", operation, err);
    } else {
        error!("Error in {}: {}", operation, err);
    }
    ApiError::from(err)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            warn!("Rejected JSON body: {}", rejection.body_text());
            ApiError::bad_request(rejection.body_text())
        })
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let request = json_body(payload)?;

    let result = state
        .orchestrator
        .predict_text(request.text.as_deref())
        .await
        .map_err(|e| failed("predict", e))?;

    Ok(Json(PredictResponse { result }))
}

pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let form = read_upload_form(multipart).await?;

    let published = state
        .orchestrator
        .try_on_default(form.file)
        .await
        .map_err(|e| failed("upload", e))?;

    info!("Try-on result available at {}", published.display());
    Ok(Json(MessageResponse::new(TRY_ON_COPIED)))
}

pub async fn upload_occasion(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let form = read_upload_form(multipart).await?;

    let published = state
        .orchestrator
        .try_on_from_url(form.file, form.url.as_deref())
        .await
        .map_err(|e| failed("uploadocassion", e))?;

    info!("Try-on result available at {}", published.display());
    Ok(Json(MessageResponse::new(TRY_ON_COPIED)))
}

pub async fn handle_prompt(
    State(state): State<AppState>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = json_body(payload)?;

    let published = state
        .orchestrator
        .generate_image(request.prompt.as_deref())
        .await
        .map_err(|e| failed("handleprompt", e))?;

    info!("Image generation completed: {}", published.display());
    Ok(Json(MessageResponse::new("Success")))
}

pub async fn handle_occasion(
    State(state): State<AppState>,
    payload: Result<Json<OccasionRequest>, JsonRejection>,
) -> Result<Json<OccasionResponse>, ApiError> {
    let request = json_body(payload)?;

    let new_items = state
        .orchestrator
        .recommend(
            request.color.as_deref(),
            request.selected_occasion.as_deref(),
        )
        .await
        .map_err(|e| failed("handleocassion", e))?;

    Ok(Json(OccasionResponse {
        new_items,
        show_recommendations: true,
    }))
}

pub async fn advice(
    State(state): State<AppState>,
    payload: Result<Json<AdviceRequest>, JsonRejection>,
) -> Result<Json<Advice>, ApiError> {
    let request = json_body(payload)?;
    let question = request.question.unwrap_or_default();
    info!("Advice requested: {}", question);

    Ok(Json(state.advisor.advise(&question).await))
}

#[derive(Debug, Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    url: Option<String>,
}

async fn read_upload_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadForm, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!("Rejected multipart body: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    })?;

    let invalid = |e: MultipartError| {
        ApiError::bad_request(format!("Invalid multipart body: {}", e))
    };

    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(UPLOAD_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(invalid)?;
                form.file = Some(UploadedFile::new(file_name, bytes.to_vec()));
            }
            Some(URL_FIELD) => {
                form.url = Some(field.text().await.map_err(invalid)?);
            }
            _ => {}
        }
    }

    Ok(form)
}
