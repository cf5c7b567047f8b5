use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::Value;
use utoipa::OpenApi;

use super::{
    dto::{ErrorResponse, MessageResponse, ReadingsResponse},
    errors::AppError,
};
use crate::{
    db::models::Reading,
    readings::{
        export::XLSX_CONTENT_TYPE,
        payload::{NewReading, ValidationError},
        ReadingService,
    },
};

const DASHBOARD_HTML: &str = include_str!("../../static/index.html");

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// ---------------------------------------------------------------------------
// Readings
// ---------------------------------------------------------------------------

/// Store one reading sent by the device. The server assigns `id` and
/// `timestamp`.
#[utoipa::path(
    post,
    path = "/data",
    request_body = NewReading,
    responses(
        (status = 201, description = "Reading stored", body = MessageResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse),
    ),
    tag = "readings"
)]
pub async fn receive_data(
    State(service): State<ReadingService>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(body) = payload.map_err(|rej| ValidationError::MalformedBody(rej.body_text()))?;
    service.ingest(&body).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::success("Data saved successfully")),
    ))
}

/// Every stored reading, newest first, together with the latest one.
#[utoipa::path(
    get,
    path = "/get_data",
    responses(
        (status = 200, description = "All readings and the latest one", body = ReadingsResponse),
        (status = 500, description = "Storage error", body = ErrorResponse),
    ),
    tag = "readings"
)]
pub async fn get_data(
    State(service): State<ReadingService>,
) -> Result<Json<ReadingsResponse>, AppError> {
    let snapshot = service.list_all().await?;
    Ok(Json(snapshot.into()))
}

/// Download every reading as an xlsx spreadsheet.
#[utoipa::path(
    get,
    path = "/download",
    responses(
        (
            status = 200,
            description = "Spreadsheet attachment",
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            body = Vec<u8>
        ),
        (status = 500, description = "Storage or export error", body = ErrorResponse),
    ),
    tag = "readings"
)]
pub async fn download_data(State(service): State<ReadingService>) -> Result<Response, AppError> {
    let file = service.export().await?;
    let disposition = format!("attachment; filename=\"{}\"", file.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}

/// Delete every stored reading.
#[utoipa::path(
    post,
    path = "/reset",
    responses(
        (status = 200, description = "All readings deleted", body = MessageResponse),
        (status = 500, description = "Storage error", body = ErrorResponse),
    ),
    tag = "readings"
)]
pub async fn reset_data(
    State(service): State<ReadingService>,
) -> Result<Json<MessageResponse>, AppError> {
    service.reset_all().await?;
    Ok(Json(MessageResponse::success("Database reset successfully")))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(receive_data, get_data, download_data, reset_data, health),
    components(schemas(Reading, NewReading, MessageResponse, ReadingsResponse, ErrorResponse)),
    tags(
        (name = "readings", description = "Sensor reading endpoints"),
        (name = "system",   description = "System endpoints"),
    ),
    info(
        title = "Solar Sensor Dashboard API",
        version = "0.1.0",
        description = "Ingest, list, export and reset solar sensor readings"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
