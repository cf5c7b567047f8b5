pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::readings::ReadingService;
use handlers::ApiDoc;

pub fn router(service: ReadingService) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/data", post(handlers::receive_data))
        .route("/get_data", get(handlers::get_data))
        .route("/download", get(handlers::download_data))
        .route("/reset", post(handlers::reset_data))
        .with_state(service)
        .split_for_parts();

    router
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
}
