use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    app_state::AppState,
    curation::{CurationError, CurationRequest, CurationResponse},
};

#[utoipa::path(
    post,
    path = "/api/curate",
    tag = "curation",
    request_body = CurationRequest,
    responses(
        (status = 200, description = "Article curated", body = CurationResponse),
        (status = 400, description = "Missing or invalid URL", body = CurationResponse),
        (status = 429, description = "Rate limit exceeded", body = CurationResponse),
        (status = 500, description = "Fetch or extraction failed", body = CurationResponse)
    )
)]
pub async fn curate_article(
    State(state): State<AppState>,
    payload: Result<Json<CurationRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return CurationError::InvalidBody(rejection.body_text()).into_response();
        }
    };

    let url = match payload.validate() {
        Ok(url) => url,
        Err(error) => return error.into_response(),
    };

    match state.curation.curate(&url).await {
        Ok(article) => (StatusCode::OK, Json(CurationResponse::success(article))).into_response(),
        Err(error) => error.into_response(),
    }
}
