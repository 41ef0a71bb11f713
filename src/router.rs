use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    curation::{CuratedArticle, CurationRequest, CurationResponse, handlers::curate_article},
    health::{HealthResponse, health_check},
    middleware::{RateLimit, rate_limit_middleware},
    summarizer::AIAnalysis,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::curation::handlers::curate_article,
        crate::health::health_check
    ),
    components(schemas(
        CurationRequest,
        CurationResponse,
        CuratedArticle,
        AIAnalysis,
        HealthResponse
    )),
    tags(
        (name = "curation", description = "Turn a web article into a summarized draft"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Full HTTP surface. Only the curation route is rate limited.
pub fn build_router(state: AppState, rate_limit: RateLimit) -> Router {
    let curation = Router::new()
        .route("/api/curate", post(curate_article))
        .route_layer(middleware::from_fn_with_state(
            rate_limit,
            rate_limit_middleware,
        ));

    Router::new()
        .merge(curation)
        .route("/healthz", get(health_check))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}
