/// Onboarding completion endpoint
use crate::{
    api::method_not_allowed,
    context::AppContext,
    error::RecordsResult,
    record_store::{OnboardingRequest, RecordRequest},
};
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

/// Build onboarding routes
pub fn routes() -> Router<AppContext> {
    Router::new().route(
        "/onboarding/complete",
        post(complete).fallback(method_not_allowed),
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub success: bool,
    pub onboarding_id: String,
    pub blob_url: String,
    pub message: String,
}

/// Record an onboarding completion
async fn complete(
    State(ctx): State<AppContext>,
    Json(req): Json<OnboardingRequest>,
) -> RecordsResult<Json<OnboardingResponse>> {
    let receipt = ctx
        .record_store
        .write(RecordRequest::Onboarding(req))
        .await?;

    Ok(Json(OnboardingResponse {
        success: true,
        onboarding_id: receipt.id,
        blob_url: receipt.url,
        message: "Onboarding recorded".to_string(),
    }))
}
