/// Course note upload endpoint
use crate::{
    api::method_not_allowed,
    context::AppContext,
    error::RecordsResult,
    record_store::{CourseNoteRequest, RecordRequest},
};
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

/// Build course note routes
pub fn routes() -> Router<AppContext> {
    Router::new().route(
        "/course-notes/upload",
        post(upload).fallback(method_not_allowed),
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseNoteResponse {
    pub success: bool,
    pub course_note_id: String,
    pub blob_url: String,
    pub message: String,
}

/// Record an uploaded course note
async fn upload(
    State(ctx): State<AppContext>,
    Json(req): Json<CourseNoteRequest>,
) -> RecordsResult<Json<CourseNoteResponse>> {
    let receipt = ctx
        .record_store
        .write(RecordRequest::CourseNote(req))
        .await?;

    Ok(Json(CourseNoteResponse {
        success: true,
        course_note_id: receipt.id,
        blob_url: receipt.url,
        message: "Course note uploaded".to_string(),
    }))
}
