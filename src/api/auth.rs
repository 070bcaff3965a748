/// Demo auth endpoints: login and signup record writes, plus the explicit
/// session surface that replaces the original ambient client-side state.
use crate::{
    api::method_not_allowed,
    context::AppContext,
    error::RecordsResult,
    record_store::{LoginRequest, RecordRequest, SignupRequest},
    session::Session,
};
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Build auth routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/auth/login", post(login).fallback(method_not_allowed))
        .route("/auth/signup", post(signup).fallback(method_not_allowed))
        .route("/auth/logout", post(logout).fallback(method_not_allowed))
        .route("/auth/session", get(session))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub session_id: String,
    pub blob_url: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub success: bool,
    pub user_id: String,
    pub blob_url: String,
    pub message: String,
}

/// Record a login event and open a demo session
async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> RecordsResult<Json<LoginResponse>> {
    let email = req.email.clone();

    let receipt = ctx.record_store.write(RecordRequest::Login(req)).await?;

    // Validation has passed, so the email is present
    if let Some(email) = email {
        ctx.session_store.set(Session::new(email)).await;
    }

    Ok(Json(LoginResponse {
        success: true,
        session_id: receipt.id,
        blob_url: receipt.url,
        message: "Login recorded".to_string(),
    }))
}

/// Record a signup profile
async fn signup(
    State(ctx): State<AppContext>,
    Json(req): Json<SignupRequest>,
) -> RecordsResult<Json<SignupResponse>> {
    let receipt = ctx.record_store.write(RecordRequest::Signup(req)).await?;

    Ok(Json(SignupResponse {
        success: true,
        user_id: receipt.id,
        blob_url: receipt.url,
        message: "Account recorded".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
struct LogoutRequest {
    email: Option<String>,
}

#[derive(Debug, Serialize)]
struct LogoutResponse {
    success: bool,
    message: String,
}

/// Close a demo session
async fn logout(
    State(ctx): State<AppContext>,
    Json(req): Json<LogoutRequest>,
) -> RecordsResult<Json<LogoutResponse>> {
    let email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            crate::error::RecordsError::Validation("Missing required fields: email".to_string())
        })?;

    ctx.session_store.clear(email).await;

    Ok(Json(LogoutResponse {
        success: true,
        message: "Logged out".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
struct SessionQuery {
    email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issued_at: Option<DateTime<Utc>>,
}

/// Report the demo session state for a user
async fn session(
    State(ctx): State<AppContext>,
    Query(query): Query<SessionQuery>,
) -> RecordsResult<Json<SessionResponse>> {
    let email = query
        .email
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            crate::error::RecordsError::Validation("Missing required fields: email".to_string())
        })?;

    let response = match ctx.session_store.get(email).await {
        Some(session) => SessionResponse {
            authenticated: true,
            user: Some(session.user),
            issued_at: Some(session.issued_at),
        },
        None => SessionResponse {
            authenticated: false,
            user: None,
            issued_at: None,
        },
    };

    Ok(Json(response))
}
