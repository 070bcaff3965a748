/// Record request and receipt types
///
/// One tagged variant per record kind, each with its own required-field set
/// checked by a single validation function, replacing the four duplicated
/// handler-side checks of the original surface.
use crate::{
    error::{RecordsError, RecordsResult},
    record_store::{keys, RecordKind},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Login event request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub user_type: Option<String>,
    pub login_method: Option<String>,
}

/// Signup profile request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub user_data: Option<Value>,
    pub user_type: Option<String>,
}

/// Onboarding completion request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub user_type: Option<String>,
    pub onboarding_data: Option<Value>,
}

/// Course note upload request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseNoteRequest {
    pub course_title: Option<String>,
    pub document_title: Option<String>,
    pub file_name: Option<String>,
    pub file_content: Option<String>,
    pub file_type: Option<String>,
}

/// A record write request, one variant per kind
#[derive(Debug, Clone)]
pub enum RecordRequest {
    Login(LoginRequest),
    Signup(SignupRequest),
    Onboarding(OnboardingRequest),
    CourseNote(CourseNoteRequest),
}

/// Result of a successful write
#[derive(Debug, Clone)]
pub struct WriteReceipt {
    /// Generated record identifier
    pub id: String,

    /// Public URL returned by the object store
    pub url: String,

    /// Storage key the record was written at
    pub key: String,
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn user_type_or_default(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("student")
}

/// Email carried inside a signup's userData mapping
fn signup_email(user_data: &Option<Value>) -> Option<&str> {
    user_data
        .as_ref()
        .and_then(|data| data.get("email"))
        .and_then(|email| email.as_str())
        .filter(|s| !s.trim().is_empty())
}

/// Byte size of a course-note upload. Data-URL uploads report the decoded
/// size; plain text reports the content's UTF-8 length.
fn content_size(content: &str) -> u64 {
    if content.starts_with("data:") {
        if let Some(idx) = content.find(";base64,") {
            let encoded = &content[idx + ";base64,".len()..];
            if let Ok(decoded) = BASE64.decode(encoded.as_bytes()) {
                return decoded.len() as u64;
            }
        }
    }
    content.len() as u64
}

impl RecordRequest {
    /// The kind this request writes
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordRequest::Login(_) => RecordKind::LoginEvent,
            RecordRequest::Signup(_) => RecordKind::SignupProfile,
            RecordRequest::Onboarding(_) => RecordKind::OnboardingCompletion,
            RecordRequest::CourseNote(_) => RecordKind::CourseNote,
        }
    }

    /// Check the variant's required fields, naming every missing one.
    /// Runs before any side effect; a failure means zero storage calls.
    pub fn validate(&self) -> RecordsResult<()> {
        let mut missing: Vec<&str> = Vec::new();

        match self {
            RecordRequest::Login(r) => {
                if blank(&r.email) {
                    missing.push("email");
                }
            }
            RecordRequest::Signup(r) => match &r.user_data {
                None | Some(Value::Null) => missing.push("userData"),
                Some(data) if !data.is_object() => {
                    return Err(RecordsError::Validation(
                        "userData must be an object".to_string(),
                    ));
                }
                Some(_) => {
                    if signup_email(&r.user_data).is_none() {
                        missing.push("userData.email");
                    }
                }
            },
            RecordRequest::Onboarding(r) => {
                if blank(&r.user_id) {
                    missing.push("userId");
                }
                if blank(&r.email) {
                    missing.push("email");
                }
                match &r.onboarding_data {
                    None | Some(Value::Null) => missing.push("onboardingData"),
                    Some(_) => {}
                }
            }
            RecordRequest::CourseNote(r) => {
                if blank(&r.course_title) {
                    missing.push("courseTitle");
                }
                if blank(&r.document_title) {
                    missing.push("documentTitle");
                }
                if blank(&r.file_name) {
                    missing.push("fileName");
                }
                if blank(&r.file_content) {
                    missing.push("fileContent");
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RecordsError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Derive the storage key for this request at the given instant.
    /// Assumes `validate` has passed; absent fields fall back to empty
    /// tokens rather than panicking.
    pub fn storage_key(&self, now: DateTime<Utc>) -> String {
        match self {
            RecordRequest::Login(r) => keys::storage_key(
                RecordKind::LoginEvent,
                user_type_or_default(&r.user_type),
                &keys::email_token(r.email.as_deref().unwrap_or_default()),
                now,
            ),
            RecordRequest::Signup(r) => keys::storage_key(
                RecordKind::SignupProfile,
                user_type_or_default(&r.user_type),
                &keys::email_token(signup_email(&r.user_data).unwrap_or_default()),
                now,
            ),
            RecordRequest::Onboarding(r) => keys::storage_key(
                RecordKind::OnboardingCompletion,
                user_type_or_default(&r.user_type),
                &keys::email_token(r.email.as_deref().unwrap_or_default()),
                now,
            ),
            RecordRequest::CourseNote(r) => keys::storage_key(
                RecordKind::CourseNote,
                &keys::path_token(r.course_title.as_deref().unwrap_or_default()),
                &keys::path_token(r.file_name.as_deref().unwrap_or_default()),
                now,
            ),
        }
    }

    /// Build the stored payload: request fields merged with the generated id
    /// and the kind's timestamp field.
    pub fn into_payload(self, record_id: &str, now: DateTime<Utc>) -> Value {
        let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        match self {
            RecordRequest::Login(r) => json!({
                "sessionId": record_id,
                "email": r.email,
                "userType": user_type_or_default(&r.user_type),
                "loginMethod": r.login_method.as_deref().unwrap_or("demo"),
                "timestamp": stamp,
            }),
            RecordRequest::Signup(r) => {
                let user_type = user_type_or_default(&r.user_type).to_string();
                let mut merged: Map<String, Value> = match r.user_data {
                    Some(Value::Object(map)) => map,
                    _ => Map::new(),
                };
                merged.insert("userId".to_string(), json!(record_id));
                merged.insert("userType".to_string(), json!(user_type));
                merged.insert("createdAt".to_string(), json!(stamp));
                Value::Object(merged)
            }
            RecordRequest::Onboarding(r) => json!({
                "onboardingId": record_id,
                "userId": r.user_id,
                "email": r.email,
                "userType": user_type_or_default(&r.user_type),
                "onboardingData": r.onboarding_data,
                "completedAt": stamp,
            }),
            RecordRequest::CourseNote(r) => {
                let mut payload = Map::new();
                payload.insert("courseNoteId".to_string(), json!(record_id));
                payload.insert("courseTitle".to_string(), json!(r.course_title));
                payload.insert("documentTitle".to_string(), json!(r.document_title));
                payload.insert("fileName".to_string(), json!(r.file_name));
                if let Some(file_type) = r.file_type {
                    payload.insert("fileType".to_string(), json!(file_type));
                }
                let size = r.file_content.as_deref().map(content_size).unwrap_or(0);
                payload.insert("fileContent".to_string(), json!(r.file_content));
                payload.insert("fileSize".to_string(), json!(size));
                payload.insert("uploadedAt".to_string(), json!(stamp));
                Value::Object(payload)
            }
        }
    }
}
