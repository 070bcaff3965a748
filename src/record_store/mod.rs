/// Record Store
///
/// The one real subsystem of the service: validates a typed record request,
/// derives a path-like storage key and a generated id, serializes the record
/// to pretty-printed JSON, and writes it once to the object store.

pub mod keys;
pub mod models;
pub mod store;

pub use models::{
    CourseNoteRequest, LoginRequest, OnboardingRequest, RecordRequest, SignupRequest, WriteReceipt,
};
pub use store::RecordStore;

/// The four record shapes the store accepts.
///
/// Each kind carries its key namespace and id prefix; the required-field
/// sets live with the request variants in `models`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    LoginEvent,
    SignupProfile,
    OnboardingCompletion,
    CourseNote,
}

impl RecordKind {
    /// Key namespace prefix. Signup profiles sit directly under the
    /// user-type segment, so their namespace is empty.
    pub fn namespace(self) -> &'static str {
        match self {
            RecordKind::LoginEvent => "logins",
            RecordKind::SignupProfile => "",
            RecordKind::OnboardingCompletion => "onboarding",
            RecordKind::CourseNote => "course-notes",
        }
    }

    /// Prefix of generated record ids
    pub fn id_prefix(self) -> &'static str {
        match self {
            RecordKind::LoginEvent => "session",
            RecordKind::SignupProfile => "user",
            RecordKind::OnboardingCompletion => "onboarding",
            RecordKind::CourseNote => "course-note",
        }
    }

    /// Label used in logs and metrics
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::LoginEvent => "login_event",
            RecordKind::SignupProfile => "signup_profile",
            RecordKind::OnboardingCompletion => "onboarding_completion",
            RecordKind::CourseNote => "course_note",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_match_key_layout() {
        assert_eq!(RecordKind::LoginEvent.namespace(), "logins");
        assert_eq!(RecordKind::SignupProfile.namespace(), "");
        assert_eq!(RecordKind::OnboardingCompletion.namespace(), "onboarding");
        assert_eq!(RecordKind::CourseNote.namespace(), "course-notes");
    }

    #[test]
    fn id_prefixes() {
        assert_eq!(RecordKind::LoginEvent.id_prefix(), "session");
        assert_eq!(RecordKind::SignupProfile.id_prefix(), "user");
        assert_eq!(RecordKind::OnboardingCompletion.id_prefix(), "onboarding");
        assert_eq!(RecordKind::CourseNote.id_prefix(), "course-note");
    }
}
