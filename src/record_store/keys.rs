/// Storage key and record id derivation
///
/// Keys are derived from the request's partition field plus the wall clock
/// in milliseconds. There is no collision detection: two writes for the same
/// partition value within the same millisecond produce the same key and the
/// second silently overwrites the first. Known correctness gap, kept as the
/// original behaves; see DESIGN.md.
use crate::record_store::RecordKind;
use chrono::{DateTime, Utc};
use rand::Rng;

/// Sanitize an email for use in a storage key: only `@` is replaced.
///
/// `ahmed@demo.com` -> `ahmed_at_demo.com`
pub fn email_token(email: &str) -> String {
    email.replace('@', "_at_")
}

/// Sanitize a title or file name for use in a storage key: every character
/// outside `[A-Za-z0-9]` becomes `_`.
///
/// `Intro: Design!` -> `Intro__Design_`
pub fn path_token(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Random base36 suffix used in generated record ids
pub fn random_suffix(len: usize) -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Generated record identifier: `<prefix>_<unixMillis>_<9 base36 chars>`.
///
/// Uniqueness is probabilistic (time plus randomness), not guaranteed;
/// collisions are not detected or retried.
pub fn generated_id(kind: RecordKind, now: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}",
        kind.id_prefix(),
        now.timestamp_millis(),
        random_suffix(9)
    )
}

/// Compose a storage key from namespace, grouping segment, sanitized token,
/// and request-time milliseconds. `group` is the user-type or sanitized
/// course-title segment; `token` is the sanitized partition token.
pub fn storage_key(
    kind: RecordKind,
    group: &str,
    token: &str,
    now: DateTime<Utc>,
) -> String {
    let ms = now.timestamp_millis();
    let namespace = kind.namespace();
    if namespace.is_empty() {
        format!("{}/{}_{}.json", group, token, ms)
    } else {
        format!("{}/{}/{}_{}.json", namespace, group, token, ms)
    }
}
