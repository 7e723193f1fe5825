use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, NaiveDateTime, ParseError, Utc};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Parses a zulu timestamp string (`2023-07-14T20:03:12Z`) as delivered in
/// the saved-tracks payload.
pub fn string_to_datetime(timestamp: &str) -> Result<DateTime<Utc>, ParseError> {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%SZ").map(|dt| dt.and_utc())
}

pub fn datetime_to_string(datetime: &DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Formats a timestamp as its monthly playlist label, e.g. `July '23`.
/// Timestamps within the same calendar month always yield the same label.
pub fn month_label(datetime: &DateTime<Utc>) -> String {
    datetime.format("%B '%y").to_string()
}

pub fn cutoff_days_back(days: u32) -> DateTime<Utc> {
    Utc::now() - Duration::days(days as i64)
}
