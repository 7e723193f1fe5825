use chrono::{Duration, TimeZone, Utc};
use spomcli::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_string_to_datetime() {
    let parsed = string_to_datetime("2023-07-14T20:03:12Z").unwrap();
    let expected = Utc.with_ymd_and_hms(2023, 7, 14, 20, 3, 12).unwrap();
    assert_eq!(parsed, expected);

    // Anything that is not a zulu timestamp should fail to parse
    assert!(string_to_datetime("2023-07-14").is_err());
    assert!(string_to_datetime("not a date").is_err());
    assert!(string_to_datetime("").is_err());
}

#[test]
fn test_datetime_to_string() {
    let datetime = Utc.with_ymd_and_hms(2023, 7, 14, 20, 3, 12).unwrap();
    let formatted = datetime_to_string(&datetime);
    assert_eq!(formatted, "2023-07-14T20:03:12Z");

    // Formatting then parsing should round-trip
    assert_eq!(string_to_datetime(&formatted).unwrap(), datetime);
}

#[test]
fn test_month_label_format() {
    let datetime = Utc.with_ymd_and_hms(2023, 7, 14, 20, 3, 12).unwrap();
    assert_eq!(month_label(&datetime), "July '23");

    let december = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
    assert_eq!(month_label(&december), "December '25");
}

#[test]
fn test_month_label_same_month_same_label() {
    // Any two timestamps within one calendar month map to the same label
    let first = Utc.with_ymd_and_hms(2023, 7, 1, 0, 0, 0).unwrap();
    let last = Utc.with_ymd_and_hms(2023, 7, 31, 23, 59, 59).unwrap();
    assert_eq!(month_label(&first), month_label(&last));

    // Same month in a different year is a different label
    let next_year = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
    assert_ne!(month_label(&first), month_label(&next_year));

    // Adjacent months differ
    let august = Utc.with_ymd_and_hms(2023, 8, 1, 0, 0, 0).unwrap();
    assert_ne!(month_label(&first), month_label(&august));
}

#[test]
fn test_cutoff_days_back() {
    let before = Utc::now() - Duration::days(7);
    let cutoff = cutoff_days_back(7);
    let after = Utc::now() - Duration::days(7);

    // Cutoff should be exactly seven days before "now", whatever "now" was
    assert!(cutoff >= before && cutoff <= after);

    // Zero days back is "now"
    let zero = cutoff_days_back(0);
    assert!(zero <= Utc::now());
    assert!(Utc::now() - zero < Duration::seconds(5));
}
