use super::*;
use chrono::TimeZone;

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2008, 7, 12, 12, 0, 0)
        .single()
        .expect("valid time")
}

#[test]
fn canonical_length_counts_characters() {
    assert!(has_canonical_length("2008 07 12 19:30"));
    assert!(!has_canonical_length("2008 07 12 19:3"));
    assert!(!has_canonical_length("2008 07 12 19:300"));
    assert!(!has_canonical_length(""));
}

#[test]
fn strict_parse_rejects_calendar_nonsense() {
    assert!(parse_canonical("2008 07 12 19:30").is_some());
    assert!(parse_canonical("2008 13 12 19:30").is_none());
    assert!(parse_canonical("abcdefghijklmnop").is_none());
}

#[test]
fn compact_dates_gain_separators() {
    assert_eq!(
        normalize_eruption_date("200807121930", noon()),
        "2008 07 12 19:30"
    );
}

#[test]
fn relative_offsets_count_from_now() {
    assert_eq!(normalize_eruption_date("+6", noon()), "2008 07 12 18:00");
    assert_eq!(normalize_eruption_date("-1.5", noon()), "2008 07 12 10:30");
}

#[test]
fn other_input_is_left_alone() {
    assert_eq!(
        normalize_eruption_date("2008 07 12 19:30", noon()),
        "2008 07 12 19:30"
    );
    assert_eq!(normalize_eruption_date("+soon", noon()), "+soon");
    assert_eq!(normalize_eruption_date("yesterday", noon()), "yesterday");
}
