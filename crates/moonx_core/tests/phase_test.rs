//! Tests for phase translation and reading extraction.

use moonx_core::{MoonPhase, MoonPhaseReading, compose_message, translate};
use serde_json::json;
use std::collections::HashSet;
use strum::IntoEnumIterator;

const CODES: [&str; 8] = [
    "NEW_MOON",
    "WAXING_CRESCENT",
    "FIRST_QUARTER",
    "WAXING_GIBBOUS",
    "FULL_MOON",
    "WANING_GIBBOUS",
    "THIRD_QUARTER",
    "WANING_CRESCENT",
];

#[test]
fn test_every_known_code_translates_to_distinct_text() {
    let mut seen = HashSet::new();
    for code in CODES {
        let text = translate(code).unwrap_or_else(|| panic!("{code} should translate"));
        assert!(!text.is_empty());
        assert!(seen.insert(text), "duplicate translation for {code}");
    }
    assert_eq!(seen.len(), 8);
}

#[test]
fn test_enum_covers_exactly_the_wire_codes() {
    let codes: Vec<String> = MoonPhase::iter().map(|p| p.to_string()).collect();
    assert_eq!(codes, CODES);
}

#[test]
fn test_unknown_codes_fail_closed() {
    for code in ["", "BLUE_MOON", "full_moon", "Full_Moon", " FULL_MOON", "FULL MOON"] {
        assert_eq!(translate(code), None, "{code:?} should not translate");
    }
}

#[test]
fn test_full_moon_translation() {
    assert_eq!(translate("FULL_MOON"), Some("bulan purnama 🌕"));
    assert_eq!(translate("WANING_CRESCENT"), Some("bulan sabit tua 🌘"));
}

#[test]
fn test_reading_uppercases_provider_value() {
    let reading = MoonPhaseReading::from_payload(json!({
        "moon_phase": "waxing_gibbous",
        "moonrise": "15:02",
    }));
    assert_eq!(reading.code(), "WAXING_GIBBOUS");
    assert_eq!(reading.phase(), Some(MoonPhase::WaxingGibbous));
    assert_eq!(reading.raw()["moonrise"], "15:02");
}

#[test]
fn test_reading_prefers_exact_key() {
    let reading = MoonPhaseReading::from_payload(json!({
        "MOON_PHASE": "NEW_MOON",
        "moon_phase": "FULL_MOON",
    }));
    assert_eq!(reading.phase(), Some(MoonPhase::FullMoon));
}

#[test]
fn test_reading_missing_field_is_empty_and_unrecognized() {
    let reading = MoonPhaseReading::from_payload(json!({"message": "invalid API key"}));
    assert_eq!(reading.code(), "");
    assert_eq!(reading.phase(), None);

    let reading = MoonPhaseReading::from_payload(json!({"moon_phase": 3}));
    assert_eq!(reading.phase(), None);
}

#[test]
fn test_compose_message_contains_translation() {
    let text = compose_message(MoonPhase::NewMoon, 42);
    assert!(text.starts_with("malam ini bulan baru 🌑"));
    assert!(text.ends_with("(42)"));
}
