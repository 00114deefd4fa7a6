//! Transient reading returned by the astronomy provider.

use crate::MoonPhase;
use derive_getters::Getters;
use serde_json::Value;

/// Phase code plus the untouched provider payload it was read from.
///
/// The code is always stored uppercased. It may still be outside the known
/// set; [`MoonPhaseReading::phase`] is where that gets decided.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct MoonPhaseReading {
    /// Uppercased `moon_phase` value, empty when the field was missing.
    code: String,
    /// Raw JSON document exactly as the provider sent it.
    raw: Value,
}

impl MoonPhaseReading {
    /// Build a reading, normalizing the code to upper case.
    pub fn new(code: impl AsRef<str>, raw: Value) -> Self {
        Self {
            code: code.as_ref().to_uppercase(),
            raw,
        }
    }

    /// Extract the reading from a provider payload.
    ///
    /// The `moon_phase` key is matched exactly first, then case-insensitively.
    /// A missing or non-string field produces an empty code.
    ///
    /// # Examples
    ///
    /// ```
    /// use moonx_core::MoonPhaseReading;
    /// use serde_json::json;
    ///
    /// let reading = MoonPhaseReading::from_payload(json!({"Moon_Phase": "full_moon"}));
    /// assert_eq!(reading.code(), "FULL_MOON");
    /// ```
    pub fn from_payload(raw: Value) -> Self {
        let code = raw
            .as_object()
            .and_then(|fields| {
                fields.get("moon_phase").or_else(|| {
                    fields
                        .iter()
                        .find(|(key, _)| key.eq_ignore_ascii_case("moon_phase"))
                        .map(|(_, value)| value)
                })
            })
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self::new(code, raw)
    }

    /// The recognized phase, if the code is one of the eight known values.
    pub fn phase(&self) -> Option<MoonPhase> {
        MoonPhase::from_code(&self.code)
    }
}
