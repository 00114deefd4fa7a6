//! Moon phase codes and their localized display strings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the eight phase codes reported by the astronomy provider.
///
/// Codes parse from their upper snake case wire form only; callers are
/// expected to uppercase provider values first.
///
/// # Examples
///
/// ```
/// use moonx_core::MoonPhase;
///
/// let phase: MoonPhase = "FULL_MOON".parse().unwrap();
/// assert_eq!(phase, MoonPhase::FullMoon);
/// assert_eq!(phase.to_string(), "FULL_MOON");
/// assert_eq!(phase.localized(), "bulan purnama 🌕");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoonPhase {
    /// New moon
    NewMoon,
    /// Waxing crescent
    WaxingCrescent,
    /// First quarter
    FirstQuarter,
    /// Waxing gibbous
    WaxingGibbous,
    /// Full moon
    FullMoon,
    /// Waning gibbous
    WaningGibbous,
    /// Third quarter
    ThirdQuarter,
    /// Waning crescent
    WaningCrescent,
}

impl MoonPhase {
    /// Indonesian display string with the matching moon symbol.
    pub fn localized(&self) -> &'static str {
        match self {
            Self::NewMoon => "bulan baru 🌑",
            Self::WaxingCrescent => "bulan sabit muda 🌒",
            Self::FirstQuarter => "bulan paruh pertama 🌓",
            Self::WaxingGibbous => "bulan cembung awal 🌔",
            Self::FullMoon => "bulan purnama 🌕",
            Self::WaningGibbous => "bulan cembung akhir 🌖",
            Self::ThirdQuarter => "bulan paruh kedua 🌗",
            Self::WaningCrescent => "bulan sabit tua 🌘",
        }
    }

    /// Look up a phase by its wire code. Returns `None` for anything else.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_str(code).ok()
    }
}

/// Translate a phase code into its display string.
///
/// Fails closed: any code outside the eight known values yields `None`.
///
/// # Examples
///
/// ```
/// use moonx_core::translate;
///
/// assert_eq!(translate("NEW_MOON"), Some("bulan baru 🌑"));
/// assert_eq!(translate("new_moon"), None);
/// assert_eq!(translate(""), None);
/// ```
pub fn translate(code: &str) -> Option<&'static str> {
    MoonPhase::from_code(code).map(|phase| phase.localized())
}
