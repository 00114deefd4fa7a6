//! Post text composition.

use crate::MoonPhase;

/// Compose the post body for a phase.
///
/// The trailing epoch keeps consecutive posts distinct for the posting
/// service's duplicate-content check.
///
/// # Examples
///
/// ```
/// use moonx_core::{MoonPhase, compose_message};
///
/// let text = compose_message(MoonPhase::FullMoon, 1_700_000_000);
/// assert_eq!(text, "malam ini bulan purnama 🌕 (1700000000)");
/// ```
pub fn compose_message(phase: MoonPhase, epoch_seconds: i64) -> String {
    format!("malam ini {} ({})", phase.localized(), epoch_seconds)
}
