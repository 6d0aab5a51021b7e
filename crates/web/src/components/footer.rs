// =============================================================================
// Folio Web - Footer Year
// =============================================================================
// Keeps the copyright year in the footer current
// =============================================================================

use crate::config::Selectors;
use crate::dom::{Element, Host};

/// Write the current year into the footer placeholder.
///
/// Returns `false` when the page has no placeholder.
pub fn stamp_year<H: Host>(host: &H, selectors: &Selectors) -> bool {
    let Some(el) = host.query(&selectors.year) else {
        return false;
    };
    el.set_text(&host.current_year().to_string());
    true
}
