// =============================================================================
// Folio Web - Skill Bars
// =============================================================================

use crate::config::{Selectors, Timing};
use crate::dom::{Element, Host, VisibilityObserver};
use crate::error::Result;
use crate::utils::{clamp_percent, css_percent, parse_number};

/// Bar width for a raw `data-level` value.
pub fn bar_width(level: Option<&str>) -> String {
    css_percent(clamp_percent(parse_number(level)))
}

/// Fill every bar of the skill group the first time the group is visible.
///
/// Returns the number of bars armed, or `None` when the page has no group.
/// The CSS transition animates the width; nothing is interpolated here.
pub fn attach<H: Host>(host: &H, selectors: &Selectors, timing: &Timing) -> Result<Option<usize>> {
    let Some(root) = host.query(&selectors.skill_root) else {
        return Ok(None);
    };
    let bars = root.query_all(&selectors.skill_bars);
    let count = bars.len();

    let observer = host.observe_visibility(
        timing.skill_threshold,
        Box::new(move |_, observer| {
            for bar in &bars {
                bar.set_style("width", &bar_width(bar.attribute("data-level").as_deref()));
            }
            observer.disconnect();
        }),
    )?;
    observer.observe(&root);

    Ok(Some(count))
}
