// =============================================================================
// Folio Web - Pointer Effects
// =============================================================================
// Table of Contents:
// 1. Glow
// 2. Tilt
// =============================================================================

use crate::config::{Selectors, Timing};
use crate::dom::{Element, EventKind, Host, PageEvent, Rect};
use crate::utils::{css_number, css_percent};

/// Class that switches on the CSS highlight.
pub const GLOW_CLASS: &str = "is-glowing";

// -----------------------------------------------------------------------------
// 1. Glow
// -----------------------------------------------------------------------------

/// Pointer position inside `rect` as percentages (0–100 while inside).
pub fn glow_position(rect: Rect, client_x: f64, client_y: f64) -> (f64, f64) {
    let (fx, fy) = rect.fraction(client_x, client_y);
    (fx * 100.0, fy * 100.0)
}

/// Highlight follows the pointer via `--mx`/`--my`. Returns elements wired.
pub fn attach_glow<H: Host>(host: &H, selectors: &Selectors) -> usize {
    let targets = host.query_all(&selectors.glow);

    for el in &targets {
        let target = el.clone();
        el.listen(
            EventKind::PointerMove,
            Box::new(move |event: &PageEvent| {
                let (mx, my) = glow_position(target.bounding_rect(), event.client_x, event.client_y);
                target.set_style("--mx", &css_percent(mx));
                target.set_style("--my", &css_percent(my));
                target.add_class(GLOW_CLASS);
            }),
        );

        let target = el.clone();
        el.listen(
            EventKind::PointerLeave,
            Box::new(move |_| target.remove_class(GLOW_CLASS)),
        );
    }

    targets.len()
}

// -----------------------------------------------------------------------------
// 2. Tilt
// -----------------------------------------------------------------------------

/// Rotation `(around x, around y)` in degrees, each within `±max_deg / 2`.
pub fn tilt_angles(rect: Rect, client_x: f64, client_y: f64, max_deg: f64) -> (f64, f64) {
    let (px, py) = rect.fraction(client_x, client_y);
    ((py - 0.5) * -max_deg, (px - 0.5) * max_deg)
}

pub fn tilt_transform(rx: f64, ry: f64) -> String {
    format!(
        "translateY(-2px) rotateX({}deg) rotateY({}deg)",
        css_number(rx),
        css_number(ry)
    )
}

/// Lift and rotate toward the pointer; neutral again on leave.
pub fn attach_tilt<H: Host>(host: &H, selectors: &Selectors, timing: &Timing) -> usize {
    let targets = host.query_all(&selectors.tilt);
    let max_deg = timing.tilt_max_deg;

    for el in &targets {
        let target = el.clone();
        el.listen(
            EventKind::PointerMove,
            Box::new(move |event: &PageEvent| {
                let (rx, ry) = tilt_angles(target.bounding_rect(), event.client_x, event.client_y, max_deg);
                target.set_style("transform", &tilt_transform(rx, ry));
            }),
        );

        let target = el.clone();
        el.listen(
            EventKind::PointerLeave,
            Box::new(move |_| target.set_style("transform", "")),
        );
    }

    targets.len()
}
