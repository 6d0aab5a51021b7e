// =============================================================================
// Folio Web - Stat Counters
// =============================================================================
// Counts each `.counter` up to its `data-target` the first time it scrolls
// into view. Ease-out cubic over a fixed duration, one run per counter.
// =============================================================================

use std::rc::Rc;

use crate::config::{Selectors, Timing};
use crate::dom::{Element, Host, VisibilityObserver};
use crate::error::Result;
use crate::utils::parse_integer;

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Animation progress in `0.0..=1.0`.
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Value shown `elapsed_ms` into the animation. Exactly `target` once done.
pub fn displayed_value(target: i64, elapsed_ms: f64, duration_ms: f64) -> i64 {
    let t = progress(elapsed_ms, duration_ms);
    if t >= 1.0 {
        target
    } else {
        (ease_out_cubic(t) * target as f64).floor() as i64
    }
}

fn schedule_frame<H: Host>(host: Rc<H>, el: H::Element, target: i64, start: f64, duration_ms: f64) {
    let scheduler = Rc::clone(&host);
    scheduler.next_frame(Box::new(move |now| {
        let elapsed = now - start;
        el.set_text(&displayed_value(target, elapsed, duration_ms).to_string());
        if progress(elapsed, duration_ms) < 1.0 {
            schedule_frame(host, el, target, start, duration_ms);
        }
    }));
}

/// Run one counter animation to completion. It cannot be cancelled.
pub fn animate<H: Host>(host: &Rc<H>, el: H::Element, duration_ms: f64) {
    let target = parse_integer(el.attribute("data-target").as_deref());
    let start = host.now();
    schedule_frame(Rc::clone(host), el, target, start, duration_ms);
}

/// Arm a one-shot reveal for every counter. Returns the number armed.
pub fn attach<H: Host>(host: &Rc<H>, selectors: &Selectors, timing: &Timing) -> Result<usize> {
    let counters = host.query_all(&selectors.counters);
    if counters.is_empty() {
        return Ok(0);
    }

    let duration_ms = timing.counter_duration_ms;
    let animator = Rc::clone(host);
    let observer = host.observe_visibility(
        timing.counter_threshold,
        Box::new(move |el, observer| {
            observer.unobserve(el);
            animate(&animator, el.clone(), duration_ms);
        }),
    )?;

    for counter in &counters {
        observer.observe(counter);
    }
    Ok(counters.len())
}
