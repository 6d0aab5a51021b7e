// =============================================================================
// Folio Web - Page Initialization
// =============================================================================
// Table of Contents:
// 1. Init Report
// 2. Initialize
// =============================================================================

use std::rc::Rc;

use crate::components::{carousel, contact, counters, footer, nav, pointer, skills};
use crate::config::PageConfig;
use crate::dom::{Host, NavCollapse};

// -----------------------------------------------------------------------------
// 1. Init Report
// -----------------------------------------------------------------------------

/// Which behaviors found their elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    pub footer_year: bool,
    pub anchors: usize,
    pub glow: usize,
    pub tilt: usize,
    pub counters: usize,
    /// Bars in the skill group, `None` without a group.
    pub skill_bars: Option<usize>,
    /// Slides in the carousel, `None` when it is disabled.
    pub carousel_slides: Option<usize>,
    pub contact_form: bool,
}

// -----------------------------------------------------------------------------
// 2. Initialize
// -----------------------------------------------------------------------------

/// Wire every page behavior. Call once, after the document is parsed.
///
/// Behaviors are independent: each one whose elements are missing is skipped
/// and the rest still run.
pub fn initialize<H: Host>(
    host: Rc<H>,
    collapse: Rc<dyn NavCollapse>,
    config: &PageConfig,
) -> InitReport {
    let selectors = &config.selectors;
    let timing = &config.timing;

    let counters = counters::attach(&host, selectors, timing).unwrap_or_else(|err| {
        log::warn!("Counters disabled: {}", err);
        0
    });
    let skill_bars = skills::attach(&*host, selectors, timing).unwrap_or_else(|err| {
        log::warn!("Skill bars disabled: {}", err);
        None
    });

    let report = InitReport {
        footer_year: footer::stamp_year(&*host, selectors),
        anchors: nav::attach_smooth_scroll(&host, collapse, selectors, timing),
        glow: pointer::attach_glow(&*host, selectors),
        tilt: pointer::attach_tilt(&*host, selectors, timing),
        counters,
        skill_bars,
        carousel_slides: carousel::attach(&host, selectors, timing).map(|c| c.slide_count()),
        contact_form: contact::attach(&host, selectors, &config.messages),
    };

    log::debug!("Page behaviors ready: {:?}", report);
    report
}
