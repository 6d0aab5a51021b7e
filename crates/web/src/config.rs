// =============================================================================
// Folio Web - Page Configuration
// =============================================================================
// Table of Contents:
// 1. Selectors
// 2. Timing
// 3. Messages
// 4. Page Config
// 5. Loading
// =============================================================================
// Defaults match the stock page markup. A page can override any subset with a
// `<script type="application/json" id="pageConfig">` block.
// =============================================================================

use serde::Deserialize;

use crate::dom::{Element, Host};
use crate::error::Result;

/// Element holding the optional JSON overrides.
pub const CONFIG_SELECTOR: &str = "#pageConfig";

// -----------------------------------------------------------------------------
// 1. Selectors
// -----------------------------------------------------------------------------

/// Where each behavior finds its elements.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Selectors {
    pub year: String,
    pub nav_panel: String,
    pub anchors: String,
    pub glow: String,
    pub tilt: String,
    pub counters: String,
    pub skill_root: String,
    pub skill_bars: String,
    pub carousel_track: String,
    pub carousel_stage: String,
    pub carousel_slides: String,
    pub carousel_prev: String,
    pub carousel_next: String,
    pub contact_form: String,
    pub contact_status: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_message: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            year: "#year".into(),
            nav_panel: "#navbarPrimary".into(),
            anchors: r##"a[href^="#"]"##.into(),
            glow: ".glass-card, .btn-gradient, .btn-ghost".into(),
            tilt: "[data-tilt]".into(),
            counters: ".counter".into(),
            skill_root: "[data-skill-root]".into(),
            skill_bars: ".progress-bar[data-level]".into(),
            carousel_track: "#testimonialTrack".into(),
            carousel_stage: "#testimonialStage".into(),
            carousel_slides: ".testimonial".into(),
            carousel_prev: "#tPrev".into(),
            carousel_next: "#tNext".into(),
            contact_form: "#contactForm".into(),
            contact_status: "#formStatus".into(),
            contact_name: "#name".into(),
            contact_email: "#email".into(),
            contact_message: "#message".into(),
        }
    }
}

// -----------------------------------------------------------------------------
// 2. Timing
// -----------------------------------------------------------------------------

/// Offsets, thresholds and durations.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Timing {
    /// Height of the fixed header, subtracted from anchor scroll targets.
    pub header_offset: f64,
    pub counter_threshold: f64,
    pub counter_duration_ms: f64,
    pub skill_threshold: f64,
    pub carousel_interval_ms: u32,
    pub tilt_max_deg: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            counter_threshold: 0.4,
            counter_duration_ms: 900.0,
            skill_threshold: 0.35,
            carousel_interval_ms: 4800,
            tilt_max_deg: 6.0,
        }
    }
}

// -----------------------------------------------------------------------------
// 3. Messages
// -----------------------------------------------------------------------------

/// Contact form status texts.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Messages {
    pub validation: String,
    pub confirmation: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            validation: "Please fill in all fields.".into(),
            confirmation:
                "Message ready to send (demo). Hook this form to your backend/email service."
                    .into(),
        }
    }
}

// -----------------------------------------------------------------------------
// 4. Page Config
// -----------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub selectors: Selectors,
    pub timing: Timing,
    pub messages: Messages,
}

impl PageConfig {
    /// Parse a partial JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// -----------------------------------------------------------------------------
// 5. Loading
// -----------------------------------------------------------------------------

/// Read the page's config block, falling back to defaults.
pub fn load<H: Host>(host: &H) -> PageConfig {
    let Some(block) = host.query(CONFIG_SELECTOR) else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&block.text()) {
        Ok(config) => {
            log::debug!("Loaded page config overrides");
            config
        }
        Err(err) => {
            log::warn!("{}; using defaults", err);
            PageConfig::default()
        }
    }
}
