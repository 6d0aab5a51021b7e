// =============================================================================
// Folio Web - Main Library Entry Point
// =============================================================================
// Table of Contents:
// 1. Module Declarations
// 2. Re-exports
// 3. WASM Entry Point
// =============================================================================

// -----------------------------------------------------------------------------
// 1. Module Declarations
// -----------------------------------------------------------------------------

pub mod app;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod utils;

// -----------------------------------------------------------------------------
// 2. Re-exports
// -----------------------------------------------------------------------------

pub use app::{initialize, InitReport};
pub use config::PageConfig;
pub use error::{PageError, Result};

// -----------------------------------------------------------------------------
// 3. WASM Entry Point
// -----------------------------------------------------------------------------

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use dom::browser::{BootstrapCollapse, BrowserHost};
use dom::{Host, NavCollapse, NoCollapse};

/// Log level picked at build time: `ENVIRONMENT=development` logs debug output.
fn log_level() -> log::Level {
    match option_env!("ENVIRONMENT") {
        Some("development") => log::Level::Debug,
        _ => log::Level::Info,
    }
}

/// Wire the page behaviors to the current document.
#[wasm_bindgen]
pub fn mount() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Ignore if a logger is already installed.
    let _ = console_log::init_with_level(log_level());

    let host = BrowserHost::new()?;
    let config = config::load(&host);

    let collapse: Rc<dyn NavCollapse> = match host
        .query(&config.selectors.nav_panel)
        .and_then(|panel| BootstrapCollapse::attach(&panel))
    {
        Some(collapse) => Rc::new(collapse),
        None => {
            log::debug!("No navigation collapse available");
            Rc::new(NoCollapse)
        }
    };

    let report = initialize(Rc::new(host), collapse, &config);
    log::info!(
        "Folio page ready ({} counters, carousel: {})",
        report.counters,
        report.carousel_slides.map_or("off".to_string(), |n| format!("{} slides", n))
    );
    Ok(())
}
