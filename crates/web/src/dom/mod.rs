// =============================================================================
// Folio Web - Host Abstraction
// =============================================================================
// Table of Contents:
// 1. Geometry
// 2. Events
// 3. Element
// 4. Visibility Observer
// 5. Host
// 6. Navigation Collapse
// =============================================================================
// Every component talks to the page through these traits. `browser` backs
// them with web-sys; `fake` backs them with an in-memory tree for tests.
// =============================================================================

pub mod browser;
#[cfg(test)]
pub mod fake;

use std::cell::Cell;

use crate::error::Result;

// -----------------------------------------------------------------------------
// 1. Geometry
// -----------------------------------------------------------------------------

/// Viewport-relative bounding box of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Pointer position as a fraction of the box on each axis.
    ///
    /// A degenerate axis (zero or negative extent) reports 0.
    pub fn fraction(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        (
            ratio(client_x - self.left, self.width),
            ratio(client_y - self.top, self.height),
        )
    }
}

fn ratio(offset: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        offset / extent
    } else {
        0.0
    }
}

// -----------------------------------------------------------------------------
// 2. Events
// -----------------------------------------------------------------------------

/// DOM events the page behaviors listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    PointerMove,
    PointerEnter,
    PointerLeave,
    Submit,
}

impl EventKind {
    /// Event type string passed to `addEventListener`.
    pub fn dom_name(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::PointerMove => "mousemove",
            EventKind::PointerEnter => "mouseenter",
            EventKind::PointerLeave => "mouseleave",
            EventKind::Submit => "submit",
        }
    }
}

/// Host-neutral view of a dispatched event.
///
/// Handlers call [`PageEvent::prevent_default`]; the host adapter forwards the
/// flag to the real event once the handler returns.
#[derive(Debug, Default)]
pub struct PageEvent {
    pub client_x: f64,
    pub client_y: f64,
    default_prevented: Cell<bool>,
}

impl PageEvent {
    /// Event carrying a pointer position.
    pub fn pointer(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            default_prevented: Cell::new(false),
        }
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Handler = Box<dyn FnMut(&PageEvent)>;

// -----------------------------------------------------------------------------
// 3. Element
// -----------------------------------------------------------------------------

/// A handle to a page element. Cloning yields another handle to the same node.
pub trait Element: Clone + 'static {
    fn attribute(&self, name: &str) -> Option<String>;

    /// Descendants matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self>;

    fn text(&self) -> String;
    fn set_text(&self, text: &str);

    /// Current value of a form control; `None` for anything else.
    fn value(&self) -> Option<String>;

    /// Set an inline style property. An empty value removes it.
    fn set_style(&self, property: &str, value: &str);

    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    fn bounding_rect(&self) -> Rect;

    /// Reset a form to its initial (empty) field values.
    fn reset(&self);

    /// Attach a handler for the lifetime of the page.
    fn listen(&self, kind: EventKind, handler: Handler);
}

// -----------------------------------------------------------------------------
// 4. Visibility Observer
// -----------------------------------------------------------------------------

/// Fires a callback when observed elements cross the visibility threshold.
///
/// Callbacks only see elements entering the viewport; each trigger is
/// disarmed explicitly through `unobserve` or `disconnect`.
pub trait VisibilityObserver<E> {
    fn observe(&self, target: &E);
    fn unobserve(&self, target: &E);
    fn disconnect(&self);
}

pub type VisibilityCallback<E, O> = Box<dyn FnMut(&E, &O)>;

// -----------------------------------------------------------------------------
// 5. Host
// -----------------------------------------------------------------------------

/// The document, window and scheduler the page behaviors run against.
pub trait Host: 'static {
    type Element: Element;

    /// Recurring task handle; dropping it cancels the task.
    type Timer: 'static;

    type Observer: VisibilityObserver<Self::Element> + 'static;

    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Vertical scroll position of the viewport.
    fn scroll_offset(&self) -> f64;
    fn smooth_scroll_to(&self, top: f64);

    fn current_year(&self) -> i32;

    /// Monotonic clock in milliseconds, same base as frame timestamps.
    fn now(&self) -> f64;

    /// Run `task` every `period_ms` until the returned handle is dropped.
    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> Self::Timer;

    /// Run `step` on the next animation frame with the frame timestamp.
    fn next_frame(&self, step: Box<dyn FnOnce(f64)>);

    /// Create an observer firing once an element is at least `threshold`
    /// (0.0..=1.0) visible.
    fn observe_visibility(
        &self,
        threshold: f64,
        on_visible: VisibilityCallback<Self::Element, Self::Observer>,
    ) -> Result<Self::Observer>;
}

// -----------------------------------------------------------------------------
// 6. Navigation Collapse
// -----------------------------------------------------------------------------

/// Hides the mobile navigation panel after in-page navigation. Callers check
/// that the panel is open first.
pub trait NavCollapse {
    fn hide(&self);
}

/// Used when no UI toolkit is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCollapse;

impl NavCollapse for NoCollapse {
    fn hide(&self) {}
}
