// =============================================================================
// Folio Web - Testimonial Carousel
// =============================================================================
// Table of Contents:
// 1. Slide Cursor
// 2. Carousel
// 3. Wiring
// =============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::{Selectors, Timing};
use crate::dom::{Element, EventKind, Host};

// -----------------------------------------------------------------------------
// 1. Slide Cursor
// -----------------------------------------------------------------------------

/// Cyclic position over a fixed number of slides.
///
/// `index < len` whenever `len > 0`. With no slides every move is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideCursor {
    index: usize,
    len: usize,
}

impl SlideCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Track transform that brings the current slide into view.
    pub fn transform(&self) -> String {
        format!("translateX({}%)", -(self.index as i64) * 100)
    }
}

// -----------------------------------------------------------------------------
// 2. Carousel
// -----------------------------------------------------------------------------

struct State<H: Host> {
    cursor: SlideCursor,
    track: H::Element,
    timer: Option<H::Timer>,
}

impl<H: Host> State<H> {
    fn render(&self) {
        self.track.set_style("transform", &self.cursor.transform());
    }

    fn advance(&mut self) {
        self.cursor.next();
        self.render();
    }
}

/// Handle to a running carousel. Clones share the same state.
pub struct Carousel<H: Host> {
    host: Rc<H>,
    state: Rc<RefCell<State<H>>>,
    interval_ms: u32,
}

impl<H: Host> Clone for Carousel<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
            state: Rc::clone(&self.state),
            interval_ms: self.interval_ms,
        }
    }
}

impl<H: Host> Carousel<H> {
    /// Carousel over `slides` slides on `track`; `None` when there are none.
    pub fn new(host: &Rc<H>, track: H::Element, slides: usize, interval_ms: u32) -> Option<Self> {
        if slides == 0 {
            return None;
        }
        Some(Self {
            host: Rc::clone(host),
            state: Rc::new(RefCell::new(State {
                cursor: SlideCursor::new(slides),
                track,
                timer: None,
            })),
            interval_ms,
        })
    }

    pub fn index(&self) -> usize {
        self.state.borrow().cursor.index()
    }

    pub fn slide_count(&self) -> usize {
        self.state.borrow().cursor.len()
    }

    pub fn is_auto_running(&self) -> bool {
        self.state.borrow().timer.is_some()
    }

    pub fn render(&self) {
        self.state.borrow().render();
    }

    pub fn next(&self) {
        self.state.borrow_mut().advance();
    }

    pub fn prev(&self) {
        let mut state = self.state.borrow_mut();
        state.cursor.prev();
        state.render();
    }

    /// (Re)start auto-advance. Any previous task is cancelled first.
    pub fn start_auto(&self) {
        self.stop_auto();

        let weak: Weak<RefCell<State<H>>> = Rc::downgrade(&self.state);
        let timer = self.host.every(
            self.interval_ms,
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    state.borrow_mut().advance();
                }
            }),
        );
        self.state.borrow_mut().timer = Some(timer);
    }

    pub fn stop_auto(&self) {
        let timer = self.state.borrow_mut().timer.take();
        drop(timer);
    }
}

// -----------------------------------------------------------------------------
// 3. Wiring
// -----------------------------------------------------------------------------

/// Build the testimonial carousel and start it.
///
/// Needs the track and the stage; prev/next controls are optional. A track
/// without slides leaves the carousel disabled.
pub fn attach<H: Host>(host: &Rc<H>, selectors: &Selectors, timing: &Timing) -> Option<Carousel<H>> {
    let track = host.query(&selectors.carousel_track)?;
    let stage = host.query(&selectors.carousel_stage)?;
    let slides = track.query_all(&selectors.carousel_slides).len();

    let Some(carousel) = Carousel::new(host, track, slides, timing.carousel_interval_ms) else {
        log::debug!("Testimonial track has no slides; carousel disabled");
        return None;
    };

    if let Some(next_btn) = host.query(&selectors.carousel_next) {
        let c = carousel.clone();
        next_btn.listen(
            EventKind::Click,
            Box::new(move |_| {
                c.next();
                c.start_auto();
            }),
        );
    }
    if let Some(prev_btn) = host.query(&selectors.carousel_prev) {
        let c = carousel.clone();
        prev_btn.listen(
            EventKind::Click,
            Box::new(move |_| {
                c.prev();
                c.start_auto();
            }),
        );
    }

    let c = carousel.clone();
    stage.listen(EventKind::PointerEnter, Box::new(move |_| c.stop_auto()));
    let c = carousel.clone();
    stage.listen(EventKind::PointerLeave, Box::new(move |_| c.start_auto()));

    carousel.render();
    carousel.start_auto();
    Some(carousel)
}
