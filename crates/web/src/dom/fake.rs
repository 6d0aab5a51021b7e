// =============================================================================
// Folio Web - In-Memory Host for Tests
// =============================================================================
// Table of Contents:
// 1. Selector Matching
// 2. Fake Element
// 3. Fake Observer
// 4. Fake Timers
// 5. Fake Host
// =============================================================================

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::rc::{Rc, Weak};
use std::str::Chars;

use super::{
    Element, EventKind, Handler, Host, PageEvent, Rect, VisibilityCallback, VisibilityObserver,
};
use crate::error::Result;

// -----------------------------------------------------------------------------
// 1. Selector Matching
// -----------------------------------------------------------------------------
// Compound selectors and comma lists only: `tag`, `#id`, `.class`, `[attr]`,
// `[attr="v"]` and `[attr^="v"]`.

#[derive(Debug)]
enum Part {
    Tag(String),
    Id(String),
    Class(String),
    Attr(String, AttrOp),
}

#[derive(Debug)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

fn ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
            chars.next();
        } else {
            break;
        }
    }
    out
}

fn unquote(value: &str) -> String {
    value.trim().trim_matches(|c| c == '"' || c == '\'').to_string()
}

fn parse_attr(body: &str) -> Part {
    if let Some((name, value)) = body.split_once("^=") {
        Part::Attr(name.trim().to_string(), AttrOp::Prefix(unquote(value)))
    } else if let Some((name, value)) = body.split_once('=') {
        Part::Attr(name.trim().to_string(), AttrOp::Equals(unquote(value)))
    } else {
        Part::Attr(body.trim().to_string(), AttrOp::Exists)
    }
}

fn parse_compound(selector: &str) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut chars = selector.trim().chars().peekable();

    if matches!(chars.peek(), Some(c) if c.is_alphabetic()) {
        parts.push(Part::Tag(ident(&mut chars)));
    }

    while let Some(c) = chars.next() {
        match c {
            '#' => parts.push(Part::Id(ident(&mut chars))),
            '.' => parts.push(Part::Class(ident(&mut chars))),
            '[' => {
                let body: String = chars.by_ref().take_while(|c| *c != ']').collect();
                parts.push(parse_attr(&body));
            }
            _ => {}
        }
    }
    parts
}

fn matches_selector(node: &FakeElement, selector: &str) -> bool {
    selector.split(',').any(|compound| {
        let parts = parse_compound(compound);
        !parts.is_empty() && parts.iter().all(|part| node.matches_part(part))
    })
}

// -----------------------------------------------------------------------------
// 2. Fake Element
// -----------------------------------------------------------------------------

#[derive(Default)]
struct Node {
    tag: String,
    attrs: RefCell<BTreeMap<String, String>>,
    classes: RefCell<Vec<String>>,
    text: RefCell<String>,
    value: RefCell<Option<String>>,
    styles: RefCell<BTreeMap<String, String>>,
    rect: Cell<Rect>,
    children: RefCell<Vec<FakeElement>>,
    listeners: RefCell<Vec<(EventKind, Rc<RefCell<Handler>>)>>,
}

/// Shared handle to an in-memory element.
#[derive(Clone)]
pub struct FakeElement(Rc<Node>);

impl std::fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}", self.0.tag)?;
        for (k, v) in self.0.attrs.borrow().iter() {
            write!(f, " {}=\"{}\"", k, v)?;
        }
        write!(f, ">")
    }
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl FakeElement {
    pub fn new(tag: &str) -> Self {
        FakeElement(Rc::new(Node {
            tag: tag.to_string(),
            ..Default::default()
        }))
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0.attrs.borrow_mut().insert(name.to_string(), value.to_string());
        self
    }

    /// Mark as a form control holding `value`.
    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_rect(self, rect: Rect) -> Self {
        self.0.rect.set(rect);
        self
    }

    pub fn with_child(self, child: FakeElement) -> Self {
        self.0.children.borrow_mut().push(child);
        self
    }

    pub fn with_children(self, children: impl IntoIterator<Item = FakeElement>) -> Self {
        self.0.children.borrow_mut().extend(children);
        self
    }

    pub fn set_value(&self, value: &str) {
        *self.0.value.borrow_mut() = Some(value.to_string());
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.styles.borrow().get(property).cloned()
    }

    pub fn listener_count(&self) -> usize {
        self.0.listeners.borrow().len()
    }

    /// Deliver an event to every handler registered for `kind`.
    pub fn dispatch(&self, kind: EventKind, event: &PageEvent) {
        let handlers: Vec<_> = self
            .0
            .listeners
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            (handler.borrow_mut())(event);
        }
    }

    /// Dispatch a plain event and report whether a handler prevented its default.
    pub fn fire(&self, kind: EventKind) -> bool {
        let event = PageEvent::default();
        self.dispatch(kind, &event);
        event.default_prevented()
    }

    fn descendants(&self, out: &mut Vec<FakeElement>) {
        for child in self.0.children.borrow().iter() {
            out.push(child.clone());
            child.descendants(out);
        }
    }

    fn matches_part(&self, part: &Part) -> bool {
        match part {
            Part::Tag(tag) => self.0.tag.eq_ignore_ascii_case(tag),
            Part::Id(id) => self.attribute("id").as_deref() == Some(id.as_str()),
            Part::Class(class) => self.has_class(class),
            Part::Attr(name, op) => match (self.attribute(name), op) {
                (None, _) => false,
                (Some(_), AttrOp::Exists) => true,
                (Some(v), AttrOp::Equals(expected)) => &v == expected,
                (Some(v), AttrOp::Prefix(prefix)) => v.starts_with(prefix.as_str()),
            },
        }
    }
}

impl Element for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.attrs.borrow().get(name).cloned()
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        let mut all = Vec::new();
        self.descendants(&mut all);
        all.into_iter().filter(|el| matches_selector(el, selector)).collect()
    }

    fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.0.text.borrow_mut() = text.to_string();
    }

    fn value(&self) -> Option<String> {
        self.0.value.borrow().clone()
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut styles = self.0.styles.borrow_mut();
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn add_class(&self, class: &str) {
        let mut classes = self.0.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.classes.borrow_mut().retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().iter().any(|c| c == class)
    }

    fn bounding_rect(&self) -> Rect {
        self.0.rect.get()
    }

    fn reset(&self) {
        let mut all = Vec::new();
        self.descendants(&mut all);
        for el in all {
            if el.value().is_some() {
                el.set_value("");
            }
        }
    }

    fn listen(&self, kind: EventKind, handler: Handler) {
        self.0
            .listeners
            .borrow_mut()
            .push((kind, Rc::new(RefCell::new(handler))));
    }
}

// -----------------------------------------------------------------------------
// 3. Fake Observer
// -----------------------------------------------------------------------------

struct ObserverState {
    threshold: f64,
    targets: RefCell<Vec<FakeElement>>,
    callback: RefCell<Option<VisibilityCallback<FakeElement, FakeObserver>>>,
    fired: Cell<usize>,
}

/// Observer whose visibility changes are driven by [`FakeHost::reveal`].
#[derive(Clone)]
pub struct FakeObserver(Rc<ObserverState>);

impl FakeObserver {
    pub fn is_observing(&self, target: &FakeElement) -> bool {
        self.0.targets.borrow().contains(target)
    }
}

impl VisibilityObserver<FakeElement> for FakeObserver {
    fn observe(&self, target: &FakeElement) {
        if !self.is_observing(target) {
            self.0.targets.borrow_mut().push(target.clone());
        }
    }

    fn unobserve(&self, target: &FakeElement) {
        self.0.targets.borrow_mut().retain(|t| t != target);
    }

    fn disconnect(&self) {
        self.0.targets.borrow_mut().clear();
    }
}

// -----------------------------------------------------------------------------
// 4. Fake Timers
// -----------------------------------------------------------------------------

struct TimerEntry {
    period: f64,
    next_due: f64,
    task: Option<Box<dyn FnMut()>>,
}

#[derive(Default)]
struct TimerTable {
    next_id: u64,
    entries: BTreeMap<u64, TimerEntry>,
}

/// Cancels its task on drop, like `gloo_timers::callback::Interval`.
pub struct FakeTimer {
    id: u64,
    table: Weak<RefCell<TimerTable>>,
}

impl Drop for FakeTimer {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().entries.remove(&self.id);
        }
    }
}

// -----------------------------------------------------------------------------
// 5. Fake Host
// -----------------------------------------------------------------------------

/// Deterministic host: manual clock, queued frames, explicit visibility.
pub struct FakeHost {
    document: FakeElement,
    year: i32,
    clock: Cell<f64>,
    scroll_offset: Cell<f64>,
    scrolls: RefCell<Vec<f64>>,
    timers: Rc<RefCell<TimerTable>>,
    frames: RefCell<Vec<Box<dyn FnOnce(f64)>>>,
    observers: RefCell<Vec<FakeObserver>>,
}

impl FakeHost {
    /// Host whose document root holds `children`.
    pub fn new(children: impl IntoIterator<Item = FakeElement>) -> Rc<Self> {
        Rc::new(Self {
            document: FakeElement::new("body").with_children(children),
            year: 2026,
            clock: Cell::new(0.0),
            scroll_offset: Cell::new(0.0),
            scrolls: RefCell::new(Vec::new()),
            timers: Rc::new(RefCell::new(TimerTable::default())),
            frames: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
        })
    }

    pub fn set_scroll_offset(&self, offset: f64) {
        self.scroll_offset.set(offset);
    }

    /// Smooth-scroll requests, oldest first.
    pub fn scrolls(&self) -> Vec<f64> {
        self.scrolls.borrow().clone()
    }

    pub fn active_timers(&self) -> usize {
        self.timers.borrow().entries.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Move the clock forward, firing due timers in order.
    pub fn advance(&self, ms: f64) {
        let end = self.clock.get() + ms;
        loop {
            let due = {
                let table = self.timers.borrow();
                table
                    .entries
                    .iter()
                    .filter(|(_, e)| e.next_due <= end)
                    .min_by(|a, b| a.1.next_due.total_cmp(&b.1.next_due))
                    .map(|(id, e)| (*id, e.next_due))
            };
            let Some((id, at)) = due else { break };

            let task = {
                let mut table = self.timers.borrow_mut();
                let Some(entry) = table.entries.get_mut(&id) else { continue };
                entry.next_due += entry.period.max(1.0);
                entry.task.take()
            };
            self.clock.set(at);
            if let Some(mut task) = task {
                task();
                if let Some(entry) = self.timers.borrow_mut().entries.get_mut(&id) {
                    entry.task = Some(task);
                }
            }
        }
        self.clock.set(end);
    }

    /// Move the clock forward by `ms` and run the frames queued so far.
    pub fn frame(&self, ms: f64) {
        self.clock.set(self.clock.get() + ms);
        let now = self.clock.get();
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        for step in frames {
            step(now);
        }
    }

    /// Report `target` as `ratio` visible to every observer watching it.
    pub fn reveal(&self, target: &FakeElement, ratio: f64) {
        let observers = self.observers.borrow().clone();
        for observer in observers {
            if !observer.is_observing(target) || ratio < observer.0.threshold {
                continue;
            }
            let callback = observer.0.callback.borrow_mut().take();
            if let Some(mut callback) = callback {
                observer.0.fired.set(observer.0.fired.get() + 1);
                callback(target, &observer);
                *observer.0.callback.borrow_mut() = Some(callback);
            }
        }
    }

    /// Callback invocations across all observers.
    pub fn visibility_triggers(&self) -> usize {
        self.observers.borrow().iter().map(|o| o.0.fired.get()).sum()
    }
}

impl Host for FakeHost {
    type Element = FakeElement;
    type Timer = FakeTimer;
    type Observer = FakeObserver;

    fn query(&self, selector: &str) -> Option<FakeElement> {
        self.document.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<FakeElement> {
        self.document.query_all(selector)
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset.get()
    }

    fn smooth_scroll_to(&self, top: f64) {
        self.scrolls.borrow_mut().push(top);
    }

    fn current_year(&self) -> i32 {
        self.year
    }

    fn now(&self) -> f64 {
        self.clock.get()
    }

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> FakeTimer {
        let mut table = self.timers.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        let period = f64::from(period_ms);
        table.entries.insert(
            id,
            TimerEntry {
                period,
                next_due: self.clock.get() + period,
                task: Some(task),
            },
        );
        FakeTimer {
            id,
            table: Rc::downgrade(&self.timers),
        }
    }

    fn next_frame(&self, step: Box<dyn FnOnce(f64)>) {
        self.frames.borrow_mut().push(step);
    }

    fn observe_visibility(
        &self,
        threshold: f64,
        on_visible: VisibilityCallback<FakeElement, FakeObserver>,
    ) -> Result<FakeObserver> {
        let observer = FakeObserver(Rc::new(ObserverState {
            threshold,
            targets: RefCell::new(Vec::new()),
            callback: RefCell::new(Some(on_visible)),
            fired: Cell::new(0),
        }));
        self.observers.borrow_mut().push(observer.clone());
        Ok(observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_matching() {
        let link = FakeElement::new("a").with_attr("href", "#about");
        let card = FakeElement::new("div").with_class("glass-card").with_attr("data-tilt", "");
        let bar = FakeElement::new("div").with_class("progress-bar").with_attr("data-level", "40");
        let root = FakeElement::new("div").with_children([link.clone(), card.clone(), bar.clone()]);

        assert_eq!(root.query_all(r##"a[href^="#"]"##), vec![link]);
        assert_eq!(root.query_all(".glass-card, .btn-ghost"), vec![card.clone()]);
        assert_eq!(root.query_all("[data-tilt]"), vec![card]);
        assert_eq!(root.query_all(".progress-bar[data-level]"), vec![bar]);
        assert!(root.query_all("#missing").is_empty());
    }

    #[test]
    fn test_dropping_timer_cancels_it() {
        let host = FakeHost::new([]);
        let count = Rc::new(Cell::new(0));
        let timer = host.every(100, {
            let count = Rc::clone(&count);
            Box::new(move || count.set(count.get() + 1))
        });
        host.advance(250.0);
        assert_eq!(count.get(), 2);

        drop(timer);
        host.advance(1000.0);
        assert_eq!(count.get(), 2);
        assert_eq!(host.active_timers(), 0);
    }

    #[test]
    fn test_reset_clears_form_controls() {
        let input = FakeElement::new("input").with_value("hello");
        let form = FakeElement::new("form").with_child(input.clone());
        form.reset();
        assert_eq!(input.value().as_deref(), Some(""));
    }
}
