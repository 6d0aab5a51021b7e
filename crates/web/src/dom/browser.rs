// =============================================================================
// Folio Web - Browser Host (web-sys)
// =============================================================================
// Table of Contents:
// 1. Browser Element
// 2. Browser Observer
// 3. Browser Host
// 4. Bootstrap Collapse
// =============================================================================

use gloo_timers::callback::Interval;
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
    NodeList, ScrollBehavior, ScrollToOptions, Window,
};

use super::{
    Element, EventKind, Handler, Host, NavCollapse, PageEvent, Rect, VisibilityCallback,
    VisibilityObserver,
};
use crate::error::{PageError, Result};

// -----------------------------------------------------------------------------
// 1. Browser Element
// -----------------------------------------------------------------------------

/// A live DOM element.
#[derive(Clone, Debug, PartialEq)]
pub struct BrowserElement(pub web_sys::Element);

fn collect_elements(list: NodeList) -> Vec<BrowserElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .map(BrowserElement)
        .collect()
}

impl BrowserElement {
    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }
}

impl Element for BrowserElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        match self.0.query_selector_all(selector) {
            Ok(list) => collect_elements(list),
            Err(_) => {
                log::warn!("Invalid selector: {}", selector);
                Vec::new()
            }
        }
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn value(&self) -> Option<String> {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else {
            self.0.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
        }
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(html) = self.html() else { return };
        let style = html.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if result.is_err() {
            log::warn!("Failed to set style {}", property);
        }
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn bounding_rect(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }

    fn reset(&self) {
        if let Some(form) = self.0.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn listen(&self, kind: EventKind, mut handler: Handler) {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            let event = match ev.dyn_ref::<MouseEvent>() {
                Some(mouse) => PageEvent::pointer(mouse.client_x() as f64, mouse.client_y() as f64),
                None => PageEvent::default(),
            };
            handler(&event);
            if event.default_prevented() {
                ev.prevent_default();
            }
        });

        if self
            .0
            .add_event_listener_with_callback(kind.dom_name(), callback.as_ref().unchecked_ref())
            .is_ok()
        {
            // Listeners live as long as the page.
            callback.forget();
        } else {
            log::warn!("Failed to attach {} listener", kind.dom_name());
        }
    }
}

// -----------------------------------------------------------------------------
// 2. Browser Observer
// -----------------------------------------------------------------------------

/// `IntersectionObserver` wrapper.
#[derive(Clone, Debug)]
pub struct BrowserObserver(IntersectionObserver);

impl VisibilityObserver<BrowserElement> for BrowserObserver {
    fn observe(&self, target: &BrowserElement) {
        self.0.observe(&target.0);
    }

    fn unobserve(&self, target: &BrowserElement) {
        self.0.unobserve(&target.0);
    }

    fn disconnect(&self) {
        self.0.disconnect();
    }
}

// -----------------------------------------------------------------------------
// 3. Browser Host
// -----------------------------------------------------------------------------

/// The real window and document.
pub struct BrowserHost {
    window: Window,
    document: Document,
}

impl BrowserHost {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(PageError::MissingWindow)?;
        let document = window.document().ok_or(PageError::MissingDocument)?;
        Ok(Self { window, document })
    }
}

impl Host for BrowserHost {
    type Element = BrowserElement;
    type Timer = Interval;
    type Observer = BrowserObserver;

    fn query(&self, selector: &str) -> Option<BrowserElement> {
        // An invalid selector (e.g. a malformed anchor href) throws; treat as absent.
        self.document.query_selector(selector).ok().flatten().map(BrowserElement)
    }

    fn query_all(&self, selector: &str) -> Vec<BrowserElement> {
        match self.document.query_selector_all(selector) {
            Ok(list) => collect_elements(list),
            Err(_) => {
                log::warn!("Invalid selector: {}", selector);
                Vec::new()
            }
        }
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn current_year(&self) -> i32 {
        use chrono::Datelike;
        chrono::Local::now().year()
    }

    fn now(&self) -> f64 {
        self.window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    fn every(&self, period_ms: u32, mut task: Box<dyn FnMut()>) -> Interval {
        Interval::new(period_ms, move || task())
    }

    fn next_frame(&self, step: Box<dyn FnOnce(f64)>) {
        let callback = Closure::once_into_js(move |timestamp: f64| step(timestamp));
        if let Err(err) = self.window.request_animation_frame(callback.unchecked_ref::<Function>()) {
            log::warn!("requestAnimationFrame failed: {:?}", err);
        }
    }

    fn observe_visibility(
        &self,
        threshold: f64,
        mut on_visible: VisibilityCallback<BrowserElement, BrowserObserver>,
    ) -> Result<BrowserObserver> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let observer = BrowserObserver(observer);
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    on_visible(&BrowserElement(entry.target()), &observer);
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(PageError::from_js)?;
        callback.forget();

        Ok(BrowserObserver(observer))
    }
}

// -----------------------------------------------------------------------------
// 4. Bootstrap Collapse
// -----------------------------------------------------------------------------

/// Bootstrap's `Collapse` plugin bound to the mobile navigation panel.
pub struct BootstrapCollapse {
    instance: JsValue,
}

impl BootstrapCollapse {
    /// Bind to `panel` when `window.bootstrap` is loaded.
    pub fn attach(panel: &BrowserElement) -> Option<Self> {
        let window = web_sys::window()?;
        let bootstrap = Reflect::get(&window, &JsValue::from_str("bootstrap"))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())?;
        let collapse = Reflect::get(&bootstrap, &JsValue::from_str("Collapse")).ok()?;
        let factory = Reflect::get(&collapse, &JsValue::from_str("getOrCreateInstance"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;

        let options = js_sys::Object::new();
        Reflect::set(&options, &JsValue::from_str("toggle"), &JsValue::FALSE).ok()?;
        let instance = factory.call2(&collapse, &panel.0, &options).ok()?;

        Some(Self { instance })
    }
}

impl NavCollapse for BootstrapCollapse {
    fn hide(&self) {
        let hide = Reflect::get(&self.instance, &JsValue::from_str("hide"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());
        if let Some(hide) = hide {
            if let Err(err) = hide.call0(&self.instance) {
                log::warn!("Navigation collapse failed: {:?}", err);
            }
        }
    }
}
