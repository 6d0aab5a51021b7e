// =============================================================================
// Folio Web - In-Page Navigation
// =============================================================================
// Smooth scrolling for `#section` links, offset for the fixed header.
// Collapses the mobile menu after a jump when it is open.
// =============================================================================

use std::rc::Rc;

use crate::config::{Selectors, Timing};
use crate::dom::{Element, EventKind, Host, NavCollapse, PageEvent};

/// Scroll position that puts the element matched by `href` just below the
/// fixed header.
///
/// `None` means the link is not an in-page jump (`#`, empty, or no match) and
/// the browser should handle it.
pub fn scroll_target<H: Host>(host: &H, href: &str, header_offset: f64) -> Option<f64> {
    if href.is_empty() || href == "#" {
        return None;
    }
    let target = host.query(href)?;
    Some(target.bounding_rect().top + host.scroll_offset() - header_offset)
}

/// Bootstrap marks an expanded collapse panel with this class.
pub const OPEN_CLASS: &str = "show";

/// Intercept clicks on in-page anchors. Returns the number of links wired.
pub fn attach_smooth_scroll<H: Host>(
    host: &Rc<H>,
    collapse: Rc<dyn NavCollapse>,
    selectors: &Selectors,
    timing: &Timing,
) -> usize {
    let anchors = host.query_all(&selectors.anchors);
    let header_offset = timing.header_offset;
    let panel = host.query(&selectors.nav_panel);

    for anchor in &anchors {
        let host = Rc::clone(host);
        let collapse = Rc::clone(&collapse);
        let panel = panel.clone();
        let link = anchor.clone();

        anchor.listen(
            EventKind::Click,
            Box::new(move |event: &PageEvent| {
                let Some(href) = link.attribute("href") else {
                    return;
                };
                let Some(top) = scroll_target(&*host, &href, header_offset) else {
                    return;
                };

                event.prevent_default();
                host.smooth_scroll_to(top);
                if panel.as_ref().is_some_and(|p| p.has_class(OPEN_CLASS)) {
                    collapse.hide();
                }
            }),
        );
    }

    anchors.len()
}
