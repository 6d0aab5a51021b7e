// =============================================================================
// Folio Web - Contact Form
// =============================================================================
// Client-side only. Checks that every field is filled in and shows a status
// line; delivery is left to whatever backend or email service the page is
// later connected to.
// =============================================================================

use std::rc::Rc;

use crate::config::{Messages, Selectors};
use crate::dom::{Element, EventKind, Host, PageEvent};
use crate::utils::all_present;

/// A complete, trimmed contact submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Trim the raw field values. `None` if any of them ends up empty.
    pub fn from_fields(name: &str, email: &str, message: &str) -> Option<Self> {
        if !all_present(&[name, email, message]) {
            return None;
        }
        Some(Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
        })
    }
}

fn field_value<H: Host>(host: &H, selector: &str) -> String {
    host.query(selector)
        .and_then(|el| el.value())
        .unwrap_or_default()
}

/// Handle submits of the contact form. Needs both the form and its status line.
pub fn attach<H: Host>(host: &Rc<H>, selectors: &Selectors, messages: &Messages) -> bool {
    let Some(form) = host.query(&selectors.contact_form) else {
        return false;
    };
    let Some(status) = host.query(&selectors.contact_status) else {
        return false;
    };

    let host = Rc::clone(host);
    let selectors = selectors.clone();
    let messages = messages.clone();
    let target = form.clone();

    form.listen(
        EventKind::Submit,
        Box::new(move |event: &PageEvent| {
            event.prevent_default();

            let submission = ContactMessage::from_fields(
                &field_value(&*host, &selectors.contact_name),
                &field_value(&*host, &selectors.contact_email),
                &field_value(&*host, &selectors.contact_message),
            );

            match submission {
                None => status.set_text(&messages.validation),
                Some(message) => {
                    log::debug!("Contact form accepted ({} chars)", message.message.len());
                    status.set_text(&messages.confirmation);
                    target.reset();
                }
            }
        }),
    );
    true
}
