// =============================================================================
// Folio Web - Error Types
// =============================================================================

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while setting up page behavior.
///
/// Components themselves never fail: a missing element only disables the
/// component that needed it. These variants cover the host bootstrap.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("No window object available")]
    MissingWindow,

    #[error("No document available")]
    MissingDocument,

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Invalid page configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl PageError {
    /// Wrap a thrown JavaScript value.
    pub fn from_js(value: JsValue) -> Self {
        PageError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

pub type Result<T> = std::result::Result<T, PageError>;
