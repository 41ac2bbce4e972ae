//! Error types for the lightbox.

use thiserror::Error;

/// Errors raised while opening, driving or configuring the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// A session is already open; only one viewer may be shown at a time
    #[error("a viewer session is already open")]
    AlreadyOpen,

    /// No global `window` (not running in a browser)
    #[error("no global window object")]
    NoWindow,

    /// The window has no document
    #[error("window has no document")]
    NoDocument,

    /// The document has no body to mount the overlay into
    #[error("document has no body")]
    NoBody,

    /// A DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),

    /// Settings failed validation
    #[error("invalid settings: {message}")]
    InvalidSettings {
        /// What was wrong
        message: String,
    },

    /// Settings JSON could not be parsed or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<wasm_bindgen::JsValue> for ViewerError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        ViewerError::Dom(crate::util::js_error_message(&value))
    }
}
