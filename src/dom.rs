//! Host abstractions over browser storage and the document.
//!
//! SYSTEM CONTEXT
//! ==============
//! Controllers talk to the page only through these traits. The `hydrate`
//! build backs them with `web-sys`; tests back them with in-memory fakes.
//! Methods take `&self` because the DOM itself is shared mutable state.

use crate::error::UiError;

/// Browser-local key-value storage.
pub trait PreferenceStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), UiError>;
}

/// A rendered element whose content, class and attributes can be mutated.
pub trait ElementHandle {
    fn inner_html(&self) -> String;
    fn set_inner_html(&self, html: &str);
    fn class_name(&self) -> String;
    fn set_class_name(&self, class_name: &str);
    fn add_class(&self, class: &str);
    fn set_attribute(&self, name: &str, value: &str);
}

/// The document: root attribute, body style, and lookups by id.
pub trait DocumentHost {
    type Element: ElementHandle;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn root_attribute(&self, name: &str) -> Option<String>;
    fn set_root_attribute(&self, name: &str, value: &str);

    /// Set the CSS `transition` property on `<body>`.
    fn set_body_transition(&self, transition: &str);
}
