//! `web-sys` hosts and the exported WASM entry points.
//!
//! SYSTEM CONTEXT
//! ==============
//! `start` runs when the module is instantiated: it installs console logging,
//! applies the stored theme and wires the toggle button once the DOM is
//! ready. `copyToClipboard` and `currentTheme` are exported and also set on
//! `window`, so inline `onclick` handlers can call them directly.

use std::cell::OnceCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Clipboard, Document, Element, HtmlDocument, HtmlTextAreaElement, Storage, Window};

use crate::clipboard::{ClipboardHelper, ClipboardHost, copy_command_result};
use crate::config::{CONFIG_ELEMENT_ID, UiConfig};
use crate::dom::{DocumentHost, ElementHandle, PreferenceStore};
use crate::error::UiError;
use crate::theme::{Theme, ThemeController};

thread_local! {
    static CONFIG: OnceCell<UiConfig> = const { OnceCell::new() };
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn config() -> UiConfig {
    CONFIG.with(|cell| cell.get().cloned().unwrap_or_default())
}

// =============================================================================
// HOSTS
// =============================================================================

/// `window.localStorage`, which may be missing (private mode, sandboxed frames).
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn new(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("storage: localStorage unavailable: {}", describe(&err));
                None
            }
        };
        Self { storage }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("storage: failed to read {key}: {}", describe(&err));
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), UiError> {
        let storage = self.storage.as_ref().ok_or(UiError::StorageUnavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| UiError::Storage(describe(&err)))
    }
}

impl ElementHandle for Element {
    fn inner_html(&self) -> String {
        Element::inner_html(self)
    }

    fn set_inner_html(&self, html: &str) {
        Element::set_inner_html(self, html);
    }

    fn class_name(&self) -> String {
        Element::class_name(self)
    }

    fn set_class_name(&self, class_name: &str) {
        Element::set_class_name(self, class_name);
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.class_list().add_1(class) {
            log::warn!("dom: failed to add class {class}: {}", describe(&err));
        }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = Element::set_attribute(self, name, value) {
            log::warn!("dom: failed to set {name}: {}", describe(&err));
        }
    }
}

pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl DocumentHost for WebDocument {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.document.document_element()?.get_attribute(name)
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        let Some(root) = self.document.document_element() else {
            log::warn!("dom: document has no root element");
            return;
        };
        ElementHandle::set_attribute(&root, name, value);
    }

    fn set_body_transition(&self, transition: &str) {
        let Some(body) = self.document.body() else {
            return;
        };
        if let Err(err) = body.style().set_property("transition", transition) {
            log::warn!("dom: failed to set body transition: {}", describe(&err));
        }
    }
}

pub struct WebClipboard {
    window: Window,
    document: Document,
}

impl WebClipboard {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// Feature-detect `navigator.clipboard.writeText`.
    fn clipboard(&self) -> Option<Clipboard> {
        let navigator = self.window.navigator();
        let clipboard = match js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => return None,
        };
        match js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText")) {
            Ok(write_text) if write_text.is_function() => {
                Some(clipboard.unchecked_into::<Clipboard>())
            }
            _ => None,
        }
    }
}

impl ClipboardHost for WebClipboard {
    type Scratch = HtmlTextAreaElement;

    fn async_clipboard_available(&self) -> bool {
        self.clipboard().is_some()
    }

    async fn write_text(&self, text: &str) -> Result<(), UiError> {
        let clipboard = self
            .clipboard()
            .ok_or_else(|| UiError::ClipboardRejected("navigator.clipboard unavailable".into()))?;
        JsFuture::from(clipboard.write_text(text))
            .await
            .map(|_| ())
            .map_err(|err| UiError::ClipboardRejected(describe(&err)))
    }

    fn insert_scratch(&self, text: &str) -> Result<HtmlTextAreaElement, UiError> {
        let dom_err = |err: JsValue| UiError::Dom(describe(&err));
        let field = self
            .document
            .create_element("textarea")
            .map_err(dom_err)?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|_| UiError::Dom("created element is not a textarea".into()))?;
        field.set_value(text);
        field.set_read_only(true);
        field.set_attribute("aria-hidden", "true").map_err(dom_err)?;

        let style = field.style();
        let hidden = [("position", "fixed"), ("top", "0"), ("left", "-9999px"), ("opacity", "0")];
        for (property, value) in hidden {
            style.set_property(property, value).map_err(dom_err)?;
        }

        let body = self
            .document
            .body()
            .ok_or_else(|| UiError::Dom("document has no body".into()))?;
        body.append_child(&field).map_err(dom_err)?;
        field.select();
        Ok(field)
    }

    fn remove_scratch(&self, scratch: HtmlTextAreaElement) {
        scratch.remove();
    }

    fn exec_copy(&self) -> Result<(), UiError> {
        let document = self
            .document
            .clone()
            .dyn_into::<HtmlDocument>()
            .map_err(|_| UiError::CopyCommand("document does not support execCommand".into()))?;
        copy_command_result(document.exec_command("copy").map_err(|err| describe(&err)))
    }

    fn alert(&self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            log::error!("dom: alert failed: {}", describe(&err));
        }
    }

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, callback).forget();
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Load `#ui-config` from the page, falling back to defaults.
fn load_config(document: &Document) -> (UiConfig, Option<UiError>) {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return (UiConfig::default(), None);
    };
    match UiConfig::from_json(&raw) {
        Ok(config) => (config, None),
        Err(err) => (UiConfig::default(), Some(err)),
    }
}

fn install_logging(config: &UiConfig) {
    console_error_panic_hook::set_once();
    let level = config.level().unwrap_or(log::Level::Info);
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already installed: {err}")));
    }
}

fn install_theme(window: &Window, document: Document, config: &UiConfig) {
    let controller = Rc::new(ThemeController::new(
        LocalStorage::new(window),
        WebDocument::new(document),
        config.theme.clone(),
    ));
    let theme = controller.initialize();
    log::debug!("theme: initialized to {theme}");

    let Some(button) = controller.toggle_button() else {
        return;
    };
    let handler = Rc::clone(&controller);
    let on_click = Closure::<dyn FnMut()>::new(move || {
        let next = handler.toggle();
        log::debug!("theme: switched to {next}");
    });
    let callback = on_click.as_ref().unchecked_ref();
    if let Err(err) = button.add_event_listener_with_callback("click", callback) {
        log::warn!("theme: failed to wire toggle: {}", describe(&err));
        return;
    }
    on_click.forget();
}

/// Set `window[name]` so inline markup can call it without the module.
fn expose_global(window: &Window, name: &str, value: &JsValue) {
    if let Err(err) = js_sys::Reflect::set(window, &JsValue::from_str(name), value) {
        log::error!("dom: failed to expose window.{name}: {}", describe(&err));
    }
}

/// Mirror every exported entry point onto `window`.
fn expose_globals(window: &Window) {
    let copy = Closure::<dyn Fn(String, Element)>::new(copy_to_clipboard);
    expose_global(window, "copyToClipboard", &copy.into_js_value());
    let theme = Closure::<dyn Fn() -> String>::new(current_theme);
    expose_global(window, "currentTheme", &theme.into_js_value());
}

#[wasm_bindgen(start)]
pub fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let (config, config_err) = load_config(&document);
    install_logging(&config);
    if let Some(err) = config_err {
        log::warn!("config: ignoring #{CONFIG_ELEMENT_ID}: {err}");
    }
    CONFIG.with(|cell| {
        if cell.set(config.clone()).is_err() {
            log::debug!("config: already initialized");
        }
    });
    expose_globals(&window);

    if document.ready_state() != "loading" {
        install_theme(&window, document, &config);
        return;
    }
    let target = document.clone();
    let on_ready = Closure::once_into_js(move || install_theme(&window, document, &config));
    let callback = on_ready.unchecked_ref();
    if let Err(err) = target.add_event_listener_with_callback("DOMContentLoaded", callback) {
        log::error!("theme: failed to wait for DOMContentLoaded: {}", describe(&err));
    }
}

/// Copy `text` to the clipboard and flash `button` on success.
#[wasm_bindgen(js_name = copyToClipboard)]
pub fn copy_to_clipboard(text: String, button: Element) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let helper = ClipboardHelper::new(WebClipboard::new(window, document), config().clipboard);
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = helper.copy_to_clipboard(&text, &button).await;
        log::debug!("clipboard: {outcome:?}");
    });
}

/// The theme currently applied to `<html>`.
#[wasm_bindgen(js_name = currentTheme)]
pub fn current_theme() -> String {
    let attribute = config().theme.attribute;
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|root| root.get_attribute(&attribute))
        .and_then(|raw| Theme::parse(&raw))
        .unwrap_or_default()
        .to_string()
}
