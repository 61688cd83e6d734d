//! Light/dark theme initialization and toggle.
//!
//! Reads the user's preference from local storage and mirrors it into the
//! `data-theme` attribute on `<html>`. Toggle writes back to storage and
//! updates the toggle button's icon and accessible label.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort: a failed storage write is logged and the
//! on-screen theme still changes. A missing toggle button only disables the
//! toggle; initialization always runs.

use std::fmt;

use crate::config::ThemeConfig;
use crate::dom::{DocumentHost, ElementHandle, PreferenceStore};

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse the exact stored representation.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Resolve a stored preference. Absent or unrecognized values mean light.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Light,
            Some(value) => Self::parse(value).unwrap_or_else(|| {
                log::warn!("unrecognized stored theme {value:?}; using light");
                Self::Light
            }),
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon shown on the toggle: the mode a click switches to.
    #[must_use]
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }

    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to light mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns the theme preference for one document.
pub struct ThemeController<S, D> {
    store: S,
    doc: D,
    config: ThemeConfig,
}

impl<S: PreferenceStore, D: DocumentHost> ThemeController<S, D> {
    pub fn new(store: S, doc: D, config: ThemeConfig) -> Self {
        Self { store, doc, config }
    }

    /// Apply the persisted preference to the document. Runs once at page load.
    pub fn initialize(&self) -> Theme {
        let stored = self.store.get(&self.config.storage_key);
        let theme = Theme::from_stored(stored.as_deref());
        self.doc.set_root_attribute(&self.config.attribute, theme.as_str());
        self.render_toggle(theme);
        theme
    }

    /// The mode currently reflected on the document root.
    pub fn active(&self) -> Theme {
        self.doc
            .root_attribute(&self.config.attribute)
            .and_then(|raw| Theme::parse(&raw))
            .unwrap_or_default()
    }

    /// Switch to the opposite mode, persist it, and return it.
    pub fn toggle(&self) -> Theme {
        let next = self.active().toggled();
        self.doc.set_root_attribute(&self.config.attribute, next.as_str());
        if let Err(err) = self.store.set(&self.config.storage_key, next.as_str()) {
            log::error!("theme: failed to persist preference: {err}");
        }
        self.render_toggle(next);
        self.doc.set_body_transition(&self.config.transition);
        next
    }

    /// Look up the toggle control for event wiring.
    ///
    /// Returns `None` with a warning when the page has no toggle.
    pub fn toggle_button(&self) -> Option<D::Element> {
        let button = self.doc.element_by_id(&self.config.toggle_id);
        if button.is_none() {
            log::warn!("theme: toggle button #{} not found", self.config.toggle_id);
        }
        button
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn document(&self) -> &D {
        &self.doc
    }

    fn render_toggle(&self, theme: Theme) {
        if let Some(button) = self.doc.element_by_id(&self.config.toggle_id) {
            button.set_inner_html(theme.toggle_icon());
            button.set_attribute("aria-label", theme.toggle_label());
        }
    }
}
