//! # vpn-manager-ui
//!
//! Browser-side helpers for the VPN Manager web panel, compiled to
//! WebAssembly. Two independent behaviors live here:
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Light/dark preference: storage, `data-theme`, toggle button |
//! | [`clipboard`] | Copy-to-clipboard with legacy fallback and button feedback |
//! | [`dom`] | Host traits the controllers are written against |
//! | [`config`] | Page-embedded JSON configuration and defaults |
//! | [`error`] | Shared [`error::UiError`] |
//!
//! Everything except `browser` builds and tests natively. The `hydrate`
//! feature adds the `web-sys` hosts and the exported entry points
//! (`copyToClipboard`, `currentTheme`, and the module start hook).

pub mod clipboard;
pub mod config;
pub mod dom;
pub mod error;
pub mod theme;

#[cfg(feature = "hydrate")]
pub mod browser;

#[cfg(test)]
#[path = "fakes_test.rs"]
mod fakes;
