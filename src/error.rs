//! Error type shared by the theme and clipboard hosts.

/// Failures reported by host implementations.
///
/// None of these escape the public entry points; callers log them and degrade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    #[error("local storage unavailable")]
    StorageUnavailable,
    #[error("storage write failed: {0}")]
    Storage(String),
    #[error("clipboard write rejected: {0}")]
    ClipboardRejected(String),
    #[error("copy command failed: {0}")]
    CopyCommand(String),
    #[error("dom error: {0}")]
    Dom(String),
    #[error("invalid config: {0}")]
    Config(String),
}
