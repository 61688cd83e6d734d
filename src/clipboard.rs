//! Copy-to-clipboard with button feedback.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page markup calls the exported `copyToClipboard(text, button)`. The async
//! clipboard API is preferred; when it is missing or rejects the write, a
//! hidden textarea is selected and the legacy `copy` command is issued. A
//! successful copy swaps the button to a "Copied!" state and restores it
//! after a fixed delay.
//!
//! Restore timers are independent per call and never cancelled, so rapid
//! repeated copies on one button can restore over each other's feedback.

use crate::config::ClipboardConfig;
use crate::dom::ElementHandle;
use crate::error::UiError;

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;

/// Platform services the copy flow depends on.
#[allow(async_fn_in_trait)]
pub trait ClipboardHost {
    /// Temporary selectable field used by the legacy path.
    type Scratch;

    /// Whether `navigator.clipboard.writeText` exists.
    fn async_clipboard_available(&self) -> bool;

    async fn write_text(&self, text: &str) -> Result<(), UiError>;

    /// Create an invisible field holding `text`, attach it, and select it.
    fn insert_scratch(&self, text: &str) -> Result<Self::Scratch, UiError>;

    fn remove_scratch(&self, scratch: Self::Scratch);

    /// Issue the legacy synchronous copy command on the current selection.
    fn exec_copy(&self) -> Result<(), UiError>;

    /// Blocking user-facing alert.
    fn alert(&self, message: &str);

    /// Run `callback` once after `delay_ms`.
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    AsyncClipboard,
    LegacyCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(CopyMethod),
    Failed,
}

/// Map the legacy copy command's result onto the copy flow.
///
/// Only a thrown command counts as failure. Browsers return `false` when the
/// command is unsupported or blocked; that is logged and treated as copied.
pub fn copy_command_result(executed: Result<bool, String>) -> Result<(), UiError> {
    match executed {
        Ok(true) => Ok(()),
        Ok(false) => {
            log::warn!("clipboard: copy command reported false; assuming copied");
            Ok(())
        }
        Err(err) => Err(UiError::CopyCommand(err)),
    }
}

/// Removes the scratch field when dropped, on every exit path.
struct ScratchGuard<'a, H: ClipboardHost> {
    host: &'a H,
    scratch: Option<H::Scratch>,
}

impl<'a, H: ClipboardHost> ScratchGuard<'a, H> {
    fn new(host: &'a H, scratch: H::Scratch) -> Self {
        Self { host, scratch: Some(scratch) }
    }
}

impl<H: ClipboardHost> Drop for ScratchGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(scratch) = self.scratch.take() {
            self.host.remove_scratch(scratch);
        }
    }
}

pub struct ClipboardHelper<H> {
    host: H,
    config: ClipboardConfig,
}

impl<H: ClipboardHost> ClipboardHelper<H> {
    pub fn new(host: H, config: ClipboardConfig) -> Self {
        Self { host, config }
    }

    #[cfg(test)]
    pub(crate) fn host(&self) -> &H {
        &self.host
    }

    /// Copy `text`, falling back to the legacy command if the async write is
    /// unavailable or rejected. Never returns an error; failures are logged
    /// and surfaced to the user.
    pub async fn copy_to_clipboard<E>(&self, text: &str, button: &E) -> CopyOutcome
    where
        E: ElementHandle + Clone + 'static,
    {
        if self.host.async_clipboard_available() {
            match self.host.write_text(text).await {
                Ok(()) => {
                    self.show_feedback(button);
                    return CopyOutcome::Copied(CopyMethod::AsyncClipboard);
                }
                Err(err) => log::error!("clipboard: failed to copy: {err}"),
            }
        }
        self.fallback_copy(text, button)
    }

    /// Copy through a selected scratch field and the legacy copy command.
    pub fn fallback_copy<E>(&self, text: &str, button: &E) -> CopyOutcome
    where
        E: ElementHandle + Clone + 'static,
    {
        match self.legacy_copy(text) {
            Ok(()) => {
                self.show_feedback(button);
                CopyOutcome::Copied(CopyMethod::LegacyCommand)
            }
            Err(err) => {
                log::error!("clipboard: fallback copy failed: {err}");
                self.host.alert(&self.config.failure_message);
                CopyOutcome::Failed
            }
        }
    }

    /// Swap the button into its "Copied!" state and schedule the restore.
    pub fn show_feedback<E>(&self, button: &E)
    where
        E: ElementHandle + Clone + 'static,
    {
        let original_html = button.inner_html();
        let original_class = button.class_name();

        button.set_inner_html(&self.config.feedback_html);
        button.add_class(&self.config.success_class);

        let button = button.clone();
        self.host.schedule(
            self.config.feedback_ms,
            Box::new(move || {
                button.set_inner_html(&original_html);
                button.set_class_name(&original_class);
            }),
        );
    }

    fn legacy_copy(&self, text: &str) -> Result<(), UiError> {
        let _scratch = ScratchGuard::new(&self.host, self.host.insert_scratch(text)?);
        self.host.exec_copy()
    }
}
