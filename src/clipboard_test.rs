use futures::executor::block_on;

use super::*;
use crate::fakes::{FakeClipboard, FakeElement, capture_logs, logged};

const FEEDBACK: &str = r#"<i class="bi bi-check-circle"></i> Copied!"#;

fn helper(host: FakeClipboard) -> ClipboardHelper<FakeClipboard> {
    ClipboardHelper::new(host, ClipboardConfig::default())
}

fn copy_button() -> FakeElement {
    FakeElement::new(r#"<i class="bi bi-clipboard"></i> Copy"#, "btn btn-outline-secondary")
}

#[test]
fn async_copy_shows_feedback_then_restores_after_delay() {
    let helper = helper(FakeClipboard::with_async());
    let button = copy_button();

    let outcome = block_on(helper.copy_to_clipboard("hello", &button));

    assert_eq!(outcome, CopyOutcome::Copied(CopyMethod::AsyncClipboard));
    assert_eq!(*helper.host().writes.borrow(), vec!["hello".to_string()]);
    assert_eq!(button.html(), FEEDBACK);
    assert_eq!(button.class(), "btn btn-outline-secondary btn-success");
    assert_eq!(helper.host().pending_timers(), vec![2000]);

    helper.host().fire_next_timer();
    assert_eq!(button.html(), r#"<i class="bi bi-clipboard"></i> Copy"#);
    assert_eq!(button.class(), "btn btn-outline-secondary");
}

#[test]
fn async_copy_does_not_touch_legacy_path() {
    let helper = helper(FakeClipboard::with_async());
    block_on(helper.copy_to_clipboard("hello", &copy_button()));
    assert!(helper.host().scratches.borrow().is_empty());
    assert_eq!(helper.host().exec_calls.get(), 0);
    assert!(helper.host().alerts.borrow().is_empty());
}

#[test]
fn unavailable_clipboard_uses_scratch_field_and_cleans_up() {
    let helper = helper(FakeClipboard::legacy_only());
    let button = copy_button();

    let outcome = block_on(helper.copy_to_clipboard("hello", &button));

    assert_eq!(outcome, CopyOutcome::Copied(CopyMethod::LegacyCommand));
    assert!(helper.host().writes.borrow().is_empty());
    let scratches = helper.host().scratches.borrow();
    assert_eq!(scratches.len(), 1);
    assert_eq!(scratches[0].value, "hello");
    assert_eq!(*helper.host().live_at_exec.borrow(), vec![1]);
    assert!(helper.host().live_scratches.borrow().is_empty());
    assert_eq!(helper.host().removed.get(), 1);
    assert_eq!(button.html(), FEEDBACK);
    assert!(helper.host().alerts.borrow().is_empty());
}

#[test]
fn rejected_async_write_falls_back_to_legacy_command() {
    capture_logs();
    let host = FakeClipboard {
        write_error: Some(UiError::ClipboardRejected("NotAllowedError".into())),
        ..FakeClipboard::with_async()
    };
    let helper = helper(host);
    let button = copy_button();

    let outcome = block_on(helper.copy_to_clipboard("token-123", &button));

    assert_eq!(outcome, CopyOutcome::Copied(CopyMethod::LegacyCommand));
    assert_eq!(helper.host().writes.borrow().len(), 1);
    assert_eq!(helper.host().scratches.borrow()[0].value, "token-123");
    assert_eq!(helper.host().removed.get(), 1);
    assert_eq!(button.html(), FEEDBACK);
    assert_eq!(helper.host().pending_timers(), vec![2000]);
    assert!(logged(log::Level::Error, "NotAllowedError"));
}

#[test]
fn legacy_failure_alerts_and_still_removes_scratch() {
    capture_logs();
    let host = FakeClipboard {
        exec_error: Some(UiError::CopyCommand("SecurityError".into())),
        ..FakeClipboard::legacy_only()
    };
    let helper = helper(host);
    let button = copy_button();

    let outcome = block_on(helper.copy_to_clipboard("hello", &button));

    assert_eq!(outcome, CopyOutcome::Failed);
    assert_eq!(*helper.host().alerts.borrow(), vec!["Failed to copy to clipboard".to_string()]);
    assert_eq!(*helper.host().live_at_exec.borrow(), vec![1]);
    assert!(helper.host().live_scratches.borrow().is_empty());
    assert_eq!(helper.host().removed.get(), 1);
    assert_eq!(button.html(), r#"<i class="bi bi-clipboard"></i> Copy"#);
    assert!(helper.host().pending_timers().is_empty());
    assert!(logged(log::Level::Error, "fallback copy failed"));
}

#[test]
fn both_paths_failing_alerts_exactly_once() {
    let host = FakeClipboard {
        write_error: Some(UiError::ClipboardRejected("denied".into())),
        exec_error: Some(UiError::CopyCommand("unsupported".into())),
        ..FakeClipboard::with_async()
    };
    let helper = helper(host);

    let outcome = block_on(helper.copy_to_clipboard("hello", &copy_button()));

    assert_eq!(outcome, CopyOutcome::Failed);
    assert_eq!(helper.host().alerts.borrow().len(), 1);
    assert_eq!(helper.host().removed.get(), 1);
}

#[test]
fn scratch_insert_failure_alerts_without_exec() {
    let host = FakeClipboard {
        insert_error: Some(UiError::Dom("document has no body".into())),
        ..FakeClipboard::legacy_only()
    };
    let helper = helper(host);

    let outcome = helper.fallback_copy("hello", &copy_button());

    assert_eq!(outcome, CopyOutcome::Failed);
    assert_eq!(helper.host().exec_calls.get(), 0);
    assert_eq!(helper.host().removed.get(), 0);
    assert_eq!(helper.host().alerts.borrow().len(), 1);
}

#[test]
fn feedback_does_not_duplicate_existing_success_class() {
    let helper = helper(FakeClipboard::with_async());
    let button = FakeElement::new("Copy", "btn btn-success");
    helper.show_feedback(&button);
    assert_eq!(button.class(), "btn btn-success");
    helper.host().fire_next_timer();
    assert_eq!(button.class(), "btn btn-success");
    assert_eq!(button.html(), "Copy");
}

#[test]
fn overlapping_feedback_restores_are_independent() {
    let helper = helper(FakeClipboard::with_async());
    let button = copy_button();

    block_on(helper.copy_to_clipboard("first", &button));
    block_on(helper.copy_to_clipboard("second", &button));
    assert_eq!(helper.host().pending_timers(), vec![2000, 2000]);

    // The second call captured the feedback state, so the later timer puts it back.
    helper.host().fire_next_timer();
    assert_eq!(button.html(), r#"<i class="bi bi-clipboard"></i> Copy"#);
    helper.host().fire_next_timer();
    assert_eq!(button.html(), FEEDBACK);
}

#[test]
fn custom_feedback_config_is_used() {
    let config = ClipboardConfig {
        feedback_ms: 750,
        feedback_html: "Done".into(),
        success_class: "ok".into(),
        failure_message: "nope".into(),
    };
    let helper = ClipboardHelper::new(FakeClipboard::with_async(), config);
    let button = FakeElement::new("Copy", "");

    block_on(helper.copy_to_clipboard("x", &button));

    assert_eq!(button.html(), "Done");
    assert_eq!(button.class(), "ok");
    assert_eq!(helper.host().pending_timers(), vec![750]);
}

#[test]
fn copy_command_returning_true_is_success() {
    assert_eq!(copy_command_result(Ok(true)), Ok(()));
}

#[test]
fn copy_command_returning_false_still_counts_as_copied() {
    capture_logs();
    assert_eq!(copy_command_result(Ok(false)), Ok(()));
    assert!(logged(log::Level::Warn, "copy command reported false"));
}

#[test]
fn copy_command_throwing_is_the_only_failure() {
    assert_eq!(
        copy_command_result(Err("SecurityError".into())),
        Err(UiError::CopyCommand("SecurityError".into()))
    );
}
