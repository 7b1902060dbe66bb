use std::sync::{LazyLock, Mutex, MutexGuard};
use std::time::Instant;

use futures::executor::block_on;

use crate::motion::FieldMotion;
use crate::platform::{Platform, RuntimeVersion};

use super::{
    ChangeEvent, ContentSizeEvent, FieldConfig, NativeInput, TextFieldHandle, auto_grow, control,
};

static STATE_TEST_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

struct StateTestGuard {
    _lock: MutexGuard<'static, ()>,
}

fn guard() -> StateTestGuard {
    let lock = match STATE_TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    control::clear_all();
    StateTestGuard { _lock: lock }
}

impl Drop for StateTestGuard {
    fn drop(&mut self) {
        control::clear_all();
    }
}

#[derive(Default)]
struct RecordingInput {
    focused: bool,
    calls: Vec<&'static str>,
}

impl NativeInput for RecordingInput {
    fn focus(&mut self) {
        self.focused = true;
        self.calls.push("focus");
    }

    fn blur(&mut self) {
        self.focused = false;
        self.calls.push("blur");
    }

    fn clear(&mut self) {
        self.calls.push("clear");
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}

fn fast_config(label: &'static str) -> FieldConfig {
    FieldConfig {
        motion: FieldMotion::new().duration_ms(10),
        ..FieldConfig::new(label)
    }
}

fn mounted(id: &str, config: FieldConfig) -> TextFieldHandle<RecordingInput> {
    let handle = TextFieldHandle::new(id, config, RecordingInput::default());
    assert!(handle.mount().is_some());
    handle
}

#[test]
fn clear_matches_an_empty_change_text() {
    let _guard = guard();
    let mut cleared = mounted("clear-a", fast_config("Name"));
    let mut typed = mounted("clear-b", fast_config("Name"));

    for handle in [&mut cleared, &mut typed] {
        handle.on_focus();
        handle.on_change_text("hello");
        handle.on_blur();
    }
    assert_eq!(cleared.value(), "hello");

    cleared.clear();
    typed.on_change_text("");

    assert_eq!(cleared.native().calls, vec!["clear"]);
    assert_eq!(cleared.value(), "");
    let now = Instant::now();
    let left = cleared.snapshot(now).map(|snapshot| snapshot.value);
    let right = typed.snapshot(now).map(|snapshot| snapshot.value);
    assert_eq!(left, right);
}

#[test]
fn focus_is_ignored_when_not_interactive() {
    let _guard = guard();
    let mut disabled = mounted(
        "focus-disabled",
        FieldConfig {
            disabled: true,
            ..fast_config("Name")
        },
    );
    let mut read_only = mounted(
        "focus-read-only",
        FieldConfig {
            editable: false,
            ..fast_config("Name")
        },
    );
    let mut enabled = mounted("focus-enabled", fast_config("Name"));

    disabled.focus();
    read_only.focus();
    enabled.focus();

    assert!(!disabled.is_focused());
    assert!(!read_only.is_focused());
    assert!(enabled.is_focused());
    assert!(disabled.native().calls.is_empty());

    enabled.blur();
    assert!(!enabled.is_focused());
    assert_eq!(enabled.native().calls, vec!["focus", "blur"]);
}

#[test]
fn default_value_shows_until_first_focus() {
    let _guard = guard();
    let mut handle = mounted(
        "default-value",
        FieldConfig {
            default_value: Some("draft".into()),
            ..fast_config("Notes")
        },
    );

    assert_eq!(handle.value(), "draft");
    let snapshot = handle.snapshot(Instant::now());
    assert!(snapshot.is_some_and(|snapshot| snapshot.value.default_visible));

    handle.on_focus();
    assert_eq!(handle.value(), "");

    handle.on_blur();
    assert_eq!(handle.value(), "");
}

#[test]
fn over_limit_follows_the_displayed_value() {
    let _guard = guard();
    let limited = FieldConfig {
        character_restriction: Some(3),
        ..fast_config("Code")
    };
    let mut handle = mounted("limit", limited);

    handle.on_focus();
    handle.on_change_text("abc");
    assert!(!handle.is_restricted());
    handle.on_change_text("abcd");
    assert!(handle.is_restricted());

    let mut unlimited = mounted("no-limit", fast_config("Code"));
    unlimited.on_focus();
    unlimited.on_change_text(&"x".repeat(500));
    assert!(!unlimited.is_restricted());
}

#[test]
fn change_events_carry_content_size_where_size_reports_are_unreliable() {
    let _guard = guard();
    let android = FieldConfig {
        multiline: true,
        platform: Platform::Android,
        runtime_version: Some(RuntimeVersion::new(0, 44, 0)),
        ..fast_config("Bio")
    };
    let mut handle = mounted("quirk-android", android);
    let event = ChangeEvent {
        text: "line\nline".into(),
        content_height: Some(100.0),
    };

    assert!(handle.on_change(&event));
    let expected = auto_grow::measured_height(16.0, 100.0, Platform::Android);
    let snapshot = handle.snapshot(Instant::now());
    assert_eq!(snapshot.map(|snapshot| snapshot.content_height), Some(expected));

    let ios = FieldConfig {
        multiline: true,
        platform: Platform::Ios,
        ..fast_config("Bio")
    };
    let mut handle = mounted("quirk-ios", ios);
    assert!(!handle.on_change(&event));
}

#[test]
fn content_size_without_height_is_ignored() {
    let _guard = guard();
    let mut handle = mounted(
        "size-missing",
        FieldConfig {
            multiline: true,
            ..fast_config("Bio")
        },
    );
    let before = handle.snapshot(Instant::now()).map(|s| s.content_height);

    assert!(!handle.on_content_size_change(&ContentSizeEvent::default()));
    assert_eq!(handle.snapshot(Instant::now()).map(|s| s.content_height), before);
}

#[test]
fn operations_on_unmounted_field_degrade() {
    let _guard = guard();
    let mut handle = TextFieldHandle::new("ghost", fast_config("Name"), RecordingInput::default());

    assert_eq!(handle.value(), "");
    assert!(!handle.is_restricted());
    assert!(handle.on_focus().is_none());
    assert!(handle.snapshot(Instant::now()).is_none());
    assert!(!handle.unmount());
}

#[test]
fn cleared_error_message_lingers_until_settle() {
    let _guard = guard();
    let errored = FieldConfig {
        error: Some("Required".into()),
        ..fast_config("Email")
    };
    let handle = mounted("settle-error", errored);
    assert!(handle.reconcile(Instant::now()).is_none());

    let handle = TextFieldHandle::new(
        "settle-error",
        fast_config("Email"),
        RecordingInput::default(),
    );
    let ticket = handle.reconcile(Instant::now());
    let Some(ticket) = ticket else {
        panic!("clearing the error should start a transition");
    };

    let lingering = handle.snapshot(Instant::now());
    assert!(lingering.as_ref().is_some_and(|snapshot| snapshot.errored));
    assert_eq!(
        lingering.and_then(|snapshot| snapshot.error),
        Some("Required".to_string())
    );

    assert!(block_on(control::settle_after("settle-error".into(), ticket)));
    let settled = handle.snapshot(Instant::now());
    assert!(settled.as_ref().is_some_and(|snapshot| !snapshot.errored));
    assert_eq!(settled.and_then(|snapshot| snapshot.error), None);
}

#[test]
fn settle_after_unmount_is_silent() {
    let _guard = guard();
    let mut handle = mounted("settle-unmounted", fast_config("Name"));
    let Some(ticket) = handle.on_focus() else {
        panic!("focus should start a transition");
    };

    assert!(handle.unmount());
    assert!(!block_on(control::settle_after(
        "settle-unmounted".into(),
        ticket
    )));
    assert!(!control::is_mounted("settle-unmounted"));
}

#[test]
fn superseded_transition_does_not_settle() {
    let _guard = guard();
    let mut handle = mounted("settle-superseded", fast_config("Name"));
    let first = handle.on_focus();
    let second = handle.on_blur();
    let (Some(first), Some(second)) = (first, second) else {
        panic!("both edges should start transitions");
    };

    assert!(!block_on(control::settle_after(
        "settle-superseded".into(),
        first
    )));
    assert!(block_on(control::settle_after(
        "settle-superseded".into(),
        second
    )));
}
