use std::time::{Duration, Instant};

use calmfield::components::control;
use calmfield::prelude::*;
use calmfield::{FieldState, FieldStyle};

#[derive(Default)]
struct StubInput {
    focused: bool,
}

impl NativeInput for StubInput {
    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn clear(&mut self) {}

    fn is_focused(&self) -> bool {
        self.focused
    }
}

fn config(label: &'static str) -> FieldConfig {
    FieldConfig {
        motion: FieldMotion::new().duration_ms(40),
        ..FieldConfig::new(label)
    }
}

#[test]
fn focus_then_blur_walks_the_signal_up_and_back() {
    let id = "it-focus-walk";
    let mut handle = TextFieldHandle::new(id, config("Name"), StubInput::default());
    handle.mount();
    let start = Instant::now();

    handle.focus();
    assert!(handle.is_focused());
    assert!(handle.on_focus().is_some());

    let focused = handle
        .snapshot(start + Duration::from_millis(200))
        .map(|snapshot| snapshot.signal.value());
    assert_eq!(focused, Some(1.0));

    assert!(handle.on_blur().is_some());
    let later = Instant::now() + Duration::from_millis(200);
    let blurred = handle.snapshot(later).map(|snapshot| snapshot.signal.value());
    assert_eq!(blurred, Some(0.0));

    control::unmount(id);
}

#[test]
fn filled_field_stays_active_after_blur() {
    let id = "it-filled-blur";
    let mut handle = TextFieldHandle::new(id, config("Name"), StubInput::default());
    handle.mount();

    handle.on_focus();
    handle.on_change_text("Ada");
    handle.on_blur();

    let later = Instant::now() + Duration::from_millis(200);
    let snapshot = handle.snapshot(later);
    assert_eq!(snapshot.map(|snapshot| snapshot.signal.value()), Some(1.0));

    control::unmount(id);
}

#[test]
fn errored_style_uses_error_color_and_full_underline() {
    let errored = FieldConfig {
        error: Some("Required".into()),
        ..config("Email")
    };
    let state = FieldState::mount(&errored);
    let snapshot = state.snapshot(&errored, Instant::now());
    let style = FieldStyle::derive(&errored, &snapshot, 0.5);

    let underline = style.container.underline;
    assert!(underline.is_some_and(|line| line.width == 2.0));
    assert!(underline.is_some_and(|line| line.color == errored.colors.error));
    assert_eq!(style.label.color, errored.colors.error);
    assert_eq!(style.error_text.opacity, 1.0);
    assert_eq!(style.title_text.opacity, 0.0);
}

#[test]
fn idle_style_uses_hairline_and_collapsed_helper() {
    let idle = config("Email");
    let state = FieldState::mount(&idle);
    let snapshot = state.snapshot(&idle, Instant::now());
    let style = FieldStyle::derive(&idle, &snapshot, 0.5);

    assert!(style.container.underline.is_some_and(|line| line.width == 0.5));
    assert!(!style.label.raised);
    assert_eq!(style.error_text.opacity, 0.0);
    assert_eq!(style.helper_height, 8.0);
    assert!(style.counter.is_none());
}

#[test]
fn over_limit_field_shows_counter_in_error_color() {
    let id = "it-over-limit";
    let limited = FieldConfig {
        character_restriction: Some(4),
        ..config("Pin")
    };
    let mut handle = TextFieldHandle::new(id, limited.clone(), StubInput::default());
    handle.mount();
    handle.on_focus();
    handle.on_change_text("12345");
    assert!(handle.is_restricted());

    let snapshot = handle.snapshot(Instant::now());
    let style = snapshot.map(|snapshot| FieldStyle::derive(&limited, &snapshot, 1.0));
    let counter = style.as_ref().and_then(|style| style.counter.clone());
    assert_eq!(counter.as_ref().map(|c| c.text.as_str()), Some("5 / 4"));
    assert_eq!(counter.map(|c| c.color), Some(limited.colors.error));
    assert_eq!(style.map(|style| style.label.color), Some(limited.colors.error));

    control::unmount(id);
}

#[test]
fn controlled_value_wins_over_typed_text() {
    let id = "it-controlled";
    let controlled = FieldConfig {
        value: Some("fixed".into()),
        ..config("Name")
    };
    let mut handle = TextFieldHandle::new(id, controlled, StubInput::default());
    handle.mount();
    handle.on_focus();
    handle.on_change_text("typed");

    assert_eq!(handle.value(), "fixed");
    control::unmount(id);
}

#[test]
fn multiline_growth_follows_reports_without_ratchet() {
    let id = "it-autogrow";
    let multiline = FieldConfig {
        multiline: true,
        platform: Platform::Desktop,
        ..config("Bio")
    };
    let mut handle = TextFieldHandle::new(id, multiline, StubInput::default());
    handle.mount();

    assert!(handle.on_content_size_change(&ContentSizeEvent::new(80.2)));
    let grown = handle.snapshot(Instant::now()).map(|s| s.content_height);
    assert_eq!(grown, Some(82.0));

    assert!(handle.on_content_size_change(&ContentSizeEvent::new(10.0)));
    let shrunk = handle.snapshot(Instant::now()).map(|s| s.content_height);
    assert_eq!(shrunk, Some(24.0));

    control::unmount(id);
}
