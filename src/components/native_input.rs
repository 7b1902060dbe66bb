use gpui::{App, FocusHandle, Window};

/// The editable primitive a field wraps.
pub trait NativeInput {
    fn focus(&mut self);
    fn blur(&mut self);
    /// Empties the primitive. Implementations are not expected to emit a
    /// change event for it.
    fn clear(&mut self);
    fn is_focused(&self) -> bool;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentSizeEvent {
    pub height: Option<f32>,
}

impl ContentSizeEvent {
    pub fn new(height: f32) -> Self {
        Self {
            height: Some(height),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeEvent {
    pub text: String,
    pub content_height: Option<f32>,
}

impl From<&ChangeEvent> for ContentSizeEvent {
    fn from(event: &ChangeEvent) -> Self {
        Self {
            height: event.content_height,
        }
    }
}

/// gpui side of the primitive: focus lives in a [`FocusHandle`], text lives
/// in the field's own buffer.
pub struct WindowInput<'a> {
    focus_handle: &'a FocusHandle,
    window: &'a mut Window,
    cx: &'a mut App,
}

impl<'a> WindowInput<'a> {
    pub fn new(focus_handle: &'a FocusHandle, window: &'a mut Window, cx: &'a mut App) -> Self {
        Self {
            focus_handle,
            window,
            cx,
        }
    }
}

impl NativeInput for WindowInput<'_> {
    fn focus(&mut self) {
        self.window.focus(self.focus_handle, self.cx);
    }

    fn blur(&mut self) {
        self.window.blur();
    }

    fn clear(&mut self) {
        self.window.refresh();
    }

    fn is_focused(&self) -> bool {
        self.focus_handle.is_focused(self.window)
    }
}
