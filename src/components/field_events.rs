use std::{cell::RefCell, collections::HashMap, rc::Rc};

use gpui::{App, SharedString, Window};

use crate::platform;

use super::field_config::FieldConfig;
use super::native_input::{ChangeEvent, ContentSizeEvent};
use super::utils::content_height_for;

type ChangeListener<W, A> = Rc<dyn Fn(&ChangeEvent, &mut W, &mut A)>;
type TextListener<W, A> = Rc<dyn Fn(SharedString, &mut W, &mut A)>;
type ContentSizeListener<W, A> = Rc<dyn Fn(&ContentSizeEvent, &mut W, &mut A)>;

/// Events one edit of the text fans out into.
#[derive(Clone, Debug, PartialEq)]
pub struct EditEvents {
    pub change: ChangeEvent,
    pub change_text: SharedString,
    /// Only set where the primitive does not report its own size, so the
    /// change event has to stand in for it.
    pub content_size: Option<ContentSizeEvent>,
}

impl EditEvents {
    pub fn for_text(config: &FieldConfig, next: &str) -> Self {
        let content_height = config
            .multiline
            .then(|| content_height_for(next, config.metrics.line_height()));
        let synthesize_size = config.multiline
            && platform::content_size_events_unreliable(config.platform, config.runtime_version);

        Self {
            change: ChangeEvent {
                text: next.to_string(),
                content_height,
            },
            change_text: SharedString::from(next.to_string()),
            content_size: synthesize_size.then(|| ContentSizeEvent {
                height: content_height,
            }),
        }
    }
}

/// Change listeners registered on an element.
pub struct EditListeners<W = Window, A = App> {
    pub on_change: Option<ChangeListener<W, A>>,
    pub on_change_text: Option<TextListener<W, A>>,
    pub on_content_size_change: Option<ContentSizeListener<W, A>>,
}

impl<W, A> Default for EditListeners<W, A> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_change_text: None,
            on_content_size_change: None,
        }
    }
}

impl<W, A> Clone for EditListeners<W, A> {
    fn clone(&self) -> Self {
        Self {
            on_change: self.on_change.clone(),
            on_change_text: self.on_change_text.clone(),
            on_content_size_change: self.on_content_size_change.clone(),
        }
    }
}

impl<W, A> EditListeners<W, A> {
    /// Hands `events` to the listeners: change, then the synthesized content
    /// size, then the new text.
    pub fn deliver(&self, events: &EditEvents, window: &mut W, cx: &mut A) {
        if let Some(listener) = self.on_change.as_ref() {
            listener(&events.change, window, cx);
        }
        if let Some(event) = events.content_size.as_ref()
            && let Some(listener) = self.on_content_size_change.as_ref()
        {
            listener(event, window, cx);
        }
        if let Some(listener) = self.on_change_text.as_ref() {
            listener(events.change_text.clone(), window, cx);
        }
    }
}

thread_local! {
    static FIELD_LISTENERS: RefCell<HashMap<String, EditListeners>> =
        RefCell::new(HashMap::new());
}

/// Keeps the element's listeners for `id` so edits made through a
/// [`FieldRef`](super::FieldRef) reach them too.
pub fn register_listeners(id: &str, listeners: EditListeners) {
    FIELD_LISTENERS.with(|registry| {
        registry.borrow_mut().insert(id.to_string(), listeners);
    });
}

pub fn listeners_for(id: &str) -> EditListeners {
    FIELD_LISTENERS.with(|registry| registry.borrow().get(id).cloned().unwrap_or_default())
}

pub fn forget_listeners(id: &str) -> bool {
    FIELD_LISTENERS.with(|registry| registry.borrow_mut().remove(id).is_some())
}
