use std::{
    collections::HashMap,
    ops::Range,
    rc::Rc,
    sync::{LazyLock, Mutex},
    time::Instant,
};

use gpui::{
    AnyElement, App, Bounds, FocusHandle, InputHandler, InteractiveElement, IntoElement,
    MouseButton, ParentElement, Pixels, RenderOnce, SharedString, StyleRefinement, Styled,
    UTF16Selection, Window, canvas, div, px,
};

use crate::contracts::{FieldLike, MotionAware};
use crate::id::ComponentId;
use crate::motion::FieldMotion;
use crate::platform::{self, Platform, RuntimeVersion};
use crate::tokens::{FieldColors, FieldMetrics};

use super::auto_grow::measured_height;
use super::control;
use super::field_config::{DisabledLineType, FieldConfig};
use super::field_events::{
    EditEvents, EditListeners, forget_listeners, listeners_for, register_listeners,
};
use super::field_handle::TextFieldHandle;
use super::field_parts::{
    forget_label, label_progress, refined, render_affix, render_counter, render_disabled_line,
    render_helper, render_label, render_underline,
};
use super::field_state::{FieldSnapshot, FieldState, SettleTicket};
use super::field_style::{FieldPartStyles, FieldStyle};
use super::focus_state::TransitionTrigger;
use super::native_input::{ChangeEvent, ContentSizeEvent, NativeInput, WindowInput};
use super::utils::{
    char_range_from_utf16, content_height_for, delete_last_char, hairline_px, replace_char_range,
    utf16_from_char,
};

type FocusListener = Rc<dyn Fn(&mut Window, &mut App)>;
type SlotRenderer = Box<dyn FnOnce() -> AnyElement>;

const CARET_WIDTH: f32 = 1.5;

#[derive(Clone)]
struct FieldRuntime {
    focus_handle: FocusHandle,
    config: FieldConfig,
}

static FIELD_RUNTIME: LazyLock<Mutex<HashMap<String, FieldRuntime>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static MARKED_TEXT: LazyLock<Mutex<HashMap<String, Range<usize>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static INPUT_BOUNDS: LazyLock<Mutex<HashMap<String, Bounds<Pixels>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn runtime_for(id: &str) -> Option<FieldRuntime> {
    FIELD_RUNTIME
        .lock()
        .ok()
        .and_then(|runtime| runtime.get(id).cloned())
}

fn with_handle<R>(
    id: &ComponentId,
    config: &FieldConfig,
    focus_handle: &FocusHandle,
    window: &mut Window,
    cx: &mut App,
    apply: impl FnOnce(&mut TextFieldHandle<WindowInput<'_>>) -> R,
) -> R {
    let mut handle = TextFieldHandle::new(
        id.clone(),
        config.clone(),
        WindowInput::new(focus_handle, window, cx),
    );
    apply(&mut handle)
}

/// Hands the ticket to the executor; the window is refreshed once the
/// transition has been reconciled.
fn schedule_settle(id: &ComponentId, ticket: Option<SettleTicket>, window: &Window, cx: &App) {
    let Some(ticket) = ticket else {
        return;
    };
    let id = id.to_string();
    let window_handle = window.window_handle();
    cx.spawn(async move |cx| {
        if control::settle_after(id, ticket).await {
            let _ = window_handle.update(cx, |_, window, _| {
                window.refresh();
            });
        }
    })
    .detach();
}

/// Imperative access to a rendered field by id.
///
/// The field must have been rendered at least once; until then every
/// operation is a no-op.
#[derive(Clone, Debug)]
pub struct FieldRef {
    id: ComponentId,
}

impl FieldRef {
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn focus(&self, window: &mut Window, cx: &mut App) {
        self.run(window, cx, |handle| handle.focus());
    }

    pub fn blur(&self, window: &mut Window, cx: &mut App) {
        self.run(window, cx, |handle| handle.blur());
    }

    /// Empties the field. The element's change listeners receive the empty
    /// text, as they would for a user edit.
    pub fn clear(&self, window: &mut Window, cx: &mut App) {
        let Some(runtime) = runtime_for(&self.id) else {
            tracing::warn!(field = %self.id, "clear on a field that was never rendered");
            return;
        };
        clear_marked(&self.id);
        let edit = EditContext {
            id: self.id.clone(),
            config: runtime.config,
            focus_handle: runtime.focus_handle,
            listeners: listeners_for(&self.id),
        };
        with_handle(
            &edit.id,
            &edit.config,
            &edit.focus_handle,
            window,
            cx,
            |handle| handle.native_mut().clear(),
        );
        edit.apply(String::new(), window, cx);
    }

    pub fn value(&self) -> String {
        runtime_for(&self.id)
            .and_then(|runtime| {
                control::with_field(&self.id, |state| state.resolved_value(&runtime.config).text)
                    .ok()
            })
            .unwrap_or_default()
    }

    pub fn is_focused(&self, window: &Window) -> bool {
        runtime_for(&self.id).is_some_and(|runtime| runtime.focus_handle.is_focused(window))
    }

    pub fn is_over_limit(&self) -> bool {
        runtime_for(&self.id).is_some_and(|runtime| {
            control::with_field(&self.id, |state| {
                state
                    .resolved_value(&runtime.config)
                    .is_restricted(runtime.config.character_restriction)
            })
            .unwrap_or(false)
        })
    }

    fn run(
        &self,
        window: &mut Window,
        cx: &mut App,
        apply: impl FnOnce(&mut TextFieldHandle<WindowInput<'_>>),
    ) {
        let Some(runtime) = runtime_for(&self.id) else {
            tracing::warn!(field = %self.id, "operation on a field that was never rendered");
            return;
        };
        with_handle(
            &self.id,
            &runtime.config,
            &runtime.focus_handle,
            window,
            cx,
            apply,
        );
    }
}

fn clear_marked(id: &str) {
    if let Ok(mut marked) = MARKED_TEXT.lock() {
        marked.remove(id);
    }
}

/// Everything an edit needs once the element has been handed to gpui.
#[derive(Clone)]
struct EditContext {
    id: ComponentId,
    config: FieldConfig,
    focus_handle: FocusHandle,
    listeners: EditListeners,
}

impl EditContext {
    fn current_text(&self) -> String {
        control::with_field(&self.id, |state| state.resolved_value(&self.config).text)
            .unwrap_or_default()
    }

    fn sanitize(&self, text: &str) -> String {
        if self.config.multiline {
            text.replace('\r', "")
        } else {
            text.replace(['\r', '\n'], "")
        }
    }

    fn commit(&self, next: String, window: &mut Window, cx: &mut App) {
        if next == self.current_text() {
            return;
        }
        self.apply(next, window, cx);
    }

    /// Routes a new text through the change listeners, then through the
    /// field's own handlers.
    fn apply(&self, next: String, window: &mut Window, cx: &mut App) {
        let events = EditEvents::for_text(&self.config, &next);
        self.listeners.deliver(&events, window, cx);

        let ticket = with_handle(
            &self.id,
            &self.config,
            &self.focus_handle,
            window,
            cx,
            |handle| {
                handle.on_change(&events.change);
                handle.on_change_text(&next)
            },
        );

        schedule_settle(&self.id, ticket, window, cx);
        window.refresh();
    }
}

struct FieldInputHandler {
    edit: EditContext,
}

impl FieldInputHandler {
    fn marked_range(&self, len: usize) -> Option<Range<usize>> {
        let marked = MARKED_TEXT.lock().ok()?.get(&*self.edit.id).cloned()?;
        (marked.end <= len && marked.start < marked.end).then_some(marked)
    }

    fn set_marked_range(&self, range: Option<Range<usize>>) {
        if let Ok(mut marked) = MARKED_TEXT.lock() {
            match range {
                Some(range) => {
                    marked.insert(self.edit.id.to_string(), range);
                }
                None => {
                    marked.remove(&*self.edit.id);
                }
            }
        }
    }

    fn replacement_range(&self, value: &str, range_utf16: Option<Range<usize>>) -> Range<usize> {
        let len = value.chars().count();
        range_utf16
            .map(|range| char_range_from_utf16(value, range))
            .or_else(|| self.marked_range(len))
            .unwrap_or(len..len)
    }
}

impl InputHandler for FieldInputHandler {
    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _cx: &mut App,
    ) -> Option<UTF16Selection> {
        let value = self.edit.current_text();
        let caret = utf16_from_char(&value, value.chars().count());
        Some(UTF16Selection {
            range: caret..caret,
            reversed: false,
        })
    }

    fn marked_text_range(&mut self, _window: &mut Window, _cx: &mut App) -> Option<Range<usize>> {
        let value = self.edit.current_text();
        let marked = self.marked_range(value.chars().count())?;
        Some(utf16_from_char(&value, marked.start)..utf16_from_char(&value, marked.end))
    }

    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        adjusted_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _cx: &mut App,
    ) -> Option<String> {
        let value = self.edit.current_text();
        let len = value.chars().count();
        let range = char_range_from_utf16(&value, range_utf16);
        let start = range.start.min(len);
        let end = range.end.min(len);
        adjusted_range.replace(utf16_from_char(&value, start)..utf16_from_char(&value, end));
        Some(value.chars().skip(start).take(end - start).collect())
    }

    fn replace_text_in_range(
        &mut self,
        replacement_range: Option<Range<usize>>,
        text: &str,
        window: &mut Window,
        cx: &mut App,
    ) {
        if !self.edit.config.interactive() {
            return;
        }
        let value = self.edit.current_text();
        let range = self.replacement_range(&value, replacement_range);
        let next = replace_char_range(&value, range, &self.edit.sanitize(text));
        self.set_marked_range(None);
        self.edit.commit(next, window, cx);
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _new_selected_range_utf16: Option<Range<usize>>,
        window: &mut Window,
        cx: &mut App,
    ) {
        if !self.edit.config.interactive() {
            return;
        }
        let value = self.edit.current_text();
        let range = self.replacement_range(&value, range_utf16);
        let inserted = self.edit.sanitize(new_text);
        let inserted_chars = inserted.chars().count();
        let next = replace_char_range(&value, range.clone(), &inserted);
        let marked = (inserted_chars > 0).then(|| range.start..range.start + inserted_chars);
        self.set_marked_range(marked);
        self.edit.commit(next, window, cx);
    }

    fn unmark_text(&mut self, _window: &mut Window, _cx: &mut App) {
        self.set_marked_range(None);
    }

    fn bounds_for_range(
        &mut self,
        _range_utf16: Range<usize>,
        _window: &mut Window,
        _cx: &mut App,
    ) -> Option<Bounds<Pixels>> {
        INPUT_BOUNDS
            .lock()
            .ok()
            .and_then(|bounds| bounds.get(&*self.edit.id).copied())
    }

    fn character_index_for_point(
        &mut self,
        _point: gpui::Point<Pixels>,
        _window: &mut Window,
        _cx: &mut App,
    ) -> Option<usize> {
        let value = self.edit.current_text();
        Some(utf16_from_char(&value, value.chars().count()))
    }

    fn accepts_text_input(&mut self, _window: &mut Window, _cx: &mut App) -> bool {
        self.edit.config.interactive()
    }
}

/// Floating-label text field.
///
/// The label rests on the input baseline while the field is empty and
/// blurred, and lifts into the label band once the field is focused or has
/// content. Underline, helper text and label color follow a single focus
/// signal that tweens between the errored, idle and active states.
#[derive(IntoElement)]
pub struct TextField {
    id: ComponentId,
    config: FieldConfig,
    focus_handle: Option<FocusHandle>,
    on_focus: Option<FocusListener>,
    on_blur: Option<FocusListener>,
    listeners: EditListeners,
    render_accessory: Option<SlotRenderer>,
    style: StyleRefinement,
    part_styles: FieldPartStyles,
}

impl TextField {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::default(),
            config: FieldConfig::default(),
            focus_handle: None,
            on_focus: None,
            on_blur: None,
            listeners: EditListeners::default(),
            render_accessory: None,
            style: StyleRefinement::default(),
            part_styles: FieldPartStyles::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Imperative access to the field rendered under `id`.
    pub fn handle(id: impl Into<ComponentId>) -> FieldRef {
        FieldRef { id: id.into() }
    }

    /// Tears down everything kept for `id`. Pending settle timers for the
    /// field complete as no-ops.
    pub fn unmount(id: &str) -> bool {
        forget_label(id);
        forget_listeners(id);
        clear_marked(id);
        if let Ok(mut runtime) = FIELD_RUNTIME.lock() {
            runtime.remove(id);
        }
        if let Ok(mut bounds) = INPUT_BOUNDS.lock() {
            bounds.remove(id);
        }
        control::unmount(id)
    }

    pub fn label(mut self, value: impl Into<SharedString>) -> Self {
        self.config.label = value.into();
        self
    }

    pub fn title(mut self, value: impl Into<SharedString>) -> Self {
        self.config.title = Some(value.into());
        self
    }

    /// An empty message counts as no error.
    pub fn error(mut self, value: impl Into<SharedString>) -> Self {
        self.config.error = Some(value.into());
        self
    }

    pub fn clear_error(mut self) -> Self {
        self.config.error = None;
        self
    }

    pub fn disabled(mut self, value: bool) -> Self {
        self.config.disabled = value;
        self
    }

    pub fn motion(mut self, value: FieldMotion) -> Self {
        self.config.motion = value;
        self
    }

    pub fn prefix(mut self, value: impl Into<SharedString>) -> Self {
        self.config.prefix = Some(value.into());
        self
    }

    pub fn suffix(mut self, value: impl Into<SharedString>) -> Self {
        self.config.suffix = Some(value.into());
        self
    }

    pub fn placeholder(mut self, value: impl Into<SharedString>) -> Self {
        self.config.placeholder = Some(value.into());
        self
    }

    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.config.value = Some(value.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<SharedString>) -> Self {
        self.config.default_value = Some(value.into());
        self
    }

    pub fn character_restriction(mut self, limit: usize) -> Self {
        self.config.character_restriction = Some(limit);
        self
    }

    pub fn multiline(mut self, value: bool) -> Self {
        self.config.multiline = value;
        self
    }

    /// Fixed content height for a multiline field; auto-grow is bypassed.
    pub fn height(mut self, value: f32) -> Self {
        self.config.height = Some(value);
        self
    }

    pub fn colors(mut self, value: FieldColors) -> Self {
        self.config.colors = value;
        self
    }

    pub fn tint_color(mut self, value: impl Into<gpui::Hsla>) -> Self {
        self.config.colors = self.config.colors.tint(value);
        self
    }

    pub fn base_color(mut self, value: impl Into<gpui::Hsla>) -> Self {
        self.config.colors = self.config.colors.base(value);
        self
    }

    pub fn text_color(mut self, value: impl Into<gpui::Hsla>) -> Self {
        self.config.colors = self.config.colors.text(value);
        self
    }

    pub fn error_color(mut self, value: impl Into<gpui::Hsla>) -> Self {
        self.config.colors = self.config.colors.error(value);
        self
    }

    pub fn metrics(mut self, value: FieldMetrics) -> Self {
        self.config.metrics = value;
        self
    }

    pub fn transition_trigger(mut self, value: TransitionTrigger) -> Self {
        self.config.trigger = value;
        self
    }

    pub fn disabled_line_type(mut self, value: DisabledLineType) -> Self {
        self.config.disabled_line = value;
        self
    }

    pub fn editable(mut self, value: bool) -> Self {
        self.config.editable = value;
        self
    }

    pub fn platform(mut self, value: Platform) -> Self {
        self.config.platform = value;
        self
    }

    pub fn runtime_version(mut self, value: RuntimeVersion) -> Self {
        self.config.runtime_version = Some(value);
        self
    }

    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = Some(focus_handle);
        self
    }

    pub fn on_focus(mut self, listener: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_focus = Some(Rc::new(listener));
        self
    }

    pub fn on_blur(mut self, listener: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_blur = Some(Rc::new(listener));
        self
    }

    pub fn on_change(
        mut self,
        listener: impl Fn(&ChangeEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.listeners.on_change = Some(Rc::new(listener));
        self
    }

    pub fn on_change_text(
        mut self,
        listener: impl Fn(SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.listeners.on_change_text = Some(Rc::new(listener));
        self
    }

    pub fn on_content_size_change(
        mut self,
        listener: impl Fn(&ContentSizeEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.listeners.on_content_size_change = Some(Rc::new(listener));
        self
    }

    /// Overrides for the label, helper, counter, affixes and input container.
    /// The outer container takes the element's own [`Styled`] refinement.
    pub fn part_styles(mut self, value: FieldPartStyles) -> Self {
        self.part_styles = value;
        self
    }

    pub fn render_accessory<E>(mut self, render: impl FnOnce() -> E + 'static) -> Self
    where
        E: IntoElement,
    {
        self.render_accessory = Some(Box::new(move || render().into_any_element()));
        self
    }

    fn resolved_focus_handle(&self, cx: &App) -> FocusHandle {
        if let Some(focus_handle) = self.focus_handle.as_ref() {
            return focus_handle.clone();
        }
        if let Ok(mut runtime) = FIELD_RUNTIME.lock()
            && let Some(existing) = runtime.get_mut(&*self.id)
        {
            return existing.focus_handle.clone();
        }
        cx.focus_handle()
    }

    fn remember(&self, focus_handle: &FocusHandle) {
        if let Ok(mut runtime) = FIELD_RUNTIME.lock() {
            runtime.insert(
                self.id.to_string(),
                FieldRuntime {
                    focus_handle: focus_handle.clone(),
                    config: self.config.clone(),
                },
            );
        }
    }

    fn edit_context(&self, focus_handle: &FocusHandle) -> EditContext {
        EditContext {
            id: self.id.clone(),
            config: self.config.clone(),
            focus_handle: focus_handle.clone(),
            listeners: self.listeners.clone(),
        }
    }

    /// Reports focus edges the primitive went through since the last pass.
    fn sync_focus(&self, focus_handle: &FocusHandle, window: &mut Window, cx: &mut App) {
        let native = focus_handle.is_focused(window);
        let tracked = control::with_field(&self.id, |state| state.focused()).unwrap_or(native);
        if native == tracked {
            return;
        }

        let ticket = if native {
            if let Some(listener) = self.on_focus.as_ref() {
                listener(window, cx);
            }
            with_handle(&self.id, &self.config, focus_handle, window, cx, |handle| {
                handle.on_focus()
            })
        } else {
            if let Some(listener) = self.on_blur.as_ref() {
                listener(window, cx);
            }
            clear_marked(&self.id);
            with_handle(&self.id, &self.config, focus_handle, window, cx, |handle| {
                handle.on_blur()
            })
        };
        schedule_settle(&self.id, ticket, window, cx);
    }

    /// Feeds the laid-out content height to the field. Skipped where the
    /// primitive's size reports are unreliable; change events carry the
    /// height there instead.
    fn sync_content_size(
        &self,
        focus_handle: &FocusHandle,
        snapshot: &FieldSnapshot,
        window: &mut Window,
        cx: &mut App,
    ) -> bool {
        if !self.config.multiline
            || platform::content_size_events_unreliable(
                self.config.platform,
                self.config.runtime_version,
            )
        {
            return false;
        }

        if self.config.height_override().is_some() {
            return false;
        }

        let laid_out = content_height_for(&snapshot.value.text, self.config.metrics.line_height());
        let expected = measured_height(
            self.config.metrics.font_size,
            laid_out,
            self.config.platform,
        );
        let current = control::with_field(&self.id, |state| state.content_height())
            .unwrap_or(expected);
        if (expected - current).abs() <= f32::EPSILON {
            return false;
        }

        let event = ContentSizeEvent::new(laid_out);
        if let Some(listener) = self.listeners.on_content_size_change.as_ref() {
            listener(&event, window, cx);
        }
        with_handle(&self.id, &self.config, focus_handle, window, cx, |handle| {
            handle.on_content_size_change(&event)
        })
    }

    fn snapshot(
        &self,
        focus_handle: &FocusHandle,
        window: &mut Window,
        cx: &mut App,
    ) -> FieldSnapshot {
        let now = Instant::now();
        with_handle(&self.id, &self.config, focus_handle, window, cx, |handle| {
            handle.snapshot(now)
        })
        .unwrap_or_else(|| FieldState::mount(&self.config).snapshot(&self.config, now))
    }

    fn render_value(&self, snapshot: &FieldSnapshot, style: &FieldStyle) -> AnyElement {
        let line_height = self.config.metrics.line_height();
        let show_caret = snapshot.focused && self.config.interactive();
        let (text, color) = if snapshot.value.is_empty() {
            (
                self.config.placeholder.clone().unwrap_or_default().to_string(),
                self.config.colors.base,
            )
        } else {
            (snapshot.value.text.clone(), style.input.color)
        };

        let lines: Vec<String> = if self.config.multiline {
            text.split('\n').map(str::to_string).collect()
        } else {
            vec![text]
        };
        let last = lines.len().saturating_sub(1);

        div()
            .flex()
            .flex_col()
            .w_full()
            .text_size(px(style.input.font_size))
            .text_color(color)
            .children(lines.into_iter().enumerate().map(|(index, line)| {
                let mut row = div()
                    .flex()
                    .flex_row()
                    .items_center()
                    .h(px(line_height))
                    .whitespace_nowrap()
                    .overflow_hidden();
                let caret_first = snapshot.value.is_empty();
                if show_caret && index == last && caret_first {
                    row = row.child(render_caret(self.config.colors.tint, line_height));
                }
                row = row.child(SharedString::from(line));
                if show_caret && index == last && !caret_first {
                    row = row.child(render_caret(self.config.colors.tint, line_height));
                }
                row
            }))
            .into_any_element()
    }
}

fn render_caret(color: gpui::Hsla, line_height: f32) -> AnyElement {
    div()
        .flex_none()
        .w(px(CARET_WIDTH))
        .h(px(line_height * 0.75))
        .bg(color)
        .into_any_element()
}

impl Default for TextField {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl FieldLike for TextField {
    fn label(self, value: impl Into<SharedString>) -> Self {
        TextField::label(self, value)
    }

    fn title(self, value: impl Into<SharedString>) -> Self {
        TextField::title(self, value)
    }

    fn error(self, value: impl Into<SharedString>) -> Self {
        TextField::error(self, value)
    }

    fn clear_error(self) -> Self {
        TextField::clear_error(self)
    }
}

crate::impl_disableable!(TextField);

impl Styled for TextField {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl MotionAware for TextField {
    fn motion(self, value: FieldMotion) -> Self {
        TextField::motion(self, value)
    }
}

impl RenderOnce for TextField {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let focus_handle = self.resolved_focus_handle(cx);
        self.remember(&focus_handle);
        register_listeners(&self.id, self.listeners.clone());

        let now = Instant::now();
        let ticket = with_handle(&self.id, &self.config, &focus_handle, window, cx, |handle| {
            handle.mount();
            handle.reconcile(now)
        });
        schedule_settle(&self.id, ticket, window, cx);
        self.sync_focus(&focus_handle, window, cx);

        let now = Instant::now();
        if control::with_field(&self.id, |state| state.tick(now)).unwrap_or(false) {
            tracing::trace!(field = %self.id, "transition settled on frame");
        }

        let mut snapshot = self.snapshot(&focus_handle, window, cx);
        if self.sync_content_size(&focus_handle, &snapshot, window, cx) {
            snapshot = self.snapshot(&focus_handle, window, cx);
        }

        let hairline = f32::from(hairline_px(window));
        let style = FieldStyle::derive(&self.config, &snapshot, hairline);
        let (progress, label_moving) =
            label_progress(&self.id, style.label.raised, self.config.motion, Instant::now());
        if snapshot.animating || label_moving {
            window.request_animation_frame();
        }

        let interactive = self.config.interactive();
        let line_height = self.config.metrics.line_height();
        let content_height = style.container.height
            - style.container.padding_top
            - style.container.padding_bottom;

        let mut input_row = div()
            .relative()
            .flex()
            .flex_row()
            .items_start()
            .w_full()
            .h(px(content_height))
            .overflow_hidden();
        let parts = std::mem::take(&mut self.part_styles);
        if let Some(prefix) = self.config.prefix.clone() {
            input_row = input_row.child(render_affix(
                prefix,
                &style.affix,
                line_height,
                parts.affix.as_ref(),
            ));
        }
        input_row = input_row.child(
            div()
                .relative()
                .flex_1()
                .min_w_0()
                .h(px(style.input.height))
                .overflow_hidden()
                .child({
                    let id_for_bounds = self.id.to_string();
                    canvas(
                        move |bounds, _, _cx| {
                            if let Ok(mut stored) = INPUT_BOUNDS.lock() {
                                stored.insert(id_for_bounds.clone(), bounds);
                            }
                        },
                        |_, _, _, _| {},
                    )
                    .absolute()
                    .size_full()
                })
                .child(self.render_value(&snapshot, &style)),
        );
        if let Some(suffix) = self.config.suffix.clone() {
            input_row = input_row.child(render_affix(
                suffix,
                &style.affix,
                line_height,
                parts.affix.as_ref(),
            ));
        }
        if let Some(render) = self.render_accessory.take() {
            input_row = input_row.child(div().flex_none().child(render()));
        }

        let container = div()
            .id(self.id.slot("container"))
            .relative()
            .w_full()
            .h(px(style.container.height))
            .pt(px(style.container.padding_top))
            .pb(px(style.container.padding_bottom))
            .track_focus(&focus_handle);
        let mut container = refined(container, parts.input_container.as_ref());
        if let Some(line) = style.disabled_line.as_ref() {
            container = container.child(render_disabled_line(line));
        }
        if let Some(underline) = style.container.underline {
            container = container.child(render_underline(underline));
        }
        container = container
            .child(render_label(
                self.config.label.clone(),
                &style.label,
                progress,
                parts.label.as_ref(),
            ))
            .child(input_row);

        if interactive {
            let edit = self.edit_context(&focus_handle);
            container = container
                .cursor_text()
                .on_mouse_down(MouseButton::Left, {
                    let edit = edit.clone();
                    move |_, window, cx| {
                        with_handle(
                            &edit.id,
                            &edit.config,
                            &edit.focus_handle,
                            window,
                            cx,
                            |handle| handle.focus(),
                        );
                        window.refresh();
                    }
                })
                .on_mouse_down_out({
                    let edit = edit.clone();
                    move |_, window, cx| {
                        if !edit.focus_handle.is_focused(window) {
                            return;
                        }
                        with_handle(
                            &edit.id,
                            &edit.config,
                            &edit.focus_handle,
                            window,
                            cx,
                            |handle| handle.blur(),
                        );
                        window.refresh();
                    }
                })
                .on_key_down({
                    let edit = edit.clone();
                    move |event, window, cx| {
                        let modifiers = &event.keystroke.modifiers;
                        if modifiers.control || modifiers.platform || modifiers.alt {
                            return;
                        }
                        let next = match event.keystroke.key.as_str() {
                            "backspace" => delete_last_char(&edit.current_text()),
                            "enter" if edit.config.multiline => {
                                Some(format!("{}\n", edit.current_text()))
                            }
                            _ => return,
                        };
                        cx.stop_propagation();
                        if let Some(next) = next {
                            edit.commit(next, window, cx);
                        }
                    }
                });

            window.handle_input(&focus_handle, FieldInputHandler { edit }, cx);
        } else {
            container = container.cursor_default();
        }

        let error_text = snapshot.error.clone().map(SharedString::from);
        let mut helper = div()
            .relative()
            .flex()
            .flex_row()
            .w_full()
            .h(px(style.helper_height))
            .overflow_hidden()
            .child(
                div()
                    .relative()
                    .flex_1()
                    .h_full()
                    .child(render_helper(
                        error_text,
                        &style.error_text,
                        parts.helper.as_ref(),
                    ))
                    .child(render_helper(
                        self.config.title.clone(),
                        &style.title_text,
                        parts.helper.as_ref(),
                    )),
            );
        if let Some(counter) = style.counter.as_ref() {
            helper = helper.child(render_counter(counter, parts.counter.as_ref()));
        }

        let mut root = div().id(self.id.clone()).flex().flex_col().w_full();
        gpui::Refineable::refine(gpui::Styled::style(&mut root), &self.style);
        root.child(container).child(helper)
    }
}
