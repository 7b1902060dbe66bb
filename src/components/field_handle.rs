use std::time::Instant;

use crate::id::ComponentId;
use crate::platform;

use super::control;
use super::field_config::FieldConfig;
use super::field_state::{FieldSnapshot, FieldState, MountGuard, SettleTicket};
use super::native_input::{ChangeEvent, ContentSizeEvent, NativeInput};

/// Imperative surface of a mounted field: the public operations plus the
/// handlers the native primitive's events are routed through.
pub struct TextFieldHandle<N: NativeInput> {
    id: ComponentId,
    config: FieldConfig,
    native: N,
}

impl<N: NativeInput> TextFieldHandle<N> {
    pub fn new(id: impl Into<ComponentId>, config: FieldConfig, native: N) -> Self {
        Self {
            id: id.into(),
            config,
            native,
        }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    /// Direct access to the primitive, bypassing the field's handlers.
    pub fn native_mut(&mut self) -> &mut N {
        &mut self.native
    }

    pub fn mount(&self) -> Option<MountGuard> {
        control::mount(&self.id, &self.config)
            .inspect_err(|error| tracing::warn!(field = %self.id, %error, "mount failed"))
            .ok()
    }

    pub fn unmount(&self) -> bool {
        control::unmount(&self.id)
    }

    pub fn reconcile(&self, now: Instant) -> Option<SettleTicket> {
        self.update(|state, config| state.reconcile(config, now))
            .flatten()
    }

    pub fn focus(&mut self) {
        if !self.config.interactive() {
            tracing::trace!(field = %self.id, "focus ignored on non-interactive field");
            return;
        }
        self.native.focus();
    }

    pub fn blur(&mut self) {
        self.native.blur();
    }

    /// The native clear does not report a text change, so one is synthesized.
    pub fn clear(&mut self) -> Option<SettleTicket> {
        self.native.clear();
        self.on_change_text("")
    }

    pub fn value(&self) -> String {
        self.update(|state, config| state.resolved_value(config).text)
            .unwrap_or_default()
    }

    pub fn is_focused(&self) -> bool {
        self.native.is_focused()
    }

    pub fn is_restricted(&self) -> bool {
        let limit = self.config.character_restriction;
        self.update(|state, config| state.resolved_value(config).is_restricted(limit))
            .unwrap_or(false)
    }

    pub fn snapshot(&self, now: Instant) -> Option<FieldSnapshot> {
        self.update(|state, config| state.snapshot(config, now))
    }

    pub fn on_focus(&mut self) -> Option<SettleTicket> {
        let now = Instant::now();
        self.update(|state, config| state.on_focus(config, now))
            .flatten()
    }

    pub fn on_blur(&mut self) -> Option<SettleTicket> {
        let now = Instant::now();
        self.update(|state, config| state.on_blur(config, now))
            .flatten()
    }

    /// Returns whether the event was turned into a content-size update.
    pub fn on_change(&mut self, event: &ChangeEvent) -> bool {
        if self.config.multiline
            && platform::content_size_events_unreliable(
                self.config.platform,
                self.config.runtime_version,
            )
        {
            tracing::trace!(field = %self.id, "synthesizing content size from change event");
            return self.on_content_size_change(&ContentSizeEvent::from(event));
        }
        false
    }

    pub fn on_change_text(&mut self, text: &str) -> Option<SettleTicket> {
        let now = Instant::now();
        self.update(|state, config| state.on_change_text(config, text, now))
            .flatten()
    }

    pub fn on_content_size_change(&mut self, event: &ContentSizeEvent) -> bool {
        self.update(|state, config| state.on_content_size_change(config, event.height))
            .unwrap_or(false)
    }

    fn update<R>(&self, apply: impl FnOnce(&mut FieldState, &FieldConfig) -> R) -> Option<R> {
        match control::with_field(&self.id, |state| apply(state, &self.config)) {
            Ok(result) => Some(result),
            Err(error) => {
                tracing::warn!(field = %self.id, %error, "field operation skipped");
                None
            }
        }
    }
}
