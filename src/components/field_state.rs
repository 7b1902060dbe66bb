use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::motion::Tween;

use super::auto_grow;
use super::field_config::FieldConfig;
use super::focus_state::{FocusSignal, FocusTarget, TransitionTrigger};
use super::value_state::{ResolvedValue, ValueStateInput};

/// Shared "still mounted" flag. Settle callbacks outlive the render pass
/// that scheduled them and must check it before touching field state.
#[derive(Clone, Debug)]
pub struct MountGuard(Arc<AtomicBool>);

impl MountGuard {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Handed out whenever a focus transition starts; redeemed once the tween
/// has run for `delay`.
#[derive(Clone, Debug)]
pub struct SettleTicket {
    pub generation: u64,
    pub delay: Duration,
    pub guard: MountGuard,
}

/// Read-only view of a field for style derivation.
#[derive(Clone, Debug)]
pub struct FieldSnapshot {
    pub signal: FocusSignal,
    pub focused: bool,
    pub errored: bool,
    pub error: Option<String>,
    pub value: ResolvedValue,
    pub content_height: f32,
    pub animating: bool,
}

#[derive(Clone, Debug)]
pub struct FieldState {
    text: Option<String>,
    focus: Tween,
    focused: bool,
    received_focus: bool,
    error: Option<String>,
    errored: bool,
    content_height: f32,
    prop_value: Option<String>,
    prop_error: Option<String>,
    generation: u64,
    settle_pending: bool,
    guard: MountGuard,
}

impl FieldState {
    pub fn mount(config: &FieldConfig) -> Self {
        let text = config.value_str().map(str::to_string);
        let error = config.active_error().map(str::to_string);
        let initial = if error.is_some() {
            FocusTarget::Errored
        } else {
            FocusTarget::Idle
        };

        Self {
            prop_value: text.clone(),
            text,
            focus: Tween::new(initial.value()),
            focused: false,
            received_focus: false,
            errored: error.is_some(),
            prop_error: error.clone(),
            error,
            content_height: auto_grow::min_height(config.metrics.font_size),
            generation: 0,
            settle_pending: false,
            guard: MountGuard::new(),
        }
    }

    pub fn guard(&self) -> &MountGuard {
        &self.guard
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn errored(&self) -> bool {
        self.errored
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Merges externally supplied value and error into the field. Runs before
    /// every render pass, independently of the event path.
    pub fn reconcile(&mut self, config: &FieldConfig, now: Instant) -> Option<SettleTicket> {
        let incoming_value = config.value_str().map(str::to_string);
        if incoming_value != self.prop_value {
            if let Some(value) = incoming_value.as_ref() {
                tracing::trace!(len = value.len(), "controlled value pushed into buffer");
                self.text = Some(value.clone());
            }
            self.prop_value = incoming_value;
        }

        let incoming_error = config.active_error().map(str::to_string);
        if let Some(error) = incoming_error.as_ref()
            && self.error.as_ref() != Some(error)
        {
            self.error = Some(error.clone());
            self.errored = true;
        }

        if incoming_error != self.prop_error {
            self.prop_error = incoming_error;
            return Some(self.start_transition(config, now));
        }

        self.retarget_on_content(config, now)
    }

    pub fn on_focus(&mut self, config: &FieldConfig, now: Instant) -> Option<SettleTicket> {
        self.received_focus = true;
        if self.focused {
            return None;
        }
        self.focused = true;
        Some(self.start_transition(config, now))
    }

    pub fn on_blur(&mut self, config: &FieldConfig, now: Instant) -> Option<SettleTicket> {
        if !self.focused {
            return None;
        }
        self.focused = false;
        Some(self.start_transition(config, now))
    }

    pub fn on_change_text(
        &mut self,
        config: &FieldConfig,
        text: &str,
        now: Instant,
    ) -> Option<SettleTicket> {
        self.text = Some(text.to_string());
        self.retarget_on_content(config, now)
    }

    /// Returns whether the stored height changed.
    pub fn on_content_size_change(&mut self, config: &FieldConfig, reported: Option<f32>) -> bool {
        let Some(height) =
            auto_grow::next_height(config.metrics.font_size, reported, config.platform)
        else {
            tracing::trace!("content size report without height ignored");
            return false;
        };
        let changed = (height - self.content_height).abs() > f32::EPSILON;
        self.content_height = height;
        changed
    }

    pub fn resolved_value(&self, config: &FieldConfig) -> ResolvedValue {
        ResolvedValue::resolve(ValueStateInput {
            value: config.value_str(),
            default_value: config.default_value_str(),
            buffer: self.text.as_deref(),
            received_focus: self.received_focus,
        })
    }

    pub fn target(&self, config: &FieldConfig) -> FocusTarget {
        let has_content = !self.resolved_value(config).is_empty() || config.has_placeholder();
        FocusTarget::resolve(self.prop_error.is_some(), self.focused, has_content)
    }

    pub fn signal(&self, now: Instant) -> FocusSignal {
        FocusSignal(self.focus.sample(now))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.focus.is_settled(now)
    }

    /// Frame-driven settle detection; equivalent to redeeming the ticket of
    /// the current transition once its tween has finished.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.settle_pending && self.focus.is_settled(now) {
            return self.settle(self.generation);
        }
        false
    }

    /// Reconciles the error message with the error that was current when the
    /// transition settled. Tickets of superseded transitions and tickets
    /// redeemed after unmount are ignored.
    pub fn settle(&mut self, generation: u64) -> bool {
        if !self.guard.is_mounted() {
            tracing::trace!(generation, "settle after unmount ignored");
            return false;
        }
        if !self.settle_pending || generation != self.generation {
            tracing::trace!(
                generation,
                current = self.generation,
                "stale settle ignored"
            );
            return false;
        }

        self.settle_pending = false;
        self.error = self.prop_error.clone();
        self.errored = self.error.is_some();
        tracing::debug!(generation, errored = self.errored, "focus transition settled");
        true
    }

    pub fn snapshot(&self, config: &FieldConfig, now: Instant) -> FieldSnapshot {
        FieldSnapshot {
            signal: self.signal(now),
            focused: self.focused,
            errored: self.errored,
            error: self.error.clone(),
            value: self.resolved_value(config),
            content_height: auto_grow::resolve_height(
                self.content_height,
                config.height_override(),
            ),
            animating: self.is_animating(now),
        }
    }

    fn retarget_on_content(&mut self, config: &FieldConfig, now: Instant) -> Option<SettleTicket> {
        if config.trigger != TransitionTrigger::AnyTargetChange {
            return None;
        }
        if self.target(config).value() == self.focus.target() {
            return None;
        }
        Some(self.start_transition(config, now))
    }

    fn start_transition(&mut self, config: &FieldConfig, now: Instant) -> SettleTicket {
        let target = self.target(config);
        self.generation = self.generation.wrapping_add(1);
        self.settle_pending = true;
        self.focus.animate_to(target.value(), config.motion, now);
        tracing::debug!(
            generation = self.generation,
            target = ?target,
            duration_ms = config.motion.duration_ms,
            "starting focus transition"
        );
        SettleTicket {
            generation: self.generation,
            delay: self.focus.remaining(now),
            guard: self.guard.clone(),
        }
    }
}
