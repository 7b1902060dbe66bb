use std::time::{Duration, Instant};

pub const DEFAULT_FIELD_DURATION_MS: u16 = 225;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn apply(self, delta: f32) -> f32 {
        let delta = delta.clamp(0.0, 1.0);
        match self {
            Easing::Linear => gpui::linear(delta),
            Easing::EaseIn => gpui::quadratic(delta),
            Easing::EaseOut => gpui::ease_out_quint()(delta),
            Easing::EaseInOut => gpui::ease_in_out(delta),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldMotion {
    pub duration_ms: u16,
    pub easing: Easing,
}

impl Default for FieldMotion {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_FIELD_DURATION_MS,
            easing: Easing::Linear,
        }
    }
}

impl FieldMotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration_ms(mut self, duration_ms: u16) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }
}

/// A scalar that moves from its current sample to a target over a fixed
/// duration.
///
/// The tween never owns a clock: callers pass `now` to every query, which
/// keeps sampling decoupled from whichever frame loop drives the render.
/// Retargeting always starts from the value sampled at `now`, so an
/// interrupted transition continues from where it visually is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    started_at: Option<Instant>,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            started_at: None,
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn sample(&self, now: Instant) -> f32 {
        if self.started_at.is_none() {
            return self.to;
        }
        let progress = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * progress
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        self.started_at.is_none() || self.progress(now) >= 1.0
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .duration
                .saturating_sub(now.saturating_duration_since(started_at)),
            None => Duration::ZERO,
        }
    }

    pub fn animate_to(&mut self, target: f32, motion: FieldMotion, now: Instant) {
        let current = self.sample(now);
        self.from = current;
        self.to = target;
        self.duration = motion.duration();
        self.easing = motion.easing;
        self.started_at = Some(now);
    }

    fn progress(&self, now: Instant) -> f32 {
        let Some(started_at) = self.started_at else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started_at).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}
