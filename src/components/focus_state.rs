use gpui::{Hsla, Rgba};

/// When the focus signal is re-targeted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TransitionTrigger {
    /// Only error changes and focus/blur edges start a transition. Content
    /// that appears while blurred is picked up at the next edge.
    #[default]
    FocusOrError,
    /// Any change of the resolved target starts a transition, including
    /// content pushed from outside while the field is blurred.
    AnyTargetChange,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FocusTarget {
    Errored,
    Idle,
    Active,
}

impl FocusTarget {
    pub fn resolve(has_error: bool, focused: bool, has_content: bool) -> Self {
        if has_error {
            FocusTarget::Errored
        } else if focused || has_content {
            FocusTarget::Active
        } else {
            FocusTarget::Idle
        }
    }

    pub fn value(self) -> f32 {
        match self {
            FocusTarget::Errored => -1.0,
            FocusTarget::Idle => 0.0,
            FocusTarget::Active => 1.0,
        }
    }
}

/// Sampled focus signal in `[-1, 1]`. Every animated style of the field is
/// a piecewise-linear map of this value over the stops `[-1, 0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusSignal(pub f32);

impl FocusSignal {
    pub fn value(self) -> f32 {
        self.0
    }

    pub fn interpolate(self, outputs: [f32; 3]) -> f32 {
        let (from, to, t) = self.segment();
        lerp(outputs[from], outputs[to], t)
    }

    pub fn interpolate_color(self, outputs: [Hsla; 3]) -> Hsla {
        let (from, to, t) = self.segment();
        lerp_hsla(outputs[from], outputs[to], t)
    }

    fn segment(self) -> (usize, usize, f32) {
        let value = if self.0.is_finite() {
            self.0.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        if value <= 0.0 {
            (0, 1, value + 1.0)
        } else {
            (1, 2, value)
        }
    }
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Blends in RGB space so the midpoint between two hues does not swing
/// around the color wheel.
pub fn lerp_hsla(from: Hsla, to: Hsla, t: f32) -> Hsla {
    if t <= 0.0 {
        return from;
    }
    if t >= 1.0 {
        return to;
    }
    let from = from.to_rgb();
    let to = to.to_rgb();
    Rgba {
        r: lerp(from.r, to.r, t),
        g: lerp(from.g, to.g, t),
        b: lerp(from.b, to.b, t),
        a: lerp(from.a, to.a, t),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_table() {
        assert_eq!(FocusTarget::resolve(true, true, true), FocusTarget::Errored);
        assert_eq!(FocusTarget::resolve(true, false, false), FocusTarget::Errored);
        assert_eq!(FocusTarget::resolve(false, true, false), FocusTarget::Active);
        assert_eq!(FocusTarget::resolve(false, false, true), FocusTarget::Active);
        assert_eq!(FocusTarget::resolve(false, false, false), FocusTarget::Idle);
    }

    #[test]
    fn interpolation_hits_stops_and_midpoints() {
        let stops = [2.0, 0.5, 2.0];
        assert_eq!(FocusSignal(-1.0).interpolate(stops), 2.0);
        assert_eq!(FocusSignal(0.0).interpolate(stops), 0.5);
        assert_eq!(FocusSignal(1.0).interpolate(stops), 2.0);
        assert!((FocusSignal(-0.5).interpolate(stops) - 1.25).abs() < 1e-6);
        assert!((FocusSignal(0.5).interpolate([0.0, 1.0, 1.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn interpolation_clamps_out_of_range_signal() {
        assert_eq!(FocusSignal(3.0).interpolate([1.0, 0.0, 0.0]), 0.0);
        assert_eq!(FocusSignal(-7.0).interpolate([1.0, 0.0, 0.0]), 1.0);
        assert_eq!(FocusSignal(f32::NAN).interpolate([1.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn color_interpolation_reaches_endpoints() {
        let error = gpui::red();
        let base = gpui::black().opacity(0.38);
        let tint = gpui::blue();

        let at_error = FocusSignal(-1.0).interpolate_color([error, base, tint]);
        assert!((at_error.a - 1.0).abs() < 1e-4);

        let midway = FocusSignal(0.5).interpolate_color([error, base, tint]);
        assert!(midway.a > base.a && midway.a < 1.0);
    }
}
