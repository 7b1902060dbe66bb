use crate::platform::Platform;

pub fn min_height(font_size: f32) -> f32 {
    font_size * 1.5
}

/// Height for a reported native content height. Shrinking content lowers
/// the result again; only the single-line floor is sticky.
pub fn measured_height(font_size: f32, reported_height: f32, platform: Platform) -> f32 {
    min_height(font_size).max(reported_height.ceil() + platform.content_padding())
}

/// `None` when the report carries no usable height; the caller keeps its
/// previous value.
pub fn next_height(
    font_size: f32,
    reported_height: Option<f32>,
    platform: Platform,
) -> Option<f32> {
    let reported_height = reported_height.filter(|height| height.is_finite())?;
    Some(measured_height(font_size, reported_height, platform))
}

/// An explicit height disables auto-grow entirely.
pub fn resolve_height(content_height: f32, height_override: Option<f32>) -> f32 {
    height_override.unwrap_or(content_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_is_one_line() {
        assert_eq!(measured_height(16.0, 3.0, Platform::Ios), 24.0);
        assert_eq!(measured_height(16.0, 0.0, Platform::Android), 24.0);
    }

    #[test]
    fn reported_height_is_ceiled_then_padded() {
        assert_eq!(measured_height(16.0, 40.2, Platform::Ios), 46.0);
        assert_eq!(measured_height(16.0, 40.2, Platform::Android), 42.0);
    }

    #[test]
    fn smaller_report_lowers_height() {
        let tall = measured_height(16.0, 80.0, Platform::Android);
        let short = measured_height(16.0, 30.0, Platform::Android);
        assert_eq!(tall, 81.0);
        assert_eq!(short, 31.0);
    }

    #[test]
    fn missing_or_broken_report_keeps_previous() {
        assert_eq!(next_height(16.0, None, Platform::Ios), None);
        assert_eq!(next_height(16.0, Some(f32::NAN), Platform::Ios), None);
        assert_eq!(next_height(16.0, Some(50.0), Platform::Ios), Some(55.0));
    }

    #[test]
    fn override_wins() {
        assert_eq!(resolve_height(42.0, Some(120.0)), 120.0);
        assert_eq!(resolve_height(42.0, None), 42.0);
    }
}
