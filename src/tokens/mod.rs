use gpui::{Hsla, rgb};

/// Colors shared by every part of a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldColors {
    pub tint: Hsla,
    pub base: Hsla,
    pub text: Hsla,
    pub error: Hsla,
}

impl Default for FieldColors {
    fn default() -> Self {
        Self {
            tint: rgb(0x0091ea).into(),
            base: gpui::black().opacity(0.38),
            text: gpui::black().opacity(0.87),
            error: rgb(0xd50000).into(),
        }
    }
}

impl FieldColors {
    pub fn tint(mut self, value: impl Into<Hsla>) -> Self {
        self.tint = value.into();
        self
    }

    pub fn base(mut self, value: impl Into<Hsla>) -> Self {
        self.base = value.into();
        self
    }

    pub fn text(mut self, value: impl Into<Hsla>) -> Self {
        self.text = value.into();
        self
    }

    pub fn error(mut self, value: impl Into<Hsla>) -> Self {
        self.error = value.into();
        self
    }
}

/// Font sizes and label band geometry, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldMetrics {
    pub font_size: f32,
    pub title_font_size: f32,
    pub label_font_size: f32,
    pub label_height: f32,
    pub label_padding: f32,
    pub input_container_padding: f32,
}

impl Default for FieldMetrics {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            title_font_size: 12.0,
            label_font_size: 12.0,
            label_height: 32.0,
            label_padding: 4.0,
            input_container_padding: 8.0,
        }
    }
}

impl FieldMetrics {
    /// Height of a single line of input text.
    pub fn line_height(&self) -> f32 {
        self.font_size * 1.5
    }
}

pub const HELPER_COLLAPSED_HEIGHT: f32 = 8.0;
pub const ACTIVE_LINE_WIDTH: f32 = 2.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_give_one_and_a_half_line_height() {
        let metrics = FieldMetrics::default();
        assert_eq!(metrics.line_height(), 24.0);
        assert_eq!(metrics.label_height, 32.0);
    }

    #[test]
    fn base_color_is_translucent_black() {
        let colors = FieldColors::default();
        assert!((colors.base.a - 0.38).abs() < 1e-4);
        assert!(colors.text.a > colors.base.a);
    }
}
