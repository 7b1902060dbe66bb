use gpui::{Hsla, StyleRefinement};

use crate::tokens::{ACTIVE_LINE_WIDTH, HELPER_COLLAPSED_HEIGHT};

use super::field_config::{DisabledLineType, FieldConfig};
use super::field_state::FieldSnapshot;
use super::focus_state::lerp;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Underline {
    pub color: Hsla,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerStyle {
    pub padding_top: f32,
    pub padding_bottom: f32,
    pub height: f32,
    /// `None` while disabled; the disabled line is drawn instead.
    pub underline: Option<Underline>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputStyle {
    pub font_size: f32,
    pub color: Hsla,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    pub top: f32,
    pub font_size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    pub raised: bool,
    pub color: Hsla,
    pub rest: LabelPlacement,
    pub lifted: LabelPlacement,
}

impl LabelStyle {
    pub fn placement(&self) -> LabelPlacement {
        if self.raised { self.lifted } else { self.rest }
    }

    /// `progress` runs from the resting placement (0) to the lifted one (1).
    pub fn placement_at(&self, progress: f32) -> LabelPlacement {
        let progress = progress.clamp(0.0, 1.0);
        LabelPlacement {
            top: lerp(self.rest.top, self.lifted.top, progress),
            font_size: lerp(self.rest.font_size, self.lifted.font_size, progress),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelperStyle {
    pub color: Hsla,
    pub opacity: f32,
    pub font_size: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CounterStyle {
    pub text: String,
    pub color: Hsla,
    pub font_size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffixStyle {
    pub opacity: f32,
    pub color: Hsla,
    pub font_size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisabledLine {
    pub kind: DisabledLineType,
    pub color: Hsla,
}

/// Every visual value of one frame of a field.
/// Caller overrides for the parts of a field, refined over the derived
/// style when rendering.
#[derive(Clone, Default)]
pub struct FieldPartStyles {
    pub input_container: Option<StyleRefinement>,
    pub label: Option<StyleRefinement>,
    pub helper: Option<StyleRefinement>,
    pub counter: Option<StyleRefinement>,
    pub affix: Option<StyleRefinement>,
}

impl FieldPartStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_container(mut self, value: StyleRefinement) -> Self {
        self.input_container = Some(value);
        self
    }

    pub fn label(mut self, value: StyleRefinement) -> Self {
        self.label = Some(value);
        self
    }

    pub fn helper(mut self, value: StyleRefinement) -> Self {
        self.helper = Some(value);
        self
    }

    pub fn counter(mut self, value: StyleRefinement) -> Self {
        self.counter = Some(value);
        self
    }

    pub fn affix(mut self, value: StyleRefinement) -> Self {
        self.affix = Some(value);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldStyle {
    pub container: ContainerStyle,
    pub input: InputStyle,
    pub label: LabelStyle,
    pub error_text: HelperStyle,
    pub title_text: HelperStyle,
    pub helper_height: f32,
    pub counter: Option<CounterStyle>,
    pub affix: AffixStyle,
    pub disabled_line: Option<DisabledLine>,
}

impl FieldStyle {
    /// `hairline` is the thinnest line the display can draw, in logical
    /// pixels.
    pub fn derive(config: &FieldConfig, snapshot: &FieldSnapshot, hairline: f32) -> Self {
        let colors = config.colors;
        let metrics = config.metrics;
        let signal = snapshot.signal;
        let line_height = metrics.line_height();

        let count = snapshot.value.char_count();
        let restricted = snapshot.value.is_restricted(config.character_restriction);
        let active = !snapshot.value.is_empty() || config.has_placeholder();

        let underline = (!config.disabled).then(|| {
            if restricted {
                Underline {
                    color: colors.error,
                    width: ACTIVE_LINE_WIDTH,
                }
            } else {
                Underline {
                    color: signal.interpolate_color([colors.error, colors.base, colors.tint]),
                    width: signal.interpolate([ACTIVE_LINE_WIDTH, hairline, ACTIVE_LINE_WIDTH]),
                }
            }
        });

        let content_height = if config.multiline {
            snapshot.content_height
        } else {
            line_height
        };

        let container = ContainerStyle {
            padding_top: metrics.label_height,
            padding_bottom: metrics.input_container_padding,
            height: metrics.label_height + metrics.input_container_padding + content_height,
            underline,
        };

        let input = InputStyle {
            font_size: metrics.font_size,
            color: if config.disabled || snapshot.value.default_visible {
                colors.base
            } else {
                colors.text
            },
            height: if config.multiline {
                line_height + snapshot.content_height
            } else {
                line_height
            },
        };

        let raised = active || snapshot.focused;
        let label = LabelStyle {
            raised,
            color: if snapshot.errored || restricted {
                colors.error
            } else if snapshot.focused {
                colors.tint
            } else {
                colors.base
            },
            rest: LabelPlacement {
                top: metrics.label_height + (line_height - metrics.font_size) / 2.0,
                font_size: metrics.font_size,
            },
            lifted: LabelPlacement {
                top: metrics.label_padding,
                font_size: metrics.label_font_size,
            },
        };

        let has_title = config.title.as_ref().is_some_and(|title| !title.is_empty());
        let error_text = HelperStyle {
            color: colors.error,
            opacity: signal.interpolate([1.0, 0.0, 0.0]),
            font_size: if has_title {
                metrics.title_font_size
            } else {
                signal.interpolate([metrics.title_font_size, 0.0, 0.0])
            },
        };
        let title_text = HelperStyle {
            color: colors.base,
            opacity: signal.interpolate([0.0, 1.0, 1.0]),
            font_size: metrics.title_font_size,
        };

        let helper_height = if has_title || config.character_restriction.is_some() {
            metrics.title_font_size * 2.0
        } else {
            signal.interpolate([
                metrics.title_font_size * 2.0,
                HELPER_COLLAPSED_HEIGHT,
                HELPER_COLLAPSED_HEIGHT,
            ])
        };

        let counter = config.character_restriction.map(|limit| CounterStyle {
            text: format!("{count} / {limit}"),
            color: if restricted {
                colors.error
            } else {
                colors.base
            },
            font_size: metrics.title_font_size,
        });

        let affix = AffixStyle {
            opacity: if raised { 1.0 } else { 0.0 },
            color: colors.base,
            font_size: metrics.font_size,
        };

        let disabled_line = (config.disabled && config.disabled_line != DisabledLineType::None)
            .then_some(DisabledLine {
                kind: config.disabled_line,
                color: colors.base,
            });

        Self {
            container,
            input,
            label,
            error_text,
            title_text,
            helper_height,
            counter,
            affix,
            disabled_line,
        }
    }
}
