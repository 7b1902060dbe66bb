use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex},
    time::Instant,
};

use gpui::{AnyElement, IntoElement, ParentElement, SharedString, StyleRefinement, Styled, div, px};

use crate::motion::{FieldMotion, Tween};

use super::field_config::DisabledLineType;
use super::field_style::{
    AffixStyle, CounterStyle, DisabledLine, HelperStyle, LabelPlacement, LabelStyle, Underline,
};

const LINE_SEGMENTS: usize = 160;

static LABEL_MOTION: LazyLock<Mutex<HashMap<String, Tween>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Progress of the label between its resting (0) and lifted (1)
/// placements, plus whether it is still moving.
pub fn label_progress(id: &str, raised: bool, motion: FieldMotion, now: Instant) -> (f32, bool) {
    let target = if raised { 1.0 } else { 0.0 };
    let Ok(mut tweens) = LABEL_MOTION.lock() else {
        return (target, false);
    };
    let tween = tweens
        .entry(id.to_string())
        .or_insert_with(|| Tween::new(target));
    if tween.target() != target {
        tween.animate_to(target, motion, now);
    }
    (tween.sample(now), !tween.is_settled(now))
}

pub fn forget_label(id: &str) {
    if let Ok(mut tweens) = LABEL_MOTION.lock() {
        tweens.remove(id);
    }
}

pub fn refined<E: Styled>(mut node: E, overrides: Option<&StyleRefinement>) -> E {
    if let Some(overrides) = overrides {
        gpui::Refineable::refine(node.style(), overrides);
    }
    node
}

pub fn render_label(
    label: SharedString,
    style: &LabelStyle,
    progress: f32,
    overrides: Option<&StyleRefinement>,
) -> AnyElement {
    let LabelPlacement { top, font_size } = style.placement_at(progress);
    let node = div()
        .absolute()
        .left_0()
        .top(px(top))
        .text_size(px(font_size))
        .text_color(style.color)
        .whitespace_nowrap()
        .child(label);
    refined(node, overrides).into_any_element()
}

pub fn render_affix(
    text: SharedString,
    style: &AffixStyle,
    line_height: f32,
    overrides: Option<&StyleRefinement>,
) -> AnyElement {
    let node = div()
        .flex_none()
        .h(px(line_height))
        .flex()
        .items_center()
        .text_size(px(style.font_size))
        .text_color(style.color)
        .opacity(style.opacity)
        .child(text);
    refined(node, overrides).into_any_element()
}

pub fn render_helper(
    text: Option<SharedString>,
    style: &HelperStyle,
    overrides: Option<&StyleRefinement>,
) -> AnyElement {
    let node = div()
        .absolute()
        .top_0()
        .left_0()
        .right_0()
        .text_size(px(style.font_size))
        .text_color(style.color)
        .opacity(style.opacity)
        .child(text.unwrap_or_default());
    refined(node, overrides).into_any_element()
}

pub fn render_counter(style: &CounterStyle, overrides: Option<&StyleRefinement>) -> AnyElement {
    let node = div()
        .flex_none()
        .pl(px(8.0))
        .text_size(px(style.font_size))
        .text_color(style.color)
        .child(style.text.clone());
    refined(node, overrides).into_any_element()
}

pub fn render_underline(underline: Underline) -> AnyElement {
    div()
        .absolute()
        .left_0()
        .right_0()
        .bottom_0()
        .h(px(underline.width))
        .bg(underline.color)
        .into_any_element()
}

pub fn render_disabled_line(line: &DisabledLine) -> AnyElement {
    let (segment, gap) = match line.kind {
        DisabledLineType::Solid | DisabledLineType::None => {
            return div()
                .absolute()
                .left_0()
                .right_0()
                .bottom_0()
                .h(px(1.0))
                .bg(line.color)
                .into_any_element();
        }
        DisabledLineType::Dotted => (1.0, 2.0),
        DisabledLineType::Dashed => (4.0, 3.0),
    };

    div()
        .absolute()
        .left_0()
        .right_0()
        .bottom_0()
        .h(px(1.0))
        .flex()
        .flex_row()
        .gap(px(gap))
        .overflow_hidden()
        .children((0..LINE_SEGMENTS).map(|_| {
            div()
                .flex_none()
                .w(px(segment))
                .h(px(1.0))
                .bg(line.color)
        }))
        .into_any_element()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn label_starts_settled_and_animates_on_flip() {
        let id = "parts-label-flip";
        forget_label(id);
        let motion = FieldMotion::new().duration_ms(100);
        let start = Instant::now();

        assert_eq!(label_progress(id, false, motion, start), (0.0, false));

        let (progress, moving) =
            label_progress(id, true, motion, start + Duration::from_millis(10));
        assert_eq!(progress, 0.0);
        assert!(moving);

        let (progress, moving) =
            label_progress(id, true, motion, start + Duration::from_millis(60));
        assert!((progress - 0.5).abs() < 1e-3);
        assert!(moving);

        let (progress, moving) =
            label_progress(id, true, motion, start + Duration::from_millis(200));
        assert_eq!(progress, 1.0);
        assert!(!moving);
        forget_label(id);
    }
}
