use std::ops::Range;

use gpui::{Pixels, Window, px};

fn scale_factor(window: &Window) -> f32 {
    window.scale_factor().max(f32::EPSILON)
}

pub fn hairline_px(window: &Window) -> Pixels {
    px(1.0 / scale_factor(window))
}

pub fn char_index_from_utf16(value: &str, utf16_index: usize) -> usize {
    let mut utf16_count = 0usize;
    let mut char_index = 0usize;
    for ch in value.chars() {
        if utf16_count >= utf16_index {
            break;
        }
        utf16_count += ch.len_utf16();
        char_index += 1;
    }
    char_index
}

pub fn utf16_from_char(value: &str, char_index: usize) -> usize {
    value
        .chars()
        .take(char_index)
        .map(char::len_utf16)
        .sum::<usize>()
}

pub fn char_range_from_utf16(value: &str, range_utf16: Range<usize>) -> Range<usize> {
    let start = char_index_from_utf16(value, range_utf16.start);
    let end = char_index_from_utf16(value, range_utf16.end);
    if start <= end { start..end } else { end..start }
}

pub fn byte_index_at_char(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map(|(index, _)| index)
        .unwrap_or(value.len())
}

pub fn replace_char_range(value: &str, range: Range<usize>, insert: &str) -> String {
    let len = value.chars().count();
    let start = range.start.min(len);
    let end = range.end.min(len).max(start);
    let mut next = value.to_string();
    next.replace_range(
        byte_index_at_char(value, start)..byte_index_at_char(value, end),
        insert,
    );
    next
}

/// Drops the last character, returning `None` for an empty value.
pub fn delete_last_char(value: &str) -> Option<String> {
    let mut next = value.to_string();
    next.pop().map(|_| next)
}

/// Height the text would occupy if laid out one line per `\n`.
pub fn content_height_for(value: &str, line_height: f32) -> f32 {
    let lines = value.split('\n').count().max(1);
    lines as f32 * line_height
}
