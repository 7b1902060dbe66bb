pub struct ValueStateInput<'a> {
    pub value: Option<&'a str>,
    pub default_value: Option<&'a str>,
    pub buffer: Option<&'a str>,
    pub received_focus: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedValue {
    pub text: String,
    /// The default value is on screen as placeholder-like content.
    pub default_visible: bool,
}

impl ResolvedValue {
    /// A default value only stands in for the content until the field is
    /// focused for the first time; after that the live buffer (or the
    /// controlled value) always wins, even if it is empty.
    pub fn resolve(input: ValueStateInput<'_>) -> Self {
        let default_visible = !(input.received_focus
            || input.value.is_some()
            || input.default_value.is_none());

        let text = if default_visible {
            input.default_value.unwrap_or_default()
        } else if let Some(value) = input.value {
            value
        } else {
            input.buffer.unwrap_or_default()
        };

        Self {
            text: text.to_string(),
            default_visible,
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_restricted(&self, limit: Option<usize>) -> bool {
        is_restricted(limit, self.char_count())
    }
}

/// An absent limit is unbounded, never zero.
pub fn is_restricted(limit: Option<usize>, count: usize) -> bool {
    limit.is_some_and(|limit| limit < count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(
        value: Option<&str>,
        default_value: Option<&str>,
        buffer: Option<&str>,
        received_focus: bool,
    ) -> ResolvedValue {
        ResolvedValue::resolve(ValueStateInput {
            value,
            default_value,
            buffer,
            received_focus,
        })
    }

    #[test]
    fn default_shows_until_first_focus() {
        let before = resolve(None, Some("draft"), None, false);
        assert_eq!(before.text, "draft");
        assert!(before.default_visible);

        let after = resolve(None, Some("draft"), None, true);
        assert_eq!(after.text, "");
        assert!(!after.default_visible);
    }

    #[test]
    fn controlled_value_suppresses_default() {
        let resolved = resolve(Some("typed"), Some("draft"), Some("stale"), false);
        assert_eq!(resolved.text, "typed");
        assert!(!resolved.default_visible);
    }

    #[test]
    fn uncontrolled_without_default_reads_buffer() {
        let resolved = resolve(None, None, Some("hello"), false);
        assert_eq!(resolved.text, "hello");
        assert!(!resolved.default_visible);
    }

    #[test]
    fn restriction_requires_a_limit() {
        assert!(!is_restricted(None, 10_000));
        assert!(!is_restricted(Some(5), 5));
        assert!(is_restricted(Some(5), 6));
        assert!(is_restricted(Some(0), 1));
    }

    #[test]
    fn restriction_counts_chars_not_bytes() {
        let resolved = resolve(Some("héllo"), None, None, true);
        assert_eq!(resolved.char_count(), 5);
        assert!(!resolved.is_restricted(Some(5)));
    }
}
