use gpui::SharedString;

use crate::motion::FieldMotion;
use crate::platform::{Platform, RuntimeVersion};
use crate::tokens::{FieldColors, FieldMetrics};

use super::focus_state::TransitionTrigger;

/// Line drawn in place of the underline while the field is disabled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DisabledLineType {
    Solid,
    #[default]
    Dotted,
    Dashed,
    None,
}

/// Everything a render pass knows about a field from the outside.
#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub label: SharedString,
    pub title: Option<SharedString>,
    pub prefix: Option<SharedString>,
    pub suffix: Option<SharedString>,
    pub placeholder: Option<SharedString>,
    pub value: Option<SharedString>,
    pub default_value: Option<SharedString>,
    pub error: Option<SharedString>,
    pub character_restriction: Option<usize>,
    pub multiline: bool,
    pub height: Option<f32>,
    pub colors: FieldColors,
    pub metrics: FieldMetrics,
    pub motion: FieldMotion,
    pub trigger: TransitionTrigger,
    pub disabled: bool,
    pub disabled_line: DisabledLineType,
    pub editable: bool,
    pub platform: Platform,
    pub runtime_version: Option<RuntimeVersion>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            label: SharedString::default(),
            title: None,
            prefix: None,
            suffix: None,
            placeholder: None,
            value: None,
            default_value: None,
            error: None,
            character_restriction: None,
            multiline: false,
            height: None,
            colors: FieldColors::default(),
            metrics: FieldMetrics::default(),
            motion: FieldMotion::default(),
            trigger: TransitionTrigger::default(),
            disabled: false,
            disabled_line: DisabledLineType::default(),
            editable: true,
            platform: Platform::current(),
            runtime_version: None,
        }
    }
}

impl FieldConfig {
    pub fn new(label: impl Into<SharedString>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn interactive(&self) -> bool {
        !self.disabled && self.editable
    }

    /// Empty error strings do not put the field in the error state.
    pub fn active_error(&self) -> Option<&str> {
        self.error
            .as_ref()
            .map(|error| error.as_ref())
            .filter(|error| !error.is_empty())
    }

    pub fn has_placeholder(&self) -> bool {
        self.placeholder
            .as_ref()
            .is_some_and(|placeholder| !placeholder.is_empty())
    }

    pub fn value_str(&self) -> Option<&str> {
        self.value.as_ref().map(|value| value.as_ref())
    }

    pub fn default_value_str(&self) -> Option<&str> {
        self.default_value.as_ref().map(|value| value.as_ref())
    }

    /// Explicit height only applies to multi-line fields.
    pub fn height_override(&self) -> Option<f32> {
        self.height.filter(|_| self.multiline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_error_is_no_error() {
        let mut config = FieldConfig::new("Name");
        config.error = Some("".into());
        assert_eq!(config.active_error(), None);
        config.error = Some("required".into());
        assert_eq!(config.active_error(), Some("required"));
    }

    #[test]
    fn disabled_or_read_only_fields_are_not_interactive() {
        let mut config = FieldConfig::new("Name");
        assert!(config.interactive());
        config.editable = false;
        assert!(!config.interactive());
        config.editable = true;
        config.disabled = true;
        assert!(!config.interactive());
    }

    #[test]
    fn height_override_needs_multiline() {
        let mut config = FieldConfig::new("Notes");
        config.height = Some(96.0);
        assert_eq!(config.height_override(), None);
        config.multiline = true;
        assert_eq!(config.height_override(), Some(96.0));
    }
}
