use std::fmt::{Display, Formatter};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::ops::Deref;
use std::panic::Location;

use gpui::{ElementId, SharedString};

/// Id derived from the caller's source location, so a field keeps its
/// state across renders without an explicit id.
#[track_caller]
pub fn callsite_id(prefix: &str) -> String {
    let mut hasher = DefaultHasher::new();
    (prefix, Location::caller()).hash(&mut hasher);
    format!("{prefix}-{:016x}", hasher.finish())
}

/// Key of a field inside the state store and the element tree.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ComponentId(SharedString);

impl ComponentId {
    #[track_caller]
    pub fn auto(prefix: &str) -> Self {
        Self(callsite_id(prefix).into())
    }

    pub fn slot(&self, slot: &str) -> SharedString {
        format!("{}::{slot}", self.0).into()
    }
}

impl Default for ComponentId {
    #[track_caller]
    fn default() -> Self {
        Self::auto("text-field")
    }
}

impl Deref for ComponentId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self(SharedString::from(value.to_string()))
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<SharedString> for ComponentId {
    fn from(value: SharedString) -> Self {
        Self(value)
    }
}

impl From<ComponentId> for ElementId {
    fn from(value: ComponentId) -> Self {
        ElementId::Name(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call_once() -> String {
        callsite_id("text-field")
    }

    #[test]
    fn auto_id_is_stable_for_same_callsite() {
        let ids = (0..3).map(|_| call_once()).collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
        assert!(ids[0].starts_with("text-field-"));
    }

    #[test]
    fn auto_ids_differ_between_callsites() {
        let first = ComponentId::auto("text-field");
        let second = ComponentId::auto("text-field");
        assert_ne!(first, second);
    }

    #[test]
    fn slot_keys_are_scoped_by_field() {
        let id = ComponentId::from("email");
        assert_eq!(id.slot("input").as_ref(), "email::input");
        assert_eq!(&*id, "email");
    }
}
