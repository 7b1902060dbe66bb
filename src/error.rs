use thiserror::Error;

/// Faults raised while touching the keyed field state store.
///
/// None of these cross the widget boundary: the component logs them and
/// degrades to a no-op.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum FieldError {
    #[error("field state lock poisoned while {0}")]
    StatePoisoned(&'static str),

    #[error("no mounted field with id `{0}`")]
    UnknownField(String),
}

pub type FieldResult<T> = Result<T, FieldError>;
