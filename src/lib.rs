pub mod components;
pub mod contracts;
pub mod error;
pub mod id;
pub mod motion;
pub mod platform;
pub mod prelude;
pub mod tokens;

pub use components::*;
pub use error::{FieldError, FieldResult};
