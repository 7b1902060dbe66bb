pub mod auto_grow;
pub mod control;
pub mod field_config;
pub mod field_events;
pub mod field_handle;
mod field_parts;
pub mod field_state;
pub mod field_style;
pub mod focus_state;
pub mod native_input;
mod text_field;
pub mod utils;
pub mod value_state;

#[cfg(test)]
mod test_field_logic;

pub use field_config::{DisabledLineType, FieldConfig};
pub use field_events::{EditEvents, EditListeners};
pub use field_handle::TextFieldHandle;
pub use field_state::{FieldSnapshot, FieldState, MountGuard, SettleTicket};
pub use field_style::{FieldPartStyles, FieldStyle};
pub use focus_state::{FocusSignal, FocusTarget, TransitionTrigger};
pub use native_input::{ChangeEvent, ContentSizeEvent, NativeInput, WindowInput};
pub use text_field::{FieldRef, TextField};
pub use value_state::ResolvedValue;
