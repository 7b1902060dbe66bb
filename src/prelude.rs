pub use crate::contracts::{Disableable, FieldLike, MotionAware};
pub use crate::components::{
    ChangeEvent, ContentSizeEvent, DisabledLineType, FieldConfig, FieldPartStyles, FieldRef,
    NativeInput, TextField, TextFieldHandle, TransitionTrigger,
};
pub use crate::error::{FieldError, FieldResult};
pub use crate::id::ComponentId;
pub use crate::motion::{Easing, FieldMotion};
pub use crate::platform::{Platform, RuntimeVersion};
pub use crate::tokens::{FieldColors, FieldMetrics};
