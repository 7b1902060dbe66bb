use crate::motion::FieldMotion;
use gpui::SharedString;

pub trait Disableable: Sized {
    fn disabled(self, value: bool) -> Self;
}

#[macro_export]
macro_rules! impl_disableable {
    ($type:ty) => {
        impl $crate::contracts::Disableable for $type {
            fn disabled(self, value: bool) -> Self {
                <$type>::disabled(self, value)
            }
        }
    };
}

/// Labelled input with helper text underneath.
pub trait FieldLike: Sized {
    fn label(self, value: impl Into<SharedString>) -> Self;
    fn title(self, value: impl Into<SharedString>) -> Self;
    fn error(self, value: impl Into<SharedString>) -> Self;
    fn clear_error(self) -> Self;

    fn error_if(self, message: Option<impl Into<SharedString>>) -> Self {
        match message {
            Some(message) => self.error(message),
            None => self.clear_error(),
        }
    }
}

pub trait MotionAware: Sized {
    fn motion(self, value: FieldMotion) -> Self;
}
