use crate::screen::Role;
use thiserror::Error as DError;

#[derive(Debug, Clone, PartialEq, Eq, DError)]
pub enum ErrorKind {
    #[error("Couldn't find a {0} named '{1}'")]
    ElementNotFound(Role, String),

    #[error("Found {2} elements of kind {0} named '{1}', be more specific")]
    AmbiguousElement(Role, String, usize),

    #[error("'{1}' is not an option of '{0}'")]
    InvalidOption(String, String),

    #[error("Unknown path '{0}'")]
    UnknownPath(String),

    #[error("{0} is required")]
    MissingField(String),

    #[error("Field '{0}' doesn't take this kind of value")]
    FieldType(String),

    #[error("Failed to cast to some value ({0})")]
    ValueConvert(String),

    #[error("Couldn't cast value to {0}")]
    CastingValue(&'static str),
}
