use crate::AbstractTypeKind;

#[derive(thiserror::Error, Debug)]
pub enum CodeRegistryError {
    #[error("A field coordinate requires a non-empty {component}")]
    EmptyCoordinateComponent { component: &'static str },
    #[error("'{name}' is not a valid GraphQL name")]
    InvalidName { name: String },
    #[error("'{input}' is not a valid field coordinate, expected 'Type.field'")]
    InvalidCoordinate { input: String },
    #[error("Only __ system fields can be bound as system resolvers, got '{field_name}'")]
    NotASystemField { field_name: String },
    #[error("There must be a type resolver for {kind} {type_name}")]
    MissingTypeResolver { kind: AbstractTypeKind, type_name: String },
    #[error("Invalid blocked field pattern: {0}")]
    InvalidBlockedFieldPattern(#[from] regex::Error),
}

/// Error returned by a field resolver when it cannot produce a value.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("{0}")]
    Message(String),
    #[error("Missing required argument '{0}'")]
    MissingArgument(String),
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// GraphQL names follow `[_A-Za-z][_0-9A-Za-z]*`.
pub(crate) fn validate_name(name: &str) -> Result<&str, CodeRegistryError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first == '_' || first.is_ascii_alphabetic()) && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        None => false,
    };

    if valid {
        Ok(name)
    } else {
        Err(CodeRegistryError::InvalidName { name: name.to_string() })
    }
}
