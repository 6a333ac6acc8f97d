use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CodeRegistryError, FieldDefinition, FieldsContainer};

/// Identifies a field by the name of the type owning it and its own name, `Type.field`.
///
/// Coordinates are the keys of the field resolver table. Two coordinates are equal if and only
/// if both names match exactly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldCoordinate {
    parent_type_name: String,
    field_name: String,
}

impl FieldCoordinate {
    pub fn new(parent_type_name: impl Into<String>, field_name: impl Into<String>) -> Result<Self, CodeRegistryError> {
        let parent_type_name = parent_type_name.into();
        let field_name = field_name.into();

        if parent_type_name.is_empty() {
            return Err(CodeRegistryError::EmptyCoordinateComponent {
                component: "parent type name",
            });
        }

        if field_name.is_empty() {
            return Err(CodeRegistryError::EmptyCoordinateComponent {
                component: "field name",
            });
        }

        Ok(Self {
            parent_type_name,
            field_name,
        })
    }

    /// Coordinate of a field definition inside its container. Names coming from the schema are
    /// trusted to be non-empty.
    pub fn of(parent_type: &(impl FieldsContainer + ?Sized), field: &(impl FieldDefinition + ?Sized)) -> Self {
        Self {
            parent_type_name: parent_type.name().to_string(),
            field_name: field.name().to_string(),
        }
    }

    pub fn parent_type_name(&self) -> &str {
        &self.parent_type_name
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn is_system_field(&self) -> bool {
        self.field_name.starts_with(crate::SYSTEM_FIELD_PREFIX)
    }
}

impl fmt::Display for FieldCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.parent_type_name, self.field_name)
    }
}

impl FromStr for FieldCoordinate {
    type Err = CodeRegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((parent_type_name, field_name)) = s.split_once('.') else {
            return Err(CodeRegistryError::InvalidCoordinate { input: s.to_string() });
        };

        if field_name.contains('.') {
            return Err(CodeRegistryError::InvalidCoordinate { input: s.to_string() });
        }

        Self::new(parent_type_name, field_name)
    }
}

impl TryFrom<String> for FieldCoordinate {
    type Error = CodeRegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldCoordinate> for String {
    fn from(value: FieldCoordinate) -> Self {
        value.to_string()
    }
}
