//! Field visibility policies.
//!
//! The registry carries exactly one policy and hands it back untouched, enforcing it is up to
//! introspection and execution.

use std::sync::Arc;

use regex::Regex;

use crate::{CodeRegistryError, SYSTEM_FIELD_PREFIX};

pub type FieldVisibilityRef = Arc<dyn FieldVisibility>;

/// Decides whether a field can be observed by introspection and execution.
pub trait FieldVisibility: Send + Sync {
    fn is_field_visible(&self, parent_type_name: &str, field_name: &str) -> bool;
}

/// Every field is visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFieldVisibility;

impl FieldVisibility for DefaultFieldVisibility {
    fn is_field_visible(&self, _parent_type_name: &str, _field_name: &str) -> bool {
        true
    }
}

const INTROSPECTION_ENTRY_POINTS: [&str; 2] = ["__schema", "__type"];

/// Hides the introspection entry points, `__schema` and `__type`. `__typename` stays visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIntrospectionFieldVisibility;

impl FieldVisibility for NoIntrospectionFieldVisibility {
    fn is_field_visible(&self, _parent_type_name: &str, field_name: &str) -> bool {
        !INTROSPECTION_ENTRY_POINTS.contains(&field_name)
    }
}

/// Hides every field whose `Type.field` coordinate fully matches one of the patterns.
///
/// Patterns never hide system fields, unless introspection is blocked as a whole.
#[derive(Debug, Clone, Default)]
pub struct BlockedFields {
    patterns: Vec<Regex>,
    block_introspection: bool,
}

impl BlockedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pattern(mut self, pattern: &str) -> Result<Self, CodeRegistryError> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        self.patterns.push(regex);
        Ok(self)
    }

    pub fn add_patterns<'a>(self, patterns: impl IntoIterator<Item = &'a str>) -> Result<Self, CodeRegistryError> {
        patterns
            .into_iter()
            .try_fold(self, |blocked, pattern| blocked.add_pattern(pattern))
    }

    #[must_use]
    pub fn block_introspection(mut self, block: bool) -> Self {
        self.block_introspection = block;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && !self.block_introspection
    }
}

impl FieldVisibility for BlockedFields {
    fn is_field_visible(&self, parent_type_name: &str, field_name: &str) -> bool {
        if field_name.starts_with(SYSTEM_FIELD_PREFIX) {
            return !(self.block_introspection && INTROSPECTION_ENTRY_POINTS.contains(&field_name));
        }

        let coordinate = format!("{parent_type_name}.{field_name}");
        !self.patterns.iter().any(|pattern| pattern.is_match(&coordinate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_introspection_keeps_typename() {
        let policy = NoIntrospectionFieldVisibility;

        assert!(!policy.is_field_visible("Query", "__schema"));
        assert!(!policy.is_field_visible("Query", "__type"));
        assert!(policy.is_field_visible("User", "__typename"));
        assert!(policy.is_field_visible("User", "name"));
    }

    #[test]
    fn blocked_fields_match_whole_coordinates() {
        let policy = BlockedFields::new()
            .add_patterns([r"User\.password", r"Internal\..*"])
            .unwrap();

        assert!(!policy.is_field_visible("User", "password"));
        assert!(policy.is_field_visible("User", "passwordHint"));
        assert!(policy.is_field_visible("SuperUser", "password"));
        assert!(!policy.is_field_visible("Internal", "secret"));
        assert!(policy.is_field_visible("Query", "__schema"));
    }

    #[test]
    fn blocked_fields_never_hide_system_fields_by_pattern() {
        let policy = BlockedFields::new().add_pattern(".*").unwrap();

        assert!(!policy.is_field_visible("User", "name"));
        assert!(policy.is_field_visible("Query", "__schema"));

        let policy = policy.block_introspection(true);
        assert!(!policy.is_field_visible("Query", "__schema"));
        assert!(policy.is_field_visible("User", "__typename"));
    }

    #[test]
    fn invalid_pattern() {
        let err = BlockedFields::new().add_pattern("User.(").unwrap_err();
        assert!(matches!(err, CodeRegistryError::InvalidBlockedFieldPattern(_)));
    }
}
