use std::sync::Arc;

use crate::{
    BlockedFields, CodeRegistryError, DefaultFieldVisibility, FieldVisibilityRef, NoIntrospectionFieldVisibility,
};

/// Declarative field visibility, typically read from the gateway configuration:
///
/// ```toml
/// introspection = false
/// blocked_fields = ["User\\.password", "Internal\\..*"]
/// ```
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldVisibilityConfig {
    pub introspection: bool,
    /// Regular expressions matched against whole `Type.field` coordinates.
    pub blocked_fields: Vec<String>,
}

impl Default for FieldVisibilityConfig {
    fn default() -> Self {
        Self {
            introspection: true,
            blocked_fields: Vec::new(),
        }
    }
}

impl FieldVisibilityConfig {
    pub fn to_policy(&self) -> Result<FieldVisibilityRef, CodeRegistryError> {
        if self.blocked_fields.is_empty() {
            return Ok(if self.introspection {
                Arc::new(DefaultFieldVisibility)
            } else {
                Arc::new(NoIntrospectionFieldVisibility)
            });
        }

        let blocked = BlockedFields::new()
            .add_patterns(self.blocked_fields.iter().map(String::as_str))?
            .block_introspection(!self.introspection);

        Ok(Arc::new(blocked))
    }
}

#[cfg(test)]
mod tests {
    use super::FieldVisibilityConfig;
    use crate::CodeRegistryError;

    #[test]
    fn defaults() {
        let config: FieldVisibilityConfig = toml::from_str("").unwrap();

        assert_eq!(config, FieldVisibilityConfig::default());
        assert!(config.introspection);

        let policy = config.to_policy().unwrap();
        assert!(policy.is_field_visible("Query", "__schema"));
    }

    #[test]
    fn introspection_disabled() {
        let config: FieldVisibilityConfig = toml::from_str("introspection = false").unwrap();
        let policy = config.to_policy().unwrap();

        assert!(!policy.is_field_visible("Query", "__schema"));
        assert!(policy.is_field_visible("Query", "__typename"));
    }

    #[test]
    fn blocked_fields() {
        let config: FieldVisibilityConfig = toml::from_str(
            r#"
            blocked_fields = ["User\\.password", "Internal\\..*"]
            "#,
        )
        .unwrap();
        let policy = config.to_policy().unwrap();

        assert!(!policy.is_field_visible("User", "password"));
        assert!(!policy.is_field_visible("Internal", "anything"));
        assert!(policy.is_field_visible("User", "name"));
        assert!(policy.is_field_visible("Query", "__schema"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = toml::from_str::<FieldVisibilityConfig>("introspectoin = false");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_pattern() {
        let config = FieldVisibilityConfig {
            blocked_fields: vec!["(".to_string()],
            ..Default::default()
        };

        let err = config.to_policy().err().unwrap();
        assert!(matches!(err, CodeRegistryError::InvalidBlockedFieldPattern(_)));
    }
}
