//! Executable capabilities bound to the schema: field resolvers, their factories and type
//! resolvers. The registry stores and hands them out without looking inside.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{FieldDefinition, FieldError};

pub type FieldResolverRef = Arc<dyn FieldResolver>;
pub type FieldResolverFactoryRef = Arc<dyn FieldResolverFactory>;
pub type TypeResolverRef = Arc<dyn TypeResolver>;

/// What a field resolver sees when computing the value of a field.
#[derive(Clone, Copy)]
pub struct ResolverContext<'a> {
    parent_type_name: &'a str,
    field_name: &'a str,
    source: &'a Value,
    arguments: Option<&'a Map<String, Value>>,
}

impl<'a> ResolverContext<'a> {
    pub fn new(parent_type_name: &'a str, field_name: &'a str, source: &'a Value) -> Self {
        Self {
            parent_type_name,
            field_name,
            source,
            arguments: None,
        }
    }

    #[must_use]
    pub fn with_arguments(self, arguments: &'a Map<String, Value>) -> Self {
        Self {
            arguments: Some(arguments),
            ..self
        }
    }

    pub fn parent_type_name(&self) -> &'a str {
        self.parent_type_name
    }

    pub fn field_name(&self) -> &'a str {
        self.field_name
    }

    /// The value of the parent object, as produced by the parent field resolver.
    pub fn source(&self) -> &'a Value {
        self.source
    }

    pub fn argument(&self, name: &str) -> Option<&'a Value> {
        self.arguments.and_then(|arguments| arguments.get(name))
    }

    pub fn required_argument(&self, name: &str) -> Result<&'a Value, FieldError> {
        self.argument(name)
            .ok_or_else(|| FieldError::MissingArgument(name.to_string()))
    }
}

pub trait FieldResolver: Send + Sync {
    fn resolve(&self, ctx: &ResolverContext<'_>) -> Result<Value, FieldError>;
}

impl<F> FieldResolver for F
where
    F: Fn(&ResolverContext<'_>) -> Result<Value, FieldError> + Send + Sync,
{
    fn resolve(&self, ctx: &ResolverContext<'_>) -> Result<Value, FieldError> {
        self(ctx)
    }
}

/// Wraps a closure into a shareable field resolver.
pub fn resolver_fn<F>(f: F) -> FieldResolverRef
where
    F: Fn(&ResolverContext<'_>) -> Result<Value, FieldError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Given to a [`FieldResolverFactory`] when the engine asks for the resolver of a field.
pub struct FactoryEnvironment<'a> {
    parent_type_name: &'a str,
    field_definition: &'a dyn FieldDefinition,
}

impl<'a> FactoryEnvironment<'a> {
    pub(crate) fn new(parent_type_name: &'a str, field_definition: &'a dyn FieldDefinition) -> Self {
        Self {
            parent_type_name,
            field_definition,
        }
    }

    pub fn parent_type_name(&self) -> &'a str {
        self.parent_type_name
    }

    pub fn field_definition(&self) -> &'a dyn FieldDefinition {
        self.field_definition
    }
}

/// Produces the field resolver of a field, possibly specialised on its definition.
pub trait FieldResolverFactory: Send + Sync {
    fn resolver(&self, env: &FactoryEnvironment<'_>) -> FieldResolverRef;
}

impl<F> FieldResolverFactory for F
where
    F: Fn(&FactoryEnvironment<'_>) -> FieldResolverRef + Send + Sync,
{
    fn resolver(&self, env: &FactoryEnvironment<'_>) -> FieldResolverRef {
        self(env)
    }
}

/// Factory always handing out the same resolver.
pub(crate) struct UseResolver(pub(crate) FieldResolverRef);

impl FieldResolverFactory for UseResolver {
    fn resolver(&self, _: &FactoryEnvironment<'_>) -> FieldResolverRef {
        Arc::clone(&self.0)
    }
}

pub(crate) fn use_resolver(resolver: FieldResolverRef) -> FieldResolverFactoryRef {
    Arc::new(UseResolver(resolver))
}

/// Default field resolver: reads the member of the source object named like the field.
///
/// Anything other than an object source, or a missing member, resolves to `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyResolver {
    property_name: String,
}

impl PropertyResolver {
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
        }
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }
}

impl FieldResolver for PropertyResolver {
    fn resolve(&self, ctx: &ResolverContext<'_>) -> Result<Value, FieldError> {
        Ok(ctx
            .source()
            .get(self.property_name.as_str())
            .cloned()
            .unwrap_or(Value::Null))
    }
}

/// What a type resolver sees when choosing the concrete type of an abstract value.
#[derive(Clone, Copy)]
pub struct TypeResolutionContext<'a> {
    abstract_type_name: &'a str,
    value: &'a Value,
}

impl<'a> TypeResolutionContext<'a> {
    pub fn new(abstract_type_name: &'a str, value: &'a Value) -> Self {
        Self {
            abstract_type_name,
            value,
        }
    }

    pub fn abstract_type_name(&self) -> &'a str {
        self.abstract_type_name
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }
}

/// Picks the name of the concrete object type of a value returned for an interface or union.
///
/// `None` means the value could not be mapped to any object type.
pub trait TypeResolver: Send + Sync {
    fn resolve_type(&self, ctx: &TypeResolutionContext<'_>) -> Option<String>;
}

impl<F> TypeResolver for F
where
    F: Fn(&TypeResolutionContext<'_>) -> Option<String> + Send + Sync,
{
    fn resolve_type(&self, ctx: &TypeResolutionContext<'_>) -> Option<String> {
        self(ctx)
    }
}

pub fn type_resolver_fn<F>(f: F) -> TypeResolverRef
where
    F: Fn(&TypeResolutionContext<'_>) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Reads the concrete type from a `__typename` member of the value. Never installed implicitly,
/// schemas opt into it per abstract type.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypenameTypeResolver;

impl TypeResolver for TypenameTypeResolver {
    fn resolve_type(&self, ctx: &TypeResolutionContext<'_>) -> Option<String> {
        ctx.value()
            .get("__typename")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}
