use std::{fmt, sync::Arc};

use fxhash::FxHashMap;
use indexmap::{Equivalent, IndexMap};

use crate::{
    resolver::FactoryEnvironment, AbstractTypeKind, CodeRegistryBuilder, CodeRegistryError, FieldCoordinate,
    FieldDefinition, FieldResolverFactoryRef, FieldResolverRef, FieldVisibilityRef, FieldsContainer,
    InterfaceDefinition, PropertyResolver, TypeResolverRef, UnionDefinition,
};

/// Field names starting with this prefix are reserved to introspection.
pub const SYSTEM_FIELD_PREFIX: &str = "__";

/// Borrowed form of a [`FieldCoordinate`], hashing identically so lookups don't allocate.
#[derive(Hash)]
struct CoordinateRef<'a> {
    parent_type_name: &'a str,
    field_name: &'a str,
}

impl Equivalent<FieldCoordinate> for CoordinateRef<'_> {
    fn equivalent(&self, key: &FieldCoordinate) -> bool {
        self.parent_type_name == key.parent_type_name() && self.field_name == key.field_name()
    }
}

/// The three binding tables shared in shape by the registry and its builder.
#[derive(Clone, Default)]
pub(crate) struct Bindings {
    pub(crate) field_resolvers: IndexMap<FieldCoordinate, FieldResolverFactoryRef>,
    pub(crate) system_field_resolvers: IndexMap<String, FieldResolverFactoryRef>,
    pub(crate) type_resolvers: FxHashMap<String, TypeResolverRef>,
}

impl Bindings {
    /// System overrides first, then the coordinate table, then a property resolver reading the
    /// same-named member of the source. Every field ends up with a resolver.
    pub(crate) fn field_resolver(
        &self,
        parent_type: &(impl FieldsContainer + ?Sized),
        field: &impl FieldDefinition,
    ) -> FieldResolverRef {
        let parent_type_name = parent_type.name();
        let field_name = field.name();

        let factory = self.system_field_resolvers.get(field_name).or_else(|| {
            self.field_resolvers.get(&CoordinateRef {
                parent_type_name,
                field_name,
            })
        });

        match factory {
            Some(factory) => factory.resolver(&FactoryEnvironment::new(parent_type_name, field)),
            None => {
                tracing::trace!("No resolver bound to {parent_type_name}.{field_name}, using the property resolver");
                Arc::new(PropertyResolver::new(field_name))
            }
        }
    }

    pub(crate) fn has_field_resolver(&self, coordinate: &FieldCoordinate) -> bool {
        self.system_field_resolvers.contains_key(coordinate.field_name()) || self.field_resolvers.contains_key(coordinate)
    }

    /// Registry binding first, then the resolver declared inline on the definition. There is no
    /// default: guessing the concrete type would silently corrupt responses.
    pub(crate) fn type_resolver(
        &self,
        kind: AbstractTypeKind,
        type_name: &str,
        inline_type_resolver: impl FnOnce() -> Option<TypeResolverRef>,
    ) -> Result<TypeResolverRef, CodeRegistryError> {
        if let Some(type_resolver) = self.type_resolvers.get(type_name) {
            return Ok(Arc::clone(type_resolver));
        }

        match inline_type_resolver() {
            Some(type_resolver) => {
                tracing::trace!("Using the type resolver declared inline on {kind} {type_name}");
                Ok(type_resolver)
            }
            None => Err(CodeRegistryError::MissingTypeResolver {
                kind,
                type_name: type_name.to_string(),
            }),
        }
    }

    pub(crate) fn has_type_resolver(&self, type_name: &str) -> bool {
        self.type_resolvers.contains_key(type_name)
    }
}

/// Immutable binding of executable code to a schema: the field resolvers of fields, the type
/// resolvers of abstract types and the field visibility policy.
///
/// Built through a [`CodeRegistryBuilder`], it is never mutated afterwards and can be read from
/// any number of threads. [`CodeRegistry::transform`] derives a modified copy.
#[derive(Clone)]
pub struct CodeRegistry {
    bindings: Bindings,
    field_visibility: FieldVisibilityRef,
}

impl CodeRegistry {
    pub fn builder() -> CodeRegistryBuilder {
        CodeRegistryBuilder::new()
    }

    pub(crate) fn new(bindings: Bindings, field_visibility: FieldVisibilityRef) -> Self {
        Self {
            bindings,
            field_visibility,
        }
    }

    pub(crate) fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn field_visibility(&self) -> &FieldVisibilityRef {
        &self.field_visibility
    }

    /// Resolver computing `field` on `parent_type`. Fields without an explicit binding get a
    /// [`PropertyResolver`] for their name.
    pub fn field_resolver(
        &self,
        parent_type: &(impl FieldsContainer + ?Sized),
        field: &impl FieldDefinition,
    ) -> FieldResolverRef {
        self.bindings.field_resolver(parent_type, field)
    }

    /// Whether a resolver was explicitly bound, as a system field or at this coordinate.
    pub fn has_field_resolver(&self, coordinate: &FieldCoordinate) -> bool {
        self.bindings.has_field_resolver(coordinate)
    }

    pub fn interface_type_resolver(
        &self,
        interface: &(impl InterfaceDefinition + ?Sized),
    ) -> Result<TypeResolverRef, CodeRegistryError> {
        self.bindings
            .type_resolver(AbstractTypeKind::Interface, interface.name(), || {
                interface.inline_type_resolver()
            })
    }

    pub fn union_type_resolver(&self, union: &(impl UnionDefinition + ?Sized)) -> Result<TypeResolverRef, CodeRegistryError> {
        self.bindings
            .type_resolver(AbstractTypeKind::Union, union.name(), || union.inline_type_resolver())
    }

    /// Whether the registry itself binds a type resolver to this name. Inline resolvers on type
    /// definitions are not considered.
    pub fn has_type_resolver(&self, type_name: &str) -> bool {
        self.bindings.has_type_resolver(type_name)
    }

    /// Coordinates with a bound resolver, in binding order.
    pub fn field_coordinates(&self) -> impl ExactSizeIterator<Item = &FieldCoordinate> + '_ {
        self.bindings.field_resolvers.keys()
    }

    /// Names of the system fields with a bound resolver, in binding order.
    pub fn system_field_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.bindings.system_field_resolvers.keys().map(String::as_str)
    }

    /// Names of abstract types with a bound type resolver, in no particular order.
    pub fn type_resolver_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.bindings.type_resolvers.keys().map(String::as_str)
    }

    /// Builds a new registry from a builder seeded with this one. `self` is left untouched.
    pub fn transform(&self, f: impl FnOnce(&mut CodeRegistryBuilder)) -> CodeRegistry {
        let mut builder = CodeRegistryBuilder::from(self);
        f(&mut builder);
        builder.build()
    }

    /// Same as [`CodeRegistry::transform`] for mutations that can fail.
    pub fn try_transform<E>(
        &self,
        f: impl FnOnce(&mut CodeRegistryBuilder) -> Result<(), E>,
    ) -> Result<CodeRegistry, E> {
        let mut builder = CodeRegistryBuilder::from(self);
        f(&mut builder)?;
        Ok(builder.build())
    }
}

impl Default for CodeRegistry {
    fn default() -> Self {
        CodeRegistryBuilder::new().build()
    }
}

impl fmt::Debug for CodeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut type_resolvers = self.type_resolver_names().collect::<Vec<_>>();
        type_resolvers.sort_unstable();

        f.debug_struct("CodeRegistry")
            .field(
                "field_resolvers",
                &self.field_coordinates().map(ToString::to_string).collect::<Vec<_>>(),
            )
            .field("system_field_resolvers", &self.system_field_names().collect::<Vec<_>>())
            .field("type_resolvers", &type_resolvers)
            .finish_non_exhaustive()
    }
}
