use std::sync::Arc;

use crate::{
    error::validate_name,
    registry::Bindings,
    resolver::use_resolver,
    AbstractTypeDefinition, AbstractTypeKind, CodeRegistry, CodeRegistryError, DefaultFieldVisibility, FieldCoordinate,
    FieldDefinition, FieldResolverFactoryRef, FieldResolverRef, FieldVisibilityConfig, FieldVisibilityRef,
    FieldsContainer, InterfaceDefinition, TypeResolverRef, UnionDefinition,
};

/// Mutable staging area for a [`CodeRegistry`].
///
/// Field resolvers and system field resolvers keep their binding order. Building copies every
/// table, so the builder can keep changing without affecting registries already built from it.
pub struct CodeRegistryBuilder {
    bindings: Bindings,
    field_visibility: FieldVisibilityRef,
}

impl Default for CodeRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&CodeRegistry> for CodeRegistryBuilder {
    /// Seeds the builder with every binding of `registry`, system field resolvers included.
    /// Resolvers are shared, not cloned.
    fn from(registry: &CodeRegistry) -> Self {
        Self {
            bindings: registry.bindings().clone(),
            field_visibility: Arc::clone(registry.field_visibility()),
        }
    }
}

impl CodeRegistryBuilder {
    pub fn new() -> Self {
        Self {
            bindings: Bindings::default(),
            field_visibility: Arc::new(DefaultFieldVisibility),
        }
    }

    pub fn from_config(config: &FieldVisibilityConfig) -> Result<Self, CodeRegistryError> {
        let mut builder = Self::new();
        builder.set_field_visibility(config.to_policy()?);
        Ok(builder)
    }

    pub fn field_resolver(
        &self,
        parent_type: &(impl FieldsContainer + ?Sized),
        field: &impl FieldDefinition,
    ) -> FieldResolverRef {
        self.bindings.field_resolver(parent_type, field)
    }

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

    pub fn has_type_resolver(&self, type_name: &str) -> bool {
        self.bindings.has_type_resolver(type_name)
    }

    /// Binds `resolver` to the field, replacing any previous binding.
    pub fn set_field_resolver(&mut self, coordinate: FieldCoordinate, resolver: FieldResolverRef) -> &mut Self {
        self.set_field_resolver_factory(coordinate, use_resolver(resolver))
    }

    pub fn set_field_resolver_factory(
        &mut self,
        coordinate: FieldCoordinate,
        factory: FieldResolverFactoryRef,
    ) -> &mut Self {
        self.bindings.field_resolvers.insert(coordinate, factory);
        self
    }

    /// Binds `resolver` to the field unless it is already bound.
    pub fn set_field_resolver_if_absent(&mut self, coordinate: FieldCoordinate, resolver: FieldResolverRef) -> &mut Self {
        self.bindings
            .field_resolvers
            .entry(coordinate)
            .or_insert_with(|| use_resolver(resolver));
        self
    }

    pub fn set_field_resolver_factory_if_absent(
        &mut self,
        coordinate: FieldCoordinate,
        factory: FieldResolverFactoryRef,
    ) -> &mut Self {
        self.bindings.field_resolvers.entry(coordinate).or_insert(factory);
        self
    }

    /// Binds an introspection field resolver by field name alone, whatever type the field appears
    /// on. It takes precedence over coordinate bindings. Only `__` prefixed fields are accepted.
    pub fn set_system_field_resolver(
        &mut self,
        coordinate: &FieldCoordinate,
        resolver: FieldResolverRef,
    ) -> Result<&mut Self, CodeRegistryError> {
        if !coordinate.is_system_field() {
            return Err(CodeRegistryError::NotASystemField {
                field_name: coordinate.field_name().to_string(),
            });
        }

        self.bindings
            .system_field_resolvers
            .insert(coordinate.field_name().to_string(), use_resolver(resolver));

        Ok(self)
    }

    /// Binds every `(field name, resolver)` pair to the fields of `parent_type_name`. Nothing is
    /// bound if any coordinate is invalid.
    pub fn set_field_resolvers_for_type<N>(
        &mut self,
        parent_type_name: &str,
        resolvers: impl IntoIterator<Item = (N, FieldResolverRef)>,
    ) -> Result<&mut Self, CodeRegistryError>
    where
        N: Into<String>,
    {
        let resolvers = resolvers
            .into_iter()
            .map(|(field_name, resolver)| {
                FieldCoordinate::new(parent_type_name, field_name).map(|coordinate| (coordinate, resolver))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (coordinate, resolver) in resolvers {
            self.set_field_resolver(coordinate, resolver);
        }

        Ok(self)
    }

    /// Binds the type resolver of an interface or union, keyed by the definition's own name.
    pub fn set_type_resolver(
        &mut self,
        abstract_type: &(impl AbstractTypeDefinition + ?Sized),
        type_resolver: TypeResolverRef,
    ) -> &mut Self {
        self.bindings
            .type_resolvers
            .insert(abstract_type.name().to_string(), type_resolver);
        self
    }

    pub fn set_type_resolver_if_absent(
        &mut self,
        abstract_type: &(impl AbstractTypeDefinition + ?Sized),
        type_resolver: TypeResolverRef,
    ) -> &mut Self {
        self.bindings
            .type_resolvers
            .entry(abstract_type.name().to_string())
            .or_insert(type_resolver);
        self
    }

    pub fn set_type_resolver_by_name(
        &mut self,
        type_name: &str,
        type_resolver: TypeResolverRef,
    ) -> Result<&mut Self, CodeRegistryError> {
        let type_name = validate_name(type_name)?;
        self.bindings.type_resolvers.insert(type_name.to_string(), type_resolver);
        Ok(self)
    }

    pub fn set_field_visibility(&mut self, field_visibility: FieldVisibilityRef) -> &mut Self {
        self.field_visibility = field_visibility;
        self
    }

    /// Drops every coordinate binding. System field resolvers are kept.
    pub fn clear_field_resolvers(&mut self) -> &mut Self {
        self.bindings.field_resolvers.clear();
        self
    }

    pub fn clear_system_field_resolvers(&mut self) -> &mut Self {
        self.bindings.system_field_resolvers.clear();
        self
    }

    pub fn clear_type_resolvers(&mut self) -> &mut Self {
        self.bindings.type_resolvers.clear();
        self
    }

    pub fn build(&self) -> CodeRegistry {
        tracing::debug!(
            field_resolvers = self.bindings.field_resolvers.len(),
            system_field_resolvers = self.bindings.system_field_resolvers.len(),
            type_resolvers = self.bindings.type_resolvers.len(),
            "Building code registry"
        );

        CodeRegistry::new(self.bindings.clone(), Arc::clone(&self.field_visibility))
    }
}

