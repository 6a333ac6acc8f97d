//! Binds executable code to a GraphQL schema without storing it in the type definitions.
//!
//! A [`CodeRegistry`] answers the two questions an executor keeps asking: which
//! [`FieldResolver`] computes a field on a given object type, and which [`TypeResolver`] picks
//! the concrete type of an interface or union value. It is immutable and assembled through a
//! [`CodeRegistryBuilder`].

mod builder;
mod config;
mod coordinate;
mod error;
mod registry;
mod resolver;
mod schema;
mod visibility;


pub use builder::CodeRegistryBuilder;
pub use config::FieldVisibilityConfig;
pub use coordinate::FieldCoordinate;
pub use error::{CodeRegistryError, FieldError};
pub use registry::{CodeRegistry, SYSTEM_FIELD_PREFIX};
pub use resolver::{
    resolver_fn, type_resolver_fn, FactoryEnvironment, FieldResolver, FieldResolverFactory, FieldResolverFactoryRef,
    FieldResolverRef, PropertyResolver, ResolverContext, TypeResolutionContext, TypeResolver, TypeResolverRef,
    TypenameTypeResolver,
};
pub use schema::{AbstractTypeDefinition, AbstractTypeKind, FieldDefinition, FieldsContainer, InterfaceDefinition, UnionDefinition};
pub use visibility::{
    BlockedFields, DefaultFieldVisibility, FieldVisibility, FieldVisibilityRef, NoIntrospectionFieldVisibility,
};
