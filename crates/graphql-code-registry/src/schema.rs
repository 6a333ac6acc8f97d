//! The parts of the schema type graph the registry needs to see.
//!
//! The registry never owns schema types. It only reads their names and, for abstract types, the
//! optional type resolver declared inline on the definition.

use std::fmt;

use crate::TypeResolverRef;

/// An object or interface type declaring fields.
pub trait FieldsContainer {
    fn name(&self) -> &str;
}

pub trait FieldDefinition {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbstractTypeKind {
    Interface,
    Union,
}

impl fmt::Display for AbstractTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbstractTypeKind::Interface => f.write_str("interface"),
            AbstractTypeKind::Union => f.write_str("union"),
        }
    }
}

/// An interface or union type, whose runtime values need a type resolver to pick their concrete
/// object type.
pub trait AbstractTypeDefinition {
    fn name(&self) -> &str;

    /// Legacy type resolver declared on the definition itself.
    ///
    /// Only consulted when the registry holds no binding for this type name.
    fn inline_type_resolver(&self) -> Option<TypeResolverRef> {
        None
    }
}

pub trait InterfaceDefinition: AbstractTypeDefinition {}

pub trait UnionDefinition: AbstractTypeDefinition {}
