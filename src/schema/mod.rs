//! The schema contract the validator consumes.
//!
//! Everything here is read-only once built: type lookup, a type's fields,
//! the `possible_types` relation for abstract types, directive lookup, the
//! subtype relation, and built-in scalar literal coercion. Schema
//! *construction* — resolvers, derive macros, introspection — is out of
//! scope for this crate; [`model::SchemaType`] is a plain data structure a
//! caller assembles directly.

pub mod meta;
pub mod model;

pub use meta::{
    Argument, CoercionError, DirectiveLocation, DirectiveType, EnumMeta, Field, InputField,
    InputObjectMeta, InterfaceMeta, MetaType, ObjectMeta, ScalarMeta, UnionMeta,
};
pub use model::{PossibleTypes, SchemaType};

/// The two directives the GraphQL spec itself defines; every schema this
/// validator runs against is expected to include them (most rule tests
/// build them in via this helper rather than hand-rolling the definitions).
pub fn builtin_directives() -> Vec<DirectiveType> {
    use crate::ast::Type;

    vec![
        DirectiveType::new(
            "skip",
            vec![
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
        )
        .argument(Argument::new(
            "if",
            Type::NonNull(Box::new(Type::Named("Boolean".into()))),
        )),
        DirectiveType::new(
            "include",
            vec![
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
        )
        .argument(Argument::new(
            "if",
            Type::NonNull(Box::new(Type::Named("Boolean".into()))),
        )),
    ]
}

/// The built-in scalar types (`Int`, `Float`, `String`, `Boolean`, `ID`)
/// every schema is expected to carry.
pub fn builtin_scalars() -> Vec<MetaType> {
    vec![
        MetaType::Scalar(ScalarMeta::int()),
        MetaType::Scalar(ScalarMeta::float()),
        MetaType::Scalar(ScalarMeta::string()),
        MetaType::Scalar(ScalarMeta::boolean()),
        MetaType::Scalar(ScalarMeta::id()),
    ]
}
