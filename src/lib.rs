//! Static validation of GraphQL query documents against a schema.
//!
//! [`validation::validate`] runs every rule the GraphQL specification's
//! "Validation" section mandates over a parsed [`ast::Document`] in one
//! traversal and returns the [`diagnostics::Diagnostic`]s it found. A
//! document can come from [`parser::parse_document`] (bundled here purely
//! so this crate and its tests have real documents to exercise) or from any
//! other front-end that produces this crate's [`ast`] types.
//!
//! ```
//! use gql_validate::schema::{self, MetaType, ObjectMeta, SchemaType, Field};
//! use gql_validate::ast::Type;
//!
//! let query_type = MetaType::Object(ObjectMeta {
//!     name: "Query".into(),
//!     fields: [(
//!         "hello".to_owned(),
//!         Field::new("hello", Type::Named("String".into())),
//!     )]
//!     .into_iter()
//!     .collect(),
//!     interfaces: Vec::new(),
//! });
//!
//! let mut types = schema::builtin_scalars();
//! types.push(query_type);
//! let schema = SchemaType::new(types, "Query", None, None, schema::builtin_directives());
//!
//! let document = gql_validate::parser::parse_document("{ hello }").unwrap();
//! let diagnostics = gql_validate::validation::validate(&schema, &document);
//! assert!(diagnostics.is_empty());
//! ```

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod schema;
pub mod span;
pub mod suggestion;
pub mod validation;

pub use diagnostics::{Diagnostic, SourceLocation};
pub use error::SetupError;
pub use validation::{validate, validate_with_rules};
