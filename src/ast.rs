//! The query-document AST.
//!
//! This module is the contract the core consumes from "the parser": every
//! type here carries a [`Spanning`] wrapper (source span + stable
//! [`NodeId`]), and the shapes mirror the GraphQL grammar section on
//! executable documents. The validator borrows these trees; it never
//! constructs or mutates them.

use crate::span::{NodeId, Span, Spanning};

/// A parsed GraphQL document: an ordered sequence of operation and fragment
/// definitions.
pub type Document = Vec<Definition>;

#[derive(Debug, Clone)]
pub enum Definition {
    Operation(Spanning<OperationDefinition>),
    Fragment(Spanning<FragmentDefinition>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OperationDefinition {
    pub operation_type: OperationType,
    pub name: Option<Spanning<String>>,
    pub variable_definitions: Vec<Spanning<VariableDefinition>>,
    pub directives: Vec<Spanning<Directive>>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone)]
pub struct FragmentDefinition {
    pub name: Spanning<String>,
    pub type_condition: Spanning<String>,
    pub directives: Vec<Spanning<Directive>>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone)]
pub struct VariableDefinition {
    pub name: Spanning<String>,
    pub var_type: Spanning<Type>,
    pub default_value: Option<Spanning<Value>>,
}

/// A list of selections, carrying its own [`NodeId`] so rules and the
/// overlapping-fields cache can key off its identity rather than the
/// address of its first element.
#[derive(Debug, Clone)]
pub struct SelectionSet {
    pub id: NodeId,
    pub span: Span,
    pub selections: Vec<Selection>,
}

#[derive(Debug, Clone)]
pub enum Selection {
    Field(Spanning<Field>),
    InlineFragment(Spanning<InlineFragment>),
    FragmentSpread(Spanning<FragmentSpread>),
}

impl Selection {
    pub fn directives(&self) -> &[Spanning<Directive>] {
        match self {
            Selection::Field(f) => &f.item.directives,
            Selection::InlineFragment(f) => &f.item.directives,
            Selection::FragmentSpread(f) => &f.item.directives,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub alias: Option<Spanning<String>>,
    pub name: Spanning<String>,
    pub arguments: Vec<Spanning<Argument>>,
    pub directives: Vec<Spanning<Directive>>,
    pub selection_set: Option<SelectionSet>,
}

impl Field {
    /// The key this field occupies in the response object: its alias, or
    /// its name if it has none.
    pub fn response_key(&self) -> &str {
        self.alias
            .as_ref()
            .map(|a| a.item.as_str())
            .unwrap_or(self.name.item.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct InlineFragment {
    pub type_condition: Option<Spanning<String>>,
    pub directives: Vec<Spanning<Directive>>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone)]
pub struct FragmentSpread {
    pub name: Spanning<String>,
    pub directives: Vec<Spanning<Directive>>,
}

#[derive(Debug, Clone)]
pub struct Argument {
    pub name: Spanning<String>,
    pub value: Spanning<Value>,
}

#[derive(Debug, Clone)]
pub struct Directive {
    pub name: Spanning<String>,
    pub arguments: Vec<Spanning<Argument>>,
}

/// A named-type reference with its wrapping list/non-null modifiers, as it
/// appears syntactically (`Int`, `[Int!]`, `[[String]]!`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Named(String),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    /// The name at the bottom of the wrapper stack.
    pub fn innermost_name(&self) -> &str {
        match self {
            Type::Named(name) => name,
            Type::List(inner) | Type::NonNull(inner) => inner.innermost_name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Type::NonNull(_))
    }

    /// The type with one non-null wrapper stripped, if present.
    pub fn nullable_inner(&self) -> &Type {
        match self {
            Type::NonNull(inner) => inner,
            other => other,
        }
    }

    pub fn list_element(&self) -> Option<&Type> {
        match self {
            Type::List(inner) => Some(inner),
            Type::NonNull(inner) => inner.list_element(),
            Type::Named(_) => None,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Named(name) => write!(f, "{name}"),
            Type::List(inner) => write!(f, "[{inner}]"),
            Type::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// A literal value as written in the document: either a constant or a
/// variable reference (`$x`).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Enum(String),
    Variable(String),
    List(Vec<Spanning<Value>>),
    Object(Vec<(Spanning<String>, Spanning<Value>)>),
}

impl Value {
    /// Structural equality used by Overlapping-Fields-Can-Be-Merged to
    /// compare argument literals; variables compare equal by name only.
    pub fn literal_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Variable(a), Value::Variable(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| x.item.literal_eq(&y.item))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| {
                        b.iter()
                            .any(|(k2, v2)| k.item == k2.item && v.item.literal_eq(&v2.item))
                    })
            }
            _ => false,
        }
    }
}
