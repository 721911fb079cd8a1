//! [`SchemaType`]: the concrete, immutable schema the validator runs
//! against, plus the `PossibleTypes` relation abstract types expose.

use indexmap::{IndexMap, IndexSet};

use crate::ast::{OperationType, Type};
use crate::schema::meta::{DirectiveType, MetaType};

/// The set of concrete object types that satisfy an abstract (interface or
/// union) type, computed once when the schema is built.
#[derive(Debug, Clone, Default)]
pub struct PossibleTypes {
    names: IndexSet<String>,
}

impl PossibleTypes {
    pub fn contains(&self, object_name: &str) -> bool {
        self.names.contains(object_name)
    }

    pub fn intersects(&self, other: &PossibleTypes) -> bool {
        self.names.iter().any(|n| other.names.contains(n))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A schema: the full set of named types plus the three root operation
/// types and the directives in scope. Built once per `validate` caller and
/// held immutably for the lifetime of every validation that runs against
/// it; concurrent validations against the same schema are safe as long as
/// nothing mutates it in the meantime (see the crate-level concurrency
/// notes).
#[derive(Debug)]
pub struct SchemaType {
    types: IndexMap<String, MetaType>,
    possible_types: IndexMap<String, PossibleTypes>,
    query_type: String,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
    directives: IndexMap<String, DirectiveType>,
}

impl SchemaType {
    pub fn new(
        types: impl IntoIterator<Item = MetaType>,
        query_type: impl Into<String>,
        mutation_type: Option<String>,
        subscription_type: Option<String>,
        directives: impl IntoIterator<Item = DirectiveType>,
    ) -> Self {
        let types: IndexMap<String, MetaType> = types
            .into_iter()
            .map(|t| (t.name().to_owned(), t))
            .collect();

        let mut possible_types: IndexMap<String, PossibleTypes> = IndexMap::new();
        for t in types.values() {
            match t {
                MetaType::Union(u) => {
                    let set = possible_types.entry(u.name.clone()).or_default();
                    set.names.extend(u.of_types.iter().cloned());
                }
                MetaType::Object(o) => {
                    for iface in &o.interfaces {
                        possible_types
                            .entry(iface.clone())
                            .or_default()
                            .names
                            .insert(o.name.clone());
                    }
                }
                _ => {}
            }
        }

        let directives = directives
            .into_iter()
            .map(|d| (d.name.clone(), d))
            .collect();

        SchemaType {
            types,
            possible_types,
            query_type: query_type.into(),
            mutation_type,
            subscription_type,
            directives,
        }
    }

    pub fn type_by_name(&self, name: &str) -> Option<&MetaType> {
        self.types.get(name)
    }

    pub fn existing_type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn directive_by_name(&self, name: &str) -> Option<&DirectiveType> {
        self.directives.get(name)
    }

    pub fn directive_names(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(String::as_str)
    }

    pub fn root_type_name(&self, op: OperationType) -> Option<&str> {
        match op {
            OperationType::Query => Some(&self.query_type),
            OperationType::Mutation => self.mutation_type.as_deref(),
            OperationType::Subscription => self.subscription_type.as_deref(),
        }
    }

    pub fn root_type(&self, op: OperationType) -> Option<&MetaType> {
        self.root_type_name(op).and_then(|n| self.type_by_name(n))
    }

    /// The possible-types relation for an abstract type. Empty (not
    /// `None`) for a type with no known members, or for a non-abstract
    /// type.
    pub fn possible_types(&self, abstract_type_name: &str) -> PossibleTypes {
        self.possible_types
            .get(abstract_type_name)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether `maybe_subtype` can stand in for `super_type` at a
    /// particular position in a document: exact match, object/interface
    /// membership in an abstract type, or structural compatibility through
    /// list/non-null wrappers and a nullable use accepting a non-null
    /// value.
    pub fn is_subtype_of(&self, maybe_subtype: &Type, super_type: &Type) -> bool {
        match (maybe_subtype, super_type) {
            (_, Type::NonNull(super_inner)) => match maybe_subtype {
                Type::NonNull(sub_inner) => self.is_subtype_of(sub_inner, super_inner),
                _ => false,
            },
            (Type::NonNull(sub_inner), _) => self.is_subtype_of(sub_inner, super_type),
            (Type::List(sub_inner), Type::List(super_inner)) => {
                self.is_subtype_of(sub_inner, super_inner)
            }
            (Type::List(_), _) | (_, Type::List(_)) => false,
            (Type::Named(sub_name), Type::Named(super_name)) => {
                if sub_name == super_name {
                    return true;
                }
                match self.type_by_name(super_name) {
                    Some(t) if t.is_abstract() => {
                        self.possible_types(super_name).contains(sub_name)
                            || matches!(self.type_by_name(sub_name), Some(MetaType::Interface(_)))
                                && self.interface_implements(sub_name, super_name)
                    }
                    _ => false,
                }
            }
        }
    }

    fn interface_implements(&self, _iface: &str, _super_iface: &str) -> bool {
        // Interfaces implementing other interfaces is a type-system
        // concern this validator's schema contract does not model;
        // object-in-union / object-in-interface is all overlapping-fields
        // and variable-position checks ever need.
        false
    }
}
