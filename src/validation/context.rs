//! [`ValidationContext`]: the state every rule shares as the driver walks a
//! single document, plus the caches that carry cross-rule shared state:
//! field-merge conflict memoization and the fields/fragment-names cache
//! `OverlappingFieldsCanBeMerged` builds while recursing through fragment
//! spreads, and the operation-name registry `UniqueOperationNames` checks
//! duplicates against.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::ast::{Definition, Document, FragmentDefinition, Value};
use crate::diagnostics::Diagnostic;
use crate::schema::{self, SchemaType};
use crate::span::{NodeId, SourcePosition, Spanning};

use super::info::{FragmentInfo, VariableInfo};

/// A single occurrence of a response key within a selection set, collected
/// while walking it for `OverlappingFieldsCanBeMerged`: the field node
/// itself, the type it was selected against, and its schema definition (if
/// the type is known and actually has a field by that name).
#[derive(Debug, Clone)]
pub struct FieldAndDef<'a> {
    pub parent_type_name: Option<&'a str>,
    pub field: &'a Spanning<crate::ast::Field>,
    pub field_def: Option<&'a schema::Field>,
}

/// The result of walking a selection set once for overlapping-fields
/// analysis: every response key mapped to its occurrences, plus the names
/// of fragments spread (transitively) within it.
#[derive(Debug, Clone, Default)]
pub struct CachedFields<'a> {
    pub fields: IndexMap<String, Vec<FieldAndDef<'a>>>,
    pub fragment_names: Vec<String>,
}

/// Keyed by a selection set's [`NodeId`], not the address of its first
/// element — a selection set that happens to start with the same field as
/// another is not the same selection set. Write-once: the first caller to
/// ask for a given id computes it, every later caller reuses that result.
#[derive(Debug, Default)]
pub struct FieldsAndFragmentNamesCache<'a> {
    entries: HashMap<NodeId, CachedFields<'a>>,
}

impl<'a> FieldsAndFragmentNamesCache<'a> {
    pub fn get_or_compute(
        &mut self,
        id: NodeId,
        compute: impl FnOnce() -> CachedFields<'a>,
    ) -> &CachedFields<'a> {
        self.entries.entry(id).or_insert_with(compute)
    }
}

/// Memoizes which fragment-name pairs `OverlappingFieldsCanBeMerged` has
/// already compared. A pair checked while assumed mutually exclusive is a
/// weaker claim than one checked while assumed not mutually exclusive, so
/// the cache can't always answer a stricter re-query from a looser entry —
/// see [`ConflictFragmentPairSet::has_already_checked`].
#[derive(Debug, Default)]
pub struct ConflictFragmentPairSet {
    pairs: HashMap<(String, String), bool>,
}

impl ConflictFragmentPairSet {
    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_owned(), b.to_owned())
        } else {
            (b.to_owned(), a.to_owned())
        }
    }

    pub fn has_already_checked(&self, a: &str, b: &str, are_mutually_exclusive: bool) -> bool {
        match self.pairs.get(&Self::key(a, b)) {
            None => false,
            Some(&cached_as_exclusive) => {
                if are_mutually_exclusive {
                    true
                } else {
                    !cached_as_exclusive
                }
            }
        }
    }

    pub fn mark_checked(&mut self, a: &str, b: &str, are_mutually_exclusive: bool) {
        self.pairs.insert(Self::key(a, b), are_mutually_exclusive);
    }
}

/// Everything a rule can read or update while a document is being walked.
/// Built once per `validate` call and dropped at the end of it; nothing
/// here outlives a single validation run.
pub struct ValidationContext<'a> {
    schema: &'a SchemaType,
    document: &'a Document,
    fragment_definitions: IndexMap<&'a str, &'a Spanning<FragmentDefinition>>,
    diagnostics: Vec<Diagnostic>,
    variable_infos: IndexMap<String, VariableInfo>,
    fragment_infos: HashMap<String, FragmentInfo>,
    known_operation_names: HashMap<String, &'a Spanning<String>>,
    pub fragment_pair_set: ConflictFragmentPairSet,
    pub fields_and_fragment_names_cache: FieldsAndFragmentNamesCache<'a>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(schema: &'a SchemaType, document: &'a Document) -> Self {
        let mut fragment_definitions = IndexMap::new();
        let mut fragment_infos = HashMap::new();
        for def in document {
            if let Definition::Fragment(frag) = def {
                // First-wins: a duplicate name is `UniqueFragmentNames`'s
                // diagnostic to raise, not a reason to lose the first
                // definition every other rule should resolve spreads to.
                fragment_definitions
                    .entry(frag.item.name.item.as_str())
                    .or_insert(frag);
                fragment_infos
                    .entry(frag.item.name.item.clone())
                    .or_insert_with(FragmentInfo::default);
            }
        }

        ValidationContext {
            schema,
            document,
            fragment_definitions,
            diagnostics: Vec::new(),
            variable_infos: IndexMap::new(),
            fragment_infos,
            known_operation_names: HashMap::new(),
            fragment_pair_set: ConflictFragmentPairSet::default(),
            fields_and_fragment_names_cache: FieldsAndFragmentNamesCache::default(),
        }
    }

    pub fn schema(&self) -> &'a SchemaType {
        self.schema
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn fragment_definition(&self, name: &str) -> Option<&'a Spanning<FragmentDefinition>> {
        self.fragment_definitions.get(name).copied()
    }

    pub fn fragment_names(&self) -> impl Iterator<Item = &str> {
        self.fragment_definitions.keys().copied()
    }

    pub fn report(&mut self, message: impl Into<String>, locations: Vec<SourcePosition>) {
        let locations = locations.into_iter().map(Into::into).collect();
        self.diagnostics.push(Diagnostic::new(message, locations));
    }

    pub fn report_with_cause(
        &mut self,
        message: impl Into<String>,
        locations: Vec<SourcePosition>,
        cause: impl std::fmt::Display,
    ) {
        let locations = locations.into_iter().map(Into::into).collect();
        self.diagnostics
            .push(Diagnostic::new(message, locations).with_cause(cause));
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Resets per-operation variable bookkeeping; called by the driver
    /// before it walks each operation, since variable scope never crosses
    /// an operation boundary.
    pub fn reset_variables(&mut self) {
        self.variable_infos.clear();
    }

    pub fn declare_variable(&mut self, name: String, info: VariableInfo) {
        self.variable_infos.insert(name, info);
    }

    pub fn variable_info(&self, name: &str) -> Option<&VariableInfo> {
        self.variable_infos.get(name)
    }

    pub fn variable_infos(&self) -> impl Iterator<Item = (&str, &VariableInfo)> {
        self.variable_infos.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Marks `$name` as used; a no-op if the document never declared it
    /// (that's `NoUndefinedVariables`'s diagnostic to raise, not a panic
    /// here).
    pub fn mark_variable_used(&mut self, name: &str) {
        if let Some(info) = self.variable_infos.get_mut(name) {
            info.used = true;
        }
    }

    pub fn mark_fragment_used(&mut self, name: &str) {
        self.fragment_infos.entry(name.to_owned()).or_default().used = true;
    }

    pub fn fragment_used(&self, name: &str) -> bool {
        self.fragment_infos.get(name).is_some_or(|i| i.used)
    }

    /// Registers `name` as a defined operation name, returning the `Name`
    /// node it was first defined at if this is a repeat. Used only by
    /// `UniqueOperationNames`.
    pub fn declare_operation_name(&mut self, name: &'a Spanning<String>) -> Option<&'a Spanning<String>> {
        self.known_operation_names.insert(name.item.clone(), name)
    }

    /// Every `Value::Variable` reachable from a literal value tree, used to
    /// link a default value's own variable-freedom requirement and by
    /// `ValuesOfCorrectType`'s traversal into list/object literals.
    pub fn walk_literal_variables(value: &Value, found: &mut Vec<String>) {
        match value {
            Value::Variable(name) => found.push(name.clone()),
            Value::List(items) => {
                for item in items {
                    Self::walk_literal_variables(&item.item, found);
                }
            }
            Value::Object(fields) => {
                for (_, v) in fields {
                    Self::walk_literal_variables(&v.item, found);
                }
            }
            _ => {}
        }
    }
}
