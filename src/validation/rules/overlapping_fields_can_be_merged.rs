//! Two fields that would occupy the same response key must be mergeable:
//! same underlying field, same arguments, compatible return types, and (if
//! both have sub-selections) recursively mergeable sub-selections.
//!
//! This is the one rule whose cost is genuinely quadratic in a selection
//! set's field count and its fragment-spread fan-out, so it leans hard on
//! the two caches [`ValidationContext`] carries for it:
//! `fields_and_fragment_names_cache` memoizes "every field at this response
//! key, and every fragment name reachable from this selection set" per
//! selection-set id, and `fragment_pair_set` memoizes which fragment-name
//! pairs have already been compared so spreading the same two fragments at
//! a hundred different call sites costs one comparison, not a hundred.
//!
//! The comparison logic itself is free functions, not methods on the rule:
//! `ctx.schema()`/`ctx.fragment_definition()` borrow `ctx` immutably while
//! `ctx.fields_and_fragment_names_cache`/`ctx.fragment_pair_set` need a
//! mutable borrow of their own field — so everything these functions need
//! from `ctx` (the schema, a `name -> fragment definition` map) is resolved
//! up front in `enter_selection_set`, before the cache borrows start, and
//! diagnostics are reported only after they end.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::ast::{Field, FragmentDefinition, Selection, SelectionSet, Type, Value};
use crate::schema::{MetaType, SchemaType};
use crate::span::{SourcePosition, Spanning};
use crate::validation::action::NextCheckAction;
use crate::validation::context::{CachedFields, ConflictFragmentPairSet, FieldAndDef, FieldsAndFragmentNamesCache, ValidationContext};
use crate::validation::rule::Rule;

#[derive(Debug, Default)]
pub struct OverlappingFieldsCanBeMerged;

impl<'a> Rule<'a> for OverlappingFieldsCanBeMerged {
    fn name(&self) -> &'static str {
        "OverlappingFieldsCanBeMerged"
    }

    fn enter_selection_set(
        &mut self,
        set: &'a SelectionSet,
        parent_type: Option<&'a MetaType>,
        ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("overlapping_fields_can_be_merged", selection_count = set.selections.len()).entered();

        let schema = ctx.schema();
        let fragment_map: HashMap<&'a str, &'a Spanning<FragmentDefinition>> = ctx
            .document()
            .iter()
            .filter_map(|def| match def {
                crate::ast::Definition::Fragment(frag) => Some((frag.item.name.item.as_str(), frag)),
                _ => None,
            })
            .collect();

        let conflicts = find_conflicts_within_selection_set(
            schema,
            &fragment_map,
            &mut ctx.fields_and_fragment_names_cache,
            &mut ctx.fragment_pair_set,
            set,
            parent_type,
        );

        for conflict in conflicts {
            let message = format!(
                "Fields \"{}\" conflict because {}. Use different aliases on the fields to fetch both if this was intentional",
                conflict.response_key,
                render_reason(&conflict.reason)
            );
            let mut locations = conflict.positions1;
            locations.extend(conflict.positions2);
            ctx.report(message, locations);
        }

        NextCheckAction::Continue
    }
}

/// A reported (or nested) reason two fields conflict.
enum ConflictReason {
    Message(String),
    Nested(Vec<(String, ConflictReason)>),
}

fn render_reason(reason: &ConflictReason) -> String {
    match reason {
        ConflictReason::Message(m) => m.clone(),
        ConflictReason::Nested(subs) => subs
            .iter()
            .map(|(key, r)| format!("subfields \"{key}\" conflict because {}", render_reason(r)))
            .collect::<Vec<_>>()
            .join(" and "),
    }
}

struct FoundConflict {
    response_key: String,
    reason: ConflictReason,
    positions1: Vec<SourcePosition>,
    positions2: Vec<SourcePosition>,
}

type FragmentMap<'a> = HashMap<&'a str, &'a Spanning<FragmentDefinition>>;

fn find_conflicts_within_selection_set<'a>(
    schema: &'a SchemaType,
    fragment_map: &FragmentMap<'a>,
    cache: &mut FieldsAndFragmentNamesCache<'a>,
    pair_set: &mut ConflictFragmentPairSet,
    set: &'a SelectionSet,
    parent_type: Option<&'a MetaType>,
) -> Vec<FoundConflict> {
    let cached = cached_fields_and_fragment_names(schema, fragment_map, cache, set, parent_type);
    let mut conflicts = Vec::new();

    collect_conflicts_within(schema, fragment_map, cache, pair_set, &mut conflicts, &cached.fields);

    for (i, frag_name) in cached.fragment_names.iter().enumerate() {
        collect_conflicts_between_fields_and_fragment(
            schema,
            fragment_map,
            cache,
            pair_set,
            &mut conflicts,
            &cached.fields,
            frag_name,
            false,
        );
        for other_frag_name in &cached.fragment_names[i + 1..] {
            collect_conflicts_between_fragments(
                schema,
                fragment_map,
                cache,
                pair_set,
                &mut conflicts,
                frag_name,
                other_frag_name,
                false,
            );
        }
    }

    conflicts
}

fn cached_fields_and_fragment_names<'a>(
    schema: &'a SchemaType,
    fragment_map: &FragmentMap<'a>,
    cache: &mut FieldsAndFragmentNamesCache<'a>,
    set: &'a SelectionSet,
    parent_type: Option<&'a MetaType>,
) -> CachedFields<'a> {
    cache
        .get_or_compute(set.id, || collect_fields_and_fragment_names(schema, fragment_map, set, parent_type))
        .clone()
}

fn collect_fields_and_fragment_names<'a>(
    schema: &'a SchemaType,
    fragment_map: &FragmentMap<'a>,
    set: &'a SelectionSet,
    parent_type: Option<&'a MetaType>,
) -> CachedFields<'a> {
    let mut fields: IndexMap<String, Vec<FieldAndDef<'a>>> = IndexMap::new();
    let mut fragment_names = Vec::new();
    collect_fields_and_fragment_names_inner(schema, fragment_map, set, parent_type, &mut fields, &mut fragment_names);
    CachedFields { fields, fragment_names }
}

fn collect_fields_and_fragment_names_inner<'a>(
    schema: &'a SchemaType,
    fragment_map: &FragmentMap<'a>,
    set: &'a SelectionSet,
    parent_type: Option<&'a MetaType>,
    fields: &mut IndexMap<String, Vec<FieldAndDef<'a>>>,
    fragment_names: &mut Vec<String>,
) {
    for selection in &set.selections {
        match selection {
            Selection::Field(field) => {
                let field_def = parent_type.and_then(|t| t.field_by_name(&field.item.name.item));
                fields
                    .entry(field.item.response_key().to_owned())
                    .or_default()
                    .push(FieldAndDef {
                        parent_type_name: parent_type.map(MetaType::name),
                        field,
                        field_def,
                    });
            }
            Selection::FragmentSpread(spread) => {
                let name = spread.item.name.item.clone();
                if !fragment_names.contains(&name) {
                    fragment_names.push(name);
                }
            }
            Selection::InlineFragment(frag) => {
                let frag_type = frag
                    .item
                    .type_condition
                    .as_ref()
                    .and_then(|tc| schema.type_by_name(&tc.item))
                    .or(parent_type);
                collect_fields_and_fragment_names_inner(schema, fragment_map, &frag.item.selection_set, frag_type, fields, fragment_names);
            }
        }
    }
}

/// Every field and transitively-reachable fragment name for `frag_name`,
/// resolved through the fragment's own selection set.
fn referenced_fields_and_fragment_names<'a>(
    schema: &'a SchemaType,
    fragment_map: &FragmentMap<'a>,
    cache: &mut FieldsAndFragmentNamesCache<'a>,
    frag_name: &str,
) -> Option<CachedFields<'a>> {
    let frag_def = *fragment_map.get(frag_name)?;
    let frag_type = schema.type_by_name(&frag_def.item.type_condition.item);
    Some(cached_fields_and_fragment_names(schema, fragment_map, cache, &frag_def.item.selection_set, frag_type))
}

fn collect_conflicts_between_fragments<'a>(
    schema: &'a SchemaType,
    fragment_map: &FragmentMap<'a>,
    cache: &mut FieldsAndFragmentNamesCache<'a>,
    pair_set: &mut ConflictFragmentPairSet,
    conflicts: &mut Vec<FoundConflict>,
    frag_name1: &str,
    frag_name2: &str,
    are_mutually_exclusive: bool,
) {
    if frag_name1 == frag_name2 {
        return;
    }
    if pair_set.has_already_checked(frag_name1, frag_name2, are_mutually_exclusive) {
        return;
    }
    pair_set.mark_checked(frag_name1, frag_name2, are_mutually_exclusive);

    let Some(cached1) = referenced_fields_and_fragment_names(schema, fragment_map, cache, frag_name1) else {
        return;
    };
    let Some(cached2) = referenced_fields_and_fragment_names(schema, fragment_map, cache, frag_name2) else {
        return;
    };

    collect_conflicts_between(schema, fragment_map, cache, pair_set, conflicts, are_mutually_exclusive, &cached1.fields, &cached2.fields);

    for other_frag_name in &cached2.fragment_names {
        collect_conflicts_between_fragments(
            schema,
            fragment_map,
            cache,
            pair_set,
            conflicts,
            frag_name1,
            other_frag_name,
            are_mutually_exclusive,
        );
    }
    for other_frag_name in &cached1.fragment_names {
        collect_conflicts_between_fragments(
            schema,
            fragment_map,
            cache,
            pair_set,
            conflicts,
            other_frag_name,
            frag_name2,
            are_mutually_exclusive,
        );
    }
}

fn collect_conflicts_between_fields_and_fragment<'a>(
    schema: &'a SchemaType,
    fragment_map: &FragmentMap<'a>,
    cache: &mut FieldsAndFragmentNamesCache<'a>,
    pair_set: &mut ConflictFragmentPairSet,
    conflicts: &mut Vec<FoundConflict>,
    fields: &IndexMap<String, Vec<FieldAndDef<'a>>>,
    frag_name: &str,
    are_mutually_exclusive: bool,
) {
    let Some(cached) = referenced_fields_and_fragment_names(schema, fragment_map, cache, frag_name) else {
        return;
    };

    collect_conflicts_between(schema, fragment_map, cache, pair_set, conflicts, are_mutually_exclusive, fields, &cached.fields);

    for other_frag_name in &cached.fragment_names {
        // Memoize on the (frag_name, other_frag_name) pair so a fragment
        // cycle can't recurse into the same pair forever.
        if pair_set.has_already_checked(other_frag_name, frag_name, are_mutually_exclusive) {
            continue;
        }
        pair_set.mark_checked(other_frag_name, frag_name, are_mutually_exclusive);

        collect_conflicts_between_fields_and_fragment(
            schema,
            fragment_map,
            cache,
            pair_set,
            conflicts,
            fields,
            other_frag_name,
            are_mutually_exclusive,
        );
    }
}

fn collect_conflicts_within<'a>(
    schema: &'a SchemaType,
    fragment_map: &FragmentMap<'a>,
    cache: &mut FieldsAndFragmentNamesCache<'a>,
    pair_set: &mut ConflictFragmentPairSet,
    conflicts: &mut Vec<FoundConflict>,
    fields: &IndexMap<String, Vec<FieldAndDef<'a>>>,
) {
    for (response_key, occurrences) in fields {
        for i in 0..occurrences.len() {
            for j in (i + 1)..occurrences.len() {
                if let Some(conflict) = find_conflict(schema, fragment_map, cache, pair_set, response_key, &occurrences[i], &occurrences[j], false) {
                    conflicts.push(conflict);
                }
            }
        }
    }
}

fn collect_conflicts_between<'a>(
    schema: &'a SchemaType,
    fragment_map: &FragmentMap<'a>,
    cache: &mut FieldsAndFragmentNamesCache<'a>,
    pair_set: &mut ConflictFragmentPairSet,
    conflicts: &mut Vec<FoundConflict>,
    are_mutually_exclusive: bool,
    fields1: &IndexMap<String, Vec<FieldAndDef<'a>>>,
    fields2: &IndexMap<String, Vec<FieldAndDef<'a>>>,
) {
    for (response_key, occurrences1) in fields1 {
        let Some(occurrences2) = fields2.get(response_key) else {
            continue;
        };
        for a in occurrences1 {
            for b in occurrences2 {
                if let Some(conflict) = find_conflict(schema, fragment_map, cache, pair_set, response_key, a, b, are_mutually_exclusive) {
                    conflicts.push(conflict);
                }
            }
        }
    }
}

fn find_conflict<'a>(
    schema: &'a SchemaType,
    fragment_map: &FragmentMap<'a>,
    cache: &mut FieldsAndFragmentNamesCache<'a>,
    pair_set: &mut ConflictFragmentPairSet,
    response_key: &str,
    a: &FieldAndDef<'a>,
    b: &FieldAndDef<'a>,
    parents_mutually_exclusive: bool,
) -> Option<FoundConflict> {
    let are_mutually_exclusive = parents_mutually_exclusive
        || (a.parent_type_name != b.parent_type_name
            && is_object_type(schema, a.parent_type_name)
            && is_object_type(schema, b.parent_type_name));

    if !are_mutually_exclusive {
        if a.field.item.name.item != b.field.item.name.item {
            return Some(FoundConflict {
                response_key: response_key.to_owned(),
                reason: ConflictReason::Message(format!(
                    "\"{}\" and \"{}\" are different fields",
                    a.field.item.name.item, b.field.item.name.item
                )),
                positions1: vec![a.field.start()],
                positions2: vec![b.field.start()],
            });
        }
        if !same_arguments(&a.field.item, &b.field.item) {
            return Some(FoundConflict {
                response_key: response_key.to_owned(),
                reason: ConflictReason::Message("they have differing arguments".to_owned()),
                positions1: vec![a.field.start()],
                positions2: vec![b.field.start()],
            });
        }
    }

    let type1 = a.field_def.map(|d| &d.field_type);
    let type2 = b.field_def.map(|d| &d.field_type);
    if let (Some(t1), Some(t2)) = (type1, type2) {
        if is_type_conflict(schema, t1, t2) {
            return Some(FoundConflict {
                response_key: response_key.to_owned(),
                reason: ConflictReason::Message(format!("they return conflicting types \"{t1}\" and \"{t2}\"")),
                positions1: vec![a.field.start()],
                positions2: vec![b.field.start()],
            });
        }
    }

    let (Some(set1), Some(set2)) = (&a.field.item.selection_set, &b.field.item.selection_set) else {
        return None;
    };

    let parent_type1 = type1.and_then(|t| schema.type_by_name(t.innermost_name()));
    let parent_type2 = type2.and_then(|t| schema.type_by_name(t.innermost_name()));

    let mut sub_conflicts = Vec::new();
    let cached1 = cached_fields_and_fragment_names(schema, fragment_map, cache, set1, parent_type1);
    let cached2 = cached_fields_and_fragment_names(schema, fragment_map, cache, set2, parent_type2);

    collect_conflicts_between(schema, fragment_map, cache, pair_set, &mut sub_conflicts, are_mutually_exclusive, &cached1.fields, &cached2.fields);
    for frag_name in &cached1.fragment_names {
        collect_conflicts_between_fields_and_fragment(schema, fragment_map, cache, pair_set, &mut sub_conflicts, &cached2.fields, frag_name, are_mutually_exclusive);
    }
    for frag_name in &cached2.fragment_names {
        collect_conflicts_between_fields_and_fragment(schema, fragment_map, cache, pair_set, &mut sub_conflicts, &cached1.fields, frag_name, are_mutually_exclusive);
    }
    for (i, frag_name1) in cached1.fragment_names.iter().enumerate() {
        for frag_name2 in cached2.fragment_names.iter().skip(i) {
            collect_conflicts_between_fragments(schema, fragment_map, cache, pair_set, &mut sub_conflicts, frag_name1, frag_name2, are_mutually_exclusive);
        }
    }

    if sub_conflicts.is_empty() {
        return None;
    }

    let mut positions1 = vec![a.field.start()];
    let mut positions2 = vec![b.field.start()];
    let nested: Vec<(String, ConflictReason)> = sub_conflicts
        .into_iter()
        .map(|c| {
            positions1.extend(c.positions1);
            positions2.extend(c.positions2);
            (c.response_key, c.reason)
        })
        .collect();

    Some(FoundConflict {
        response_key: response_key.to_owned(),
        reason: ConflictReason::Nested(nested),
        positions1,
        positions2,
    })
}

fn is_object_type(schema: &SchemaType, name: Option<&str>) -> bool {
    matches!(name.and_then(|n| schema.type_by_name(n)), Some(MetaType::Object(_)))
}

fn same_arguments(a: &Field, b: &Field) -> bool {
    if a.arguments.len() != b.arguments.len() {
        return false;
    }
    a.arguments.iter().all(|arg| {
        b.arguments
            .iter()
            .any(|other| other.item.name.item == arg.item.name.item && values_equal(&arg.item.value.item, &other.item.value.item))
    })
}

fn values_equal(a: &Value, b: &Value) -> bool {
    a.literal_eq(b)
}

/// Two types conflict if neither can stand in for a nullable/list wrapping
/// of the other, or if both resolve to the same leaf kind but under
/// different names.
fn is_type_conflict(schema: &SchemaType, t1: &Type, t2: &Type) -> bool {
    match (t1, t2) {
        (Type::NonNull(inner1), Type::NonNull(inner2)) => is_type_conflict(schema, inner1, inner2),
        (Type::NonNull(_), _) | (_, Type::NonNull(_)) => true,
        (Type::List(inner1), Type::List(inner2)) => is_type_conflict(schema, inner1, inner2),
        (Type::List(_), _) | (_, Type::List(_)) => true,
        (Type::Named(n1), Type::Named(n2)) => {
            let meta1 = schema.type_by_name(n1);
            let meta2 = schema.type_by_name(n2);
            match (meta1, meta2) {
                (Some(m1), Some(m2)) if m1.is_leaf() || m2.is_leaf() => n1 != n2,
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Type;

    #[test]
    fn leaf_types_with_different_names_conflict() {
        let scalars = crate::schema::builtin_scalars();
        let schema = SchemaType::new(scalars, "Query", None, None, crate::schema::builtin_directives());
        assert!(is_type_conflict(
            &schema,
            &Type::Named("String".into()),
            &Type::Named("Int".into())
        ));
        assert!(!is_type_conflict(
            &schema,
            &Type::Named("String".into()),
            &Type::Named("String".into())
        ));
    }

    #[test]
    fn non_null_wrapper_mismatch_conflicts() {
        let scalars = crate::schema::builtin_scalars();
        let schema = SchemaType::new(scalars, "Query", None, None, crate::schema::builtin_directives());
        let plain = Type::Named("String".into());
        let non_null = Type::NonNull(Box::new(Type::Named("String".into())));
        assert!(is_type_conflict(&schema, &plain, &non_null));
    }

    /// Cyclic fragment spreads (`A` spreads `B`, `B` spreads `A`) used to
    /// send `collect_conflicts_between_fields_and_fragment` into unbounded
    /// mutual recursion; `NoFragmentCycles` alone would reject the document,
    /// but both rules run together in `standard_rules`, so this exercises
    /// them together rather than `OverlappingFieldsCanBeMerged` in isolation.
    #[test]
    fn cyclic_fragment_spreads_do_not_overflow_the_stack() {
        let schema = crate::validation::test_schema::query_root_schema();
        let document = crate::parser::parse_document(
            "fragment A on Dog { name ...B } fragment B on Dog { name ...A } { dog { ...A } }",
        )
        .unwrap();
        let diagnostics = crate::validation::validate_with_rules(
            &schema,
            &document,
            vec![
                Box::new(OverlappingFieldsCanBeMerged),
                Box::new(crate::validation::rules::NoFragmentCycles::default()),
            ],
        )
        .unwrap();
        assert!(diagnostics
            .iter()
            .any(|d| d.message().contains("Cannot spread fragment")));
    }
}
