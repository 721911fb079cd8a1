//! The traversal driver: walks a document exactly once, dispatching every
//! registered rule's callbacks and tracking each rule's skip/stop state
//! independently.
//!
//! The walk has two phases (§ design): operations in source order, then
//! fragment definitions in source order. A fragment spread encountered
//! while walking an operation does not recurse into the fragment's own
//! selection set for the general rule set — that fragment gets its own
//! full walk in phase two. Variable usage is tracked separately: right
//! after an operation's structural walk, a bounded closure walk follows
//! every fragment spread reachable from that operation (guarding against
//! cycles with a visited set) purely to link `$variable` occurrences back
//! to the operation's declarations and to mark which fragments are
//! reachable at all, since the same fragment spread from two operations
//! has to satisfy each operation's own variable scope independently.

use std::collections::HashSet;

use crate::ast::{
    Definition, Document, Field, FragmentDefinition, InlineFragment, OperationDefinition,
    OperationType, Selection, SelectionSet, Type, Value, VariableDefinition,
};
use crate::schema::{DirectiveLocation, MetaType, SchemaType};
use crate::span::{NodeId, Spanning};

use super::action::NextCheckAction;
use super::context::ValidationContext;
use super::info::VariableInfo;
use super::rule::Rule;

/// Runs the standard rule set (see [`super::standard_rules`]) against
/// `document`. This is the entry point most callers want.
pub fn validate<'a>(schema: &'a SchemaType, document: &'a Document) -> Vec<crate::diagnostics::Diagnostic> {
    validate_with_rules(schema, document, super::standard_rules())
        .expect("the standard rule set is never empty")
}

/// Runs a caller-chosen set of rules against `document`. Returns
/// [`crate::error::SetupError::NoRulesRegistered`] if `rules` is empty,
/// since a run with no rules could never produce a diagnostic.
pub fn validate_with_rules<'a>(
    schema: &'a SchemaType,
    document: &'a Document,
    rules: Vec<Box<dyn Rule<'a> + 'a>>,
) -> Result<Vec<crate::diagnostics::Diagnostic>, crate::error::SetupError> {
    if rules.is_empty() {
        return Err(crate::error::SetupError::NoRulesRegistered);
    }

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "validate",
        rule_count = rules.len(),
        definition_count = document.len()
    )
    .entered();

    let mut ctx = ValidationContext::new(schema, document);
    let rule_count = rules.len();
    let mut driver = Driver {
        rules,
        skip: vec![None; rule_count],
        stopped: vec![false; rule_count],
    };

    for def in document {
        if let Definition::Operation(op) = def {
            driver.walk_operation(op, &mut ctx);
        }
    }
    for def in document {
        if let Definition::Fragment(frag) = def {
            driver.walk_fragment_definition(frag, &mut ctx);
        }
    }

    for i in 0..driver.rules.len() {
        if !driver.stopped[i] {
            driver.rules[i].exit_document(&mut ctx);
        }
    }

    Ok(ctx.into_diagnostics())
}

struct Driver<'a> {
    rules: Vec<Box<dyn Rule<'a> + 'a>>,
    skip: Vec<Option<NodeId>>,
    stopped: Vec<bool>,
}

impl<'a> Driver<'a> {
    fn any_active(&self) -> bool {
        (0..self.rules.len()).any(|i| !self.stopped[i] && self.skip[i].is_none())
    }

    fn enter_bracket(
        &mut self,
        node_id: NodeId,
        ctx: &mut ValidationContext<'a>,
        mut call: impl FnMut(&mut dyn Rule<'a>, &mut ValidationContext<'a>) -> NextCheckAction,
    ) -> Vec<usize> {
        let mut active = Vec::new();
        for i in 0..self.rules.len() {
            if self.stopped[i] || self.skip[i].is_some() {
                continue;
            }
            active.push(i);
            match call(self.rules[i].as_mut(), ctx) {
                NextCheckAction::Continue => {}
                NextCheckAction::SkipForChildNodes => self.skip[i] = Some(node_id),
                NextCheckAction::Stop => self.stopped[i] = true,
            }
        }
        active
    }

    fn exit_bracket(
        &mut self,
        active: &[usize],
        node_id: NodeId,
        ctx: &mut ValidationContext<'a>,
        mut call: impl FnMut(&mut dyn Rule<'a>, &mut ValidationContext<'a>),
    ) {
        for &i in active {
            if self.stopped[i] {
                continue;
            }
            call(self.rules[i].as_mut(), ctx);
            if self.skip[i] == Some(node_id) {
                self.skip[i] = None;
            }
        }
    }

    fn for_each_active(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        mut call: impl FnMut(&mut dyn Rule<'a>, &mut ValidationContext<'a>),
    ) {
        for i in 0..self.rules.len() {
            if self.stopped[i] || self.skip[i].is_some() {
                continue;
            }
            call(self.rules[i].as_mut(), ctx);
        }
    }

    fn walk_operation(&mut self, op: &'a Spanning<OperationDefinition>, ctx: &mut ValidationContext<'a>) {
        ctx.reset_variables();
        for var_def in &op.item.variable_definitions {
            ctx.declare_variable(
                var_def.item.name.item.clone(),
                VariableInfo::new(
                    var_def.item.var_type.item.clone(),
                    var_def.item.default_value.is_some(),
                ),
            );
        }

        let active = self.enter_bracket(op.id, ctx, |r, ctx| r.enter_operation(op, ctx));
        if self.any_active() {
            let location = match op.item.operation_type {
                OperationType::Query => DirectiveLocation::Query,
                OperationType::Mutation => DirectiveLocation::Mutation,
                OperationType::Subscription => DirectiveLocation::Subscription,
            };
            self.walk_directives(&op.item.directives, location, ctx);
            let parent_type = ctx.schema().root_type(op.item.operation_type);
            self.walk_selection_set(&op.item.selection_set, parent_type, ctx);
        }

        let mut visited = HashSet::new();
        let root_type = ctx.schema().root_type(op.item.operation_type);
        self.link_directives(&op.item.directives, ctx);
        self.link_selection_set(&op.item.selection_set, root_type, &mut visited, ctx);

        for var_def in &op.item.variable_definitions {
            self.walk_variable_definition(var_def, ctx);
        }

        self.exit_bracket(&active, op.id, ctx, |r, ctx| r.exit_operation(op, ctx));
    }

    fn walk_fragment_definition(&mut self, frag: &'a Spanning<FragmentDefinition>, ctx: &mut ValidationContext<'a>) {
        let active = self.enter_bracket(frag.id, ctx, |r, ctx| r.enter_fragment_definition(frag, ctx));
        if self.any_active() {
            self.walk_directives(&frag.item.directives, DirectiveLocation::FragmentDefinition, ctx);
            let parent_type = ctx.schema().type_by_name(&frag.item.type_condition.item);
            self.walk_selection_set(&frag.item.selection_set, parent_type, ctx);
        }
        self.exit_bracket(&active, frag.id, ctx, |r, ctx| r.exit_fragment_definition(frag, ctx));
    }

    fn walk_variable_definition(&mut self, var_def: &'a Spanning<VariableDefinition>, ctx: &mut ValidationContext<'a>) {
        self.for_each_active(ctx, |r, ctx| r.enter_variable_definition(var_def, ctx));
        if let Some(default) = &var_def.item.default_value {
            self.walk_value(default, Some(&var_def.item.var_type.item), ctx);
        }
    }

    fn walk_selection_set(
        &mut self,
        set: &'a SelectionSet,
        parent_type: Option<&'a MetaType>,
        ctx: &mut ValidationContext<'a>,
    ) {
        let active = self.enter_bracket(set.id, ctx, |r, ctx| r.enter_selection_set(set, parent_type, ctx));
        if self.any_active() {
            for selection in &set.selections {
                match selection {
                    Selection::Field(field) => self.walk_field(field, parent_type, ctx),
                    Selection::InlineFragment(frag) => self.walk_inline_fragment(frag, parent_type, ctx),
                    Selection::FragmentSpread(spread) => self.walk_fragment_spread(spread, parent_type, ctx),
                }
            }
        }
        self.exit_bracket(&active, set.id, ctx, |r, ctx| r.exit_selection_set(set, ctx));
    }

    fn walk_field(&mut self, field: &'a Spanning<Field>, parent_type: Option<&'a MetaType>, ctx: &mut ValidationContext<'a>) {
        let field_def = parent_type.and_then(|t| t.field_by_name(&field.item.name.item));
        let active = self.enter_bracket(field.id, ctx, |r, ctx| r.enter_field(field, parent_type, field_def, ctx));
        if self.any_active() {
            self.walk_arguments(&field.item.arguments, field_def.map(|d| &d.arguments), ctx);
            self.walk_directives(&field.item.directives, DirectiveLocation::Field, ctx);
            if let Some(child_set) = &field.item.selection_set {
                let child_type = field_def.and_then(|d| ctx.schema().type_by_name(d.field_type.innermost_name()));
                self.walk_selection_set(child_set, child_type, ctx);
            }
        }
        self.exit_bracket(&active, field.id, ctx, |r, ctx| r.exit_field(field, ctx));
    }

    fn walk_inline_fragment(
        &mut self,
        frag: &'a Spanning<InlineFragment>,
        parent_type: Option<&'a MetaType>,
        ctx: &mut ValidationContext<'a>,
    ) {
        let active = self.enter_bracket(frag.id, ctx, |r, ctx| r.enter_inline_fragment(frag, parent_type, ctx));
        if self.any_active() {
            self.walk_directives(&frag.item.directives, DirectiveLocation::InlineFragment, ctx);
            let frag_type = frag
                .item
                .type_condition
                .as_ref()
                .and_then(|tc| ctx.schema().type_by_name(&tc.item))
                .or(parent_type);
            self.walk_selection_set(&frag.item.selection_set, frag_type, ctx);
        }
        self.exit_bracket(&active, frag.id, ctx, |r, ctx| r.exit_inline_fragment(frag, ctx));
    }

    fn walk_fragment_spread(
        &mut self,
        spread: &'a Spanning<crate::ast::FragmentSpread>,
        parent_type: Option<&'a MetaType>,
        ctx: &mut ValidationContext<'a>,
    ) {
        let active = self.enter_bracket(spread.id, ctx, |r, ctx| r.enter_fragment_spread(spread, parent_type, ctx));
        if self.any_active() {
            self.walk_directives(&spread.item.directives, DirectiveLocation::FragmentSpread, ctx);
        }
        // No children beyond directives: the spread's target is walked in
        // full separately, as its own fragment definition.
        self.exit_bracket(&active, spread.id, ctx, |_, _| {});
    }

    fn walk_directives(&mut self, directives: &'a [Spanning<crate::ast::Directive>], location: DirectiveLocation, ctx: &mut ValidationContext<'a>) {
        for directive in directives {
            let directive_def = ctx.schema().directive_by_name(&directive.item.name.item);
            let active = self.enter_bracket(directive.id, ctx, |r, ctx| {
                r.enter_directive(directive, directive_def, location, ctx)
            });
            if self.any_active() {
                self.walk_arguments(&directive.item.arguments, directive_def.map(|d| &d.arguments), ctx);
            }
            self.exit_bracket(&active, directive.id, ctx, |_, _| {});
        }
    }

    fn walk_arguments(
        &mut self,
        arguments: &'a [Spanning<crate::ast::Argument>],
        arg_defs: Option<&'a indexmap::IndexMap<String, crate::schema::Argument>>,
        ctx: &mut ValidationContext<'a>,
    ) {
        for arg in arguments {
            let arg_def = arg_defs.and_then(|m| m.get(&arg.item.name.item));
            self.for_each_active(ctx, |r, ctx| r.enter_argument(arg, arg_def, ctx));
            self.walk_value(&arg.item.value, arg_def.map(|d| &d.arg_type), ctx);
        }
    }

    fn walk_value(&mut self, value: &'a Spanning<Value>, expected_type: Option<&'a Type>, ctx: &mut ValidationContext<'a>) {
        self.for_each_active(ctx, |r, ctx| r.enter_value(value, expected_type, ctx));
        match &value.item {
            Value::List(items) => {
                let element_type = expected_type.and_then(Type::list_element);
                for item in items {
                    self.walk_value(item, element_type, ctx);
                }
            }
            Value::Object(fields) => {
                for (name, field_value) in fields {
                    let field_type = resolve_input_field_type(ctx.schema(), expected_type, &name.item);
                    self.walk_value(field_value, field_type, ctx);
                }
            }
            _ => {}
        }
    }

    // -- Variable usage / fragment reachability linking --------------------
    //
    // A separate, bounded pass: walks the operation's own selection set and
    // every fragment reachable from it (cycle-guarded by `visited`), firing
    // only `enter_variable_usage` and marking fragments used. Kept apart
    // from the structural walk above because the same fragment, spread from
    // two different operations, must have its variable usages checked
    // against each operation's own declarations independently — a single
    // shared walk of each fragment definition can't do that.

    fn link_selection_set(
        &mut self,
        set: &'a SelectionSet,
        parent_type: Option<&'a MetaType>,
        visited: &mut HashSet<String>,
        ctx: &mut ValidationContext<'a>,
    ) {
        for selection in &set.selections {
            match selection {
                Selection::Field(field) => {
                    let field_def = parent_type.and_then(|t| t.field_by_name(&field.item.name.item));
                    self.link_arguments(&field.item.arguments, field_def.map(|d| &d.arguments), ctx);
                    self.link_directives(&field.item.directives, ctx);
                    if let Some(child_set) = &field.item.selection_set {
                        let child_type = field_def.and_then(|d| ctx.schema().type_by_name(d.field_type.innermost_name()));
                        self.link_selection_set(child_set, child_type, visited, ctx);
                    }
                }
                Selection::InlineFragment(frag) => {
                    self.link_directives(&frag.item.directives, ctx);
                    let frag_type = frag
                        .item
                        .type_condition
                        .as_ref()
                        .and_then(|tc| ctx.schema().type_by_name(&tc.item))
                        .or(parent_type);
                    self.link_selection_set(&frag.item.selection_set, frag_type, visited, ctx);
                }
                Selection::FragmentSpread(spread) => {
                    self.link_directives(&spread.item.directives, ctx);
                    let name = &spread.item.name.item;
                    if visited.insert(name.clone()) {
                        ctx.mark_fragment_used(name);
                        if let Some(def) = ctx.fragment_definition(name) {
                            let frag_type = ctx.schema().type_by_name(&def.item.type_condition.item);
                            self.link_selection_set(&def.item.selection_set, frag_type, visited, ctx);
                        }
                    }
                }
            }
        }
    }

    fn link_directives(&mut self, directives: &'a [Spanning<crate::ast::Directive>], ctx: &mut ValidationContext<'a>) {
        for directive in directives {
            let directive_def = ctx.schema().directive_by_name(&directive.item.name.item);
            self.link_arguments(&directive.item.arguments, directive_def.map(|d| &d.arguments), ctx);
        }
    }

    fn link_arguments(
        &mut self,
        arguments: &'a [Spanning<crate::ast::Argument>],
        arg_defs: Option<&'a indexmap::IndexMap<String, crate::schema::Argument>>,
        ctx: &mut ValidationContext<'a>,
    ) {
        for arg in arguments {
            let arg_def = arg_defs.and_then(|m| m.get(&arg.item.name.item));
            let location_has_default = arg_def.is_some_and(|d| d.has_default_value());
            self.link_value(&arg.item.value, arg_def.map(|d| &d.arg_type), location_has_default, ctx);
        }
    }

    /// `location_has_default` is whether the argument or input-object field
    /// this exact value occupies carries its own default — distinct from
    /// whichever variable's default (if any) the value turns out to be.
    /// It does not propagate into list elements or nested object fields,
    /// which have no default of their own at that position.
    fn link_value(
        &mut self,
        value: &'a Spanning<Value>,
        expected_type: Option<&'a Type>,
        location_has_default: bool,
        ctx: &mut ValidationContext<'a>,
    ) {
        match &value.item {
            Value::Variable(name) => {
                self.for_each_active(ctx, |r, ctx| r.enter_variable_usage(name, value, expected_type, location_has_default, ctx));
            }
            Value::List(items) => {
                let element_type = expected_type.and_then(Type::list_element);
                for item in items {
                    self.link_value(item, element_type, false, ctx);
                }
            }
            Value::Object(fields) => {
                for (name, field_value) in fields {
                    let field_type = resolve_input_field_type(ctx.schema(), expected_type, &name.item);
                    let field_has_default = resolve_input_field_has_default(ctx.schema(), expected_type, &name.item);
                    self.link_value(field_value, field_type, field_has_default, ctx);
                }
            }
            _ => {}
        }
    }
}

fn resolve_input_field_type<'s>(
    schema: &'s SchemaType,
    expected: Option<&'s Type>,
    field_name: &str,
) -> Option<&'s Type> {
    let type_name = expected?.innermost_name();
    match schema.type_by_name(type_name)? {
        MetaType::InputObject(obj) => obj.fields.get(field_name).map(|f| &f.field_type),
        _ => None,
    }
}

fn resolve_input_field_has_default(schema: &SchemaType, expected: Option<&Type>, field_name: &str) -> bool {
    let Some(type_name) = expected.map(Type::innermost_name) else {
        return false;
    };
    match schema.type_by_name(type_name) {
        Some(MetaType::InputObject(obj)) => obj.fields.get(field_name).is_some_and(|f| f.default_value.is_some()),
        _ => false,
    }
}
