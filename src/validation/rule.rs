//! The callbacks a validation rule implements.
//!
//! A rule is anything that implements [`Rule`]; every hook defaults to a
//! no-op (or `Continue`, for the handful the driver uses to decide whether
//! to keep descending), so a rule overrides only the callbacks it actually
//! cares about — the same shape as the traversal hooks a document walk
//! naturally offers, generalized so any number of rules can share one pass.
//!
//! The trait is parameterized by the document's own lifetime `'a` (mirrored
//! from [`ValidationContext`]), not left to per-call elision: a rule that
//! wants to retain a node reference across calls — `OverlappingFieldsCanBeMerged`
//! caching a selection set's fields, `NoFragmentCycles` building a spread
//! graph incrementally — needs those references to outlive the single hook
//! invocation that produced them.

use crate::ast::{
    Argument, Directive, Field, FragmentDefinition, FragmentSpread, InlineFragment,
    OperationDefinition, SelectionSet, Type, Value, VariableDefinition,
};
use crate::schema::{self, DirectiveLocation, DirectiveType, MetaType};
use crate::span::Spanning;

use super::action::NextCheckAction;
use super::context::ValidationContext;

pub trait Rule<'a> {
    /// A short, unique name used only for diagnostics about the rule
    /// registry itself (never shown to a validation caller).
    fn name(&self) -> &'static str;

    fn enter_operation(
        &mut self,
        _op: &'a Spanning<OperationDefinition>,
        _ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        NextCheckAction::Continue
    }

    fn exit_operation(&mut self, _op: &'a Spanning<OperationDefinition>, _ctx: &mut ValidationContext<'a>) {}

    fn enter_fragment_definition(
        &mut self,
        _frag: &'a Spanning<FragmentDefinition>,
        _ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        NextCheckAction::Continue
    }

    fn exit_fragment_definition(
        &mut self,
        _frag: &'a Spanning<FragmentDefinition>,
        _ctx: &mut ValidationContext<'a>,
    ) {
    }

    fn enter_variable_definition(
        &mut self,
        _var_def: &'a Spanning<VariableDefinition>,
        _ctx: &mut ValidationContext<'a>,
    ) {
    }

    fn enter_selection_set(
        &mut self,
        _set: &'a SelectionSet,
        _parent_type: Option<&'a MetaType>,
        _ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        NextCheckAction::Continue
    }

    fn exit_selection_set(&mut self, _set: &'a SelectionSet, _ctx: &mut ValidationContext<'a>) {}

    fn enter_field(
        &mut self,
        _field: &'a Spanning<Field>,
        _parent_type: Option<&'a MetaType>,
        _field_def: Option<&'a schema::Field>,
        _ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        NextCheckAction::Continue
    }

    fn exit_field(&mut self, _field: &'a Spanning<Field>, _ctx: &mut ValidationContext<'a>) {}

    fn enter_inline_fragment(
        &mut self,
        _frag: &'a Spanning<InlineFragment>,
        _parent_type: Option<&'a MetaType>,
        _ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        NextCheckAction::Continue
    }

    fn exit_inline_fragment(&mut self, _frag: &'a Spanning<InlineFragment>, _ctx: &mut ValidationContext<'a>) {}

    fn enter_fragment_spread(
        &mut self,
        _spread: &'a Spanning<FragmentSpread>,
        _parent_type: Option<&'a MetaType>,
        _ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        NextCheckAction::Continue
    }

    /// `location` is the type the argument's owning field or directive
    /// expects it against; `arg_def` is that argument's schema definition,
    /// if the owner and argument are both known.
    fn enter_argument(
        &mut self,
        _arg: &'a Spanning<Argument>,
        _arg_def: Option<&'a schema::Argument>,
        _ctx: &mut ValidationContext<'a>,
    ) {
    }

    /// `expected_type` is the type the value is being used at (an argument
    /// or input-object-field type, or a variable's declared type for a
    /// default value), when known.
    fn enter_value(&mut self, _value: &'a Spanning<Value>, _expected_type: Option<&'a Type>, _ctx: &mut ValidationContext<'a>) {}

    /// Fired once for every `$variable` reference found inside an argument
    /// or default value, with the type expected at that position and
    /// whether the argument/input-field at that exact use site itself
    /// carries a default value (distinct from the variable's own declared
    /// default).
    fn enter_variable_usage(
        &mut self,
        _var_name: &'a str,
        _usage_site: &'a Spanning<Value>,
        _expected_type: Option<&'a Type>,
        _location_has_default: bool,
        _ctx: &mut ValidationContext<'a>,
    ) {
    }

    fn enter_directive(
        &mut self,
        _directive: &'a Spanning<Directive>,
        _directive_def: Option<&'a DirectiveType>,
        _location: DirectiveLocation,
        _ctx: &mut ValidationContext<'a>,
    ) -> NextCheckAction {
        NextCheckAction::Continue
    }

    fn exit_document(&mut self, _ctx: &mut ValidationContext<'a>) {}
}
