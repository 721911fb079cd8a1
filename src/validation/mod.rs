//! Static validation of a parsed GraphQL query document against a schema.
//!
//! [`validate`] runs the standard rule set in a single pass over the
//! document and returns every [`crate::diagnostics::Diagnostic`] found, in
//! the order the rules raised them. [`validate_with_rules`] runs a
//! caller-chosen subset — useful for testing one rule in isolation, or for
//! a caller that wants a smaller rule set than the full spec-mandated one.

pub mod action;
pub mod context;
pub mod driver;
pub mod info;
pub mod rule;
pub mod rules;
#[cfg(test)]
pub(crate) mod test_schema;

pub use action::NextCheckAction;
pub use context::ValidationContext;
pub use driver::{validate, validate_with_rules};
pub use rule::Rule;

/// Every rule this crate implements, in the order the driver's document
/// walk benefits most from: cheap structural checks first, so an
/// obviously-broken document short-circuits useful diagnostics before the
/// expensive field-merge analysis ever runs.
pub fn standard_rules<'a>() -> Vec<Box<dyn Rule<'a> + 'a>> {
    vec![
        Box::new(rules::ExecutableDefinitions),
        Box::new(rules::LoneAnonymousOperation),
        Box::new(rules::UniqueOperationNames),
        Box::new(rules::SingleFieldSubscriptions),
        Box::new(rules::KnownTypeNames),
        Box::new(rules::FragmentsOnCompositeTypes),
        Box::new(rules::VariablesAreInputTypes),
        Box::new(rules::ScalarLeafs),
        Box::new(rules::FieldsOnCorrectType),
        Box::new(rules::UniqueFragmentNames),
        Box::new(rules::KnownFragmentNames),
        Box::new(rules::NoUnusedFragments),
        Box::new(rules::PossibleFragmentSpreads),
        Box::new(rules::NoFragmentCycles),
        Box::new(rules::UniqueVariableNames),
        Box::new(rules::NoUndefinedVariables),
        Box::new(rules::NoUnusedVariables),
        Box::new(rules::VariablesInAllowedPosition),
        Box::new(rules::KnownDirectives),
        Box::new(rules::DirectivesInValidLocations),
        Box::new(rules::UniqueDirectivesPerLocation),
        Box::new(rules::KnownArgumentNames),
        Box::new(rules::UniqueArgumentNames),
        Box::new(rules::ProvidedRequiredArguments),
        Box::new(rules::ValuesOfCorrectType),
        Box::new(rules::OverlappingFieldsCanBeMerged),
    ]
}
