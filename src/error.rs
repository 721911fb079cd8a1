//! Internal preconditions: programmer errors, not diagnostics.
//!
//! These never reach a validation caller through the normal `diagnostics`
//! list — they signal that `validate` was set up incorrectly, e.g. invoked
//! with no rules registered at all.

use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum SetupError {
    /// `validate_with_rules` was called with an empty rule list. A
    /// validation run with no rules can never produce a diagnostic, which
    /// is never what a caller actually wants; use `validate` for the
    /// standard rule set.
    #[display("validate_with_rules called with no rules registered")]
    NoRulesRegistered,
}
