//! The per-rule traversal-control signal a visitor callback returns.

/// What the driver should do with a rule's callbacks for the subtree rooted
/// at the node whose `enter_*` hook just returned this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextCheckAction {
    /// Keep calling this rule's callbacks while descending into this node's
    /// children.
    Continue,
    /// This rule has nothing more to say about this subtree. Its callbacks
    /// are skipped until the driver leaves the node that returned this —
    /// other rules keep running normally.
    SkipForChildNodes,
    /// This rule is finished for the whole document; never call any of its
    /// callbacks again, for any node.
    Stop,
}
