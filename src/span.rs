//! Source positions and spans.
//!
//! Positions are 1-based (first line is line 1, first column is column 1)
//! and columns count Unicode scalar values, matching the GraphQL spec's
//! convention for diagnostic locations.

use std::fmt;

/// A single point in an input source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    index: usize,
    line: usize,
    column: usize,
}

impl SourcePosition {
    /// The position of the first character of a document.
    pub fn start_of_file() -> Self {
        SourcePosition {
            index: 0,
            line: 1,
            column: 1,
        }
    }

    #[doc(hidden)]
    pub fn new(index: usize, line: usize, column: usize) -> Self {
        SourcePosition {
            index,
            line,
            column,
        }
    }

    /// Byte index into the source this position was derived from.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column number, counting Unicode scalar values.
    pub fn column(&self) -> usize {
        self.column
    }

    #[doc(hidden)]
    pub fn advance_col(&mut self) {
        self.index += 1;
        self.column += 1;
    }

    #[doc(hidden)]
    pub fn advance_line(&mut self) {
        self.index += 1;
        self.line += 1;
        self.column = 1;
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range of characters in the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl Span {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Span { start, end }
    }

    pub fn zero_width(pos: SourcePosition) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }
}

/// Wraps an AST node with the span of source text it was parsed from and a
/// process-unique [`NodeId`], used by the validator's skip-state machinery
/// and by the fields/fragment-names cache to identify a node without relying
/// on pointer stability.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanning<T> {
    pub item: T,
    pub span: Span,
    pub id: NodeId,
}

impl<T> Spanning<T> {
    pub fn new(span: Span, id: NodeId, item: T) -> Self {
        Spanning { item, span, id }
    }

    pub fn start(&self) -> SourcePosition {
        self.span.start
    }

    pub fn map<O>(self, f: impl FnOnce(T) -> O) -> Spanning<O> {
        Spanning {
            item: f(self.item),
            span: self.span,
            id: self.id,
        }
    }
}

impl<T> std::ops::Deref for Spanning<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

/// A stable identifier assigned to every AST node at parse time.
///
/// The traversal driver uses node ids, not references, as skip-state slot
/// keys and as selection-set cache keys: a document built by a parser that
/// copies nodes around would invalidate a pointer-identity scheme, but a
/// monotonically increasing id survives moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

/// Hands out increasing [`NodeId`]s while a document is being built.
#[derive(Debug, Default)]
pub struct NodeIdGenerator(u32);

impl NodeIdGenerator {
    pub fn new() -> Self {
        NodeIdGenerator(0)
    }

    pub fn next(&mut self) -> NodeId {
        let id = NodeId(self.0);
        self.0 += 1;
        id
    }
}
