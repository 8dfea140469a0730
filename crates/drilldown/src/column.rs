//! Column identity and the capabilities the column stack consumes.
//!
//! A column is one sibling-list of the drill-down path: the children of the
//! node selected in the column to its left. The presentation layer owns the
//! concrete type; the stack only needs the operations of [`Column`].
//!
//! The on-screen strip the columns live in is a [`ColumnHost`]. The stack
//! tells the host when a column enters or leaves the strip and never lays
//! anything out itself.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::node::TreeNodeRef;

/// Global counter for generating unique column IDs.
static NEXT_COLUMN_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier for a column.
///
/// Columns are addressed by identity, never by position, so a caller holding
/// an id across a truncation can't end up pointing at a different column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(u64);

impl ColumnId {
    /// Allocate a fresh id. Call this once when constructing a column.
    pub fn next() -> Self {
        Self(NEXT_COLUMN_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value of this column ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column#{}", self.0)
    }
}

/// Capabilities of a column as seen by the column stack.
///
/// # Example
///
/// ```
/// use drilldown::{Column, ColumnId, MindmapNode};
///
/// struct NodeColumn {
///     id: ColumnId,
///     parent: Option<MindmapNode>,
///     selected: Option<usize>,
///     width: u32,
/// }
///
/// impl Column for NodeColumn {
///     type Node = MindmapNode;
///
///     fn id(&self) -> ColumnId {
///         self.id
///     }
///
///     fn resize(&mut self) {
///         self.width = 320;
///     }
///
///     fn deselect_all(&mut self) {
///         self.selected = None;
///     }
///
///     fn parent_node(&self) -> Option<&MindmapNode> {
///         self.parent.as_ref()
///     }
/// }
/// ```
pub trait Column {
    /// The tree node type this column hangs off.
    type Node: TreeNodeRef;

    /// The identity of this column. Must stay constant for its lifetime.
    fn id(&self) -> ColumnId;

    /// Recompute the column's size after the available space changed.
    fn resize(&mut self);

    /// Clear any selection highlight in this column.
    fn deselect_all(&mut self);

    /// The node whose children this column lists.
    ///
    /// The root column of a document may have no parent.
    fn parent_node(&self) -> Option<&Self::Node>;
}

/// The on-screen strip that displays the columns left to right.
pub trait ColumnHost<C: Column> {
    /// Add `column` at the right end of the strip.
    fn attach(&mut self, column: &C);

    /// Remove `column` from the strip. Called just before the column is dropped.
    fn detach(&mut self, column: &C);

    /// Remove every column from the strip.
    fn detach_all(&mut self);
}

/// A host with nothing on screen, for stacks driven without a view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DetachedHost;

impl<C: Column> ColumnHost<C> for DetachedHost {
    fn attach(&mut self, _column: &C) {}

    fn detach(&mut self, _column: &C) {}

    fn detach_all(&mut self) {}
}

static_assertions::assert_impl_all!(ColumnId: Send, Sync);
