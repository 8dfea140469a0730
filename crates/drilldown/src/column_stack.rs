//! The column stack: the ordered strip of columns a user drills through.
//!
//! Index 0 is the root column. Every further column lists the children of
//! the node selected in the column to its left, so the stack as a whole is
//! the navigation path from the root to the current position. Drilling in
//! appends a column; backing out removes columns from the right.
//!
//! The stack owns its columns. The presentation layer constructs a column
//! and moves it in with [`ColumnStack::append`]; from then on the column is
//! only detached and dropped by one of the stack's removal operations.
//! Callers refer to columns by [`ColumnId`], never by position.
//!
//! # Threading
//!
//! A stack belongs to the thread that created it. Mutating calls
//! debug-assert this. The deferred scroll runs through a
//! [`SharedTaskScheduler`](drilldown_core::SharedTaskScheduler) drained on
//! the same thread.

use drilldown_core::logging::{span_names, targets};
use drilldown_core::{PerfSpan, ThreadAffinity};

use crate::column::{Column, ColumnHost, ColumnId, DetachedHost};
use crate::error::{ColumnStackError, Result};
use crate::node::TreeNodeRef;
use crate::scroll::DeferredScroll;

const WRONG_THREAD: &str = "column stack must be mutated on the thread that created it";

/// The ordered sequence of displayed columns, left = shallower.
///
/// # Example
///
/// ```
/// use drilldown::{Column, ColumnId, ColumnStack, MindmapNode};
///
/// struct NodeColumn {
///     id: ColumnId,
///     parent: Option<MindmapNode>,
/// }
///
/// impl NodeColumn {
///     fn new(parent: Option<MindmapNode>) -> Self {
///         Self { id: ColumnId::next(), parent }
///     }
/// }
///
/// impl Column for NodeColumn {
///     type Node = MindmapNode;
///     fn id(&self) -> ColumnId { self.id }
///     fn resize(&mut self) {}
///     fn deselect_all(&mut self) {}
///     fn parent_node(&self) -> Option<&MindmapNode> { self.parent.as_ref() }
/// }
///
/// let mut stack = ColumnStack::new();
/// let root = NodeColumn::new(None);
/// let root_id = root.id();
/// stack.append(root);
/// stack.append(NodeColumn::new(Some(MindmapNode::node("Garden"))));
/// stack.append(NodeColumn::new(Some(MindmapNode::node("Tomatoes"))));
///
/// assert_eq!(stack.title_of_rightmost_parent(), "Tomatoes");
/// assert_eq!(stack.breadcrumb(), vec!["Garden", "Tomatoes"]);
///
/// stack.remove_all_columns_right_of(root_id).unwrap();
/// assert_eq!(stack.number_of_columns(), 1);
/// assert_eq!(stack.title_of_rightmost_parent(), "");
/// ```
pub struct ColumnStack<C, H = DetachedHost> {
    columns: Vec<C>,
    host: H,
    scroller: Option<DeferredScroll>,
    affinity: ThreadAffinity,
}

impl<C: Column> ColumnStack<C, DetachedHost> {
    /// Create an empty stack that isn't shown anywhere.
    pub fn new() -> Self {
        Self::with_host(DetachedHost)
    }
}

impl<C: Column> Default for ColumnStack<C, DetachedHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, H> ColumnStack<C, H>
where
    C: Column,
    H: ColumnHost<C>,
{
    /// Create an empty stack whose columns are shown in `host`.
    ///
    /// The stack is bound to the calling thread.
    pub fn with_host(host: H) -> Self {
        Self {
            columns: Vec::new(),
            host,
            scroller: None,
            affinity: ThreadAffinity::current(),
        }
    }

    /// Use `scroller` for [`request_scroll_to_end`](Self::request_scroll_to_end).
    pub fn with_scroller(mut self, scroller: DeferredScroll) -> Self {
        self.scroller = Some(scroller);
        self
    }

    /// Replace the scroller. Dropping the old one cancels its pending scroll.
    pub fn set_scroller(&mut self, scroller: Option<DeferredScroll>) {
        self.affinity.debug_assert_same_thread_with_msg(WRONG_THREAD);
        self.scroller = scroller;
    }

    pub fn scroller(&self) -> Option<&DeferredScroll> {
        self.scroller.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn affinity(&self) -> ThreadAffinity {
        self.affinity
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Add `column` at the right end and attach it to the host.
    ///
    /// The caller is trusted to append a column listing the children of the
    /// node selected in the current rightmost column.
    #[tracing::instrument(
        skip_all,
        fields(column = %column.id()),
        target = "drilldown::column_stack",
        level = "trace"
    )]
    pub fn append(&mut self, column: C) {
        self.affinity.debug_assert_same_thread_with_msg(WRONG_THREAD);

        self.columns.push(column);
        if let Some(column) = self.columns.last() {
            self.host.attach(column);
        }

        tracing::debug!(
            target: targets::COLUMN_STACK,
            count = self.columns.len(),
            "column appended"
        );
    }

    /// Remove the rightmost column, unless it is the only one.
    ///
    /// The removed column is detached from the host and dropped, then the new
    /// rightmost column is told to clear its selection. Returns false, leaving
    /// the stack unchanged, if fewer than two columns are present.
    #[tracing::instrument(skip_all, target = "drilldown::column_stack", level = "trace")]
    pub fn remove_rightmost_column(&mut self) -> bool {
        self.affinity.debug_assert_same_thread_with_msg(WRONG_THREAD);

        if self.columns.len() < 2 {
            tracing::trace!(
                target: targets::COLUMN_STACK,
                count = self.columns.len(),
                "root column is never removed"
            );
            return false;
        }

        let Some(removed) = self.columns.pop() else {
            return false;
        };
        let removed_id = removed.id();
        self.host.detach(&removed);
        drop(removed);

        if let Some(rightmost) = self.columns.last_mut() {
            rightmost.deselect_all();
        }

        tracing::debug!(
            target: targets::COLUMN_STACK,
            removed = %removed_id,
            count = self.columns.len(),
            "rightmost column removed"
        );
        true
    }

    /// Remove every column to the right of `target`, making it the rightmost.
    ///
    /// Columns are removed one at a time from the right, so each column that
    /// becomes rightmost has its selection cleared in turn. If `target`
    /// occurs more than once, its last occurrence is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnStackError::ColumnNotFound`] if `target` is not in the
    /// stack. The stack is unchanged in that case.
    pub fn remove_all_columns_right_of(&mut self, target: ColumnId) -> Result<()> {
        self.truncate_right_of(target).map(|_| ())
    }

    /// Like [`remove_all_columns_right_of`](Self::remove_all_columns_right_of),
    /// returning how many columns were removed.
    #[tracing::instrument(skip(self), target = "drilldown::column_stack", level = "trace")]
    pub fn truncate_right_of(&mut self, target: ColumnId) -> Result<usize> {
        self.affinity.debug_assert_same_thread_with_msg(WRONG_THREAD);

        let Some(index) = self.position_of(target) else {
            tracing::warn!(
                target: targets::COLUMN_STACK,
                column = %target,
                count = self.columns.len(),
                "cannot remove columns right of a column that is not in the stack"
            );
            return Err(ColumnStackError::ColumnNotFound { id: target });
        };

        let mut removed = 0;
        while self.columns.len() > index + 1 && self.remove_rightmost_column() {
            removed += 1;
        }

        if removed > 0 {
            tracing::debug!(
                target: targets::COLUMN_STACK,
                column = %target,
                removed,
                "truncated column stack"
            );
        }
        Ok(removed)
    }

    /// Remove every column, including the root.
    ///
    /// Used when a new document is loaded. The stack is left empty and the
    /// caller is expected to append a new root column right away; see
    /// [`replace_root`](Self::replace_root). A pending scroll is kept.
    #[tracing::instrument(skip_all, target = "drilldown::column_stack", level = "trace")]
    pub fn remove_all_columns(&mut self) {
        self.affinity.debug_assert_same_thread_with_msg(WRONG_THREAD);

        let count = self.columns.len();
        self.host.detach_all();
        self.columns.clear();

        tracing::debug!(target: targets::COLUMN_STACK, removed = count, "all columns removed");
    }

    /// Start over from `root`: remove every column, then append `root`.
    pub fn replace_root(&mut self, root: C) {
        let _perf = PerfSpan::new(span_names::COLUMN_STACK);
        self.remove_all_columns();
        self.append(root);
    }

    /// Ask every column to recompute its size, left to right.
    #[tracing::instrument(skip_all, target = "drilldown::column_stack", level = "trace")]
    pub fn resize_all_columns(&mut self) {
        self.affinity.debug_assert_same_thread_with_msg(WRONG_THREAD);

        for column in &mut self.columns {
            column.resize();
        }
    }

    /// Schedule a deferred scroll of the strip to its right edge.
    ///
    /// Does nothing when no scroller is set.
    pub fn request_scroll_to_end(&mut self) {
        self.affinity.debug_assert_same_thread_with_msg(WRONG_THREAD);

        match &mut self.scroller {
            Some(scroller) => scroller.request(),
            None => tracing::debug!(
                target: targets::COLUMN_STACK,
                "scroll requested but no scroller is set"
            ),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn number_of_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The columns from left to right.
    pub fn columns(&self) -> impl DoubleEndedIterator<Item = &C> + ExactSizeIterator {
        self.columns.iter()
    }

    /// The leftmost column.
    pub fn root(&self) -> Option<&C> {
        self.columns.first()
    }

    pub fn rightmost(&self) -> Option<&C> {
        self.columns.last()
    }

    pub fn rightmost_mut(&mut self) -> Option<&mut C> {
        self.columns.last_mut()
    }

    pub fn contains(&self, id: ColumnId) -> bool {
        self.columns.iter().any(|column| column.id() == id)
    }

    /// Index of the last column with the given id.
    pub fn position_of(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().rposition(|column| column.id() == id)
    }

    pub fn column(&self, id: ColumnId) -> Option<&C> {
        self.position_of(id).map(|index| &self.columns[index])
    }

    /// Title of the node the rightmost column hangs off.
    ///
    /// Empty if the stack is empty, or if that node is missing or not
    /// displayable.
    pub fn title_of_rightmost_parent(&self) -> String {
        self.columns
            .last()
            .and_then(|column| column.parent_node())
            .and_then(displayable_title)
            .unwrap_or_default()
            .to_owned()
    }

    /// Titles of the displayable parents of all columns, left to right.
    pub fn breadcrumb(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter_map(|column| column.parent_node())
            .filter_map(displayable_title)
            .map(str::to_owned)
            .collect()
    }
}

fn displayable_title<N: TreeNodeRef>(node: &N) -> Option<&str> {
    if node.is_displayable() {
        Some(node.title().unwrap_or_default())
    } else {
        None
    }
}

impl<C, H> std::fmt::Debug for ColumnStack<C, H>
where
    C: Column,
    H: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<ColumnId> = self.columns.iter().map(Column::id).collect();
        f.debug_struct("ColumnStack")
            .field("columns", &ids)
            .field("host", &self.host)
            .field("scroller", &self.scroller)
            .finish()
    }
}
