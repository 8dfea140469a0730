//! Prelude module for drilldown.
//!
//! ```
//! use drilldown::prelude::*;
//! ```
//!
//! This provides access to:
//! - The column stack and its capability traits (`ColumnStack`, `Column`, `ColumnHost`)
//! - The node model (`MindmapNode`, `Mindmap`, `TreeNodeRef`)
//! - Deferred scrolling (`DeferredScroll`, `ScrollTarget`, `SharedTaskScheduler`)

// ============================================================================
// Column Stack
// ============================================================================

pub use crate::column::{Column, ColumnHost, ColumnId, DetachedHost};
pub use crate::column_stack::ColumnStack;
pub use crate::config::ColumnStackConfig;
pub use crate::error::ColumnStackError;

// ============================================================================
// Node Model
// ============================================================================

pub use crate::mindmap::{Mindmap, NodeKey};
pub use crate::node::{MindmapNode, TreeNodeRef};

// ============================================================================
// Scrolling
// ============================================================================

pub use crate::scroll::{DeferredScroll, ScrollTarget};
pub use drilldown_core::SharedTaskScheduler;
