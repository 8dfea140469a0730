//! drilldown - column-based navigation through tree-shaped documents.
//!
//! A user explores a mind map by looking at a horizontal strip of columns.
//! Each column lists the children of the node selected in the column to its
//! left, so the strip is the path from the root to the current position.
//! This crate owns that strip: the [`ColumnStack`] controller and the
//! capability traits it consumes.
//!
//! - [`Column`] and [`ColumnHost`]: what the presentation layer provides
//! - [`TreeNodeRef`]: what the stack reads from the nodes columns hang off
//! - [`MindmapNode`] and [`Mindmap`]: a concrete node model
//! - [`DeferredScroll`]: the delayed "scroll fully right" after drilling in
//! - [`ColumnStackConfig`]: tunables, loadable from TOML
//!
//! Deferred work runs on the UI thread through
//! [`SharedTaskScheduler`](drilldown_core::SharedTaskScheduler).

pub mod column;
pub mod column_stack;
pub mod config;
mod error;
pub mod mindmap;
pub mod node;
pub mod prelude;
pub mod scroll;

pub use column::{Column, ColumnHost, ColumnId, DetachedHost};
pub use column_stack::ColumnStack;
pub use config::{ColumnStackConfig, DEFAULT_SCROLL_DELAY_MS};
pub use error::{ColumnStackError, Result};
pub use mindmap::{Mindmap, NodeKey};
pub use node::{MindmapNode, NODE_TAG, TITLE_ATTRIBUTE, TreeNodeRef};
pub use scroll::{DeferredScroll, ScrollTarget};

pub use drilldown_core::{SharedTaskScheduler, ThreadAffinity};
