//! Arena-backed mind-map document.
//!
//! [`Mindmap`] stores [`MindmapNode`]s in a slotmap and keeps the
//! parent/child links between them. It is the model the presentation layer
//! builds columns from: each column lists the displayable children of one
//! node.

use slotmap::{SlotMap, new_key_type};
use tracing::instrument;

use crate::node::{MindmapNode, TreeNodeRef};
use drilldown_core::{drill_debug, drill_trace};

new_key_type! {
    /// A handle to a node in a [`Mindmap`].
    pub struct NodeKey;
}

/// A node in the arena together with its links.
#[derive(Debug, Clone)]
struct MindmapEntry {
    node: MindmapNode,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

/// A mind-map document held in memory.
///
/// # Example
///
/// ```
/// use drilldown::{Mindmap, MindmapNode};
///
/// let mut map = Mindmap::new();
/// let root = map.insert_root(MindmapNode::node("Projects"));
/// let garden = map.insert_child(root, MindmapNode::node("Garden")).unwrap();
/// map.insert_child(root, MindmapNode::comment("archived below"));
///
/// assert_eq!(map.displayable_children(root), vec![garden]);
/// assert_eq!(map.parent(garden), Some(root));
/// assert_eq!(map.depth(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mindmap {
    nodes: SlotMap<NodeKey, MindmapEntry>,
    root: Option<NodeKey>,
}

impl Mindmap {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    /// Set the root node, discarding any previous content.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_root(&mut self, node: MindmapNode) -> NodeKey {
        if !self.nodes.is_empty() {
            drill_trace!(discarded = self.nodes.len(), "replacing document");
        }
        self.nodes.clear();
        let key = self.nodes.insert(MindmapEntry {
            node,
            parent: None,
            children: Vec::new(),
        });
        self.root = Some(key);
        key
    }

    /// Append `node` as the last child of `parent`.
    ///
    /// Returns `None` if `parent` is not in this document.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_child(&mut self, parent: NodeKey, node: MindmapNode) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            drill_debug!(?parent, "insert_child: unknown parent");
            return None;
        }

        let key = self.nodes.insert(MindmapEntry {
            node,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(entry) = self.nodes.get_mut(parent) {
            entry.children.push(key);
        }
        Some(key)
    }

    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    pub fn get(&self, key: NodeKey) -> Option<&MindmapNode> {
        self.nodes.get(key).map(|entry| &entry.node)
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|entry| entry.parent)
    }

    /// All children of `key` in document order, displayable or not.
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes
            .get(key)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[])
    }

    /// The children of `key` a column would list.
    pub fn displayable_children(&self, key: NodeKey) -> Vec<NodeKey> {
        self.children(key)
            .iter()
            .copied()
            .filter(|&child| self.get(child).is_some_and(|node| node.is_displayable()))
            .collect()
    }

    /// The keys from the root down to `key`, inclusive.
    ///
    /// Empty if `key` is not in this document.
    pub fn path_to(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut path = Vec::new();
        let mut current = Some(key).filter(|&k| self.nodes.contains_key(k));
        while let Some(k) = current {
            path.push(k);
            current = self.parent(k);
        }
        path.reverse();
        path
    }

    /// Number of levels below and including the root.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];
        while let Some((key, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &child in self.children(key) {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }

    /// Total number of nodes, displayable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Mindmap, NodeKey, NodeKey, NodeKey) {
        let mut map = Mindmap::new();
        let root = map.insert_root(MindmapNode::node("Root"));
        let a = map.insert_child(root, MindmapNode::node("A")).unwrap();
        map.insert_child(root, MindmapNode::element("font")).unwrap();
        let b = map.insert_child(a, MindmapNode::node("B")).unwrap();
        map.insert_child(b, MindmapNode::text("note")).unwrap();
        (map, root, a, b)
    }

    #[test]
    fn test_empty_map() {
        let map = Mindmap::new();
        assert!(map.is_empty());
        assert_eq!(map.root(), None);
        assert_eq!(map.depth(), 0);
    }

    #[test]
    fn test_links() {
        let (map, root, a, b) = sample();

        assert_eq!(map.len(), 5);
        assert_eq!(map.root(), Some(root));
        assert_eq!(map.parent(root), None);
        assert_eq!(map.parent(b), Some(a));
        assert_eq!(map.children(root).len(), 2);
        assert_eq!(map.get(a).and_then(|n| n.title()), Some("A"));
    }

    #[test]
    fn test_displayable_children_skip_structure() {
        let (map, root, a, b) = sample();

        assert_eq!(map.displayable_children(root), vec![a]);
        assert_eq!(map.displayable_children(a), vec![b]);
        assert!(map.displayable_children(b).is_empty());
    }

    #[test]
    fn test_path_and_depth() {
        let (map, root, a, b) = sample();

        assert_eq!(map.path_to(b), vec![root, a, b]);
        assert_eq!(map.path_to(root), vec![root]);
        assert_eq!(map.depth(), 4);
    }

    #[test]
    fn test_insert_root_discards_old_document() {
        let (mut map, root, a, _) = sample();

        let fresh = map.insert_root(MindmapNode::node("Fresh"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.root(), Some(fresh));
        assert!(map.get(root).is_none());
        assert!(map.path_to(a).is_empty());
        assert_eq!(map.insert_child(a, MindmapNode::node("orphan")), None);
    }
}
