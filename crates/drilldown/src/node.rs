//! Tree node capabilities and the mind-map node model.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

/// Tag of the elements that make up the visible mind-map hierarchy.
pub const NODE_TAG: &str = "node";

/// Attribute holding a mind-map node's title.
pub const TITLE_ATTRIBUTE: &str = "TEXT";

/// Read access to a tree node, as needed for breadcrumb titles.
pub trait TreeNodeRef {
    /// Whether this is a displayable mind-map node, as opposed to some other
    /// structural or annotation node.
    fn is_displayable(&self) -> bool;

    /// The node's title.
    ///
    /// Only meaningful when [`is_displayable`](Self::is_displayable) is true.
    fn title(&self) -> Option<&str>;
}

impl<T: TreeNodeRef + ?Sized> TreeNodeRef for &T {
    fn is_displayable(&self) -> bool {
        (**self).is_displayable()
    }

    fn title(&self) -> Option<&str> {
        (**self).title()
    }
}

impl<T: TreeNodeRef + ?Sized> TreeNodeRef for Box<T> {
    fn is_displayable(&self) -> bool {
        (**self).is_displayable()
    }

    fn title(&self) -> Option<&str> {
        (**self).title()
    }
}

impl<T: TreeNodeRef + ?Sized> TreeNodeRef for Rc<T> {
    fn is_displayable(&self) -> bool {
        (**self).is_displayable()
    }

    fn title(&self) -> Option<&str> {
        (**self).title()
    }
}

impl<T: TreeNodeRef + ?Sized> TreeNodeRef for Arc<T> {
    fn is_displayable(&self) -> bool {
        (**self).is_displayable()
    }

    fn title(&self) -> Option<&str> {
        (**self).title()
    }
}

/// A node of a mind-map document.
///
/// Mind-map files are XML, so a document holds more than the `<node>`
/// elements users navigate: other elements (icons, fonts, edges), text and
/// comments can all appear as children. Only `<node>` elements are
/// displayable.
///
/// ```
/// use drilldown::{MindmapNode, TreeNodeRef};
///
/// let node = MindmapNode::node("Groceries").with_attribute("FOLDED", "true");
/// assert!(node.is_displayable());
/// assert_eq!(node.title(), Some("Groceries"));
///
/// let icon = MindmapNode::element("icon").with_attribute("BUILTIN", "flag");
/// assert!(!icon.is_displayable());
/// assert_eq!(icon.title(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MindmapNode {
    /// An element with a tag name and attributes.
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
    },
    /// Character data.
    Text(String),
    /// A comment.
    Comment(String),
}

impl MindmapNode {
    /// Create an element without attributes.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Create a displayable `<node>` element with the given title.
    pub fn node(title: impl Into<String>) -> Self {
        Self::element(NODE_TAG).with_attribute(TITLE_ATTRIBUTE, title)
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a comment node.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    /// Set an attribute. Has no effect on text and comment nodes.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { attributes, .. } = &mut self {
            attributes.insert(name.into(), value.into());
        }
        self
    }

    /// The tag name, for elements.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Look up an attribute, for elements.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }
}

impl TreeNodeRef for MindmapNode {
    fn is_displayable(&self) -> bool {
        self.tag() == Some(NODE_TAG)
    }

    /// A displayable node without a `TEXT` attribute has an empty title.
    fn title(&self) -> Option<&str> {
        if self.is_displayable() {
            Some(self.attribute(TITLE_ATTRIBUTE).unwrap_or(""))
        } else {
            None
        }
    }
}
