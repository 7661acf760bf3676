//! Shared, mutable element tree.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::element::{generate_id, Content, Element};
use crate::error::DomError;
use crate::html;
use crate::types::Display;

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type DisposeCallback = Box<dyn FnOnce() + Send + Sync>;

struct Node {
    id: String,
    tag: String,
    class: Option<String>,
    display: Display,
    /// Only `None`, `Text` and `Html`; children live in `children`.
    content: Content,
    data: HashMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    disposers: Vec<DisposeCallback>,
    removed: bool,
}

impl Node {
    fn new(id: String, tag: String) -> Self {
        Self {
            id,
            tag,
            class: None,
            display: Display::Block,
            content: Content::None,
            data: HashMap::new(),
            parent: None,
            children: Vec::new(),
            disposers: Vec::new(),
            removed: false,
        }
    }

    /// What is left of a removed node: no content, no links.
    fn tombstone() -> Self {
        Self {
            removed: true,
            ..Self::new(String::new(), String::new())
        }
    }
}

struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    by_id: HashMap<String, NodeId>,
}

impl Tree {
    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        match self.nodes.get(id.0) {
            Some(node) if node.removed => Err(DomError::Removed(id)),
            Some(node) => Ok(node),
            None => Err(DomError::UnknownNode(id)),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        match self.nodes.get_mut(id.0) {
            Some(node) if node.removed => Err(DomError::Removed(id)),
            Some(node) => Ok(node),
            None => Err(DomError::UnknownNode(id)),
        }
    }

    /// First element id in `element` (or its descendants) that is already
    /// taken, by a live node or by another element of the same tree.
    fn duplicate_id(&self, element: &Element) -> Option<String> {
        let mut seen = HashSet::new();
        let mut stack = vec![element];
        while let Some(element) = stack.pop() {
            if self.by_id.contains_key(&element.id) || !seen.insert(element.id.as_str()) {
                return Some(element.id.clone());
            }
            if let Content::Children(children) = &element.content {
                stack.extend(children.iter());
            }
        }
        None
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.by_id.insert(node.id.clone(), id);
        self.nodes.push(node);
        id
    }

    fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes.get(node.0).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Check that `node` can be moved under `parent`.
    fn check_move(&self, parent: NodeId, node: NodeId) -> Result<(), DomError> {
        self.node(parent)?;
        self.node(node)?;
        if node == self.root {
            return Err(DomError::Hierarchy("the root cannot be moved".to_string()));
        }
        if self.is_ancestor(node, parent) {
            return Err(DomError::Hierarchy(format!(
                "{node} is an ancestor of {parent}"
            )));
        }
        Ok(())
    }

    fn materialise(&mut self, element: Element, parent: NodeId) -> NodeId {
        let Element {
            id,
            tag,
            class,
            display,
            content,
            data,
        } = element;

        let mut node = Node::new(id, tag);
        node.class = class;
        node.display = display;
        node.data = data;
        node.parent = Some(parent);

        let children = match content {
            Content::Children(children) => children,
            other => {
                node.content = other;
                Vec::new()
            }
        };

        let id = self.alloc(node);
        self.nodes[parent.0].children.push(id);
        for child in children {
            self.materialise(child, id);
        }
        id
    }

    fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = vec![node];
        let mut i = 0;
        while i < out.len() {
            out.extend(self.nodes[out[i].0].children.iter().copied());
            i += 1;
        }
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let n = &self.nodes[node.0];
        out.push('<');
        out.push_str(&n.tag);
        html::write_attr(out, "id", &n.id);
        if let Some(class) = &n.class {
            html::write_attr(out, "class", class);
        }
        if let Some(style) = n.display.as_style() {
            html::write_attr(out, "style", style);
        }
        let mut data: Vec<_> = n.data.iter().collect();
        data.sort();
        for (key, value) in data {
            html::write_attr(out, &format!("data-{key}"), value);
        }
        out.push('>');

        if html::is_void(&n.tag) {
            return;
        }

        match &n.content {
            Content::Text(text) => out.push_str(&html::escape(text)),
            Content::Html(markup) => out.push_str(markup),
            _ => {}
        }
        for child in &n.children {
            self.write_html(*child, out);
        }

        out.push_str("</");
        out.push_str(&n.tag);
        out.push('>');
    }
}

/// A DOM-like document shared between the code that builds a page and the
/// bindings that keep it up to date.
///
/// `Document` is a cheap handle around `Arc<RwLock<..>>`; clones address the
/// same tree. Node ids stay valid after removal (operations on them fail with
/// [`DomError::Removed`]), so the arena only grows: a removed node keeps an
/// empty tombstone slot and its element id becomes free for reuse. Element
/// ids are unique among live nodes.
///
/// # Example
///
/// ```ignore
/// let doc = Document::new();
/// let form = doc.mount(doc.root(), Element::form().child(Element::input().id("email")))?;
/// let input = doc.get_by_id("email").unwrap();
/// doc.on_dispose(input, || println!("input removed"))?;
/// doc.remove(form)?;
/// ```
#[derive(Clone)]
pub struct Document {
    inner: Arc<RwLock<Tree>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tree = self.read();
        f.debug_struct("Document")
            .field("nodes", &tree.nodes.len())
            .field("root", &tree.root)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding an empty `body` root.
    pub fn new() -> Self {
        let mut tree = Tree {
            nodes: Vec::new(),
            root: NodeId(0),
            by_id: HashMap::new(),
        };
        let root = tree.alloc(Node::new("body".to_string(), "body".to_string()));
        tree.root = root;
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Tree> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tree> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn root(&self) -> NodeId {
        self.read().root
    }

    /// Materialise `element` (and its children) as the last child of `parent`.
    pub fn mount(&self, parent: NodeId, element: Element) -> Result<NodeId, DomError> {
        let mut tree = self.write();
        tree.node(parent)?;
        if let Some(taken) = tree.duplicate_id(&element) {
            return Err(DomError::DuplicateId(taken));
        }
        let id = tree.materialise(element, parent);
        log::trace!("[dom] mounted {} under {}", id, parent);
        Ok(id)
    }

    /// Create a detached element. Attach it with `append_child` or `insert_after`.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let mut tree = self.write();
        let mut id = generate_id(tag);
        while tree.by_id.contains_key(&id) {
            id = generate_id(tag);
        }
        tree.alloc(Node::new(id, tag.to_string()))
    }

    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut tree = self.write();
        tree.check_move(parent, child)?;
        tree.detach(child);
        tree.nodes[child.0].parent = Some(parent);
        tree.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Insert `node` immediately after `reference` in its parent's children.
    pub fn insert_after(&self, reference: NodeId, node: NodeId) -> Result<(), DomError> {
        let mut tree = self.write();
        let parent = tree
            .node(reference)?
            .parent
            .ok_or(DomError::Detached(reference))?;
        tree.check_move(parent, node)?;
        if node == reference {
            return Ok(());
        }
        tree.detach(node);
        let siblings = &mut tree.nodes[parent.0].children;
        let index = siblings
            .iter()
            .position(|c| *c == reference)
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(index, node);
        tree.nodes[node.0].parent = Some(parent);
        Ok(())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.read().node(node).ok().and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.read()
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let tree = self.read();
        let parent = tree.node(node).ok()?.parent?;
        let siblings = &tree.nodes[parent.0].children;
        let index = siblings.iter().position(|c| *c == node)?;
        siblings.get(index + 1).copied()
    }

    /// Look up a live node by its element id.
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.read();
        let node = *tree.by_id.get(id)?;
        tree.node(node).ok().map(|_| node)
    }

    pub fn element_id(&self, node: NodeId) -> Option<String> {
        self.read().node(node).ok().map(|n| n.id.clone())
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.read().node(node).ok().map(|n| n.tag.clone())
    }

    pub fn class(&self, node: NodeId) -> Option<String> {
        self.read().node(node).ok().and_then(|n| n.class.clone())
    }

    pub fn set_class(&self, node: NodeId, class: impl Into<String>) -> Result<(), DomError> {
        self.write().node_mut(node)?.class = Some(class.into());
        Ok(())
    }

    pub fn data(&self, node: NodeId, key: &str) -> Option<String> {
        self.read()
            .node(node)
            .ok()
            .and_then(|n| n.data.get(key).cloned())
    }

    pub fn set_data(
        &self,
        node: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        self.write()
            .node_mut(node)?
            .data
            .insert(key.into(), value.into());
        Ok(())
    }

    /// The node's own text or markup, if any.
    pub fn text(&self, node: NodeId) -> Option<String> {
        self.read()
            .node(node)
            .ok()
            .and_then(|n| n.content.as_text().map(str::to_string))
    }

    pub fn content(&self, node: NodeId) -> Option<Content> {
        self.read().node(node).ok().map(|n| n.content.clone())
    }

    /// Set plain text content. It is escaped on serialization.
    pub fn set_text(&self, node: NodeId, text: impl Into<String>) -> Result<(), DomError> {
        self.write().node_mut(node)?.content = Content::Text(text.into());
        Ok(())
    }

    /// Set raw markup content. It is emitted verbatim on serialization.
    pub fn set_html(&self, node: NodeId, markup: impl Into<String>) -> Result<(), DomError> {
        self.write().node_mut(node)?.content = Content::Html(markup.into());
        Ok(())
    }

    pub fn display(&self, node: NodeId) -> Option<Display> {
        self.read().node(node).ok().map(|n| n.display)
    }

    pub fn set_display(&self, node: NodeId, display: Display) -> Result<(), DomError> {
        self.write().node_mut(node)?.display = display;
        Ok(())
    }

    /// True when the node and all of its ancestors are displayed.
    pub fn is_visible(&self, node: NodeId) -> bool {
        let tree = self.read();
        let mut current = Some(node);
        while let Some(id) = current {
            match tree.node(id) {
                Ok(n) if n.display.is_visible() => current = n.parent,
                _ => return false,
            }
        }
        true
    }

    /// True when the node is live and reachable from the root.
    pub fn contains(&self, node: NodeId) -> bool {
        let tree = self.read();
        tree.node(node).is_ok() && tree.is_ancestor(tree.root, node)
    }

    /// Register a callback fired once when `node` (or an ancestor) is removed.
    pub fn on_dispose<F>(&self, node: NodeId, callback: F) -> Result<(), DomError>
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        self.write().node_mut(node)?.disposers.push(Box::new(callback));
        Ok(())
    }

    /// Remove `node` and its subtree, then run their dispose callbacks.
    pub fn remove(&self, node: NodeId) -> Result<(), DomError> {
        let disposers = {
            let mut tree = self.write();
            tree.node(node)?;
            if node == tree.root {
                return Err(DomError::Hierarchy("the root cannot be removed".to_string()));
            }
            tree.detach(node);

            let mut disposers = Vec::new();
            for id in tree.subtree(node) {
                let n = &mut tree.nodes[id.0];
                let key = std::mem::take(&mut n.id);
                disposers.append(&mut n.disposers);
                *n = Node::tombstone();
                if tree.by_id.get(&key) == Some(&id) {
                    tree.by_id.remove(&key);
                }
            }
            disposers
        };

        log::debug!(
            "[dom] removed {}, running {} dispose callback(s)",
            node,
            disposers.len()
        );
        for dispose in disposers {
            dispose();
        }
        Ok(())
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        let tree = self.read();
        let mut out = String::new();
        tree.write_html(tree.root, &mut out);
        out
    }

    /// Serialize one node and its subtree.
    pub fn outer_html(&self, node: NodeId) -> Result<String, DomError> {
        let tree = self.read();
        tree.node(node)?;
        let mut out = String::new();
        tree.write_html(node, &mut out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtree_order_is_breadth_first() {
        let doc = Document::new();
        let root = doc.root();
        let a = doc
            .mount(root, Element::div().child(Element::div()).child(Element::div()))
            .unwrap();
        let tree = doc.read();
        let subtree = tree.subtree(a);
        assert_eq!(subtree.len(), 3);
        assert_eq!(subtree[0], a);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(4).to_string(), "#4");
    }
}
