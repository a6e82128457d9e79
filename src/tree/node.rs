use std::fmt;
use std::ops::Deref;

use derive_more::{Display, From, Into};

use super::SearchableTree;

/// Position of a node inside the arena of the tree that created it.
///
/// Ids are only meaningful for the tree that handed them out. Resolving an id
/// against another tree yields an unrelated node or `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("#{_0}")]
pub struct NodeId(usize);

impl NodeId {
    pub(super) const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Selects the kind of node a tree creates.
///
/// The tree builds the per-node value with [`Default`], so a kind can carry a
/// payload that is filled in after creation through [`NodeMut::data_mut`].
pub trait NodeKind: Default {
    /// Tag used when a node is displayed.
    const KIND: &'static str;
}

/// Plain node kind without payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchableNode;

impl NodeKind for SearchableNode {
    const KIND: &'static str = "SearchableNode";
}

/// A single named vertex of the tree.
#[derive(Debug, Clone)]
pub struct Node<K> {
    name: String,
    parent: Option<NodeId>,
    depth: usize,
    identity: Vec<String>,
    children: Vec<NodeId>,
    data: K,
}

impl<K: NodeKind> Node<K> {
    pub(super) fn root(name: String) -> Self {
        Self {
            identity: vec![name.clone()],
            name,
            parent: None,
            depth: 0,
            children: Vec::new(),
            data: K::default(),
        }
    }

    pub(super) fn child_of(name: String, parent_id: NodeId, parent: &Node<K>) -> Self {
        let mut identity = Vec::with_capacity(parent.identity.len() + 1);
        identity.extend(parent.identity.iter().cloned());
        identity.push(name.clone());

        Self {
            name,
            parent: Some(parent_id),
            depth: parent.depth + 1,
            identity,
            children: Vec::new(),
            data: K::default(),
        }
    }
}

impl<K> Node<K> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distance from the root, which sits at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Names from the root down to this node, inclusive.
    pub fn identity_parts(&self) -> &[String] {
        &self.identity
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn child_ids(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn data(&self) -> &K {
        &self.data
    }

    pub(super) fn push_child(&mut self, id: NodeId) {
        self.children.push(id);
    }
}

impl<K: NodeKind> fmt::Display for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} \"{}\">", K::KIND, self.name)
    }
}

/// Shared handle on a node, able to walk the rest of the tree.
pub struct NodeRef<'a, K> {
    tree: &'a SearchableTree<K>,
    id: NodeId,
}

impl<'a, K> NodeRef<'a, K> {
    pub(super) fn new(tree: &'a SearchableTree<K>, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The underlying node, borrowed for as long as the tree is.
    pub fn node(&self) -> &'a Node<K> {
        self.tree.slot(self.id)
    }

    pub fn parent(&self) -> Option<NodeRef<'a, K>> {
        self.node().parent.map(|id| NodeRef::new(self.tree, id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, K>> + use<'a, K> {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef::new(tree, id))
    }

    /// Pre-order walk starting with this node. Every call starts a fresh walk.
    pub fn traverse(&self) -> Traverse<'a, K> {
        Traverse {
            tree: self.tree,
            stack: vec![self.id],
        }
    }

    /// Parent, grandparent and so on, stopping before the root.
    pub fn ancestors(&self) -> Ancestors<'a, K> {
        Ancestors {
            tree: self.tree,
            next: self.node().parent,
        }
    }

    /// Identity joined with `separator`.
    pub fn identity(&self, separator: &str) -> String {
        self.node().identity.join(separator)
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<K> Deref for NodeRef<'_, K> {
    type Target = Node<K>;

    fn deref(&self) -> &Node<K> {
        self.node()
    }
}

impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<K> Eq for NodeRef<'_, K> {}

impl<K: NodeKind> fmt::Display for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.node(), f)
    }
}

impl<K: NodeKind> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("identity", &self.node().identity)
            .finish()
    }
}

/// Exclusive handle on a node, the only way to grow the tree by hand.
pub struct NodeMut<'a, K> {
    tree: &'a mut SearchableTree<K>,
    id: NodeId,
}

impl<'a, K: NodeKind> NodeMut<'a, K> {
    pub(super) fn new(tree: &'a mut SearchableTree<K>, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Creates a child named `name` after the existing children.
    ///
    /// Siblings may share a name. Both are kept, and lookups by path or name
    /// resolve to the one created last.
    pub fn append_child(&mut self, name: impl Into<String>) -> NodeId {
        self.tree.append_child_to(self.id, name.into())
    }

    pub fn data_mut(&mut self) -> &mut K {
        &mut self.tree.slot_mut(self.id).data
    }

    pub fn to_ref(&self) -> NodeRef<'_, K> {
        NodeRef::new(self.tree, self.id)
    }
}

impl<K> Deref for NodeMut<'_, K> {
    type Target = Node<K>;

    fn deref(&self) -> &Node<K> {
        self.tree.slot(self.id)
    }
}

/// Pre-order iterator driven by an explicit stack.
pub struct Traverse<'a, K> {
    tree: &'a SearchableTree<K>,
    stack: Vec<NodeId>,
}

impl<'a, K> Iterator for Traverse<'a, K> {
    type Item = NodeRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Reversed so the first child is popped first.
        self.stack
            .extend(self.tree.slot(id).children.iter().rev().copied());
        Some(NodeRef::new(self.tree, id))
    }
}

pub struct Ancestors<'a, K> {
    tree: &'a SearchableTree<K>,
    next: Option<NodeId>,
}

impl<'a, K> Iterator for Ancestors<'a, K> {
    type Item = NodeRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        match self.tree.slot(id).parent {
            Some(parent) => {
                self.next = Some(parent);
                Some(NodeRef::new(self.tree, id))
            }
            None => {
                self.next = None;
                None
            }
        }
    }
}
