use std::collections::HashMap;
use std::fmt;

use hashlink::LinkedHashMap;
use tracing::trace;

use super::node::{Node, NodeId, NodeKind, NodeMut, NodeRef, SearchableNode, Traverse};
use super::{Diagram, DiagramStyle};

/// Separator used by [`SearchableTree::find`] and [`SearchableTree::upsert`].
pub const DEFAULT_SEPARATOR: &str = ".";

const DEFAULT_ROOT_NAME: &str = "root";

/// Append-only tree indexed by full path and by bare node name.
///
/// The path index maps every identity to its node. The name index keeps only
/// the most recently created node for each name, so older nodes sharing a
/// name are reachable through their full path alone. Neither index is ever
/// pruned.
#[derive(Debug, Clone)]
pub struct SearchableTree<K = SearchableNode> {
    nodes: Vec<Node<K>>,
    path_index: LinkedHashMap<Vec<String>, NodeId>,
    name_index: HashMap<String, NodeId>,
}

impl<K: NodeKind> SearchableTree<K> {
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = Node::root(root_name.into());

        let mut path_index = LinkedHashMap::new();
        path_index.insert(root.identity_parts().to_vec(), NodeId::ROOT);
        let mut name_index = HashMap::new();
        name_index.insert(root.name().to_string(), NodeId::ROOT);

        Self {
            nodes: vec![root],
            path_index,
            name_index,
        }
    }

    pub fn root_mut(&mut self) -> NodeMut<'_, K> {
        NodeMut::new(self, NodeId::ROOT)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<NodeMut<'_, K>> {
        if id.index() < self.nodes.len() {
            Some(NodeMut::new(self, id))
        } else {
            None
        }
    }

    /// Looks `key` up with [`DEFAULT_SEPARATOR`].
    pub fn find(&self, key: &str) -> Option<NodeRef<'_, K>> {
        self.find_with_separator(key, DEFAULT_SEPARATOR)
    }

    /// Resolves `key` as a full path when it contains `separator`, otherwise
    /// as a bare name.
    ///
    /// Full paths start at the root name. Bare names resolve to the most
    /// recently created node of that name. An empty key or an empty separator
    /// never matches.
    pub fn find_with_separator(&self, key: &str, separator: &str) -> Option<NodeRef<'_, K>> {
        if key.is_empty() || separator.is_empty() {
            return None;
        }

        let id = if key.contains(separator) {
            let identity: Vec<String> = key.split(separator).map(str::to_string).collect();
            self.path_index.get(&identity)
        } else {
            self.name_index.get(key)
        };

        id.map(|&id| NodeRef::new(self, id))
    }

    /// Every node whose children list is empty, in pre-order.
    pub fn leafs(&self) -> impl Iterator<Item = NodeRef<'_, K>> {
        self.traverse().filter(|node| node.is_leaf())
    }

    /// Materialises `path` with [`DEFAULT_SEPARATOR`].
    pub fn upsert(&mut self, path: &str) -> NodeId {
        self.upsert_with_separator(path, DEFAULT_SEPARATOR)
    }

    /// Walks `path` from the root, creating only the segments that do not
    /// exist yet, and returns the node of the last segment.
    ///
    /// Any segment equal to the root's name is skipped, wherever it appears,
    /// so a path may be given with or without the leading root name. The same
    /// rule makes a descendant named like the root unreachable through this
    /// method; [`NodeMut::append_child`] still creates one.
    ///
    /// An empty path leaves the tree untouched and returns the root. With an
    /// empty separator the whole path is a single segment.
    pub fn upsert_with_separator(&mut self, path: &str, separator: &str) -> NodeId {
        let mut base = NodeId::ROOT;
        if path.is_empty() {
            return base;
        }

        let segments: Vec<&str> = if separator.is_empty() {
            vec![path]
        } else {
            path.split(separator).collect()
        };

        for segment in segments {
            if segment == self.slot(NodeId::ROOT).name() {
                trace!("Skipping root segment '{}' in '{}'", segment, path);
                continue;
            }

            let mut candidate = self.slot(base).identity_parts().to_vec();
            candidate.push(segment.to_string());

            base = match self.path_index.get(&candidate) {
                Some(&existing) => existing,
                None => self.append_child_to(base, segment.to_string()),
            };
        }

        base
    }

    /// Creates a node under `parent` and links it into the parent's children.
    pub(super) fn append_child_to(&mut self, parent: NodeId, name: String) -> NodeId {
        let id = self.create_node(name, parent);
        self.slot_mut(parent).push_child(id);
        id
    }

    /// The only place nodes come into existence. Registers the new node in
    /// both indexes, replacing whatever each index held under the same key.
    fn create_node(&mut self, name: String, parent: NodeId) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        let node = Node::child_of(name, parent, self.slot(parent));

        if let Some(previous) = self
            .path_index
            .replace(node.identity_parts().to_vec(), id)
        {
            trace!(
                "Path '{}' now resolves to {}, replacing {}",
                node.identity_parts().join(DEFAULT_SEPARATOR),
                id,
                previous
            );
        }
        if let Some(previous) = self.name_index.insert(node.name().to_string(), id) {
            trace!(
                "Name '{}' now resolves to {}, shadowing {}",
                node.name(),
                id,
                previous
            );
        }
        trace!("Created {} as {}", node, id);

        self.nodes.push(node);
        id
    }
}

impl<K> SearchableTree<K> {
    pub fn root(&self) -> NodeRef<'_, K> {
        NodeRef::new(self, NodeId::ROOT)
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, K>> {
        if id.index() < self.nodes.len() {
            Some(NodeRef::new(self, id))
        } else {
            None
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`, a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order walk of the whole tree.
    pub fn traverse(&self) -> Traverse<'_, K> {
        self.root().traverse()
    }

    /// Every indexed full path, in the order it was first created.
    pub fn identities(&self) -> impl Iterator<Item = &[String]> {
        self.path_index.keys().map(Vec::as_slice)
    }

    pub fn diagram(&self, style: DiagramStyle) -> Diagram<'_, K> {
        Diagram::new(self, style)
    }

    pub(super) fn slot(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.index()]
    }

    pub(super) fn slot_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id.index()]
    }
}

impl<K: NodeKind> Default for SearchableTree<K> {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_NAME)
    }
}

impl<K: NodeKind> fmt::Display for SearchableTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.diagram(DiagramStyle::default()), f)
    }
}
