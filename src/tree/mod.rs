//! Named-path tree with path and name indexes.
//!
//! The tree owns every node in an arena and hands out [`NodeId`]s. Nodes are
//! only ever created by the tree, either through [`NodeMut::append_child`] or
//! through [`SearchableTree::upsert`], which keeps both lookup indexes in sync
//! with the node graph. Nothing is ever removed.
//!
//! The structure is not synchronised. Callers sharing a tree between threads
//! have to wrap the whole tree in a lock.

mod diagram;
mod node;
mod searchable_tree;

pub use diagram::{Diagram, DiagramStyle};
pub use node::{Ancestors, Node, NodeId, NodeKind, NodeMut, NodeRef, SearchableNode, Traverse};
pub use searchable_tree::{DEFAULT_SEPARATOR, SearchableTree};
