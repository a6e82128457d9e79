//! In-memory tree of named nodes with dotted-path lookup and idempotent path
//! insertion.
//!
//! ```
//! use searchable_tree::tree::SearchableTree;
//!
//! let mut tree: SearchableTree = SearchableTree::new("root");
//! tree.upsert("a.b.c");
//! tree.upsert("a.b.d");
//!
//! let b = tree.find("root.a.b").unwrap();
//! assert_eq!(b.children().count(), 2);
//! assert_eq!(tree.find("d").unwrap().identity("/"), "root/a/b/d");
//! ```

pub mod tree;
