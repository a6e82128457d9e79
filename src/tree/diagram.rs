use std::fmt::{self, Write as _};

use super::{NodeKind, SearchableTree};

const BRANCH: char = '├';
const LAST_BRANCH: char = '└';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// Spacing of the connector glyphs in a [`Diagram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramStyle {
    /// Horizontal glyphs drawn per level of depth.
    pub indent: usize,
    /// Vertical glyph lines drawn above every non-root node.
    pub vertical_indent: usize,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            indent: 1,
            vertical_indent: 0,
        }
    }
}

/// Indented rendering of a tree, one node per line in pre-order.
///
/// ```text
/// <SearchableNode "root">
/// ├─ <SearchableNode "a">
/// ├── <SearchableNode "b">
/// └─ <SearchableNode "c">
/// ```
///
/// Diagnostic output only, the layout is not meant to be parsed.
#[derive(Debug, Clone, Copy)]
pub struct Diagram<'a, K> {
    tree: &'a SearchableTree<K>,
    style: DiagramStyle,
}

impl<'a, K> Diagram<'a, K> {
    pub(super) fn new(tree: &'a SearchableTree<K>, style: DiagramStyle) -> Self {
        Self { tree, style }
    }
}

impl<K: NodeKind> Diagram<'_, K> {
    fn render(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let mut last_branch = None;

        for node in self.tree.traverse() {
            if node.depth() > 0 {
                for _ in 0..self.style.vertical_indent {
                    out.push(VERTICAL);
                    out.push('\n');
                }
                last_branch = Some(out.len());
                out.push(BRANCH);
                out.extend(std::iter::repeat_n(
                    HORIZONTAL,
                    self.style.indent * node.depth(),
                ));
                out.push(' ');
            }
            writeln!(out, "{node}")?;
        }

        if let Some(at) = last_branch {
            out.replace_range(at..at + BRANCH.len_utf8(), LAST_BRANCH.encode_utf8(&mut [0; 4]));
        }
        out.truncate(out.trim_end().len());
        Ok(out)
    }
}

impl<K: NodeKind> fmt::Display for Diagram<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render()?)
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    #[fixture]
    fn sample() -> SearchableTree {
        let mut tree = SearchableTree::new("root");
        for path in ["l1.l11", "l1.l12", "l2.l21", "l2.l22", "l1.l11.l111", "l1.l11.l112"] {
            tree.upsert(path);
        }
        tree
    }

    #[rstest]
    fn default_diagram(sample: SearchableTree) {
        let expected = "\
<SearchableNode \"root\">
├─ <SearchableNode \"l1\">
├── <SearchableNode \"l11\">
├─── <SearchableNode \"l111\">
├─── <SearchableNode \"l112\">
├── <SearchableNode \"l12\">
├─ <SearchableNode \"l2\">
├── <SearchableNode \"l21\">
└── <SearchableNode \"l22\">";

        assert_eq!(sample.to_string(), expected);
    }

    #[test]
    fn lone_root_has_no_connectors() {
        let tree: SearchableTree = SearchableTree::new("root");

        assert_eq!(tree.to_string(), "<SearchableNode \"root\">");
    }

    #[test]
    fn custom_spacing() {
        let mut tree: SearchableTree = SearchableTree::new("root");
        tree.upsert("a.b");
        let style = DiagramStyle {
            indent: 2,
            vertical_indent: 1,
        };

        let expected = "\
<SearchableNode \"root\">
│
├── <SearchableNode \"a\">
│
└──── <SearchableNode \"b\">";
        assert_eq!(tree.diagram(style).to_string(), expected);
    }

    #[test]
    fn only_last_connector_is_closed() {
        let mut tree: SearchableTree = SearchableTree::new("root");
        tree.upsert("a");
        tree.upsert("b");
        tree.upsert("c");

        let rendered = tree.to_string();
        assert_eq!(rendered.matches(BRANCH).count(), 2);
        assert_eq!(rendered.matches(LAST_BRANCH).count(), 1);
        assert!(rendered.ends_with("└─ <SearchableNode \"c\">"));
    }
}
