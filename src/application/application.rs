use std::fmt::{self, Write as _};

use searchable_tree::tree::{DEFAULT_SEPARATOR, NodeRef, SearchableNode, SearchableTree};
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::config::{TreeFile, TreeFileError};

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        debug!("Runtime config: {:?}", runtime_config);

        let tree = Self::build_tree(&runtime_config).await?;
        info!("Built tree with {} nodes", tree.len());

        let report = Self::report(&tree, &runtime_config).context(ReportSnafu)?;
        print!("{report}");

        Ok(())
    }

    async fn build_tree(runtime_config: &RuntimeConfig) -> Result<SearchableTree, ApplicationError> {
        let mut tree = SearchableTree::new(runtime_config.root_name.as_str());

        if runtime_config.wants_sample() {
            debug!("No paths given, building the sample tree");
            Self::populate_sample(&mut tree);
            return Ok(tree);
        }

        if let Some(path) = &runtime_config.tree_file {
            let tree_file = TreeFile::read(path).await.context(TreeFileLoadSnafu)?;
            debug!("Loaded tree file: {:?}", tree_file);
            for path in tree_file.paths() {
                let id = tree.upsert_with_separator(path, tree_file.separator());
                debug!("Upserted '{}' as {}", path, id);
            }
        }

        for path in &runtime_config.paths {
            let id = tree.upsert_with_separator(path, &runtime_config.separator);
            debug!("Upserted '{}' as {}", path, id);
        }

        Ok(tree)
    }

    /// root -> l1 (l11 (l111, l112), l12), l2 (l21, l22)
    fn populate_sample(tree: &mut SearchableTree) {
        let mut root = tree.root_mut();
        let l1 = root.append_child("l1");
        let l2 = root.append_child("l2");

        for (parent, children) in [(l1, ["l11", "l12"]), (l2, ["l21", "l22"])] {
            if let Some(mut parent) = tree.get_mut(parent) {
                for child in children {
                    parent.append_child(child);
                }
            }
        }

        tree.upsert_with_separator("l1.l11.l111", DEFAULT_SEPARATOR);
        tree.upsert_with_separator("l1.l11.l112", DEFAULT_SEPARATOR);
    }

    fn report(tree: &SearchableTree, runtime_config: &RuntimeConfig) -> Result<String, fmt::Error> {
        let separator = runtime_config.separator.as_str();
        let mut out = String::new();

        writeln!(out, "Traversal:")?;
        for node in tree.traverse() {
            writeln!(out, "{node}")?;
        }

        writeln!(out, "\nDiagram:\n{tree}")?;

        if !runtime_config.queries.is_empty() {
            writeln!(out, "\nLookups:")?;
            for query in &runtime_config.queries {
                match tree.find_with_separator(query, separator) {
                    Some(node) => writeln!(
                        out,
                        "{query}: {node} at {} (ancestors: {})",
                        node.identity(separator),
                        Self::ancestor_names(node)
                    )?,
                    None => writeln!(out, "{query}: not found")?,
                }
            }
        }

        if runtime_config.show_leafs {
            writeln!(out, "\nLeafs:")?;
            for leaf in tree.leafs() {
                writeln!(out, "{leaf}")?;
            }
        }

        Ok(out)
    }

    fn ancestor_names(node: NodeRef<'_, SearchableNode>) -> String {
        let names: Vec<&str> = node.ancestors().map(|ancestor| ancestor.node().name()).collect();
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the tree file"))]
    TreeFileLoadError { source: TreeFileError },
    #[snafu(display("Failed to render the tree report"))]
    ReportError { source: fmt::Error },
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use rstest::*;
    use tempfile::NamedTempFile;

    use super::*;

    #[fixture]
    fn runtime_config() -> RuntimeConfig {
        RuntimeConfig {
            root_name: "root".to_string(),
            separator: ".".to_string(),
            paths: Vec::new(),
            tree_file: None,
            queries: Vec::new(),
            show_leafs: false,
        }
    }

    fn names(tree: &SearchableTree) -> Vec<String> {
        tree.traverse()
            .map(|node| node.name().to_string())
            .collect()
    }

    #[rstest]
    #[compio::test]
    async fn builds_sample_without_paths(runtime_config: RuntimeConfig) {
        let tree = Application::build_tree(&runtime_config)
            .await
            .expect("Failed to build tree");

        assert_eq!(
            names(&tree),
            ["root", "l1", "l11", "l111", "l112", "l12", "l2", "l21", "l22"]
        );
    }

    #[rstest]
    #[compio::test]
    async fn builds_from_cli_paths(mut runtime_config: RuntimeConfig) {
        runtime_config.root_name = "top".to_string();
        runtime_config.separator = "/".to_string();
        runtime_config.paths = vec!["a/b".to_string(), "top/a/c".to_string()];

        let tree = Application::build_tree(&runtime_config)
            .await
            .expect("Failed to build tree");

        assert_eq!(names(&tree), ["top", "a", "b", "c"]);
    }

    #[rstest]
    #[compio::test]
    async fn builds_from_tree_file_then_cli_paths(mut runtime_config: RuntimeConfig) {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "separator: \"::\"\npaths:\n  - x::y\n")
            .expect("Failed to write to temp file");
        runtime_config.tree_file = Some(temp_file.path().to_path_buf());
        runtime_config.paths = vec!["x.z".to_string()];

        let tree = Application::build_tree(&runtime_config)
            .await
            .expect("Failed to build tree");

        assert_eq!(names(&tree), ["root", "x", "y", "z"]);
    }

    #[rstest]
    #[compio::test]
    async fn missing_tree_file_is_reported(mut runtime_config: RuntimeConfig) {
        runtime_config.tree_file = Some(PathBuf::from("does/not/exist.yaml"));

        let result = Application::build_tree(&runtime_config).await;

        assert!(matches!(
            result,
            Err(ApplicationError::TreeFileLoadError {
                source: TreeFileError::ReadError { .. }
            })
        ));
    }

    #[rstest]
    #[compio::test]
    async fn run_succeeds_on_sample(runtime_config: RuntimeConfig) {
        assert!(Application::run(runtime_config).await.is_ok());
    }

    #[rstest]
    fn report_lists_traversal_diagram_lookups_and_leafs(mut runtime_config: RuntimeConfig) {
        let mut tree = SearchableTree::new("root");
        Application::populate_sample(&mut tree);
        runtime_config.queries = vec![
            "l112".to_string(),
            "root.l1.l11".to_string(),
            "l1".to_string(),
            "nope".to_string(),
        ];
        runtime_config.show_leafs = true;

        let report = Application::report(&tree, &runtime_config).expect("Failed to render report");

        assert!(report.starts_with("Traversal:\n<SearchableNode \"root\">\n<SearchableNode \"l1\">\n"));
        assert!(report.contains("\nDiagram:\n<SearchableNode \"root\">\n├─ <SearchableNode \"l1\">\n"));
        assert!(report.contains("└── <SearchableNode \"l22\">"));
        assert!(report.contains(
            "l112: <SearchableNode \"l112\"> at root.l1.l11.l112 (ancestors: l11, l1)"
        ));
        assert!(report.contains("root.l1.l11: <SearchableNode \"l11\"> at root.l1.l11 (ancestors: l1)"));
        assert!(report.contains("l1: <SearchableNode \"l1\"> at root.l1 (ancestors: none)"));
        assert!(report.contains("nope: not found"));
        assert!(report.ends_with(
            "\nLeafs:\n<SearchableNode \"l111\">\n<SearchableNode \"l112\">\n<SearchableNode \"l12\">\n<SearchableNode \"l21\">\n<SearchableNode \"l22\">\n"
        ));
    }

    #[rstest]
    fn report_omits_optional_sections(runtime_config: RuntimeConfig) {
        let tree = SearchableTree::new("root");

        let report = Application::report(&tree, &runtime_config).expect("Failed to render report");

        assert_eq!(report, "Traversal:\n<SearchableNode \"root\">\n\nDiagram:\n<SearchableNode \"root\">\n");
    }
}
