use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root_name: String,
    pub separator: String,
    pub paths: Vec<String>,
    pub tree_file: Option<PathBuf>,
    pub queries: Vec<String>,
    pub show_leafs: bool,
}

impl RuntimeConfig {
    /// True when nothing was asked to be inserted, in which case the sample
    /// tree is built instead.
    pub fn wants_sample(&self) -> bool {
        self.paths.is_empty() && self.tree_file.is_none()
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            root_name: cli.root_name,
            separator: cli.separator,
            paths: cli.paths,
            tree_file: cli.tree_file,
            queries: cli.queries,
            show_leafs: cli.leafs,
        }
    }
}
