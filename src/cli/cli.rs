use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Builds a searchable tree from dotted paths and prints it.
///
/// Without any paths or tree file a small sample tree is shown.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Paths to upsert, e.g. `l1.l11.l111`
    pub paths: Vec<String>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Name of the root node
    #[clap(long, default_value = "root")]
    pub root_name: String,

    /// Separator between path segments, for both paths and lookups
    #[clap(long, short, default_value = ".")]
    pub separator: String,

    /// YAML file with a `paths` list (and optionally its own `separator`)
    #[clap(long, short)]
    pub tree_file: Option<PathBuf>,

    /// Name or full path to look up once the tree is built
    #[clap(long = "find", short = 'f')]
    pub queries: Vec<String>,

    /// List the leaf nodes
    #[clap(long)]
    pub leafs: bool,
}
