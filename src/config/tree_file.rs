use std::{borrow::Cow, path::Path};

use compio::fs;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use searchable_tree::tree::DEFAULT_SEPARATOR;
use snafu::prelude::*;
use tracing::debug;

use crate::ext::BestEffortPathExt;

const PATHS_KEY: &str = "paths";
const SEPARATOR_KEY: &str = "separator";

/// Paths to upsert, as listed in a YAML tree file:
///
/// ```yaml
/// separator: "/"
/// paths:
///   - l1/l11/l111
///   - l1/l12
/// ```
///
/// Both keys are optional. Entries of `paths` that are not strings are
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    separator: String,
    paths: Vec<String>,
}

impl TreeFile {
    pub async fn read(path: &Path) -> Result<Self, TreeFileError> {
        debug!("Opening tree file: {}", path.best_effort_path_display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read tree file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    fn parse_separator(value: Option<&Yaml>) -> Result<String, TreeFileError> {
        let Some(value) = value else {
            return Ok(DEFAULT_SEPARATOR.to_string());
        };

        let separator = value.as_str().ok_or(TreeFileError::SeparatorNotString)?;
        ensure!(!separator.is_empty(), EmptySeparatorSnafu);
        Ok(separator.to_string())
    }

    fn parse_paths(value: Option<&Yaml>) -> Result<Vec<String>, TreeFileError> {
        let Some(value) = value else {
            return Ok(Vec::new());
        };

        let paths = value
            .as_sequence()
            .ok_or(TreeFileError::PathsNotSequence)?
            .iter()
            .filter_map(|entry| {
                let path = entry.as_str().map(str::to_string);
                if path.is_none() {
                    debug!("Skipping non-string path entry: {:?}", entry);
                }
                path
            })
            .collect();

        Ok(paths)
    }
}

impl TryFrom<&str> for TreeFile {
    type Error = TreeFileError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents
            .first()
            .ok_or(TreeFileError::MalformedTreeFile)?;

        let top_level = document
            .as_mapping()
            .ok_or(TreeFileError::TopLevelNotMap)?;

        let separator = Self::parse_separator(
            top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(SEPARATOR_KEY)))),
        )?;
        let paths = Self::parse_paths(
            top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(PATHS_KEY)))),
        )?;

        Ok(TreeFile { separator, paths })
    }
}

#[derive(Debug, Snafu)]
pub enum TreeFileError {
    #[snafu(display("Failed to read the tree file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Tree file is not valid UTF-8: {}", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the tree file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted tree file"))]
    MalformedTreeFile,
    #[snafu(display("Top level of the tree file should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Paths section should be a list"))]
    PathsNotSequence,
    #[snafu(display("Separator should be a string"))]
    SeparatorNotString,
    #[snafu(display("Separator must not be empty"))]
    EmptySeparator,
}
