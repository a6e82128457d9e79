mod tree_file;

pub use tree_file::{TreeFile, TreeFileError};
