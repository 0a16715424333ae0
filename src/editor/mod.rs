//! Line-addressed viewing and editing of single text files.
//!
//! All line numbers are 1-based. The file on disk is the only state: every
//! call re-reads it and writes the whole result back.

mod create;
mod insert;
mod replace;
mod view;

use std::fs;
use std::path::Path;

use crate::error::FsError;

pub use create::{create, CreateReport};
pub use insert::{insert, InsertReport};
pub use replace::{replace, ReplaceReport};
pub use view::{view, ViewReport};

fn write_back(path: &Path, content: &str) -> Result<(), FsError> {
    fs::write(path, content).map_err(|e| FsError::from_io(e, path, "modifying"))
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
