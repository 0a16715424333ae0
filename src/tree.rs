//! ASCII tree rendering of a directory.

use std::fmt;

use crate::error::FsError;
use crate::path::ResolvedPath;
use crate::walker::{EntryKind, TreeWalker, WalkOptions};

const BRANCH_MID: &str = "├── ";
const BRANCH_LAST: &str = "└── ";
const CONTINUE_MID: &str = "│   ";
const CONTINUE_LAST: &str = "    ";

/// Flags for a tree rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeRequest {
    pub max_depth: Option<usize>,
    pub show_hidden: bool,
    pub dirs_only: bool,
}

/// Result of `tree`.
#[derive(Debug, Clone)]
pub struct TreeReport {
    pub root: String,
    pub lines: Vec<String>,
    pub directories: usize,
    pub files: usize,
    pub dirs_only: bool,
}

/// Render `target` as a tree.
pub fn tree(
    target: &ResolvedPath,
    request: TreeRequest,
    walk: WalkOptions,
) -> Result<TreeReport, FsError> {
    let target = target.clone().require_dir()?;
    log::debug!("tree {} {request:?}", target.display());

    let options = walk
        .include_hidden(request.show_hidden)
        .directories_only(request.dirs_only)
        .max_depth(request.max_depth);

    let mut report = TreeReport {
        root: target.display(),
        lines: Vec::new(),
        directories: 0,
        files: 0,
        dirs_only: request.dirs_only,
    };

    // prefixes[d] is the indentation carried into entries at depth d + 1
    let mut prefixes: Vec<String> = vec![String::new()];

    for entry in TreeWalker::new(&target.path, options) {
        prefixes.truncate(entry.depth);
        let prefix = prefixes.last().cloned().unwrap_or_default();

        if entry.is_marker() {
            report.lines.push(format!("{prefix}{}", entry.name));
            continue;
        }

        let (branch, continuation) = if entry.is_last {
            (BRANCH_LAST, CONTINUE_LAST)
        } else {
            (BRANCH_MID, CONTINUE_MID)
        };

        match entry.kind {
            EntryKind::Directory => {
                report.directories += 1;
                report.lines.push(format!("{prefix}{branch}{}/", entry.name));
            }
            EntryKind::File | EntryKind::Unreadable => {
                report.files += 1;
                report.lines.push(format!("{prefix}{branch}{}", entry.name));
            }
        }
        prefixes.push(format!("{prefix}{continuation}"));
    }

    Ok(report)
}

impl fmt::Display for TreeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.root)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        write!(f, "\n{} directories", self.directories)?;
        if !self.dirs_only {
            write!(f, ", {} files", self.files)?;
        }
        Ok(())
    }
}
