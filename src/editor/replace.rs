//! Whole-file literal replacement.

use std::fmt;

use crate::error::FsError;
use crate::path::ResolvedPath;
use crate::text::read_text;

use super::{plural, write_back};

/// Result of `replace`.
#[derive(Debug, Clone)]
pub struct ReplaceReport {
    pub path: String,
    pub old_str: String,
    pub new_str: String,
    pub occurrences: usize,
}

/// Replace every non-overlapping occurrence of `old_str` with `new_str`.
///
/// This is a literal, whole-file substitution, not a regex and not scoped to
/// a line.
pub fn replace(
    target: &ResolvedPath,
    old_str: &str,
    new_str: &str,
) -> Result<ReplaceReport, FsError> {
    if old_str.is_empty() {
        return Err(FsError::InvalidArgument(
            "old_str must not be empty".to_string(),
        ));
    }
    let target = target.clone().require_file()?;
    let text = read_text(&target.path)?;

    let occurrences = text.matches(old_str).count();
    if occurrences == 0 {
        return Err(FsError::StringNotFound {
            needle: old_str.to_string(),
            path: target.display(),
        });
    }

    write_back(&target.path, &text.replace(old_str, new_str))?;
    log::info!("replaced {occurrences} occurrences in {}", target.display());

    Ok(ReplaceReport {
        path: target.display(),
        old_str: old_str.to_string(),
        new_str: new_str.to_string(),
        occurrences,
    })
}

impl fmt::Display for ReplaceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Success: Replaced {} occurrence{} of '{}' with '{}' in '{}'",
            self.occurrences,
            plural(self.occurrences),
            self.old_str,
            self.new_str,
            self.path
        )
    }
}
