//! Positional line insertion.

use std::fmt;

use crate::error::FsError;
use crate::path::ResolvedPath;
use crate::text::{count_lines, line_ending, read_text};

use super::write_back;

/// Result of `insert`.
#[derive(Debug, Clone)]
pub struct InsertReport {
    pub path: String,
    pub line_number: usize,
    pub inserted_lines: usize,
    pub total_lines: usize,
}

/// Insert `content` so that it starts at `line_number`.
///
/// `line_number` ranges over `1..=total + 1`; `total + 1` appends. The block
/// always occupies whole lines: a missing final terminator is added, and an
/// unterminated last line is terminated before appending after it.
pub fn insert(
    target: &ResolvedPath,
    line_number: usize,
    content: &str,
) -> Result<InsertReport, FsError> {
    let target = target.clone().require_file()?;
    let text = read_text(&target.path)?;
    let total = count_lines(&text);

    if line_number < 1 {
        return Err(FsError::InvalidRange(format!(
            "line_number must be >= 1 (got {line_number})"
        )));
    }
    if line_number > total + 1 {
        return Err(FsError::RangeOutOfBounds(format!(
            "line_number ({line_number}) exceeds file length + 1 ({} lines)",
            total + 1
        )));
    }

    let ending = line_ending(&text);
    let mut block = content.to_string();
    if !block.ends_with('\n') {
        block.push_str(ending);
    }

    let segments: Vec<&str> = text.split_inclusive('\n').collect();
    let split_at = line_number - 1;

    let mut updated = String::with_capacity(text.len() + block.len() + ending.len());
    for segment in &segments[..split_at] {
        updated.push_str(segment);
    }
    if split_at > 0 && !updated.ends_with('\n') {
        updated.push_str(ending);
    }
    updated.push_str(&block);
    for segment in &segments[split_at..] {
        updated.push_str(segment);
    }

    write_back(&target.path, &updated)?;

    let report = InsertReport {
        path: target.display(),
        line_number,
        inserted_lines: count_lines(&block),
        total_lines: count_lines(&updated),
    };
    log::info!(
        "inserted {} lines at {} in {}",
        report.inserted_lines,
        line_number,
        report.path
    );
    Ok(report)
}

impl fmt::Display for InsertReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Success: Inserted content at line {} in '{}' (now {} lines)",
            self.line_number, self.path, self.total_lines
        )
    }
}
