//! Range view of a file.

use std::fmt;

use crate::error::FsError;
use crate::path::ResolvedPath;
use crate::text::{read_text, split_lines};

const RULE_WIDTH: usize = 70;

/// Result of `view`.
#[derive(Debug, Clone)]
pub struct ViewReport {
    pub path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub total_lines: usize,
    /// Lines `start_line..=end_line`, without terminators.
    pub lines: Vec<String>,
}

/// Show lines `start_line..=end_line` of a file.
///
/// `end_line` is clamped to the file length; `start_line` past the end is an
/// error.
pub fn view(
    target: &ResolvedPath,
    start_line: Option<usize>,
    end_line: Option<usize>,
) -> Result<ViewReport, FsError> {
    let target = target.clone().require_file()?;
    let text = read_text(&target.path)?;
    let all = split_lines(&text);
    let total = all.len();
    log::debug!("view {} {start_line:?}..{end_line:?} of {total}", target.display());

    if total == 0 {
        return Ok(ViewReport {
            path: target.display(),
            start_line: 0,
            end_line: 0,
            total_lines: 0,
            lines: Vec::new(),
        });
    }

    let start = start_line.unwrap_or(1);
    let end = end_line.unwrap_or(total);
    if start < 1 {
        return Err(FsError::InvalidRange(format!(
            "start_line must be >= 1 (got {start})"
        )));
    }
    if end < start {
        return Err(FsError::InvalidRange(format!(
            "end_line ({end}) must be >= start_line ({start})"
        )));
    }
    if start > total {
        return Err(FsError::RangeOutOfBounds(format!(
            "start_line ({start}) exceeds file length ({total} lines)"
        )));
    }
    let end = end.min(total);

    Ok(ViewReport {
        path: target.display(),
        start_line: start,
        end_line: end,
        total_lines: total,
        lines: all[start - 1..end].iter().map(|l| l.to_string()).collect(),
    })
}

impl ViewReport {
    /// `(line_number, text)` pairs.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (self.start_line + i, line.as_str()))
    }
}

impl fmt::Display for ViewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_lines == 0 {
            return write!(f, "File '{}' is empty (0 lines)", self.path);
        }
        write!(
            f,
            "File: {} (lines {}-{} of {})\n{}",
            self.path,
            self.start_line,
            self.end_line,
            self.total_lines,
            "=".repeat(RULE_WIDTH)
        )?;
        for (number, line) in self.numbered() {
            write!(f, "\n{number:4} | {line}")?;
        }
        Ok(())
    }
}
