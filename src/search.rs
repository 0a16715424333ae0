//! Regex search over a file or a directory tree.

use std::fmt;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use regex::{Regex, RegexBuilder};

use crate::error::FsError;
use crate::path::{PathKind, ResolvedPath};
use crate::text::{read_searchable, split_lines};
use crate::walker::{EntryKind, TreeWalker, WalkOptions};

/// Default cap on collected matches.
pub const DEFAULT_MAX_RESULTS: usize = 100;

const RULE_WIDTH: usize = 50;

/// Arguments for a search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub pattern: String,
    /// Glob restricting which files are searched in directory mode.
    pub file_pattern: Option<String>,
    pub case_insensitive: bool,
    pub context_lines: usize,
    pub max_results: usize,
}

impl SearchRequest {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            file_pattern: None,
            case_insensitive: false,
            context_lines: 0,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// A line shown around a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextLine {
    pub line_number: usize,
    pub text: String,
}

/// One matching line.
#[derive(Debug, Clone)]
pub struct SearchMatch {
    pub file_path: PathBuf,
    /// 1-based.
    pub line_number: usize,
    pub line_text: String,
    pub context_before: Vec<ContextLine>,
    pub context_after: Vec<ContextLine>,
}

/// Matches grouped by file, in traversal order.
#[derive(Debug, Clone)]
pub struct FileMatches {
    pub path: PathBuf,
    pub matches: Vec<SearchMatch>,
}

/// Result of `search`.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub pattern: String,
    pub files: Vec<FileMatches>,
    pub total: usize,
    pub max_results: usize,
}

impl SearchReport {
    /// True when collection stopped at `max_results`.
    pub fn capped(&self) -> bool {
        self.total >= self.max_results
    }

    fn remaining(&self) -> usize {
        self.max_results.saturating_sub(self.total)
    }

    pub fn matches(&self) -> impl Iterator<Item = &SearchMatch> {
        self.files.iter().flat_map(|f| f.matches.iter())
    }
}

/// Restricts directory-mode searches to files matching a glob.
struct FileFilter {
    matcher: GlobMatcher,
    /// Match the path relative to the root instead of the bare file name.
    match_path: bool,
}

impl FileFilter {
    fn compile(pattern: &str) -> Result<Self, FsError> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|err| FsError::InvalidPattern {
                pattern: pattern.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self {
            matcher: glob.compile_matcher(),
            match_path: pattern.contains('/'),
        })
    }

    fn accepts(&self, root: &Path, path: &Path) -> bool {
        if self.match_path {
            path.strip_prefix(root)
                .is_ok_and(|relative| self.matcher.is_match(relative))
        } else {
            path.file_name()
                .is_some_and(|name| self.matcher.is_match(name))
        }
    }
}

/// Compile the request's pattern.
pub fn compile_pattern(pattern: &str, case_insensitive: bool) -> Result<Regex, FsError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|err| FsError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })
}

/// Search `target` for lines matching the request's pattern.
///
/// Hidden entries and ignored names are always skipped in directory mode,
/// and the walk stops as soon as `max_results` matches are collected.
pub fn search(
    request: &SearchRequest,
    target: &ResolvedPath,
    walk: WalkOptions,
) -> Result<SearchReport, FsError> {
    if request.pattern.is_empty() {
        return Err(FsError::MissingArgument("pattern".to_string()));
    }
    if request.max_results == 0 {
        return Err(FsError::InvalidArgument(
            "max_results must be greater than zero".to_string(),
        ));
    }
    let regex = compile_pattern(&request.pattern, request.case_insensitive)?;
    let target = target.clone().require_existing()?;
    let filter = request
        .file_pattern
        .as_deref()
        .map(FileFilter::compile)
        .transpose()?;

    log::debug!(
        "search '{}' in {} (max {})",
        request.pattern,
        target.display(),
        request.max_results
    );

    let mut report = SearchReport {
        pattern: request.pattern.clone(),
        files: Vec::new(),
        total: 0,
        max_results: request.max_results,
    };

    if target.kind == PathKind::File {
        search_file(&target.path, &regex, request.context_lines, &mut report);
        return Ok(report);
    }

    let options = walk
        .include_hidden(false)
        .directories_only(false)
        .max_depth(None);
    for entry in TreeWalker::new(&target.path, options) {
        if report.capped() {
            break;
        }
        if entry.kind != EntryKind::File {
            continue;
        }
        if filter
            .as_ref()
            .is_some_and(|f| !f.accepts(&target.path, &entry.path))
        {
            continue;
        }
        search_file(&entry.path, &regex, request.context_lines, &mut report);
    }

    Ok(report)
}

fn search_file(path: &Path, regex: &Regex, context_lines: usize, report: &mut SearchReport) {
    let Some(text) = read_searchable(path) else {
        return;
    };
    let lines = split_lines(&text);

    let mut matches = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if matches.len() >= report.remaining() {
            break;
        }
        if !regex.is_match(line) {
            continue;
        }

        let before_start = idx.saturating_sub(context_lines);
        let after_end = idx
            .saturating_add(1)
            .saturating_add(context_lines)
            .min(lines.len());
        matches.push(SearchMatch {
            file_path: path.to_path_buf(),
            line_number: idx + 1,
            line_text: line.to_string(),
            context_before: context_range(&lines, before_start, idx),
            context_after: context_range(&lines, idx + 1, after_end),
        });
    }

    if !matches.is_empty() {
        report.total += matches.len();
        report.files.push(FileMatches {
            path: path.to_path_buf(),
            matches,
        });
    }
}

fn context_range(lines: &[&str], start: usize, end: usize) -> Vec<ContextLine> {
    (start..end)
        .map(|idx| ContextLine {
            line_number: idx + 1,
            text: lines[idx].to_string(),
        })
        .collect()
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.files.is_empty() {
            return write!(f, "No matches found for pattern '{}'", self.pattern);
        }

        write!(f, "Search results for pattern '{}':\n{}", self.pattern, "=".repeat(RULE_WIDTH))?;
        for file in &self.files {
            write!(f, "\n\n{}:", file.path.display())?;
            for m in &file.matches {
                for ctx in &m.context_before {
                    write!(f, "\n  {:4}- {}", ctx.line_number, ctx.text)?;
                }
                write!(f, "\n  {:4}: {}", m.line_number, m.line_text)?;
                for ctx in &m.context_after {
                    write!(f, "\n  {:4}- {}", ctx.line_number, ctx.text)?;
                }
            }
        }
        if self.capped() {
            write!(
                f,
                "\n\n(Showing first {} matches, more results may exist)",
                self.max_results
            )?;
        }
        Ok(())
    }
}
