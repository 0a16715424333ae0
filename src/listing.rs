//! Flat or recursive directory listings.

use std::fmt;
use std::fs::{self, Metadata};

use chrono::{DateTime, Local};

use crate::error::FsError;
use crate::path::ResolvedPath;
use crate::walker::{EntryKind, TreeWalker, WalkEntry, WalkOptions};

/// Indentation spaces per level in recursive listings.
pub const INDENT_SPACES: usize = 2;

const RULE_WIDTH: usize = 50;

/// Flags for a listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRequest {
    pub show_hidden: bool,
    pub long_format: bool,
    pub recursive: bool,
}

/// Size, permission bits and modification time of an entry.
#[derive(Debug, Clone)]
pub struct EntryMetadata {
    pub size: u64,
    pub permission_bits: u32,
    pub modified_at: Option<DateTime<Local>>,
}

impl EntryMetadata {
    fn from_metadata(meta: &Metadata) -> Self {
        Self {
            size: meta.len(),
            permission_bits: permission_bits(meta),
            modified_at: meta.modified().ok().map(DateTime::<Local>::from),
        }
    }
}

/// A listed entry.
#[derive(Debug, Clone)]
pub struct ListedEntry {
    pub entry: WalkEntry,
    pub metadata: Option<EntryMetadata>,
}

/// Result of `list`.
#[derive(Debug, Clone)]
pub struct Listing {
    /// The path as the caller wrote it.
    pub display: String,
    pub long_format: bool,
    pub entries: Vec<ListedEntry>,
    pub directories: usize,
    pub files: usize,
}

/// List the entries of a directory.
pub fn list(
    target: &ResolvedPath,
    request: ListRequest,
    walk: WalkOptions,
) -> Result<Listing, FsError> {
    let target = target.clone().require_dir()?;
    log::debug!("ls {} {request:?}", target.display());

    let max_depth = if request.recursive { None } else { Some(1) };
    let options = walk.include_hidden(request.show_hidden).max_depth(max_depth);

    let mut listing = Listing {
        display: target.raw.clone(),
        long_format: request.long_format,
        entries: Vec::new(),
        directories: 0,
        files: 0,
    };

    for entry in TreeWalker::new(&target.path, options) {
        match entry.kind {
            EntryKind::Directory => listing.directories += 1,
            EntryKind::File => listing.files += 1,
            EntryKind::Unreadable if !entry.is_marker() => listing.files += 1,
            EntryKind::Unreadable => {}
        }
        let metadata = if request.long_format && !entry.is_marker() {
            fs::metadata(&entry.path)
                .ok()
                .map(|meta| EntryMetadata::from_metadata(&meta))
        } else {
            None
        };
        listing.entries.push(ListedEntry { entry, metadata });
    }

    Ok(listing)
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn format_entry(&self, listed: &ListedEntry) -> String {
        let entry = &listed.entry;
        let indent = " ".repeat(entry.depth.saturating_sub(1) * INDENT_SPACES);
        if entry.is_marker() {
            return format!("{indent}{}", entry.name);
        }
        if !self.long_format {
            let suffix = match entry.kind {
                EntryKind::Directory => "/",
                EntryKind::File => "",
                EntryKind::Unreadable => "?",
            };
            return format!("{indent}{}{suffix}", entry.name);
        }

        let kind = if entry.is_dir() { "DIR" } else { "FILE" };
        match &listed.metadata {
            Some(meta) => {
                let modified = meta
                    .modified_at
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "-".repeat(19));
                format!(
                    "{indent}{:03o} {kind:4} {:>10} {modified} {}",
                    meta.permission_bits, meta.size, entry.name
                )
            }
            None => format!("{indent}??? {kind:4} {:>10} {:19} {}", "?", "?", entry.name),
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Directory '{}' is empty", self.display);
        }
        writeln!(f, "Contents of '{}':", self.display)?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for listed in &self.entries {
            writeln!(f, "{}", self.format_entry(listed))?;
        }
        write!(f, "\n{} directories, {} files", self.directories, self.files)
    }
}

#[cfg(unix)]
fn permission_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn permission_bits(meta: &Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}
