//! Lazy, depth-bounded directory traversal.
//!
//! The walker is an explicit stack of sibling iterators rather than a
//! recursive function: a consumer that stops pulling entries stops the walk,
//! and arbitrarily deep trees never grow the call stack.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Names never yielded nor descended into.
pub const IGNORED_NAMES: &[&str] = &[".git", "node_modules", "__pycache__", "venv"];

/// Marker name used in place of an unreadable directory's children.
pub const PERMISSION_DENIED_MARKER: &str = "[Permission Denied]";

/// Filters and limits applied to a walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub include_hidden: bool,
    pub directories_only: bool,
    /// Deepest level yielded; the root's children are level 1.
    pub max_depth: Option<usize>,
    pub ignored: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            include_hidden: false,
            directories_only: false,
            max_depth: None,
            ignored: IGNORED_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl WalkOptions {
    #[must_use]
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    #[must_use]
    pub fn directories_only(mut self, only: bool) -> Self {
        self.directories_only = only;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Add names to the ignore set.
    #[must_use]
    pub fn with_extra_ignored(mut self, extra: &[String]) -> Self {
        for name in extra {
            if !self.ignored.contains(name) {
                self.ignored.push(name.clone());
            }
        }
        self
    }

    /// The traversal filter: hidden entries and ignored names.
    pub fn is_excluded(&self, name: &str) -> bool {
        (!self.include_hidden && name.starts_with('.')) || self.ignored.iter().any(|n| n == name)
    }

    fn descends_below(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}

/// Type of a walked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Metadata could not be read, or a synthetic marker for a directory
    /// whose children could not be listed.
    Unreadable,
}

/// One step of a walk.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
    /// Level below the root, starting at 1.
    pub depth: usize,
    /// Last sibling at this level after filtering.
    pub is_last: bool,
    pub is_symlink: bool,
}

impl WalkEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// True for the synthetic entry standing in for unreadable children.
    pub fn is_marker(&self) -> bool {
        self.kind == EntryKind::Unreadable && self.name.starts_with('[')
    }
}

/// Pre-order walk: directories first, then case-insensitive name order.
pub struct TreeWalker {
    options: WalkOptions,
    stack: Vec<std::vec::IntoIter<WalkEntry>>,
    pending: Option<(PathBuf, usize)>,
}

impl TreeWalker {
    pub fn new(root: &Path, options: WalkOptions) -> Self {
        let pending = options
            .descends_below(0)
            .then(|| (root.to_path_buf(), 1));
        Self {
            options,
            stack: Vec::new(),
            pending,
        }
    }

    fn read_level(&self, dir: &Path, depth: usize) -> Vec<WalkEntry> {
        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(err) => {
                log::warn!("cannot read directory {}: {err}", dir.display());
                return vec![unreadable_marker(dir, depth, &err)];
            }
        };

        let mut entries = Vec::new();
        for entry in read_dir.filter_map(|entry| readable_entry(dir, entry)) {
            let name = entry.file_name().to_string_lossy().to_string();
            if self.options.is_excluded(&name) {
                continue;
            }

            let path = entry.path();
            let is_symlink = entry.file_type().is_ok_and(|ft| ft.is_symlink());
            let kind = match fs::metadata(&path) {
                Ok(meta) if meta.is_dir() => EntryKind::Directory,
                Ok(_) => EntryKind::File,
                // dangling link
                Err(_) if is_symlink => EntryKind::File,
                Err(_) => EntryKind::Unreadable,
            };
            if self.options.directories_only && kind != EntryKind::Directory {
                continue;
            }

            entries.push(WalkEntry {
                path,
                name,
                kind,
                depth,
                is_last: false,
                is_symlink,
            });
        }

        entries.sort_by(|a, b| {
            b.is_dir()
                .cmp(&a.is_dir())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.name.cmp(&b.name))
        });
        if let Some(last) = entries.last_mut() {
            last.is_last = true;
        }
        entries
    }
}

impl Iterator for TreeWalker {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<WalkEntry> {
        loop {
            if let Some((dir, depth)) = self.pending.take() {
                let level = self.read_level(&dir, depth);
                self.stack.push(level.into_iter());
            }

            let siblings = self.stack.last_mut()?;
            match siblings.next() {
                Some(entry) => {
                    // links are shown but never followed, so cycles cannot form
                    if entry.is_dir() && !entry.is_symlink && self.options.descends_below(entry.depth)
                    {
                        self.pending = Some((entry.path.clone(), entry.depth + 1));
                    }
                    return Some(entry);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Drop an entry the OS failed to return, logging it.
fn readable_entry<T>(dir: &Path, entry: io::Result<T>) -> Option<T> {
    match entry {
        Ok(entry) => Some(entry),
        Err(err) => {
            log::warn!("skipping entry in {}: {err}", dir.display());
            None
        }
    }
}

fn unreadable_marker(dir: &Path, depth: usize, err: &io::Error) -> WalkEntry {
    let name = if err.kind() == io::ErrorKind::PermissionDenied {
        PERMISSION_DENIED_MARKER.to_string()
    } else {
        format!("[Unreadable: {err}]")
    };
    WalkEntry {
        path: dir.to_path_buf(),
        name,
        kind: EntryKind::Unreadable,
        depth,
        is_last: true,
        is_symlink: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("Docs")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();
        fs::write(root.join("A.txt"), "a").unwrap();
        fs::write(root.join(".env"), "secret").unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("src/nested/deep.rs"), "").unwrap();
        dir
    }

    fn names(walker: TreeWalker) -> Vec<(usize, String)> {
        walker.map(|e| (e.depth, e.name)).collect()
    }

    #[test]
    fn orders_directories_first_then_case_insensitive() {
        let dir = fixture();
        let walker = TreeWalker::new(dir.path(), WalkOptions::default().max_depth(Some(1)));
        assert_eq!(
            names(walker),
            vec![
                (1, "Docs".to_string()),
                (1, "src".to_string()),
                (1, "A.txt".to_string()),
                (1, "b.txt".to_string()),
            ]
        );
    }

    #[test]
    fn walks_pre_order_without_limit() {
        let dir = fixture();
        let walker = TreeWalker::new(dir.path(), WalkOptions::default());
        assert_eq!(
            names(walker),
            vec![
                (1, "Docs".to_string()),
                (1, "src".to_string()),
                (2, "nested".to_string()),
                (3, "deep.rs".to_string()),
                (2, "main.rs".to_string()),
                (1, "A.txt".to_string()),
                (1, "b.txt".to_string()),
            ]
        );
    }

    #[test]
    fn hidden_entries_are_opt_in_but_ignored_names_never_appear() {
        let dir = fixture();
        let options = WalkOptions::default().include_hidden(true).max_depth(Some(1));
        let found: Vec<String> = TreeWalker::new(dir.path(), options).map(|e| e.name).collect();
        assert!(found.contains(&".env".to_string()));
        assert!(!found.contains(&".git".to_string()));
        assert!(!found.contains(&"node_modules".to_string()));
    }

    #[test]
    fn directories_only_filters_files_and_fixes_last_flags() {
        let dir = fixture();
        let options = WalkOptions::default().directories_only(true);
        let entries: Vec<WalkEntry> = TreeWalker::new(dir.path(), options).collect();
        assert!(entries.iter().all(WalkEntry::is_dir));
        let src = entries.iter().find(|e| e.name == "src").unwrap();
        assert!(src.is_last);
        let docs = entries.iter().find(|e| e.name == "Docs").unwrap();
        assert!(!docs.is_last);
    }

    #[test]
    fn zero_depth_yields_nothing() {
        let dir = fixture();
        let walker = TreeWalker::new(dir.path(), WalkOptions::default().max_depth(Some(0)));
        assert_eq!(walker.count(), 0);
    }

    #[test]
    fn extra_ignored_names_are_applied() {
        let dir = fixture();
        let options = WalkOptions::default().with_extra_ignored(&["src".to_string()]);
        assert!(TreeWalker::new(dir.path(), options).all(|e| e.name != "src" && e.name != "main.rs"));
    }

    #[test]
    fn failed_entries_are_skipped_not_fatal() {
        let dir = Path::new("/data");
        let entries = vec![
            Ok("a"),
            Err(io::Error::other("stale handle")),
            Ok("b"),
        ];
        let kept: Vec<&str> = entries
            .into_iter()
            .filter_map(|entry| readable_entry(dir, entry))
            .collect();
        assert_eq!(kept, vec!["a", "b"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let dir = fixture();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("src/loop")).unwrap();
        let entries: Vec<WalkEntry> = TreeWalker::new(dir.path(), WalkOptions::default()).collect();
        let link = entries.iter().find(|e| e.name == "loop").unwrap();
        assert!(link.is_symlink);
        assert!(link.is_dir());
        assert!(entries.iter().all(|e| e.depth <= 3));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_yields_marker_and_walk_continues() {
        use std::os::unix::fs::PermissionsExt;

        let dir = fixture();
        let locked = dir.path().join("src/nested");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            // running with elevated privileges; nothing to observe
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let entries: Vec<WalkEntry> = TreeWalker::new(dir.path(), WalkOptions::default()).collect();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let marker = entries.iter().find(|e| e.is_marker()).unwrap();
        assert_eq!(marker.name, PERMISSION_DENIED_MARKER);
        assert_eq!(marker.depth, 3);
        assert!(entries.iter().any(|e| e.name == "main.rs"));
        assert!(entries.iter().any(|e| e.name == "b.txt"));
    }
}
