//! Path normalisation and classification shared by every tool.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::FsError;

/// What currently exists at a resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Missing,
    File,
    Directory,
}

/// An absolute, `~`-expanded, symlink-resolved path plus its classification.
#[derive(Debug, Clone)]
pub struct ResolvedPath {
    /// The argument as the caller wrote it, used in listing headers.
    pub raw: String,
    pub path: PathBuf,
    pub kind: PathKind,
}

impl ResolvedPath {
    pub fn display(&self) -> String {
        self.path.display().to_string()
    }

    /// Fail with `PathNotFound` unless something exists here.
    pub fn require_existing(self) -> Result<Self, FsError> {
        match self.kind {
            PathKind::Missing => Err(FsError::PathNotFound {
                path: self.display(),
            }),
            _ => Ok(self),
        }
    }

    /// Fail unless this is an existing regular file.
    pub fn require_file(self) -> Result<Self, FsError> {
        match self.kind {
            PathKind::File => Ok(self),
            PathKind::Directory => Err(FsError::NotAFile { path: self.display() }),
            PathKind::Missing => Err(FsError::PathNotFound { path: self.display() }),
        }
    }

    /// Fail unless this is an existing directory.
    pub fn require_dir(self) -> Result<Self, FsError> {
        match self.kind {
            PathKind::Directory => Ok(self),
            PathKind::File => Err(FsError::NotADirectory {
                path: self.display(),
            }),
            PathKind::Missing => Err(FsError::PathNotFound {
                path: self.display(),
            }),
        }
    }
}

/// Resolve `raw` against `base` (the session working directory).
///
/// Missing paths resolve successfully with `PathKind::Missing`; callers pick
/// the `require_*` check matching their operation.
pub fn resolve(raw: &str, base: &Path) -> Result<ResolvedPath, FsError> {
    if raw.trim().is_empty() {
        return Err(FsError::MissingArgument("path".to_string()));
    }

    let expanded = expand_home(raw);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    let path = canonicalize_lenient(&normalize(&absolute));

    let kind = match fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => PathKind::Directory,
        Ok(_) => PathKind::File,
        Err(err) if err.kind() == io::ErrorKind::NotFound => PathKind::Missing,
        Err(err) => return Err(FsError::from_io(err, &path, "accessing")),
    };

    log::trace!("resolved '{raw}' to {} ({kind:?})", path.display());
    Ok(ResolvedPath {
        raw: raw.to_string(),
        path,
        kind,
    })
}

/// Expand a leading `~` to the user's home directory.
fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Lexically remove `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Canonicalize the deepest existing ancestor and re-append the rest.
fn canonicalize_lenient(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let mut missing = Vec::new();
    let mut current = path;
    while let Some(parent) = current.parent() {
        if let Some(name) = current.file_name() {
            missing.push(name.to_os_string());
        }
        if let Ok(canonical) = fs::canonicalize(parent) {
            let mut out = canonical;
            for name in missing.iter().rev() {
                out.push(name);
            }
            return out;
        }
        current = parent;
    }
    path.to_path_buf()
}

/// True if `path` lies under `root` (both absolute).
pub fn is_within(path: &Path, root: &Path) -> bool {
    let root = canonicalize_lenient(&normalize(root));
    path.starts_with(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn classifies_files_directories_and_missing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        assert_eq!(resolve("a.txt", dir.path()).unwrap().kind, PathKind::File);
        assert_eq!(resolve("sub", dir.path()).unwrap().kind, PathKind::Directory);
        assert_eq!(resolve("nope", dir.path()).unwrap().kind, PathKind::Missing);
    }

    #[test]
    fn relative_paths_are_made_absolute() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let resolved = resolve("sub/../sub/./new.txt", dir.path()).unwrap();
        assert!(resolved.path.is_absolute());
        assert!(resolved.path.ends_with("sub/new.txt"));
        assert_eq!(resolved.kind, PathKind::Missing);
    }

    #[test]
    fn missing_parents_are_kept() {
        let dir = tempdir().unwrap();
        let resolved = resolve("a/b/c.txt", dir.path()).unwrap();
        let canonical_root = fs::canonicalize(dir.path()).unwrap();
        assert_eq!(resolved.path, canonical_root.join("a/b/c.txt"));
    }

    #[test]
    fn home_is_expanded() {
        if let Some(home) = dirs::home_dir().filter(|home| home.is_dir()) {
            let resolved = resolve("~", Path::new("/")).unwrap();
            assert_eq!(resolved.path, fs::canonicalize(home).unwrap());
        }
    }

    #[test]
    fn require_checks_report_the_right_kind() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("f"), "x").unwrap();

        let err = resolve("f", dir.path()).unwrap().require_dir().unwrap_err();
        assert!(matches!(err, FsError::NotADirectory { .. }));

        let err = resolve(".", dir.path()).unwrap().require_file().unwrap_err();
        assert!(matches!(err, FsError::NotAFile { .. }));

        let err = resolve("gone", dir.path())
            .unwrap()
            .require_existing()
            .unwrap_err();
        assert!(matches!(err, FsError::PathNotFound { .. }));
    }

    #[test]
    fn require_errors_name_the_resolved_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("f"), "x").unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();

        let err = resolve("./f", dir.path()).unwrap().require_dir().unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Path '{}' is not a directory", root.join("f").display())
        );

        for err in [
            resolve("gone", dir.path()).unwrap().require_existing().unwrap_err(),
            resolve("gone", dir.path()).unwrap().require_dir().unwrap_err(),
            resolve("gone", dir.path()).unwrap().require_file().unwrap_err(),
        ] {
            assert_eq!(
                err.to_string(),
                format!("Path '{}' does not exist", root.join("gone").display())
            );
        }
    }

    #[test]
    fn empty_path_is_a_missing_argument() {
        let err = resolve("  ", Path::new("/")).unwrap_err();
        assert!(matches!(err, FsError::MissingArgument(_)));
    }
}
