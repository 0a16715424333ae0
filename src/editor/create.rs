//! Whole-file creation.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};

use crate::error::FsError;
use crate::path::{PathKind, ResolvedPath};
use crate::text::count_lines;

use super::plural;

/// Result of `create`.
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub path: String,
    pub lines_written: usize,
}

/// Create a new file holding `content` verbatim.
///
/// Never overwrites: an existing path is `AlreadyExists`. Missing parent
/// directories are created.
pub fn create(target: &ResolvedPath, content: &str) -> Result<CreateReport, FsError> {
    let path = &target.path;
    if target.kind != PathKind::Missing {
        return Err(FsError::AlreadyExists {
            path: target.display(),
        });
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| FsError::from_io(e, parent, "creating"))?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists {
                path: target.display(),
            },
            _ => FsError::from_io(e, path, "writing to"),
        })?;
    file.write_all(content.as_bytes())
        .map_err(|e| FsError::from_io(e, path, "writing to"))?;

    let lines_written = count_lines(content);
    log::info!("created {} ({lines_written} lines)", path.display());
    Ok(CreateReport {
        path: target.display(),
        lines_written,
    })
}

impl fmt::Display for CreateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Success: Created '{}' with {} line{}",
            self.path,
            self.lines_written,
            plural(self.lines_written)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::resolve;
    use tempfile::tempdir;

    #[test]
    fn creates_file_and_parents() {
        let dir = tempdir().unwrap();
        let target = resolve("a/b/new.txt", dir.path()).unwrap();
        let report = create(&target, "one\ntwo\n").unwrap();

        assert_eq!(report.lines_written, 2);
        assert!(report.to_string().ends_with("with 2 lines"));
        assert_eq!(
            fs::read_to_string(dir.path().join("a/b/new.txt")).unwrap(),
            "one\ntwo\n"
        );
    }

    #[test]
    fn single_line_is_singular() {
        let dir = tempdir().unwrap();
        let target = resolve("one.txt", dir.path()).unwrap();
        assert!(create(&target, "x").unwrap().to_string().ends_with("with 1 line"));
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("keep.txt"), "original").unwrap();
        let target = resolve("keep.txt", dir.path()).unwrap();

        let err = create(&target, "x").unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join("keep.txt")).unwrap(),
            "original"
        );
    }

    #[test]
    fn stale_classification_still_never_overwrites() {
        let dir = tempdir().unwrap();
        let target = resolve("race.txt", dir.path()).unwrap();
        fs::write(dir.path().join("race.txt"), "winner").unwrap();

        assert!(matches!(create(&target, "loser"), Err(FsError::AlreadyExists { .. })));
        assert_eq!(
            fs::read_to_string(dir.path().join("race.txt")).unwrap(),
            "winner"
        );
    }
}
