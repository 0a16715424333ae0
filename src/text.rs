//! UTF-8 reading and line splitting shared by the editor and the searcher.

use std::fs;
use std::path::Path;

use crate::error::FsError;

/// Read a whole file as UTF-8 text.
///
/// Undecodable content is `BinaryFile`, never a lossy conversion.
pub fn read_text(path: &Path) -> Result<String, FsError> {
    let bytes = fs::read(path).map_err(|e| FsError::from_io(e, path, "reading"))?;
    String::from_utf8(bytes).map_err(|_| FsError::BinaryFile {
        path: path.display().to_string(),
    })
}

/// Read a file for searching, or `None` when it is not searchable text.
///
/// Binary and unreadable files are filtered out here rather than reported.
pub fn read_searchable(path: &Path) -> Option<String> {
    match read_text(path) {
        Ok(text) => Some(text),
        Err(err @ FsError::BinaryFile { .. }) => {
            log::debug!("skipping {}: {err}", path.display());
            None
        }
        Err(err) => {
            log::warn!("skipping {}: {err}", path.display());
            None
        }
    }
}

/// Split text into lines without terminators.
///
/// Follows `str::lines`: `\n` and `\r\n` end a line, and a trailing
/// terminator does not produce an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Number of lines `split_lines` would produce.
pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}

/// The terminator used by the first line of `text`, defaulting to `\n`.
pub fn line_ending(text: &str) -> &'static str {
    match text.find('\n') {
        Some(idx) if idx > 0 && text.as_bytes()[idx - 1] == b'\r' => "\r\n",
        _ => "\n",
    }
}
