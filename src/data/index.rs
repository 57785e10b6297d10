use std::path::Path;

use log::{debug, warn};

use crate::error::{LayerError, Result};

/// Ordered sample ids of one split, as listed in `{split}.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndex {
    ids: Vec<String>,
}

impl SplitIndex {
    /// Read a listing file with one image basename per line.
    ///
    /// Lines are trimmed and blank lines are skipped, so both `\n` and
    /// `\r\n` listings work. A listing without any id is an error: nothing
    /// could ever be sampled from it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LayerError::io(path, e))?;

        let mut ids = Vec::new();
        let mut blank = 0usize;
        for line in text.lines() {
            let id = line.trim();
            if id.is_empty() {
                blank += 1;
                continue;
            }
            ids.push(id.to_string());
        }

        // A single trailing newline doesn't produce a blank line via `lines()`,
        // so anything counted here is really in the file.
        if blank > 0 {
            warn!("{}: skipped {blank} blank line(s)", path.display());
        }
        if ids.is_empty() {
            return Err(LayerError::EmptyIndex {
                path: path.to_path_buf(),
            });
        }

        debug!("{}: {} sample ids", path.display(), ids.len());
        Ok(Self { ids })
    }

    pub fn from_ids(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.ids.get(i).map(String::as_str)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_listing(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.txt");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn keeps_file_order() {
        let (_dir, path) = write_listing("c\na\nb\n");
        let index = SplitIndex::load(&path).unwrap();
        assert_eq!(index.ids(), &["c", "a", "b"]);
        assert_eq!(index.get(1), Some("a"));
        assert_eq!(index.get(3), None);
    }

    #[test]
    fn tolerates_crlf_and_blank_lines() {
        let (_dir, path) = write_listing("one\r\n\r\n  two \r\nthree");
        let index = SplitIndex::load(&path).unwrap();
        assert_eq!(index.ids(), &["one", "two", "three"]);
    }

    #[test]
    fn empty_listing_is_error() {
        let (_dir, path) = write_listing("\n\n");
        let err = SplitIndex::load(&path).unwrap_err();
        assert!(matches!(err, LayerError::EmptyIndex { .. }));
    }

    #[test]
    fn missing_listing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SplitIndex::load(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LayerError::Io { .. }));
        assert!(err.to_string().contains("nope.txt"));
    }
}
