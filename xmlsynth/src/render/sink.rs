//! Destinations for rendered documents

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{SynthError, SynthResult};

/// Receives rendered documents
pub trait DocumentSink {
    /// Called once before the first document of a batch of `count`
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be prepared.
    fn begin(&mut self, _count: usize) -> SynthResult<()> {
        Ok(())
    }

    /// Store document number `index` (1-based), returning where it went
    /// when the destination is a file
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be stored.
    fn write(&mut self, index: usize, document: &str) -> SynthResult<Option<PathBuf>>;
}

impl DocumentSink for Vec<String> {
    fn write(&mut self, _index: usize, document: &str) -> SynthResult<Option<PathBuf>> {
        self.push(document.to_string());
        Ok(None)
    }
}

/// Writes `<prefix>_<NNNN>.xml` files into a directory
///
/// Each document goes to a temporary file in the same directory first and is
/// renamed into place once complete, so a file under its final name is never
/// partial.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    prefix: String,
    width: usize,
}

impl DirectorySink {
    /// Minimum zero-padding of the sequence number
    pub const MIN_WIDTH: usize = 4;

    /// Create the directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> SynthResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| SynthError::io(&dir, source))?;
        Ok(Self {
            dir,
            prefix: prefix.into(),
            width: Self::MIN_WIDTH,
        })
    }

    /// Output directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name used for document `index`
    #[must_use]
    pub fn file_name(&self, index: usize) -> String {
        format!("{}_{index:0width$}.xml", self.prefix, width = self.width)
    }
}

impl DocumentSink for DirectorySink {
    fn begin(&mut self, count: usize) -> SynthResult<()> {
        self.width = count.to_string().len().max(Self::MIN_WIDTH);
        Ok(())
    }

    fn write(&mut self, index: usize, document: &str) -> SynthResult<Option<PathBuf>> {
        let path = self.dir.join(self.file_name(index));
        let mut staging =
            NamedTempFile::new_in(&self.dir).map_err(|source| SynthError::io(&self.dir, source))?;
        staging
            .write_all(document.as_bytes())
            .and_then(|()| staging.flush())
            .map_err(|source| SynthError::io(staging.path(), source))?;
        staging.persist(&path)?;
        Ok(Some(path))
    }
}
