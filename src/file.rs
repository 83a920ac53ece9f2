//! Reading and saving documents on disk.
//!
//! Loads read the whole file before anything is handed to the document, and
//! saves stage into a temporary file next to the target that is renamed
//! over it, so a failure on either side leaves both the document and the
//! file on disk as they were.

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::document::TextDocument;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{} is not valid UTF-8", .path.display())]
    Encoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot replace {}: {source}", .path.display())]
    Persist { path: PathBuf, source: io::Error },
}

impl FileError {
    /// Whether the file simply doesn't exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Open { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. }
            | Self::Read { path, .. }
            | Self::Encoding { path, .. }
            | Self::Write { path, .. }
            | Self::Persist { path, .. } => path,
        }
    }
}

/// Read `path` as lines of text with terminators stripped.
///
/// # Errors
///
/// Returns [`FileError::Open`] or [`FileError::Read`] on I/O failure and
/// [`FileError::Encoding`] if the contents are not UTF-8.
pub fn read_lines(path: &Path) -> Result<Vec<String>, FileError> {
    let mut file = fs::File::open(path).map_err(|source| FileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| FileError::Encoding {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.lines().map(ToOwned::to_owned).collect())
}

/// Write `document` to `path` all-or-nothing.
///
/// An existing file's permissions carry over to the replacement.
///
/// # Errors
///
/// Returns [`FileError::Write`] if the temporary file can't be created or
/// written, and [`FileError::Persist`] if it can't be moved into place. The
/// target is untouched in both cases.
pub fn save_atomic(path: &Path, document: &TextDocument) -> Result<(), FileError> {
    let write_err = |source: io::Error| FileError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        document.store(&mut writer).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
    }
    staged.as_file().sync_all().map_err(write_err)?;

    if let Ok(metadata) = fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_err)?;
    }

    staged.persist(path).map_err(|err| FileError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    tracing::info!(path = %path.display(), lines = document.line_count(), "saved");
    Ok(())
}
