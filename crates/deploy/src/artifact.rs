//! Loading the compiled contract code.

use offering_types::{boc, boc::BocError, Cell};
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// File name of the compiled contract, a bag of cells whose first root is
/// the code.
pub const ARTIFACT_FILE: &str = "direct_token_offering.fc.cell";

/// [`load_code`] error.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// No file at the given path.
    #[error("compiled contract not found at {}", path.display())]
    Missing {
        /// The path looked up.
        path: PathBuf,
    },
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file.
        path: PathBuf,
        /// The read failure.
        source: io::Error,
    },
    /// The file is not a valid bag of cells.
    #[error("invalid compiled contract {}: {source}", path.display())]
    Boc {
        /// The file.
        path: PathBuf,
        /// The decode failure.
        source: BocError,
    },
}

/// Read the code cell from the compiled contract at `path`.
pub fn load_code(path: &Path) -> Result<Cell, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ArtifactError::Missing {
            path: path.to_path_buf(),
        },
        _ => ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    boc::deserialize_root(&bytes).map_err(|source| ArtifactError::Boc {
        path: path.to_path_buf(),
        source,
    })
}
