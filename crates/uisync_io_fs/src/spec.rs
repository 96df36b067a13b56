//! Copy options, per-file statuses and top-level error types.

use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Outcome of copying one named file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumFileCopyStatus {
    /// Source file existed and was copied (or would be, in dry-run mode).
    Copied,
    /// Source file does not exist or is not a regular file.
    Missing,
    /// Copy attempt failed with the given IO error text.
    Failed(String),
}

impl EnumFileCopyStatus {
    pub fn is_copied(&self) -> bool {
        matches!(self, Self::Copied)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `copy_tree` and `copy_named_files`.
#[derive(Debug, Clone, Default)]
pub struct SpecCopyOptions {
    /// Maximum worker threads for file-copy stage. `None` copies serially.
    pub num_workers_max: Option<usize>,
    /// Do not mutate filesystem; record what would happen.
    pub if_dry_run: bool,
}

/// "Top-level call failed" errors. Any of these aborts the copy.
#[derive(Debug, Error)]
pub enum CopyTreeError {
    /// Source path does not exist. Nothing was created.
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// Source path exists but is not a directory.
    #[error("Source is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),
    /// Source and destination overlap (`src` contains `dst` or vice versa).
    #[error(
        "Source and destination directories overlap: {} <-> {}",
        source_dir.display(),
        destination_dir.display()
    )]
    SourceDestinationOverlap {
        /// Normalized source directory.
        source_dir: PathBuf,
        /// Normalized destination directory.
        destination_dir: PathBuf,
    },
    /// Destination directory initialization failed.
    #[error("Failed to initialize destination {}: {message}", path.display())]
    DestinationInitFailed {
        /// Destination path that failed initialization.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// IO failure while walking or copying. Earlier copies remain on disk.
    #[error("Failed to copy {name}: {message} ({})", path.display())]
    Io {
        /// Final component of the top-level source directory.
        name: String,
        /// Entry that was being processed.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
