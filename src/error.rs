//! Error types for archive trimming operations.
//!
//! This module provides the [`Error`] enum which represents all failure modes
//! of the inventory/selection/rewrite pipeline, along with a convenient
//! [`Result<T>`] type alias.
//!
//! Errors fall into two classes. Fatal errors (a missing or corrupt source
//! archive, a missing external archiver) terminate the whole process; there is
//! no partial-session recovery. Non-fatal errors (a failed rewrite, a source
//! name with no derivable destination) are reported and return control to the
//! interactive loop with state otherwise unchanged. Use [`Error::is_fatal`] to
//! classify a value.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use crate::archive::ArchiveKind;
use crate::rewrite::ARCHIVER;

/// The main error type for archive trimming operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred during file operations.
    ///
    /// This wraps [`std::io::Error`] and is returned when file operations
    /// fail: renaming the stripped archive over the original, statting the
    /// source, listing sibling archives, or spawning the external archiver
    /// for any reason other than the binary being absent.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive path given on the command line does not exist.
    #[error("unable to find file {}", .0.display())]
    NotFound(PathBuf),

    /// The archive could not be opened or enumerated.
    ///
    /// The input itself is assumed malformed (corrupt tar stream, bad zip
    /// signature, truncated member headers), so this is never retried.
    /// The reason carries the underlying diagnostic.
    #[error("invalid archive {}: {reason}", path.display())]
    InvalidArchive {
        /// The archive that failed to open or enumerate.
        path: PathBuf,
        /// The underlying parser diagnostic.
        reason: String,
    },

    /// The archive opened but its format is not supported for indexing.
    ///
    /// Distinct from [`InvalidArchive`][Self::InvalidArchive]: the input is
    /// well-formed, we just have not implemented anything past opening it.
    #[error("{kind} archives are not implemented")]
    UnsupportedFormat {
        /// The rejected archive kind.
        kind: ArchiveKind,
    },

    /// The external archiver was not found on `PATH`.
    #[error("'{ARCHIVER}' was not found on PATH")]
    ArchiverNotFound,

    /// The external archiver exited with a non-zero status.
    ///
    /// Carries the captured standard-error stream so the operator can see
    /// what the child process complained about. The session survives this:
    /// control returns to the menu so the selection can be adjusted and the
    /// rewrite retried.
    #[error("'{ARCHIVER}' failed ({status}): {stderr}")]
    ArchiverFailed {
        /// The child's exit status.
        status: ExitStatus,
        /// Captured stderr from the child.
        stderr: String,
    },

    /// No `-stripped` destination name can be derived for this source.
    ///
    /// Only `.tar.gz` and `.tar` sources have a derivable destination; this
    /// is a signaled outcome rather than a silently guessed name.
    #[error("no stripped destination name derivable for {}", .0.display())]
    DestinationUnderivable(PathBuf),
}

impl Error {
    /// Returns whether this error terminates the whole process.
    ///
    /// Rewrite failures and underivable destinations return control to the
    /// interactive loop; everything else is fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::ArchiverFailed { .. } | Error::DestinationUnderivable(_)
        )
    }
}

/// A specialized `Result` type for archive trimming operations.
pub type Result<T> = std::result::Result<T, Error>;
