//! Exit codes for the CLI tool.

use tartrim::Error;

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Fatal error occurred
pub const FATAL_ERROR: i32 = 1;
/// Archive could not be found, opened or indexed
pub const BAD_ARCHIVE: i32 = 2;
/// Archive format is not implemented
pub const UNSUPPORTED: i32 = 3;
/// External archiver missing from PATH
pub const ARCHIVER_MISSING: i32 = 4;
/// Ctrl+C (128 + SIGINT)
pub const USER_INTERRUPT: i32 = 130;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)] // UserInterrupt reserved for signal handling
pub enum ExitCode {
    Success,
    FatalError,
    BadArchive,
    Unsupported,
    ArchiverMissing,
    UserInterrupt,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::FatalError => FATAL_ERROR,
            Self::BadArchive => BAD_ARCHIVE,
            Self::Unsupported => UNSUPPORTED,
            Self::ArchiverMissing => ARCHIVER_MISSING,
            Self::UserInterrupt => USER_INTERRUPT,
        }
    }
}

/// Converts a tartrim error to an exit code
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    match error {
        Error::Io(_) => ExitCode::FatalError,
        Error::NotFound(_) | Error::InvalidArchive { .. } => ExitCode::BadArchive,
        Error::UnsupportedFormat { .. } => ExitCode::Unsupported,
        Error::ArchiverNotFound => ExitCode::ArchiverMissing,
        Error::ArchiverFailed { .. } => ExitCode::FatalError,
        Error::DestinationUnderivable(_) => ExitCode::FatalError,
        // Future error variants - required by #[non_exhaustive]
        _ => ExitCode::FatalError,
    }
}
