//! Filtered archive rewriting via the external archiver.
//!
//! The rewrite never re-implements an archive codec. It drives the system
//! `tar` binary (resolved from `PATH`) to produce a filtered copy of the
//! source archive: one `--exclude` flag per excluded member, and the source
//! archive itself referenced as `@<source>` so the member list comes from the
//! original manifest instead of a filesystem walk. The child is spawned with
//! an argument vector; nothing passes through a shell, so member paths need
//! no quoting or escaping.
//!
//! Exactly one rewrite is ever in flight: the interactive session is strictly
//! sequential and blocks until the child exits.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// The external archiver binary, resolved from `PATH`.
pub const ARCHIVER: &str = "tar";

/// Outcome of a successful rewrite, for the post-rewrite summary.
#[derive(Debug, Clone)]
pub struct RewriteReport {
    /// The archive that was written.
    pub destination: PathBuf,
    /// Wall-clock time the external archiver took.
    pub elapsed: Duration,
    /// Size of the source archive in bytes.
    pub old_size: u64,
    /// Size of the written archive in bytes.
    pub new_size: u64,
}

/// Derives the `-stripped` destination name for a source archive.
///
/// A trailing `.tar.gz` becomes `-stripped.tar.gz` and a trailing `.tar`
/// becomes `-stripped.tar`; the rest of the path is untouched. Any other
/// suffix has no derivable destination and yields `None` rather than a
/// guessed name.
pub fn derive_destination_name(source: &Path) -> Option<PathBuf> {
    let name = source.to_string_lossy();
    if let Some(stem) = name.strip_suffix(".tar.gz") {
        return Some(PathBuf::from(format!("{stem}-stripped.tar.gz")));
    }
    if let Some(stem) = name.strip_suffix(".tar") {
        return Some(PathBuf::from(format!("{stem}-stripped.tar")));
    }
    None
}

/// Builds the archiver argument vector for a filtered rewrite.
///
/// Gzipped destinations are written at maximum compression. Each exclusion
/// is a discrete `--exclude <path>` pair; the final argument names the
/// source archive's manifest as the include list.
fn archiver_args(source: &Path, destination: &Path, exclusions: &[String]) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();

    if destination.to_string_lossy().ends_with(".tar.gz") {
        args.push("--options".into());
        args.push("gzip:compression-level=9".into());
        args.push("-czf".into());
    } else {
        args.push("-cf".into());
    }
    args.push(destination.as_os_str().to_owned());

    for path in exclusions {
        args.push("--exclude".into());
        args.push(path.into());
    }

    let mut manifest = OsString::from("@");
    manifest.push(source.as_os_str());
    args.push(manifest);

    args
}

/// Rewrites `source` into `destination`, omitting the excluded members.
///
/// Blocks until the child process exits. A child that cannot be spawned
/// because the binary is absent maps to [`Error::ArchiverNotFound`] (fatal);
/// a child that exits non-zero maps to [`Error::ArchiverFailed`] with its
/// captured stderr (non-fatal, the operator may retry). On success the
/// report carries the elapsed wall-clock time and the old and new file
/// sizes.
pub fn rewrite(source: &Path, destination: &Path, exclusions: &[String]) -> Result<RewriteReport> {
    let args = archiver_args(source, destination, exclusions);

    log::info!(
        "running: {} {}",
        ARCHIVER,
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let old_size = fs::metadata(source)?.len();
    let started = Instant::now();

    let output = Command::new(ARCHIVER)
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::ArchiverNotFound
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        return Err(Error::ArchiverFailed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let elapsed = started.elapsed();
    let new_size = fs::metadata(destination)?.len();

    log::info!(
        "rewrote {} in {:.2}s ({} -> {} bytes)",
        destination.display(),
        elapsed.as_secs_f64(),
        old_size,
        new_size
    );

    Ok(RewriteReport {
        destination: destination.to_path_buf(),
        elapsed,
        old_size,
        new_size,
    })
}
