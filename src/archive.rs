//! Archive opening and format dispatch.
//!
//! The loader decides the archive family purely from the filename suffix:
//! `.tar`, `.tar.gz` and `.tar.bz2` open as tar streams, everything else is
//! treated as a zip archive. Zip archives open (and a corrupt central
//! directory is detected here), but indexing rejects them later with a
//! distinct unsupported-format error.
//!
//! An [`ArchiveHandle`] owns its file descriptor for the lifetime of the
//! session that loaded it; dropping the handle releases the descriptor, which
//! keeps repeated reloads from accumulating open files.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;

use crate::error::{Error, Result};

/// The family an archive was dispatched to, derived from its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// A tar stream, possibly gzip- or bzip2-compressed.
    Tar,
    /// A zip archive. Opens, but is rejected at indexing time.
    Zip,
}

impl ArchiveKind {
    /// Derives the archive kind from a path's suffix.
    ///
    /// Anything that is not `.tar`, `.tar.gz` or `.tar.bz2` falls into the
    /// zip family, mirroring the loader's open dispatch.
    pub fn from_path(path: &Path) -> ArchiveKind {
        let name = path.to_string_lossy();
        if name.ends_with(".tar") || name.ends_with(".tar.gz") || name.ends_with(".tar.bz2") {
            ArchiveKind::Tar
        } else {
            ArchiveKind::Zip
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveKind::Tar => write!(f, "tar"),
            ArchiveKind::Zip => write!(f, "zip"),
        }
    }
}

/// The opened reader behind a handle.
pub(crate) enum Reader {
    Tar(tar::Archive<Box<dyn Read>>),
    Zip(zip::ZipArchive<BufReader<File>>),
}

/// An opened archive: the source path, its kind tag, and the open reader.
///
/// The handle is a scoped resource owned by the session; it is created at
/// load time and dropped wholesale on reload or exit.
pub struct ArchiveHandle {
    path: PathBuf,
    kind: ArchiveKind,
    pub(crate) reader: Reader,
}

impl fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl ArchiveHandle {
    /// Opens `path` as an archive, dispatching on its filename suffix.
    ///
    /// Open failures are fatal: a missing file, an unreadable file, or a zip
    /// archive whose central directory does not parse. Corruption inside a
    /// tar stream is only detected once members are enumerated, which is
    /// equally fatal (see [`SizeIndex::build`][crate::index::SizeIndex::build]).
    pub fn open(path: &Path) -> Result<ArchiveHandle> {
        let kind = ArchiveKind::from_path(path);
        let file = File::open(path)?;

        let reader = match kind {
            ArchiveKind::Tar => {
                let name = path.to_string_lossy();
                let stream: Box<dyn Read> = if name.ends_with(".tar.gz") {
                    Box::new(GzDecoder::new(file))
                } else if name.ends_with(".tar.bz2") {
                    Box::new(BzDecoder::new(file))
                } else {
                    Box::new(file)
                };
                Reader::Tar(tar::Archive::new(stream))
            }
            ArchiveKind::Zip => {
                let archive =
                    zip::ZipArchive::new(BufReader::new(file)).map_err(|e| Error::InvalidArchive {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    })?;
                Reader::Zip(archive)
            }
        };

        log::debug!("opened {} archive {}", kind, path.display());

        Ok(ArchiveHandle {
            path: path.to_path_buf(),
            kind,
            reader,
        })
    }

    /// Returns the path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the kind tag decided at open time.
    pub fn kind(&self) -> ArchiveKind {
        self.kind
    }
}
