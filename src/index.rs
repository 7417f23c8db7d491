//! Member size inventory.
//!
//! [`SizeIndex`] maps archive member paths to their sizes in bytes. It is
//! built once per load by enumerating the archive's members and is immutable
//! until the next load. Only regular-file members contribute entries;
//! directories, symlinks and other special types are skipped.
//!
//! The ranked views are recomputed on demand rather than cached. The index is
//! bounded by the archive's member count and ranking only happens on an
//! interactive path, so there is nothing to win by caching.

use std::collections::HashMap;

use crate::archive::{ArchiveHandle, Reader};
use crate::error::{Error, Result};

/// Mapping from member path to size in bytes, in encounter order.
#[derive(Debug, Default)]
pub struct SizeIndex {
    entries: Vec<(String, u64)>,
}

impl SizeIndex {
    /// Enumerates the archive behind `handle` and builds the size index.
    ///
    /// Tar members are read in stream order; an entry whose type is not
    /// "regular file" is skipped. Enumeration failures (truncated stream,
    /// corrupt member header, bad compressed data) are fatal and surface the
    /// underlying diagnostic. Zip archives are rejected with
    /// [`Error::UnsupportedFormat`], which is deliberately distinct from a
    /// corruption error.
    pub fn build(handle: &mut ArchiveHandle) -> Result<SizeIndex> {
        let path = handle.path().to_path_buf();
        let kind = handle.kind();
        let invalid = |reason: String| Error::InvalidArchive {
            path: path.clone(),
            reason,
        };

        log::debug!("indexing members of {}", path.display());

        let archive = match &mut handle.reader {
            Reader::Tar(archive) => archive,
            Reader::Zip(_) => return Err(Error::UnsupportedFormat { kind }),
        };

        let mut entries: Vec<(String, u64)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for member in archive.entries().map_err(|e| invalid(e.to_string()))? {
            let member = member.map_err(|e| invalid(e.to_string()))?;
            if !member.header().entry_type().is_file() {
                continue;
            }

            let name = member
                .path()
                .map_err(|e| invalid(e.to_string()))?
                .to_string_lossy()
                .into_owned();
            let size = member.header().size().map_err(|e| invalid(e.to_string()))?;

            // A member name can appear more than once (appended archives);
            // the last occurrence wins, keeping the first encounter position.
            match positions.get(&name) {
                Some(&at) => entries[at].1 = size,
                None => {
                    positions.insert(name.clone(), entries.len());
                    entries.push((name, size));
                }
            }
        }

        log::debug!("indexed {} regular-file members", entries.len());

        Ok(SizeIndex { entries })
    }

    /// Number of indexed members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the index holds no members.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether `path` is an indexed member.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == path)
    }

    /// All `(size, path)` pairs, largest first.
    ///
    /// Ties keep the encounter order of the underlying enumeration (the sort
    /// is stable). Recomputed on every call.
    pub fn ranked(&self) -> Vec<(u64, &str)> {
        let mut ranked: Vec<(u64, &str)> = self
            .entries
            .iter()
            .map(|(name, size)| (*size, name.as_str()))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked
    }

    /// The first `n` pairs of [`ranked`][Self::ranked].
    ///
    /// Returns fewer than `n` entries when the archive has fewer members;
    /// there is no padding.
    pub fn top(&self, n: usize) -> Vec<(u64, &str)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(entries: &[(&str, u64)]) -> SizeIndex {
        SizeIndex {
            entries: entries
                .iter()
                .map(|(name, size)| (name.to_string(), *size))
                .collect(),
        }
    }

    #[test]
    fn ranked_sorts_by_size_descending() {
        let index = index_of(&[("small", 10), ("big", 2048), ("tiny", 1)]);
        let ranked = index.ranked();
        assert_eq!(ranked, vec![(2048, "big"), (10, "small"), (1, "tiny")]);
    }

    #[test]
    fn ranked_ties_keep_encounter_order() {
        let index = index_of(&[("first", 7), ("second", 7), ("third", 7)]);
        let ranked = index.ranked();
        assert_eq!(ranked, vec![(7, "first"), (7, "second"), (7, "third")]);
    }

    #[test]
    fn top_never_pads() {
        let index = index_of(&[("a", 3), ("b", 2), ("c", 1)]);
        assert_eq!(index.top(50).len(), 3);
        assert_eq!(index.top(2), vec![(3, "a"), (2, "b")]);
        assert!(index_of(&[]).top(50).is_empty());
    }

    #[test]
    fn contains_looks_up_by_exact_name() {
        let index = index_of(&[("dir/file.bin", 4)]);
        assert!(index.contains("dir/file.bin"));
        assert!(!index.contains("file.bin"));
    }
}
