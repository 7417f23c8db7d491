//! Exclusion selection state.

/// The working set of member paths marked for exclusion, plus a flag
/// recording whether the current set has been written out.
///
/// The set only grows within a session; it is never re-validated after a
/// reload, so an entry naming a since-renamed member is tolerated (the
/// archiver simply will not match it). Nothing is persisted across runs.
#[derive(Debug, Default)]
pub struct Selection {
    paths: Vec<String>,
    written: bool,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Selection {
        Selection::default()
    }

    /// Adds `picks` to the selection, skipping paths already present.
    ///
    /// Returns the number of paths actually added. Any non-empty submission
    /// clears the write-state flag, even when every pick is a duplicate: the
    /// operator touched the selection, so a previously written archive is
    /// treated as stale.
    pub fn add_all<I>(&mut self, picks: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        let mut touched = false;
        for pick in picks {
            touched = true;
            if !self.paths.contains(&pick) {
                self.paths.push(pick);
                added += 1;
            }
        }
        if touched {
            self.written = false;
        }
        added
    }

    /// The selected paths, in selection order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Returns whether nothing has been selected yet.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Records that the current selection has produced a written archive.
    pub fn mark_written(&mut self) {
        self.written = true;
    }

    /// Returns whether a pending exit should offer one last write: something
    /// is selected and the current set has not been written out.
    pub fn needs_final_write(&self) -> bool {
        !self.paths.is_empty() && !self.written
    }
}
