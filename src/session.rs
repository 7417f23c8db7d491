//! Interactive session orchestration.
//!
//! The session is an explicit state machine. Each menu action runs to
//! completion and returns a [`Flow`] value; the top-level [`run`] loop is the
//! only place that reloads or terminates, so "replace the whole session for a
//! new path" is an ordinary return value instead of non-local control
//! transfer. All session entities (archive handle, size index, exclusion
//! selection) are created together in [`Session::load`] and dropped together
//! when the session is replaced; there is no partial invalidation.
//!
//! Everything the operator sees or answers goes through the [`Interact`]
//! trait, which keeps menu rendering and dialog plumbing out of the core.

use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::{ArchiveHandle, ArchiveKind};
use crate::error::{Error, Result};
use crate::index::SizeIndex;
use crate::rewrite::{self, RewriteReport, derive_destination_name};
use crate::selection::Selection;

/// How many ranked members the selection view offers.
pub const TOP_ENTRIES: usize = 50;

/// A menu action chosen by the operator.
///
/// A closed enumeration, matched exhaustively in
/// [`Session::handle_action`]; there is no runtime-mutable action registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pick exclusions from the largest members.
    SelectTop,
    /// Show the paths selected so far.
    ShowSelection,
    /// Write the filtered archive.
    WriteArchive,
    /// Move an existing stripped archive over the original and reload.
    PromoteStripped,
    /// Choose a different archive from the same directory.
    OpenArchive,
    /// Leave the session.
    Quit,
}

/// What the top-level loop should do after an action completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Stay on the current session and present the menu again.
    Continue,
    /// Discard the session and load this path from scratch.
    Reload(PathBuf),
    /// Terminate normally.
    Quit,
}

/// A selectable archive file with its size, for chooser and promotion views.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Path to the file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
}

/// The presentation layer the session talks to.
///
/// The core hands views out (ranked members, the current selection, rewrite
/// summaries) and receives decisions back (picked paths, yes/no answers).
/// Implementations render however they like; the scripted fakes in the test
/// suite answer from canned data.
pub trait Interact {
    /// Presents the main menu for the current archive.
    fn choose_action(&mut self, archive: &Path, archive_size: u64) -> Action;

    /// Offers the ranked `(size, path)` view; returns the paths to exclude.
    /// An empty vector means nothing was chosen.
    fn pick_exclusions(&mut self, top: &[(u64, &str)]) -> Vec<String>;

    /// Shows the current selection.
    fn show_selection(&mut self, paths: &[String]);

    /// Tells the operator nothing has been selected yet.
    fn notify_empty_selection(&mut self);

    /// Asks whether an existing destination may be overwritten.
    fn confirm_overwrite(&mut self, destination: &Path) -> bool;

    /// Asks whether the stripped archive should replace the original.
    fn confirm_promote(&mut self, original: &Candidate, stripped: &Candidate) -> bool;

    /// Asks whether to write the archive before quitting.
    fn confirm_final_write(&mut self) -> bool;

    /// Offers sibling archives to open; `None` cancels.
    fn choose_archive(&mut self, candidates: &[Candidate]) -> Option<PathBuf>;

    /// Announces that a blocking rewrite is about to start.
    fn rewrite_started(&mut self, _destination: &Path) {}

    /// Presents the post-rewrite summary.
    fn report_rewrite(&mut self, report: &RewriteReport);

    /// Surfaces a non-fatal error.
    fn report_error(&mut self, error: &Error);
}

/// One loaded archive and everything derived from it.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    handle: ArchiveHandle,
    index: SizeIndex,
    selection: Selection,
}

impl Session {
    /// Loads `path` from scratch: existence check, open, index.
    ///
    /// Every error here is fatal; the caller terminates the process with a
    /// non-zero exit rather than entering a degraded session.
    pub fn load(path: PathBuf) -> Result<Session> {
        if !path.exists() {
            return Err(Error::NotFound(path));
        }

        log::info!("using file {}", path.display());
        let mut handle = ArchiveHandle::open(&path)?;
        let index = SizeIndex::build(&mut handle)?;

        Ok(Session {
            path,
            handle,
            index,
            selection: Selection::new(),
        })
    }

    /// The currently active source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The archive kind decided at load time.
    pub fn kind(&self) -> ArchiveKind {
        self.handle.kind()
    }

    /// Current size of the source file on disk.
    pub fn archive_size(&self) -> Result<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    /// The ranked top view offered for selection.
    pub fn top_entries(&self) -> Vec<(u64, &str)> {
        self.index.top(TOP_ENTRIES)
    }

    /// The member size index built at load time.
    pub fn index(&self) -> &SizeIndex {
        &self.index
    }

    /// The paths selected for exclusion so far.
    pub fn selected(&self) -> &[String] {
        self.selection.paths()
    }

    /// Runs one menu action to completion.
    ///
    /// Fatal errors propagate to the caller; non-fatal ones too, and the
    /// [`run`] loop decides which is which. Declined confirmations are not
    /// errors, they simply leave state unchanged.
    pub fn handle_action(&mut self, action: Action, ui: &mut dyn Interact) -> Result<Flow> {
        match action {
            Action::SelectTop => {
                let top = self.index.top(TOP_ENTRIES);
                let picks = ui.pick_exclusions(&top);
                let added = self.selection.add_all(picks);
                log::debug!(
                    "{} new exclusions, {} total",
                    added,
                    self.selection.paths().len()
                );
                Ok(Flow::Continue)
            }

            Action::ShowSelection => {
                if self.selection.is_empty() {
                    ui.notify_empty_selection();
                } else {
                    ui.show_selection(self.selection.paths());
                }
                Ok(Flow::Continue)
            }

            Action::WriteArchive => {
                if self.write_archive(ui)?.is_some() {
                    // A fresh stripped file exists; offer promotion right away.
                    self.offer_promotion(ui)
                } else {
                    Ok(Flow::Continue)
                }
            }

            Action::PromoteStripped => self.offer_promotion(ui),

            Action::OpenArchive => {
                let dir = containing_dir(&self.path);
                if !dir.exists() {
                    return Err(Error::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("{} has gone missing", dir.display()),
                    )));
                }
                let candidates = list_candidates(&dir)?;
                match ui.choose_archive(&candidates) {
                    Some(choice) => Ok(Flow::Reload(choice)),
                    None => Ok(Flow::Continue),
                }
            }

            Action::Quit => {
                if self.selection.needs_final_write() && ui.confirm_final_write() {
                    self.write_archive(ui)?;
                }
                Ok(Flow::Quit)
            }
        }
    }

    /// Writes the filtered archive next to the source.
    ///
    /// Returns `Ok(None)` when the operator declines to overwrite an
    /// existing destination; nothing has been touched in that case. On
    /// success the write-state flag is set and the summary is presented.
    fn write_archive(&mut self, ui: &mut dyn Interact) -> Result<Option<RewriteReport>> {
        let destination = derive_destination_name(&self.path)
            .ok_or_else(|| Error::DestinationUnderivable(self.path.clone()))?;

        if destination.exists() && !ui.confirm_overwrite(&destination) {
            log::debug!("overwrite of {} declined", destination.display());
            return Ok(None);
        }

        ui.rewrite_started(&destination);
        let report = rewrite::rewrite(&self.path, &destination, self.selection.paths())?;
        self.selection.mark_written();
        ui.report_rewrite(&report);
        Ok(Some(report))
    }

    /// Offers to move the stripped sibling over the original.
    ///
    /// Acceptance renames and requests a full reload of the (now replaced)
    /// original path. With no stripped sibling on disk, or on decline, both
    /// files stay as they are.
    fn offer_promotion(&mut self, ui: &mut dyn Interact) -> Result<Flow> {
        let stripped_path = derive_destination_name(&self.path)
            .ok_or_else(|| Error::DestinationUnderivable(self.path.clone()))?;
        if !stripped_path.exists() {
            return Ok(Flow::Continue);
        }

        let original = Candidate {
            path: self.path.clone(),
            size: fs::metadata(&self.path)?.len(),
        };
        let stripped = Candidate {
            size: fs::metadata(&stripped_path)?.len(),
            path: stripped_path,
        };

        if !ui.confirm_promote(&original, &stripped) {
            return Ok(Flow::Continue);
        }

        log::debug!(
            "moving {} over {}",
            stripped.path.display(),
            self.path.display()
        );
        fs::rename(&stripped.path, &self.path)?;
        Ok(Flow::Reload(self.path.clone()))
    }
}

/// Lists the regular files in `dir` as chooser candidates, sorted by name.
pub fn list_candidates(dir: &Path) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if metadata.is_file() {
            candidates.push(Candidate {
                path: entry.path(),
                size: metadata.len(),
            });
        }
    }
    candidates.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(candidates)
}

/// The directory the chooser lists: the archive's parent, or the current
/// directory for bare relative names.
fn containing_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Top-level interactive loop.
///
/// A directory argument opens the chooser first; cancelling before any
/// archive was loaded is a normal exit. After that the loop presents the
/// menu, runs actions, performs requested reloads, and keeps going on
/// non-fatal errors. Fatal errors propagate and terminate the process.
pub fn run(start: &Path, ui: &mut dyn Interact) -> Result<()> {
    let initial = if start.is_dir() {
        let candidates = list_candidates(start)?;
        match ui.choose_archive(&candidates) {
            Some(choice) => choice,
            None => return Ok(()),
        }
    } else {
        start.to_path_buf()
    };

    let mut session = Session::load(initial)?;

    loop {
        let size = session.archive_size()?;
        let action = ui.choose_action(session.path(), size);
        match session.handle_action(action, ui) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Reload(path)) => session = Session::load(path)?,
            Ok(Flow::Quit) => return Ok(()),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => ui.report_error(&e),
        }
    }
}
