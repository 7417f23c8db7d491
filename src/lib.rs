//! # tartrim
//!
//! Interactive trimming of oversized members out of tar archives.
//!
//! The library is the core pipeline behind the `tartrim` binary: it opens an
//! archive, builds an in-memory size index of its members, accumulates an
//! exclusion set across interactive selections, and drives the external
//! `tar` binary to emit a filtered copy with a verifiable size delta. The
//! interactive surface (menus, checkbox lists, confirmations) lives in the
//! CLI and reaches the core only through [`session::Interact`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tartrim::{ArchiveHandle, Result, SizeIndex};
//!
//! fn largest_member(path: &Path) -> Result<Option<(u64, String)>> {
//!     let mut handle = ArchiveHandle::open(path)?;
//!     let index = SizeIndex::build(&mut handle)?;
//!     Ok(index
//!         .top(1)
//!         .first()
//!         .map(|(size, name)| (*size, name.to_string())))
//! }
//! ```
//!
//! Zip archives open but are deliberately rejected at indexing time; tar
//! archives (`.tar`, `.tar.gz`, `.tar.bz2`) are the supported inputs. The
//! rewrite itself always shells out to `tar` as an argument vector, never
//! through a shell.

pub mod archive;
pub mod error;
pub mod human;
pub mod index;
pub mod rewrite;
pub mod selection;
pub mod session;

pub use archive::{ArchiveHandle, ArchiveKind};
pub use error::{Error, Result};
pub use human::human_size;
pub use index::SizeIndex;
pub use rewrite::{ARCHIVER, RewriteReport, derive_destination_name};
pub use selection::Selection;
pub use session::{Action, Candidate, Flow, Interact, Session, TOP_ENTRIES, run};
