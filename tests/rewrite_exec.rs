//! Integration tests that exercise the external archiver.
//!
//! The rewrite invocation targets bsdtar (`--options` and `@archive`
//! manifest references); GNU tar rejects both. Tests that need a working
//! rewrite therefore probe `tar --version` first and skip on other
//! implementations, while the failure-path tests only need some `tar`
//! binary to exist.

mod common;

use std::process::Command;

use tempfile::TempDir;

use tartrim::{ARCHIVER, ArchiveHandle, Error, SizeIndex, rewrite};

fn archiver_version() -> Option<String> {
    let output = Command::new(ARCHIVER).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn bsdtar_available() -> bool {
    archiver_version().is_some_and(|v| v.contains("bsdtar"))
}

#[test]
fn rewrite_drops_the_excluded_member() {
    if !bsdtar_available() {
        eprintln!("skipping: {ARCHIVER} is not bsdtar");
        return;
    }

    let temp = TempDir::new().unwrap();
    let source = temp.path().join("site.tar.gz");
    let destination = temp.path().join("site-stripped.tar.gz");
    common::write_tar_gz(&source, &[("foo", b"drop me"), ("keep.txt", b"keep me")]);

    let report = rewrite::rewrite(&source, &destination, &["foo".to_string()]).unwrap();
    assert_eq!(report.destination, destination);
    assert_eq!(report.old_size, std::fs::metadata(&source).unwrap().len());
    assert_eq!(
        report.new_size,
        std::fs::metadata(&destination).unwrap().len()
    );

    // Reopen the rewritten archive: the excluded member is gone.
    let mut handle = ArchiveHandle::open(&destination).unwrap();
    let index = SizeIndex::build(&mut handle).unwrap();
    assert!(!index.contains("foo"));
    assert!(index.contains("keep.txt"));
}

#[test]
fn rewrite_with_no_exclusions_keeps_every_member() {
    if !bsdtar_available() {
        eprintln!("skipping: {ARCHIVER} is not bsdtar");
        return;
    }

    let temp = TempDir::new().unwrap();
    let source = temp.path().join("site.tar");
    let destination = temp.path().join("site-stripped.tar");
    common::write_tar(&source, &[("a.txt", b"a"), ("b.txt", b"b")]);

    rewrite::rewrite(&source, &destination, &[]).unwrap();

    let mut handle = ArchiveHandle::open(&destination).unwrap();
    let index = SizeIndex::build(&mut handle).unwrap();
    assert_eq!(index.len(), 2);
}

#[test]
fn failed_rewrite_surfaces_captured_stderr() {
    if archiver_version().is_none() {
        eprintln!("skipping: no {ARCHIVER} on PATH");
        return;
    }

    let temp = TempDir::new().unwrap();
    // The source exists (size probing must succeed) but its manifest is not
    // a readable archive, so every tar implementation exits non-zero.
    let source = temp.path().join("bogus.tar");
    std::fs::write(&source, b"not a tar archive").unwrap();
    let destination = temp.path().join("bogus-stripped.tar");

    let err = rewrite::rewrite(&source, &destination, &[]).unwrap_err();
    match err {
        Error::ArchiverFailed { status, stderr } => {
            assert!(!status.success());
            assert!(!stderr.is_empty());
        }
        other => panic!("expected ArchiverFailed, got: {other:?}"),
    }
}
