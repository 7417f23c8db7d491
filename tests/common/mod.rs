//! Shared fixtures for integration tests.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

/// Builds an uncompressed tar stream in memory with the given regular-file
/// entries.
pub fn build_tar(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, path, *data)
            .expect("append tar entry");
    }
    builder.into_inner().expect("finish tar stream")
}

/// Builds a tar stream that also carries a directory entry, for tests that
/// check non-regular members are skipped.
#[allow(dead_code)]
pub fn build_tar_with_dir(dir: &str, entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());

    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::dir());
    header.set_size(0);
    header.set_mode(0o755);
    builder
        .append_data(&mut header, dir, &[][..])
        .expect("append dir entry");

    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, path, *data)
            .expect("append tar entry");
    }
    builder.into_inner().expect("finish tar stream")
}

/// Writes an uncompressed `.tar` fixture to `path`.
#[allow(dead_code)]
pub fn write_tar(path: &Path, entries: &[(&str, &[u8])]) {
    std::fs::write(path, build_tar(entries)).expect("write tar fixture");
}

/// Writes a gzip-compressed `.tar.gz` fixture to `path`.
#[allow(dead_code)]
pub fn write_tar_gz(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create tar.gz fixture");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(&build_tar(entries))
        .expect("write tar.gz fixture");
    encoder.finish().expect("finish gzip stream");
}

/// Writes a bzip2-compressed `.tar.bz2` fixture to `path`.
#[allow(dead_code)]
pub fn write_tar_bz2(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create tar.bz2 fixture");
    let mut encoder = bzip2::write::BzEncoder::new(file, bzip2::Compression::best());
    encoder
        .write_all(&build_tar(entries))
        .expect("write tar.bz2 fixture");
    encoder.finish().expect("finish bzip2 stream");
}

/// Writes a stored (uncompressed) `.zip` fixture to `path`.
#[allow(dead_code)]
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create zip fixture");
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        writer.start_file(*name, options).expect("start zip entry");
        writer.write_all(data).expect("write zip entry");
    }
    writer.finish().expect("finish zip fixture");
}
