mod common;

use pypkgkit::archive::{extract_tarball, move_to_target};
use pypkgkit::error::Error;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_extract_template_release() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    common::write_template(&template);
    let archive = temp_dir.path().join("release.tar.gz");
    common::pack_dir(&template, "uv-python-template-1.5.0", &archive);

    let dest = temp_dir.path().join("extract");
    let root = extract_tarball(&archive, &dest).unwrap();

    assert_eq!(root, dest.join("uv-python-template-1.5.0"));
    assert!(!dir_diff::is_different(&template, &root).unwrap());
}

#[test]
fn test_pax_global_header_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("github.tar.gz");
    {
        let file = fs::File::create(&archive).unwrap();
        let mut builder =
            tar::Builder::new(flate2::write::GzEncoder::new(file, flate2::Compression::default()));
        let comment = b"52 comment=0123456789abcdef0123456789abcdef01234567\n";
        let mut header = tar::Header::new_ustar();
        header.set_path("pax_global_header").unwrap();
        header.set_size(comment.len() as u64);
        header.set_entry_type(tar::EntryType::XGlobalHeader);
        header.set_cksum();
        builder.append(&header, &comment[..]).unwrap();

        let mut header = tar::Header::new_ustar();
        header.set_path("repo-abc/README.md").unwrap();
        header.set_size(2);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append(&header, &b"hi"[..]).unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }

    let root = extract_tarball(&archive, &temp_dir.path().join("extract")).unwrap();
    assert!(root.ends_with("repo-abc"));
    assert_eq!(fs::read_to_string(root.join("README.md")).unwrap(), "hi");
}

#[test]
fn test_traversal_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("evil.tar.gz");
    common::pack_raw(
        &[
            ("repo/README.md", b"fine"),
            ("repo/../../escaped.txt", b"evil"),
        ],
        &archive,
    );

    let dest = temp_dir.path().join("out/extract");
    let err = extract_tarball(&archive, &dest).unwrap_err();

    assert!(matches!(err, Error::PathTraversal { ref path } if path.contains("..")));
    assert!(!dest.exists());
    assert!(!temp_dir.path().join("escaped.txt").exists());
}

#[test]
fn test_absolute_member_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("abs.tar.gz");
    common::pack_raw(&[("/tmp/pypkgkit-absolute.txt", b"evil")], &archive);

    let err = extract_tarball(&archive, &temp_dir.path().join("extract")).unwrap_err();
    assert!(matches!(err, Error::PathTraversal { .. }));
}

fn pack_link(kind: tar::EntryType, target: &str, dest: &std::path::Path) {
    let file = fs::File::create(dest).unwrap();
    let mut builder =
        tar::Builder::new(flate2::write::GzEncoder::new(file, flate2::Compression::default()));
    let mut header = tar::Header::new_gnu();
    header.set_path("repo/README.md").unwrap();
    header.set_size(4);
    header.set_mode(0o644);
    header.set_cksum();
    builder.append(&header, &b"fine"[..]).unwrap();

    let mut link = tar::Header::new_gnu();
    link.set_path("repo/link").unwrap();
    link.set_entry_type(kind);
    link.set_link_name(target).unwrap();
    link.set_size(0);
    link.set_mode(0o777);
    link.set_cksum();
    builder.append(&link, std::io::empty()).unwrap();
    builder.into_inner().unwrap().finish().unwrap();
}

#[test]
fn test_escaping_links_rejected() {
    let temp_dir = TempDir::new().unwrap();
    for (kind, target) in [
        (tar::EntryType::Symlink, "../../outside"),
        (tar::EntryType::Symlink, "/etc/passwd"),
        (tar::EntryType::Link, "../outside"),
    ] {
        let archive = temp_dir.path().join("link.tar.gz");
        pack_link(kind, target, &archive);

        let dest = temp_dir.path().join("extract");
        let err = extract_tarball(&archive, &dest).unwrap_err();
        assert!(matches!(err, Error::PathTraversal { .. }), "{target}: {err:?}");
        assert!(!dest.exists());
    }
}

#[cfg(unix)]
#[test]
fn test_internal_symlink_kept() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("link.tar.gz");
    pack_link(tar::EntryType::Symlink, "README.md", &archive);

    let root = extract_tarball(&archive, &temp_dir.path().join("extract")).unwrap();
    assert_eq!(fs::read_link(root.join("link")).unwrap(), std::path::Path::new("README.md"));
}

#[test]
fn test_multiple_top_level_entries() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("two.tar.gz");
    common::pack_raw(&[("a/one.txt", b"1"), ("b/two.txt", b"2")], &archive);

    let err = extract_tarball(&archive, &temp_dir.path().join("extract")).unwrap_err();
    assert!(matches!(err, Error::ExtractionError(ref msg) if msg.contains("single top-level")));
}

#[test]
fn test_single_file_is_not_a_root() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("file.tar.gz");
    common::pack_raw(&[("README.md", b"just a file")], &archive);

    let err = extract_tarball(&archive, &temp_dir.path().join("extract")).unwrap_err();
    assert!(matches!(err, Error::ExtractionError(_)));
}

#[test]
fn test_empty_archive() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("empty.tar.gz");
    common::pack_raw(&[], &archive);

    let err = extract_tarball(&archive, &temp_dir.path().join("extract")).unwrap_err();
    assert!(matches!(err, Error::ExtractionError(ref msg) if msg.contains("empty")));
}

#[test]
fn test_corrupt_archive() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("corrupt.tar.gz");
    fs::write(&archive, b"<html>rate limited</html>").unwrap();

    let err = extract_tarball(&archive, &temp_dir.path().join("extract")).unwrap_err();
    assert!(matches!(err, Error::ExtractionError(_)));
}

#[test]
fn test_move_to_existing_target() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let target = temp_dir.path().join("target");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&target).unwrap();

    assert!(matches!(
        move_to_target(&src, &target),
        Err(Error::AlreadyExists { .. })
    ));
    assert!(src.exists());

    fs::remove_dir(&target).unwrap();
    move_to_target(&src, &target).unwrap();
    assert!(target.is_dir());
    assert!(!src.exists());
}
