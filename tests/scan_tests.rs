// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for Markdown tree scanning

use article_translate::scan::collect_markdown_files;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "---\ntitle: t\n---\n").unwrap();
}

#[test]
fn test_scan_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let files =
        collect_markdown_files(&dir.path().join("jp")).expect("missing root is not an error");
    assert!(files.is_empty());
}

#[test]
fn test_scan_root_below_a_file_is_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("articles");
    fs::write(&file, "not a directory").unwrap();

    let result = collect_markdown_files(&file.join("zh"));
    assert!(result.is_err(), "only a missing root is treated as empty");
}

#[cfg(unix)]
#[test]
fn test_scan_unreadable_subdirectory_is_error() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    touch(dir.path(), "post.md");
    touch(dir.path(), "locked/inner.md");
    let locked = dir.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can still read the directory; nothing to check then.
    let readable = fs::read_dir(&locked).is_ok();
    let result = collect_markdown_files(dir.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if !readable {
        let err = result.expect_err("permission error must propagate");
        assert!(format!("{:#}", err).contains("scanning"), "{:#}", err);
    }
}

#[test]
fn test_scan_empty_directory() {
    let dir = TempDir::new().unwrap();
    let files = collect_markdown_files(dir.path()).unwrap();
    assert!(files.is_empty());
}

#[test]
fn test_scan_collects_nested_markdown_sorted() {
    let dir = TempDir::new().unwrap();
    // Created out of order on purpose.
    touch(dir.path(), "zeta.md");
    touch(dir.path(), "guides/deep/nested.md");
    touch(dir.path(), "alpha.md");
    touch(dir.path(), "guides/intro.md");

    let files = collect_markdown_files(dir.path()).unwrap();
    assert_eq!(
        files,
        vec![
            "alpha.md",
            "guides/deep/nested.md",
            "guides/intro.md",
            "zeta.md"
        ]
    );
}

#[test]
fn test_scan_ignores_non_markdown_files() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "post.md");
    fs::write(dir.path().join("cover.png"), [0u8, 1, 2]).unwrap();
    fs::write(dir.path().join("notes.markdown"), "x").unwrap();
    fs::write(dir.path().join("draft.md.bak"), "x").unwrap();
    // A directory named like a Markdown file is traversed, not collected.
    touch(dir.path(), "folder.md/inner.md");

    let files = collect_markdown_files(dir.path()).unwrap();
    assert_eq!(files, vec!["folder.md/inner.md", "post.md"]);
}

#[test]
fn test_scan_output_is_sorted_and_unique() {
    let dir = TempDir::new().unwrap();
    for name in ["c.md", "a.md", "b/a.md", "b.md", "a/b.md"] {
        touch(dir.path(), name);
    }

    let files = collect_markdown_files(dir.path()).unwrap();
    let mut expected = files.clone();
    expected.sort();
    expected.dedup();
    assert_eq!(files, expected);
    assert_eq!(files.len(), 5);
}
