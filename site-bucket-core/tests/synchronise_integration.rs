use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use site_bucket_core::contract::{Bucket, MockObjectStore};
use site_bucket_core::synchronise::{plan, synchronise, upload_all, SyncEntry, SyncError};
use tempfile::tempdir;

fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("fixture parent directories should be creatable");
    }
    fs::write(&path, contents).expect("fixture file should be writable");
}

fn keys(entries: &[SyncEntry]) -> BTreeSet<String> {
    entries.iter().map(|e| e.key.clone()).collect()
}

#[test]
fn plan_collects_every_regular_file_under_nested_directories() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write_file(root, "index.html", "<h1>home</h1>");
    write_file(root, "error.html", "<h1>missing</h1>");
    write_file(root, "css/style.css", "body {}");
    write_file(root, "assets/img/logo.png", "not really a png");
    write_file(root, "docs/guide/intro.md", "# intro");
    fs::create_dir_all(root.join("assets/empty")).unwrap();

    let entries = plan(root).expect("plan should succeed on a readable tree");

    let expected: BTreeSet<String> = [
        "index.html",
        "error.html",
        "css/style.css",
        "assets/img/logo.png",
        "docs/guide/intro.md",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(
        keys(&entries),
        expected,
        "every regular file should be planned under its slash-separated key"
    );
    for entry in &entries {
        assert!(
            entry.local_path.is_file(),
            "planned path {} should point at a regular file",
            entry.local_path.display()
        );
    }
}

#[test]
fn plan_returns_walk_error_for_missing_root() {
    let err = plan(Path::new("/definitely/not/a/real/site/tree"))
        .expect_err("plan on a missing directory should fail");
    assert!(
        matches!(err, SyncError::Walk { .. }),
        "missing root should surface as a walk error, got: {err}"
    );
}

#[cfg(unix)]
#[test]
fn plan_follows_symlinks_to_files_and_directories() {
    use std::os::unix::fs::symlink;

    let tmp = tempdir().unwrap();
    let root = tmp.path().join("site");
    let shared = tmp.path().join("shared");
    write_file(&root, "index.html", "<h1>home</h1>");
    write_file(&shared, "common.css", "a {}");
    symlink(&shared, root.join("styles")).unwrap();
    symlink(root.join("index.html"), root.join("copy.html")).unwrap();

    let entries = plan(&root).expect("plan should succeed with symlinks present");

    let expected: BTreeSet<String> = ["index.html", "copy.html", "styles/common.css"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        keys(&entries),
        expected,
        "file links should be planned and directory links descended into"
    );
}

#[tokio::test]
async fn synchronise_uploads_each_file_with_resolved_content_type() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write_file(root, "index.html", "<h1>home</h1>");
    write_file(root, "error.html", "<h1>missing</h1>");
    write_file(root, "css/style.css", "body {}");
    write_file(root, "notes", "no extension at all");

    let mut store = MockObjectStore::new();
    store.expect_upload().times(4).returning(|_, req| {
        let expected = matches!(
            (req.key, req.content_type),
            ("index.html", "text/html")
                | ("error.html", "text/html")
                | ("css/style.css", "text/css")
                | ("notes", "text/plain")
        );
        if expected {
            Ok(())
        } else {
            Err(format!("unexpected upload: {} as {}", req.key, req.content_type).into())
        }
    });

    let bucket = Bucket::named("site-test");
    let report = synchronise(&store, root, &bucket)
        .await
        .expect("synchronise should succeed when every upload is accepted");

    assert_eq!(report.bucket, "site-test");
    assert_eq!(
        report.uploaded.len(),
        4,
        "one uploaded object should be reported per planned file"
    );
    let reported: BTreeSet<(String, String)> = report
        .uploaded
        .iter()
        .map(|u| (u.key.clone(), u.content_type.clone()))
        .collect();
    let expected: BTreeSet<(String, String)> = [
        ("index.html", "text/html"),
        ("error.html", "text/html"),
        ("css/style.css", "text/css"),
        ("notes", "text/plain"),
    ]
    .iter()
    .map(|(k, c)| (k.to_string(), c.to_string()))
    .collect();
    assert_eq!(reported, expected);
}

#[tokio::test]
async fn synchronise_on_empty_directory_uploads_nothing() {
    let tmp = tempdir().unwrap();

    // No expectations set: any upload would panic the mock.
    let store = MockObjectStore::new();
    let bucket = Bucket::named("site-test");

    let report = synchronise(&store, tmp.path(), &bucket)
        .await
        .expect("synchronising an empty tree should succeed");
    assert!(
        report.uploaded.is_empty(),
        "an empty tree should produce an empty report"
    );
    assert_eq!(report.bucket, "site-test");
}

#[tokio::test]
async fn synchronise_reuploads_everything_on_second_run() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write_file(root, "index.html", "<h1>home</h1>");
    write_file(root, "error.html", "<h1>missing</h1>");
    write_file(root, "css/style.css", "body {}");

    // No change detection exists: an unchanged tree is uploaded in full again.
    let mut store = MockObjectStore::new();
    store.expect_upload().times(6).returning(|_, _| Ok(()));

    let bucket = Bucket::named("site-test");
    let first = synchronise(&store, root, &bucket)
        .await
        .expect("first run should succeed");
    let second = synchronise(&store, root, &bucket)
        .await
        .expect("second run should succeed");

    let first_keys: BTreeSet<String> = first.uploaded.iter().map(|u| u.key.clone()).collect();
    let second_keys: BTreeSet<String> = second.uploaded.iter().map(|u| u.key.clone()).collect();
    assert_eq!(
        first_keys, second_keys,
        "both runs should converge on the same set of stored keys"
    );
}

#[tokio::test]
async fn synchronise_returns_root_error_for_missing_pathname() {
    // No expectations set: the store must never be touched.
    let store = MockObjectStore::new();
    let bucket = Bucket::named("site-test");

    let err = synchronise(&store, Path::new("/definitely/not/a/real/site/tree"), &bucket)
        .await
        .expect_err("a missing root should fail before any upload");
    assert!(
        matches!(err, SyncError::Root { .. }),
        "missing root should surface as a root resolution error, got: {err}"
    );
}

#[tokio::test]
async fn upload_all_stops_at_first_failed_upload() {
    let entries = vec![
        SyncEntry {
            local_path: "a.txt".into(),
            key: "a.txt".into(),
        },
        SyncEntry {
            local_path: "css/b.css".into(),
            key: "css/b.css".into(),
        },
        SyncEntry {
            local_path: "img/c.png".into(),
            key: "img/c.png".into(),
        },
    ];

    // Exactly two calls: the failure on the second entry must abort the run
    // before the third is attempted.
    let mut store = MockObjectStore::new();
    store.expect_upload().times(2).returning(|_, req| {
        if req.key == "css/b.css" {
            Err("connection reset by peer".into())
        } else {
            Ok(())
        }
    });

    let bucket = Bucket::named("site-test");
    let err = upload_all(&store, &bucket, &entries)
        .await
        .expect_err("a rejected upload should abort the run");

    match &err {
        SyncError::Upload { bucket, key, .. } => {
            assert_eq!(bucket, "site-test");
            assert_eq!(key, "css/b.css");
        }
        other => panic!("expected an upload error, got: {other}"),
    }
    let message = err.to_string();
    assert!(
        message.contains("css/b.css") && message.contains("site-test"),
        "error message should name the failing key and bucket: {message}"
    );
}
