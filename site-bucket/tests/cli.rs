use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn site_bucket() -> Command {
    Command::cargo_bin("site-bucket").expect("binary exists")
}

#[test]
fn help_lists_every_subcommand_and_the_profile_flag() {
    let mut cmd = site_bucket();
    cmd.arg("--help");

    cmd.assert().success().stdout(
        predicate::str::contains("list-buckets")
            .and(predicate::str::contains("list-bucket-objects"))
            .and(predicate::str::contains("setup-bucket"))
            .and(predicate::str::contains("sync"))
            .and(predicate::str::contains("--profile")),
    );
}

#[test]
fn sync_rejects_a_missing_pathname_without_touching_the_network() {
    // The path check runs before any storage client is constructed, so this
    // must fail fast even with no credentials and no endpoint configured.
    let mut cmd = site_bucket();
    cmd.arg("sync")
        .arg("/definitely/not/a/real/site/tree")
        .arg("some-bucket");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn sync_rejects_a_pathname_that_is_a_file() {
    let file = NamedTempFile::new().expect("creating temp file failed");

    let mut cmd = site_bucket();
    cmd.arg("sync").arg(file.path()).arg("some-bucket");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn sync_requires_both_positional_arguments() {
    let mut cmd = site_bucket();
    cmd.arg("sync");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required arguments"));
}

#[test]
fn list_bucket_objects_requires_a_bucket_name() {
    let mut cmd = site_bucket();
    cmd.arg("list-bucket-objects");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required arguments"));
}
