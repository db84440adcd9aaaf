use crate::common::command::{
    branch_commit_id, commit_file, head_commit_id, init_repository_dir, repository_dir,
    run_twig_command, twig_output,
};
use assert_fs::TempDir;
use rstest::{fixture, rstest};
use std::path::Path;

/// A local repository with a second repository registered as `origin`
pub struct Pair {
    pub local: TempDir,
    pub remote: TempDir,
}

#[fixture]
pub fn pair(init_repository_dir: TempDir, repository_dir: TempDir) -> Pair {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    register_origin(init_repository_dir.path(), repository_dir.path());

    Pair {
        local: init_repository_dir,
        remote: repository_dir,
    }
}

pub fn register_origin(local: &Path, remote: &Path) {
    let remote_metadata = remote.join(".twig");
    run_twig_command(
        local,
        &["add-remote", "origin", &remote_metadata.to_string_lossy()],
    )
    .assert()
    .success()
    .stdout("");
}

#[rstest]
fn push_fast_forwards_the_remote_branch(pair: Pair) {
    let local = pair.local.path();
    let remote = pair.remote.path();
    commit_file(local, "pushed.txt", "p\n", "to be pushed");

    run_twig_command(local, &["push", "origin", "master"])
        .assert()
        .success()
        .stdout("");

    let head = head_commit_id(local);
    assert_eq!(branch_commit_id(remote, "master"), head);
    // the remote working tree is left untouched
    assert!(!remote.join("pushed.txt").exists());
    assert!(twig_output(remote, &["log"]).contains("to be pushed"));
    run_twig_command(remote, &["checkout", "--", "pushed.txt"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(std::fs::read_to_string(remote.join("pushed.txt")).unwrap(), "p\n");
}

#[rstest]
fn push_creates_a_missing_remote_branch(pair: Pair) {
    let local = pair.local.path();
    let remote = pair.remote.path();
    run_twig_command(local, &["branch", "topic"]).assert().success();
    run_twig_command(local, &["checkout", "topic"]).assert().success();
    commit_file(local, "t.txt", "t\n", "topic work");

    run_twig_command(local, &["push", "origin", "topic"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(branch_commit_id(remote, "topic"), head_commit_id(local));
    // the remote's other branches stay where they were
    assert_eq!(
        twig_output(remote, &["log"]).matches("===\ncommit ").count(),
        1
    );
}

#[rstest]
fn push_behind_the_remote_is_rejected(pair: Pair) {
    let local = pair.local.path();
    let remote = pair.remote.path();
    commit_file(remote, "theirs.txt", "t\n", "remote work");
    let remote_head = head_commit_id(remote);

    run_twig_command(local, &["push", "origin", "master"])
        .assert()
        .success()
        .stdout("Please pull down remote changes before pushing.\n");

    assert_eq!(branch_commit_id(remote, "master"), remote_head);
}

#[rstest]
fn remote_may_be_registered_by_its_working_tree(init_repository_dir: TempDir) {
    let local = init_repository_dir.path();
    let remote = TempDir::new().expect("Failed to create temp dir");
    run_twig_command(remote.path(), &["init"]).assert().success();
    run_twig_command(
        local,
        &["add-remote", "origin", &remote.path().to_string_lossy()],
    )
    .assert()
    .success();

    run_twig_command(local, &["push", "origin", "master"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(branch_commit_id(remote.path(), "master"), head_commit_id(local));
}
