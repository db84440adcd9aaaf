use crate::common::command::{
    branch_commit_id, commit_file, current_branch, head_commit_id, init_repository_dir,
    load_commit, run_twig_command, staged_files, twig_output,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History:
///             a (master)
///            /
///   initial - m1
///            \
///             b (feat)
#[rstest]
fn clean_merge_combines_both_sides(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feat"]).assert().success();
    commit_file(dir, "a.txt", "A", "master adds a");
    let master = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "feat"]).assert().success();
    commit_file(dir, "b.txt", "B", "feat adds b");
    let feat = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["merge", "feat"])
        .assert()
        .success()
        .stdout("");

    let merge_oid = head_commit_id(dir);
    let merge_commit = load_commit(dir, &merge_oid);
    assert_eq!(merge_commit.message(), "Merged feat into master.");
    assert_eq!(merge_commit.parent().unwrap().to_string(), master);
    assert_eq!(merge_commit.merge_parent().unwrap().to_string(), feat);
    assert_eq!(read_file(&dir.join("a.txt")), "A");
    assert_eq!(read_file(&dir.join("b.txt")), "B");
    assert_eq!(read_file(&dir.join("hello.txt")), "hi\n");
    assert!(staged_files(dir).is_empty());
    assert_eq!(current_branch(dir), "master");
    assert_eq!(branch_commit_id(dir, "feat"), feat);

    let log = twig_output(dir, &["log"]);
    assert!(log.starts_with(&format!(
        "===\ncommit {}\nMerge: {} {}\nDate: ",
        merge_oid,
        &master[..7],
        &feat[..7]
    )));
}

#[rstest]
fn deletion_on_the_other_side_is_applied(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_file(dir, "doomed.txt", "d\n", "add doomed");
    run_twig_command(dir, &["branch", "feat"]).assert().success();
    commit_file(dir, "a.txt", "A", "master adds a");
    run_twig_command(dir, &["checkout", "feat"]).assert().success();
    run_twig_command(dir, &["rm", "doomed.txt"]).assert().success();
    run_twig_command(dir, &["commit", "feat drops doomed"])
        .assert()
        .success();
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["merge", "feat"])
        .assert()
        .success()
        .stdout("");

    let merge_commit = load_commit(dir, &head_commit_id(dir));
    assert!(!merge_commit.tracks("doomed.txt"));
    assert!(merge_commit.tracks("a.txt"));
    assert!(!dir.join("doomed.txt").exists());
}

#[rstest]
fn identical_changes_on_both_sides_do_not_conflict(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feat"]).assert().success();
    commit_file(dir, "hello.txt", "same\n", "master edit");
    commit_file(dir, "a.txt", "A", "master adds a");
    run_twig_command(dir, &["checkout", "feat"]).assert().success();
    commit_file(dir, "hello.txt", "same\n", "feat edit");
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["merge", "feat"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("hello.txt")), "same\n");
}

/// A merge commit records both parents even when the result equals HEAD
#[rstest]
fn merge_commit_is_created_even_without_file_changes(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feat"]).assert().success();
    commit_file(dir, "hello.txt", "master\n", "master edit");
    run_twig_command(dir, &["checkout", "feat"]).assert().success();
    commit_file(dir, "side.txt", "s\n", "feat adds side");
    run_twig_command(dir, &["rm", "side.txt"]).assert().success();
    run_twig_command(dir, &["commit", "feat drops side"])
        .assert()
        .success();
    run_twig_command(dir, &["checkout", "master"]).assert().success();
    let master = head_commit_id(dir);

    run_twig_command(dir, &["merge", "feat"]).assert().success();

    let merge_commit = load_commit(dir, &head_commit_id(dir));
    assert_eq!(merge_commit.parent().unwrap().to_string(), master);
    assert_eq!(merge_commit.tree(), load_commit(dir, &master).tree());
}

/// History:
///   initial - m1 - a ----- x (master, merges feat)
///              \         /
///               b ------  - c (feat)
///
/// After the first merge, b is the split point of master and feat.
#[rstest]
fn repeated_merges_use_the_latest_split_point(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feat"]).assert().success();
    commit_file(dir, "a.txt", "A", "master adds a");
    run_twig_command(dir, &["checkout", "feat"]).assert().success();
    commit_file(dir, "b.txt", "B", "feat adds b");
    run_twig_command(dir, &["checkout", "master"]).assert().success();
    run_twig_command(dir, &["merge", "feat"]).assert().success();
    run_twig_command(dir, &["checkout", "feat"]).assert().success();
    commit_file(dir, "b.txt", "B2", "feat edits b");
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    run_twig_command(dir, &["merge", "feat"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("b.txt")), "B2");
    assert_eq!(read_file(&dir.join("a.txt")), "A");
}
