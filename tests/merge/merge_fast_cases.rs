use crate::common::command::{
    branch_commit_id, commit_count, commit_file, current_branch, head_commit_id,
    init_repository_dir, run_twig_command, staged_files,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use rstest::rstest;

/// History:
///   initial - m1 (master)
///               \
///                f1 (feat)
#[rstest]
fn merge_fast_forwards_when_head_is_the_split_point(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feat"]).assert().success();
    run_twig_command(dir, &["checkout", "feat"]).assert().success();
    commit_file(dir, "f.txt", "A", "feat adds f");
    let feat = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "master"]).assert().success();
    assert!(!dir.join("f.txt").exists());
    let commits_before = commit_count(dir);

    run_twig_command(dir, &["merge", "feat"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(current_branch(dir), "master");
    assert_eq!(branch_commit_id(dir, "master"), feat);
    assert_eq!(read_file(&dir.join("f.txt")), "A");
    assert_eq!(commit_count(dir), commits_before);
    assert!(staged_files(dir).is_empty());
}

/// History:
///   initial - m1 (feat) - m2 (master)
#[rstest]
fn merging_an_ancestor_changes_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feat"]).assert().success();
    commit_file(dir, "m.txt", "m\n", "m2");
    let master = head_commit_id(dir);
    let commits_before = commit_count(dir);

    run_twig_command(dir, &["merge", "feat"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(head_commit_id(dir), master);
    assert_eq!(commit_count(dir), commits_before);
    assert_eq!(read_file(&dir.join("m.txt")), "m\n");
}

#[rstest]
fn fast_forward_refuses_to_clobber_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feat"]).assert().success();
    run_twig_command(dir, &["checkout", "feat"]).assert().success();
    commit_file(dir, "f.txt", "A", "feat adds f");
    run_twig_command(dir, &["checkout", "master"]).assert().success();
    let master = head_commit_id(dir);
    std::fs::write(dir.join("f.txt"), "mine").unwrap();

    run_twig_command(dir, &["merge", "feat"])
        .assert()
        .success()
        .stdout(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        );

    assert_eq!(head_commit_id(dir), master);
    assert_eq!(read_file(&dir.join("f.txt")), "mine");
}
