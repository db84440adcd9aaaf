use crate::common::command::{
    branch_commit_id, commit_file, current_branch, head_commit_id, init_repository_dir,
    run_twig_command, staged_files, twig_output,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn reset_moves_the_current_branch_and_the_working_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let m1 = head_commit_id(dir);
    commit_file(dir, "later.txt", "later\n", "m2");
    commit_file(dir, "hello.txt", "changed\n", "m3");
    write_file(FileSpec::new(dir.join("pending.txt"), "p\n".to_string()));
    run_twig_command(dir, &["add", "pending.txt"]).assert().success();

    run_twig_command(dir, &["reset", &m1])
        .assert()
        .success()
        .stdout("");

    assert_eq!(current_branch(dir), "master");
    assert_eq!(branch_commit_id(dir, "master"), m1);
    assert_eq!(read_file(&dir.join("hello.txt")), "hi\n");
    assert!(!dir.join("later.txt").exists());
    assert!(staged_files(dir).is_empty());
    // the staged file was never tracked, so it stays behind untracked
    assert_eq!(read_file(&dir.join("pending.txt")), "p\n");
    assert_eq!(twig_output(dir, &["log"]).matches("===\ncommit ").count(), 2);
}

#[rstest]
fn reset_to_an_unknown_commit_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    run_twig_command(dir, &["reset", "abcdef0123"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
    assert_eq!(head_commit_id(dir), head);
}

#[rstest]
fn reset_refuses_to_clobber_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let m1 = head_commit_id(dir);
    run_twig_command(dir, &["rm", "hello.txt"]).assert().success();
    run_twig_command(dir, &["commit", "drop hello"]).assert().success();
    let head = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("hello.txt"), "mine\n".to_string()));

    run_twig_command(dir, &["reset", &m1])
        .assert()
        .success()
        .stdout(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        );

    assert_eq!(head_commit_id(dir), head);
    assert_eq!(read_file(&dir.join("hello.txt")), "mine\n");
}
