use crate::common::command::{
    commit_file, init_repository_dir, load_commit, head_commit_id, run_twig_command,
    staged_files, status_section, twig_commit, twig_output,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn adding_a_file_restored_to_its_committed_content_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("hello.txt"), "bye\n".to_string()));
    run_twig_command(dir, &["add", "hello.txt"])
        .assert()
        .success();
    assert_eq!(staged_files(dir), vec!["hello.txt"]);

    write_file(FileSpec::new(dir.join("hello.txt"), "hi\n".to_string()));
    run_twig_command(dir, &["add", "hello.txt"])
        .assert()
        .success();

    assert!(staged_files(dir).is_empty());
    assert!(
        std::fs::read_dir(dir.join(".twig").join("staging").join("additions"))
            .unwrap()
            .next()
            .is_none()
    );
}

#[rstest]
fn adding_twice_is_idempotent(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("wug.txt"), "wug\n".to_string()));

    run_twig_command(dir, &["add", "wug.txt"]).assert().success();
    let first = twig_output(dir, &["status"]);
    run_twig_command(dir, &["add", "wug.txt"]).assert().success();

    assert_eq!(twig_output(dir, &["status"]), first);
    assert_eq!(staged_files(dir), vec!["wug.txt"]);
}

#[rstest]
fn adding_a_missing_file_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["add", "nope.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");
}

#[rstest]
fn nested_files_are_tracked_with_slash_separated_paths(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    commit_file(dir, "a/b/deep.txt", "deep\n", "nested");

    let commit = load_commit(dir, &head_commit_id(dir));
    assert!(commit.tracks("a/b/deep.txt"));
    assert!(commit.tracks("hello.txt"));
}

#[rstest]
fn rm_of_a_tracked_file_stages_removal_and_deletes_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["rm", "hello.txt"])
        .assert()
        .success()
        .stdout("");

    assert!(!dir.join("hello.txt").exists());
    let status = twig_output(dir, &["status"]);
    assert_eq!(status_section(&status, "Removed Files"), vec!["hello.txt"]);

    twig_commit(dir, "drop hello").assert().success().stdout("");
    assert!(!load_commit(dir, &head_commit_id(dir)).tracks("hello.txt"));
}

#[rstest]
fn rm_of_a_staged_untracked_file_only_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "new\n".to_string()));
    run_twig_command(dir, &["add", "new.txt"]).assert().success();

    run_twig_command(dir, &["rm", "new.txt"])
        .assert()
        .success()
        .stdout("");

    assert!(staged_files(dir).is_empty());
    assert_eq!(read_file(&dir.join("new.txt")), "new\n");
}

#[rstest]
fn rm_without_a_reason_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("stray.txt"), "stray\n".to_string()));

    run_twig_command(dir, &["rm", "stray.txt"])
        .assert()
        .success()
        .stdout("No reason to remove the file.\n");
    assert!(dir.join("stray.txt").exists());
}

#[rstest]
fn adding_a_file_staged_for_removal_cancels_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["rm", "hello.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("hello.txt"), "hi\n".to_string()));

    run_twig_command(dir, &["add", "hello.txt"]).assert().success();

    let status = twig_output(dir, &["status"]);
    assert!(status_section(&status, "Removed Files").is_empty());
    assert!(status_section(&status, "Staged Files").is_empty());
}
