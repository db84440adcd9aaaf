use crate::common::command::{init_repository_dir, repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn missing_subcommand_asks_for_one(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &[])
        .assert()
        .success()
        .stdout("Please enter a command.\n");
}

#[rstest]
fn unknown_subcommand_is_reported(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["frobnicate"])
        .assert()
        .success()
        .stdout("No command with that name exists.\n");
}

#[rstest]
#[case(&["add"])]
#[case(&["add", "a.txt", "b.txt"])]
#[case(&["branch"])]
#[case(&["merge", "a", "b"])]
#[case(&["push", "origin"])]
#[case(&["log", "extra"])]
#[case(&["checkout", "a", "b"])]
fn wrong_operand_counts_are_rejected(init_repository_dir: TempDir, #[case] args: &[&str]) {
    run_twig_command(init_repository_dir.path(), args)
        .assert()
        .success()
        .stdout("Incorrect operands.\n");
}

#[rstest]
fn diagnostics_stay_off_stdout(init_repository_dir: TempDir) {
    let mut cmd = run_twig_command(init_repository_dir.path(), &["status"]);
    cmd.env("TWIG_LOG", "debug");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("=== Branches ===\n*master\n"));
}

#[rstest]
fn corrupt_repository_is_an_operational_failure(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let heads = dir.join(".twig").join("refs").join("heads");
    std::fs::write(heads.join("master"), "not a commit id\n").unwrap();

    run_twig_command(dir, &["log"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("fatal:"));
}
