use crate::common::command::{
    READABLE_COMMIT_DATE, branch_commit_id, commit_file, head_commit_id, init_repository_dir,
    load_commit, run_twig_command, twig_output,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_follows_the_first_parent_chain_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_file(dir, "second.txt", "2\n", "second");

    let head = head_commit_id(dir);
    let m1 = load_commit(dir, &head).parent().unwrap().to_string();
    let initial = load_commit(dir, &m1).parent().unwrap().to_string();

    assert_eq!(
        twig_output(dir, &["log"]),
        format!(
            "===\ncommit {head}\nDate: {date}\nsecond\n\n\
             ===\ncommit {m1}\nDate: {date}\nm1\n\n\
             ===\ncommit {initial}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n",
            date = READABLE_COMMIT_DATE
        )
    );
}

#[rstest]
fn scenario_log_has_two_entries(init_repository_dir: TempDir) {
    let log = twig_output(init_repository_dir.path(), &["log"]);

    assert_eq!(log.matches("===\ncommit ").count(), 2);
}

#[rstest]
fn global_log_lists_commits_of_every_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feat"]).assert().success();
    commit_file(dir, "master.txt", "m\n", "on master");
    run_twig_command(dir, &["checkout", "feat"]).assert().success();
    commit_file(dir, "feat.txt", "f\n", "on feat");

    let global_log = twig_output(dir, &["global-log"]);
    let log = twig_output(dir, &["log"]);

    assert_eq!(global_log.matches("===\ncommit ").count(), 4);
    assert!(global_log.contains(&format!("commit {}\n", branch_commit_id(dir, "master"))));
    assert!(!log.contains("on master"));

    let mut ids = global_log
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .collect::<Vec<_>>();
    let listed = ids.clone();
    ids.sort();
    assert_eq!(listed, ids);
}

#[rstest]
fn find_prints_every_commit_with_the_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feat"]).assert().success();
    commit_file(dir, "a.txt", "a\n", "same message");
    let first = head_commit_id(dir);
    run_twig_command(dir, &["checkout", "feat"]).assert().success();
    commit_file(dir, "b.txt", "b\n", "same message");
    let second = head_commit_id(dir);

    let mut expected = vec![first, second];
    expected.sort();

    assert_eq!(
        twig_output(dir, &["find", "same message"]),
        format!("{}\n", expected.join("\n"))
    );
}

#[rstest]
fn find_reports_when_nothing_matches(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["find", "no such message"])
        .assert()
        .success()
        .stdout("Found no commit with that message.\n");
}
