use crate::common::command::{init_repository_dir, run_twig_command, twig_output};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn clean_repository_lists_only_branches(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feat"]).assert().success();

    assert_eq!(
        twig_output(dir, &["status"]),
        "=== Branches ===\n\
         feat\n\
         *master\n\
         \n\
         === Staged Files ===\n\
         \n\
         === Removed Files ===\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         \n\
         === Untracked Files ===\n\
         \n"
    );
}

#[rstest]
fn every_section_is_populated_and_sorted(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let file = |path: &str, content: &str| {
        write_file(FileSpec::new(dir.join(path), content.to_string()));
    };

    file("tracked.txt", "tracked\n");
    file("gone.txt", "gone\n");
    file("removed.txt", "removed\n");
    for path in ["tracked.txt", "gone.txt", "removed.txt"] {
        run_twig_command(dir, &["add", path]).assert().success();
    }
    run_twig_command(dir, &["commit", "three files"])
        .assert()
        .success();

    // staged, then edited again
    file("wug.txt", "wug\n");
    run_twig_command(dir, &["add", "wug.txt"]).assert().success();
    file("wug.txt", "wug wug\n");
    // staged
    file("b-staged.txt", "b\n");
    run_twig_command(dir, &["add", "b-staged.txt"]).assert().success();
    // removed
    run_twig_command(dir, &["rm", "removed.txt"]).assert().success();
    // tracked and edited, tracked and deleted
    file("tracked.txt", "edited\n");
    std::fs::remove_file(dir.join("gone.txt")).unwrap();
    // untracked
    file("random.stuff", "?\n");
    file("nested/zzz.txt", "?\n");

    assert_eq!(
        twig_output(dir, &["status"]),
        "=== Branches ===\n\
         *master\n\
         \n\
         === Staged Files ===\n\
         b-staged.txt\n\
         wug.txt\n\
         \n\
         === Removed Files ===\n\
         removed.txt\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         gone.txt (deleted)\n\
         tracked.txt (modified)\n\
         wug.txt (modified)\n\
         \n\
         === Untracked Files ===\n\
         nested/zzz.txt\n\
         random.stuff\n\
         \n"
    );
}

#[rstest]
fn file_staged_for_removal_but_recreated_is_untracked(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["rm", "hello.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("hello.txt"), "back\n".to_string()));

    let status = twig_output(dir, &["status"]);

    assert!(status.contains("=== Removed Files ===\nhello.txt\n\n"));
    assert!(status.ends_with("=== Untracked Files ===\nhello.txt\n\n"));
}
