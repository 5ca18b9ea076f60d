use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use super::*;
use crate::cli::{ColorChoice, Commands};
use crate::test_fixtures::StaticRunner;
use crate::{CoverageGuardError, EXIT_NOT_COVERED, EXIT_SUCCESS};

fn make_cli(no_config: bool) -> Cli {
    Cli {
        verbose: 0,
        quiet: true,
        color: ColorChoice::Never,
        no_config,
        config: None,
        command: Commands::Check(CheckArgs::default()),
    }
}

fn args_for(root: &Path) -> CheckArgs {
    CheckArgs {
        root: Some(root.to_path_buf()),
        ..CheckArgs::default()
    }
}

fn init_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    Command::new("git")
        .args(["init"])
        .current_dir(dir.path())
        .output()
        .expect("Failed to init git repo");
    dir
}

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn sha(content: &str) -> String {
    crate::checksum::compute_hash_from_bytes(content.as_bytes())
}

/// Repo with `src/a.go` and `src/b.go` recorded in `sha256sums.txt`.
fn covered_repo() -> TempDir {
    let dir = init_repo();
    write(dir.path(), "src/a.go", "package a\n");
    write(dir.path(), "src/b.go", "package b\n");
    write(
        dir.path(),
        "sha256sums.txt",
        &format!(
            "{}\tsrc/a.go\n{}\tsrc/b.go\n",
            sha("package a\n"),
            sha("package b\n")
        ),
    );
    dir
}

fn run(args: &CheckArgs, cli: &Cli, runner: &StaticRunner) -> crate::Result<i32> {
    let diagnostics = Diagnostics::from_cli(cli);
    run_check_impl(args, cli, runner, &diagnostics)
}

#[test]
fn covered_files_pass() {
    let dir = covered_repo();
    let runner = StaticRunner::new("A\tsrc/a.go\nM\tsrc/b.go\n");

    let code = run(&args_for(dir.path()), &make_cli(true), &runner).unwrap();
    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(runner.calls(), 1);
}

#[test]
fn modified_content_fails() {
    let dir = covered_repo();
    write(dir.path(), "src/b.go", "package b\n\nfunc New() {}\n");
    let runner = StaticRunner::new("M\tsrc/a.go\nM\tsrc/b.go\n");

    let code = run(&args_for(dir.path()), &make_cli(true), &runner).unwrap();
    assert_eq!(code, EXIT_NOT_COVERED);
}

#[test]
fn deleted_files_are_not_checked() {
    let dir = covered_repo();
    let runner = StaticRunner::new("D\tsrc/removed.go\nM\tsrc/a.go\n");

    let code = run(&args_for(dir.path()), &make_cli(true), &runner).unwrap();
    assert_eq!(code, EXIT_SUCCESS);
}

#[test]
fn missing_manifest_is_error_before_git_runs() {
    let dir = init_repo();
    write(dir.path(), "src/a.go", "package a\n");
    let runner = StaticRunner::new("A\tsrc/a.go\n");

    let err = run(&args_for(dir.path()), &make_cli(true), &runner).unwrap_err();
    assert!(matches!(err, CoverageGuardError::ManifestNotFound { .. }));
    assert_eq!(runner.calls(), 0);
}

#[test]
fn git_failure_is_surfaced() {
    let dir = covered_repo();
    let runner = StaticRunner::failing();

    let err = run(&args_for(dir.path()), &make_cli(true), &runner).unwrap_err();
    assert!(matches!(err, CoverageGuardError::CommandFailed { .. }));
}

#[test]
fn vanished_staged_file_is_fatal() {
    let dir = covered_repo();
    let runner = StaticRunner::new("M\tsrc/a.go\nA\tsrc/vanished.go\n");

    let err = run(&args_for(dir.path()), &make_cli(true), &runner).unwrap_err();
    assert!(matches!(err, CoverageGuardError::FileRead { .. }));
}

#[test]
fn manifest_override_is_resolved_against_root() {
    let dir = covered_repo();
    fs::create_dir_all(dir.path().join("coverage")).unwrap();
    fs::rename(
        dir.path().join("sha256sums.txt"),
        dir.path().join("coverage/sums.txt"),
    )
    .unwrap();
    let runner = StaticRunner::new("A\tsrc/a.go\n");
    let args = CheckArgs {
        manifest: Some("coverage/sums.txt".into()),
        ..args_for(dir.path())
    };

    assert_eq!(run(&args, &make_cli(true), &runner).unwrap(), EXIT_SUCCESS);
}

#[test]
fn excluded_paths_are_skipped() {
    let dir = covered_repo();
    write(dir.path(), "docs/notes.md", "not covered\n");
    let runner = StaticRunner::new("A\tdocs/notes.md\nM\tsrc/a.go\n");
    let args = CheckArgs {
        exclude: vec!["docs/**".to_string()],
        ..args_for(dir.path())
    };

    assert_eq!(run(&args, &make_cli(true), &runner).unwrap(), EXIT_SUCCESS);
}

#[test]
fn parallel_flag_gives_same_verdict() {
    let dir = covered_repo();
    write(dir.path(), "src/c.go", "package c\n");
    let runner = StaticRunner::new("A\tsrc/a.go\nA\tsrc/c.go\nM\tsrc/b.go\n");
    let args = CheckArgs {
        parallel: true,
        ..args_for(dir.path())
    };

    assert_eq!(
        run(&args, &make_cli(true), &runner).unwrap(),
        EXIT_NOT_COVERED
    );
}

#[test]
fn config_file_in_root_is_used() {
    let dir = covered_repo();
    fs::rename(
        dir.path().join("sha256sums.txt"),
        dir.path().join("custom.txt"),
    )
    .unwrap();
    write(dir.path(), ".coverage-guard.toml", "manifest = \"custom.txt\"\n");
    let runner = StaticRunner::new("A\tsrc/a.go\n");

    assert_eq!(
        run(&args_for(dir.path()), &make_cli(false), &runner).unwrap(),
        EXIT_SUCCESS
    );
}

#[test]
fn no_config_ignores_config_file() {
    let dir = covered_repo();
    write(dir.path(), ".coverage-guard.toml", "manifest = \"absent.txt\"\n");
    let runner = StaticRunner::new("A\tsrc/a.go\n");

    assert_eq!(
        run(&args_for(dir.path()), &make_cli(true), &runner).unwrap(),
        EXIT_SUCCESS
    );
}

#[test]
fn invalid_exclude_pattern_is_error() {
    let dir = covered_repo();
    let runner = StaticRunner::new("A\tsrc/a.go\n");
    let args = CheckArgs {
        exclude: vec!["[broken".to_string()],
        ..args_for(dir.path())
    };

    let err = run(&args, &make_cli(true), &runner).unwrap_err();
    assert!(matches!(err, CoverageGuardError::InvalidPattern { .. }));
}

#[test]
fn staged_manifest_is_excluded() {
    let dir = covered_repo();
    let runner = StaticRunner::new("M\tsha256sums.txt\nA\tsrc/a.go\n");

    let code = run(&args_for(dir.path()), &make_cli(true), &runner).unwrap();
    assert_eq!(code, EXIT_SUCCESS);
}

#[test]
fn staged_manifest_in_subdirectory_is_excluded() {
    let dir = covered_repo();
    fs::create_dir_all(dir.path().join("coverage")).unwrap();
    fs::rename(
        dir.path().join("sha256sums.txt"),
        dir.path().join("coverage/sums.txt"),
    )
    .unwrap();
    let runner = StaticRunner::new("A\tcoverage/sums.txt\nA\tsrc/b.go\n");
    let args = CheckArgs {
        manifest: Some("./coverage/sums.txt".into()),
        ..args_for(dir.path())
    };

    assert_eq!(run(&args, &make_cli(true), &runner).unwrap(), EXIT_SUCCESS);
}

#[test]
fn repo_relative_path_uses_forward_slashes() {
    let root = Path::new("/repo");
    assert_eq!(
        repo_relative_path(root, &root.join("coverage").join("sums.txt")).as_deref(),
        Some("coverage/sums.txt")
    );
    assert_eq!(
        repo_relative_path(root, &root.join("./sha256sums.txt")).as_deref(),
        Some("sha256sums.txt")
    );
    assert_eq!(repo_relative_path(root, Path::new("/elsewhere/sums.txt")), None);
}

#[test]
fn apply_cli_overrides_extends_config() {
    let mut config = Config {
        exclude: vec!["a/**".to_string()],
        ..Config::default()
    };
    let args = CheckArgs {
        manifest: Some("m.txt".into()),
        parallel: true,
        exclude: vec!["b/**".to_string()],
        ..CheckArgs::default()
    };
    apply_cli_overrides(&mut config, &args);

    assert_eq!(config.manifest, Path::new("m.txt"));
    assert!(config.parallel);
    assert_eq!(config.exclude, vec!["a/**", "b/**"]);
}
