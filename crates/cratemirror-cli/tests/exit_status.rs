use cratemirror_e2e_tests::{ServedCrate, TestRegistry, archive_bytes, write_lockfile};
use std::path::Path;
use std::process::Output;
use tokio::process::Command;

const FAILURE_EXIT_CODE: i32 = 255;

async fn run_cratemirror(lockfile: &Path, registry: &TestRegistry, extra_args: &[&str]) -> Output {
    let output_dir = lockfile.with_file_name("mirror");
    Command::new(env!("CARGO_BIN_EXE_cratemirror"))
        .arg(lockfile)
        .arg("--repo")
        .arg(registry.url().as_str())
        .arg("--output")
        .arg(&output_dir)
        .args(extra_args)
        .output()
        .await
        .expect("Failed to run cratemirror")
}

async fn registry_missing_foo() -> TestRegistry {
    TestRegistry::spawn(&[(
        "serde",
        "1.0.219",
        ServedCrate::Archive(archive_bytes("serde", "1.0.219")),
    )])
    .await
    .expect("Failed to start test registry")
}

#[tokio::test]
async fn test_tolerated_failure_exits_successfully() {
    let temp_dir = tempfile::tempdir().unwrap();
    let lockfile = write_lockfile(temp_dir.path(), &[("foo", "1.0.0"), ("serde", "1.0.219")]).unwrap();
    let registry = registry_missing_foo().await;

    let output = run_cratemirror(&lockfile, &registry, &[]).await;

    assert!(output.status.success(), "status: {:?}", output.status);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error downloading crate \"foo\", version 1.0.0 with http code 404"));
    assert_eq!(registry.requests(), vec!["foo/1.0.0", "serde/1.0.219"]);
}

#[tokio::test]
async fn test_exit_on_error_exits_with_failure_code() {
    let temp_dir = tempfile::tempdir().unwrap();
    let lockfile = write_lockfile(temp_dir.path(), &[("foo", "1.0.0"), ("serde", "1.0.219")]).unwrap();
    let err_log = temp_dir.path().join("errors.log");
    let registry = registry_missing_foo().await;

    let output = run_cratemirror(
        &lockfile,
        &registry,
        &["--exit-on-error", "--err-log", err_log.to_str().unwrap()],
    )
    .await;

    assert_eq!(output.status.code(), Some(FAILURE_EXIT_CODE));
    assert_eq!(std::fs::read_to_string(&err_log).unwrap().lines().count(), 1);
    assert_eq!(registry.requests(), vec!["foo/1.0.0"]);
}

#[tokio::test]
async fn test_malformed_lockfile_exits_with_failure_code() {
    let temp_dir = tempfile::tempdir().unwrap();
    let lockfile = temp_dir.path().join("Cargo.lock");
    std::fs::write(&lockfile, "[[package]\nname = \"foo\"\n").unwrap();
    let registry = registry_missing_foo().await;

    let output = run_cratemirror(&lockfile, &registry, &[]).await;

    assert_eq!(output.status.code(), Some(FAILURE_EXIT_CODE));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error parsing "));
    assert!(registry.requests().is_empty());
}
