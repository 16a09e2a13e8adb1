//! Shared testing utilities for open-desktop CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used as the CLI's working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("open-desktop").expect("Failed to locate binary");
        cmd.current_dir(self.work_dir()).env_remove("RUST_LOG");
        cmd
    }

    /// Write a file relative to the work directory.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative)).expect("Failed to read test file")
    }

    /// Install a stand-in `docker` executable that records its arguments and
    /// stdin under the temp root, then answers like the real CLI.
    #[cfg(unix)]
    pub fn fake_docker(&self, exit_code: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.root.path().join("docker");
        let script = format!(
            r#"#!/bin/sh
echo "$@" >> "{log}"
if [ {code} -ne 0 ]; then
  cat > /dev/null
  echo "Cannot connect to the Docker daemon" >&2
  exit {code}
fi
case "$1" in
  build) cat > "{stdin}"; echo "sha256:feedbeef" ;;
  run) echo "c0ffee" ;;
esac
"#,
            log = self.docker_log_path().display(),
            stdin = self.docker_stdin_path().display(),
            code = exit_code,
        );
        fs::write(&path, script).expect("Failed to write fake docker");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake docker executable");
        path
    }

    pub fn docker_log_path(&self) -> PathBuf {
        self.root.path().join("docker.log")
    }

    pub fn docker_stdin_path(&self) -> PathBuf {
        self.root.path().join("docker.stdin")
    }

    /// Argument lines recorded by the fake docker, one per invocation.
    pub fn docker_invocations(&self) -> Vec<String> {
        fs::read_to_string(self.docker_log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
