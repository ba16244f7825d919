#![allow(dead_code)]

use std::process::{Command, Output};

use regex::Regex;
use tempfile::TempDir;

/// Helper struct to run flowset commands in an isolated temp directory
pub struct FlowsetTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl FlowsetTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        FlowsetTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_flowset").to_string(),
        }
    }

    /// Build the command with the environment isolated from the caller's
    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.binary_path);
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("FLOWSET_ROOT")
            .env_remove("FLOWSET_API_URL")
            .env_remove("RUST_LOG");
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute flowset command")
    }

    pub fn run_with_env(&self, args: &[&str], key: &str, value: &str) -> Output {
        self.command(args)
            .env(key, value)
            .output()
            .expect("Failed to execute flowset command")
    }

    /// Run on a blocking thread so a mock server on the test runtime keeps serving
    pub async fn run_async(&self, args: &[&str]) -> Output {
        let mut command = self.command(args);
        tokio::task::spawn_blocking(move || command.output())
            .await
            .expect("Failed to join flowset command")
            .expect("Failed to execute flowset command")
    }

    pub async fn run_with_env_async(&self, args: &[&str], key: &str, value: &str) -> Output {
        let mut command = self.command(args);
        command.env(key, value);
        tokio::task::spawn_blocking(move || command.output())
            .await
            .expect("Failed to join flowset command")
            .expect("Failed to execute flowset command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        success_stdout(args, self.run(args))
    }

    pub async fn run_success_async(&self, args: &[&str]) -> String {
        success_stdout(args, self.run_async(args).await)
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        failure_stderr(args, self.run(args))
    }

    pub async fn run_failure_async(&self, args: &[&str]) -> String {
        failure_stderr(args, self.run_async(args).await)
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(".flowset").join("config.yaml")
    }
}

impl Default for FlowsetTest {
    fn default() -> Self {
        Self::new()
    }
}

fn success_stdout(args: &[&str], output: Output) -> String {
    if !output.status.success() {
        panic!(
            "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
            args,
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    strip_ansi(&String::from_utf8_lossy(&output.stdout))
}

fn failure_stderr(args: &[&str], output: Output) -> String {
    assert!(
        !output.status.success(),
        "Expected command {:?} to fail, but it succeeded",
        args
    );
    assert_eq!(output.status.code(), Some(1));
    strip_ansi(&String::from_utf8_lossy(&output.stderr))
}

/// Remove terminal color codes from command output
pub fn strip_ansi(s: &str) -> String {
    let re = Regex::new(r"\x1b\[[0-9;]*m").expect("valid ANSI pattern");
    re.replace_all(s, "").to_string()
}
