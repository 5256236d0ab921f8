pub mod mock_evaluator;

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Runs the voxcalc binary against an isolated config directory
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_dir: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        TestContext {
            temp_dir,
            config_dir,
        }
    }

    /// Write the user config the binary will pick up
    pub fn write_config(&self, json: &str) {
        let dir = self.config_dir.join("voxcalc");
        fs::create_dir_all(&dir).expect("Failed to create voxcalc config dir");
        fs::write(dir.join("config.json"), json).expect("Failed to write config");
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_voxcalc"));
        cmd.env("XDG_CONFIG_HOME", &self.config_dir)
            .env("HOME", self.temp_dir.path())
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run with transcripts on the command line
    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("Failed to run voxcalc")
    }

    /// Run in session mode, feeding `input` on stdin
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn voxcalc");

        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");

        child.wait_with_output().expect("Failed to wait for voxcalc")
    }
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}
