#![allow(dead_code, unused_imports)]

pub mod fake_service;
pub mod mock_catalog;

use std::process::{Command, Output};
use tempfile::TempDir;

pub use fake_service::{FakeService, FakeServiceConfig};
pub use mock_catalog::{Call, MockCatalog, dog};

/// Base URL that refuses connections, for commands that must not reach the network
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:9";

/// Helper struct to run fetchdog commands with an isolated config directory
pub struct FetchDogTest {
    pub temp_dir: TempDir,
    base_url: String,
}

impl FetchDogTest {
    pub fn new() -> Self {
        Self::with_base_url(UNREACHABLE_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        FetchDogTest {
            temp_dir,
            base_url: base_url.to_string(),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_fetchdog"))
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("FETCHDOG_CONFIG_DIR", self.temp_dir.path())
            .env("FETCHDOG_BASE_URL", &self.base_url)
            .env("NO_COLOR", "1")
            .env_remove("FETCHDOG_NAME")
            .env_remove("FETCHDOG_EMAIL")
            .env_remove("FETCHDOG_LOG")
            .output()
            .expect("Failed to execute fetchdog command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn config_file(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("config.yaml")
    }
}
