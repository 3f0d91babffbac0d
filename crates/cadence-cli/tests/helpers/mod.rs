use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness running the CLI in an isolated working directory
pub struct CliTestHarness {
    temp_dir: TempDir,
}

impl CliTestHarness {
    /// Create a new test harness with an empty working directory
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cadence").expect("Failed to find cadence binary");

        // Keep the developer's own config and log filter out of the tests
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("CADENCE_CONFIG");
        cmd.env_remove("CADENCE_OUTPUT");
        cmd.env_remove("CADENCE_HUMANIZE");
        cmd.env_remove("CADENCE_EXPANSION__MAX_CANDIDATES");
        cmd.env_remove("RUST_LOG");

        cmd
    }

    /// Write a file into the working directory and return its path
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// Common test fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Daily schedule limited to two runs, with one explicit addition
    pub fn daily_schedule_args() -> Vec<&'static str> {
        vec![
            "--rule", "FREQ=DAILY;COUNT=2",
            "--dtstart", "2025-01-01T00:00:00",
            "--rdate", "2025-06-01T00:00:00",
            "--now", "2024-12-31T00:00:00Z",
        ]
    }

    /// A persisted schedule record using the storage layer's field names
    pub fn schedule_json() -> &'static str {
        r#"{
            "schedule_spec": "FREQ=DAILY;INTERVAL=1",
            "schedule_dtstart_local": "2026-02-14T00:00:00",
            "timezone": "UTC",
            "schedule_rdates_local": ["2026-02-15T00:00:00"],
            "schedule_exdates_local": ["2026-02-16T00:00:00"]
        }"#
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check for a reject code in the error output
    pub fn has_reject_code(code: &'static str) -> impl Predicate<str> {
        predicate::str::contains("Error:").and(predicate::str::contains(code))
    }
}
