//! Git fixture helpers for integration tests.
//!
//! Fixtures are real repositories built with the git binary so the resolver
//! exercises the same plumbing it uses in production.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub struct GitFixture {
    dir: TempDir,
}

impl GitFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let fixture = Self { dir };
        fixture.git(&["init", "-q"]);
        fixture.git(&["config", "user.email", "test@example.com"]);
        fixture.git(&["config", "user.name", "test"]);
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn write(&self, rel_path: &str, content: &str) {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        fs::write(path, content).expect("failed to write fixture file");
    }

    pub fn remove(&self, rel_path: &str) {
        fs::remove_file(self.dir.path().join(rel_path)).expect("failed to remove fixture file");
    }

    /// Stage everything and commit, returning the commit sha.
    pub fn commit(&self, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "-m", message]);
        self.rev_parse("HEAD")
    }

    pub fn rev_parse(&self, rev: &str) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.dir.path())
            .args(["rev-parse", rev])
            .output()
            .expect("failed to run git rev-parse");
        assert!(output.status.success(), "git rev-parse {} failed", rev);
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn tag(&self, name: &str) {
        self.git(&["tag", name]);
    }

    /// Clone this repository into a bare mirror.
    pub fn mirror(&self) -> (TempDir, PathBuf) {
        let mirror_dir = TempDir::new().expect("failed to create mirror dir");
        let mirror_path = mirror_dir.path().join("mirror.git");
        let status = Command::new("git")
            .args(["clone", "-q", "--mirror"])
            .arg(self.dir.path())
            .arg(&mirror_path)
            .status()
            .expect("failed to run git clone --mirror");
        assert!(status.success(), "git clone --mirror failed");
        (mirror_dir, mirror_path)
    }

    fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .arg("-C")
            .arg(self.dir.path())
            .args(args)
            .status()
            .expect("failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
}
