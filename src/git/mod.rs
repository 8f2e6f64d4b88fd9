//! Plumbing over a bare git mirror.
//!
//! All access goes through the `git` binary against an already-cloned mirror:
//! whole-word content search at a commit (`git grep`), exact blob reads
//! (`git show <commit>:<path>`), and commit-ish verification (`git
//! rev-parse`). The mirror holds full object history with no working tree, so
//! every read is pinned to the requested commit, never to checked-out files.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{ResolveError, Result};

/// Handle to one bare mirror on disk.
pub struct Mirror {
    path: PathBuf,
}

impl Mirror {
    /// Open a mirror at the given path.
    ///
    /// Cloning and fetching are out of scope; the path must already hold a
    /// git object database (bare or not).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ResolveError::Backend(format!(
                "mirror path does not exist: {}",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn git(&self, args: &[&str]) -> Result<std::process::Output> {
        Command::new("git")
            .arg("-C")
            .arg(&self.path)
            .args(args)
            .output()
            .map_err(|e| ResolveError::Backend(format!("failed to spawn git: {}", e)))
    }

    /// Verify that a commit-ish resolves to a commit object in this mirror.
    pub fn verify_commit(&self, commit: &str) -> Result<()> {
        let spec = format!("{}^{{commit}}", commit);
        let output = self.git(&["rev-parse", "--verify", "--quiet", &spec])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ResolveError::CommitNotFound(commit.to_string()))
        }
    }

    /// List files whose content at `commit` contains `symbol` as a whole
    /// word, case-sensitive.
    ///
    /// This is a cheap pre-filter: it over-matches (comments, strings) but
    /// never under-matches, which the exact-match step downstream relies on.
    /// "No hits" is an empty list, not an error.
    pub fn grep_files(&self, commit: &str, symbol: &str) -> Result<Vec<String>> {
        let output = self.git(&["grep", "-lIw", "-e", symbol, commit])?;

        if !output.status.success() {
            // Exit code 1 means the pattern matched nothing.
            if output.status.code() == Some(1) {
                return Ok(Vec::new());
            }
            return Err(ResolveError::Backend(format!(
                "git grep failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        // Lines are "<commit>:<path>"; the commit-ish itself may not contain
        // a colon, so splitting on the first one is safe.
        let files: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter_map(|line| line.splitn(2, ':').nth(1).map(str::to_string))
            .collect();

        debug!(commit, symbol, candidates = files.len(), "grep pre-filter");
        Ok(files)
    }

    /// Return the byte-identical content of `path` as committed at `commit`.
    pub fn read_blob(&self, commit: &str, path: &str) -> Result<Vec<u8>> {
        let spec = format!("{}:{}", commit, path);
        let output = self.git(&["show", &spec])?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("does not exist")
            || stderr.contains("exists on disk, but not in")
            || stderr.contains("invalid object name")
        {
            return Err(ResolveError::MissingObject {
                commit: commit.to_string(),
                path: path.to_string(),
            });
        }

        Err(ResolveError::Backend(format!(
            "git show {} failed: {}",
            spec,
            stderr.trim()
        )))
    }
}
