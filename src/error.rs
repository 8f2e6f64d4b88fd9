//! Error taxonomy for reference resolution.
//!
//! Configuration errors (`UnsupportedLanguage`, `EmptySymbol`) surface before
//! any backend I/O. `MissingObject` is recovered per-file inside the pipeline
//! and never escapes `resolve`. Backend failures are kept distinct from
//! "nothing found" so callers can tell an empty result from a failed one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// No grammar or capture query is registered for the requested language.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The symbol to resolve must be a non-empty literal identifier.
    #[error("symbol must be a non-empty identifier")]
    EmptySymbol,

    /// The commit-ish could not be resolved inside the mirror.
    #[error("commit not found in mirror: {0}")]
    CommitNotFound(String),

    /// A candidate path does not exist at the requested commit.
    ///
    /// Candidates come from a cheap pre-filter and can be stale when the tree
    /// shape differs between commits; callers skip the file and continue.
    #[error("object {path} does not exist at commit {commit}")]
    MissingObject { commit: String, path: String },

    /// The resolution was cancelled cooperatively; no partial results exist.
    #[error("resolution cancelled")]
    Cancelled,

    /// Backend process failure unrelated to "not found" (spawn, permissions).
    /// Callers may retry; the engine itself never does.
    #[error("backend failure: {0}")]
    Backend(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ResolveError>;

impl ResolveError {
    /// True for errors that are recovered locally by skipping one file.
    pub fn is_per_file(&self) -> bool {
        matches!(self, ResolveError::MissingObject { .. })
    }
}
