//! Per-file skip collection for the parallel extraction phase.
//!
//! A skipped file never fails the request; the collector keeps enough detail
//! to log a summary afterwards.

use std::sync::{Arc, Mutex};

use tracing::warn;

/// Pipeline stage at which a file was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipStage {
    /// The candidate path did not exist at the commit (stale pre-filter hit).
    BlobRead,
    /// The grammar produced no tree for the blob.
    Parse,
}

impl std::fmt::Display for SkipStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipStage::BlobRead => write!(f, "blob read"),
            SkipStage::Parse => write!(f, "parse"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: String,
    pub stage: SkipStage,
    pub detail: String,
}

/// Collects skipped files across worker threads.
#[derive(Clone)]
pub struct SkipCollector {
    skips: Arc<Mutex<Vec<SkippedFile>>>,
}

impl SkipCollector {
    pub fn new() -> Self {
        Self {
            skips: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record(&self, path: &str, stage: SkipStage, detail: impl ToString) {
        self.skips.lock().unwrap().push(SkippedFile {
            path: path.to_string(),
            stage,
            detail: detail.to_string(),
        });
    }

    pub fn count(&self) -> usize {
        self.skips.lock().unwrap().len()
    }

    pub fn take(&self) -> Vec<SkippedFile> {
        std::mem::take(&mut self.skips.lock().unwrap())
    }

    /// Log a summary of skipped files, capped at `max_detail` entries.
    pub fn log_summary(&self, max_detail: usize) {
        let skips = self.skips.lock().unwrap();
        if skips.is_empty() {
            return;
        }

        warn!("skipped {} candidate file(s)", skips.len());
        for skip in skips.iter().take(max_detail) {
            warn!("  {} ({}): {}", skip.path, skip.stage, skip.detail);
        }
        if skips.len() > max_detail {
            warn!("  ... and {} more", skips.len() - max_detail);
        }
    }
}

impl Default for SkipCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_count() {
        let collector = SkipCollector::new();
        assert_eq!(collector.count(), 0);

        collector.record("a.py", SkipStage::BlobRead, "missing at commit");
        collector.record("b.py", SkipStage::Parse, "no tree");
        assert_eq!(collector.count(), 2);

        let skips = collector.take();
        assert_eq!(skips.len(), 2);
        assert_eq!(skips[0].stage, SkipStage::BlobRead);
        assert_eq!(collector.count(), 0);
    }

    #[test]
    fn test_clone_shares_state() {
        let collector = SkipCollector::new();
        let clone = collector.clone();
        clone.record("a.py", SkipStage::Parse, "x");
        assert_eq!(collector.count(), 1);
    }
}
