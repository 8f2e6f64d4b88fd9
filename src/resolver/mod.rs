//! The resolution pipeline: candidate files → blobs → parse trees → query
//! captures → exact-match filter → container resolution → aggregate + sort.
//!
//! Each request runs the pipeline once; the only long-lived shared state is
//! the grammar registry. The per-file phase is CPU-bound and fans out over a
//! rayon pool, with aggregation as the single fan-in point.

pub mod aggregate;
pub mod container;
pub mod extractor;
pub mod skips;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::error::{ResolveError, Result};
use crate::git::Mirror;
use crate::grammar::GrammarRegistry;
use crate::language::LanguageKey;
use crate::metrics;
use crate::resolver::skips::{SkipCollector, SkipStage};

/// One resolved call-site of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Path of the file inside the repository.
    pub file: String,
    /// 1-based line of the identifier (start row + 1).
    pub line: u32,
    /// Full source text of the enclosing definition, if any.
    pub container: Option<String>,
    /// Node kind of the enclosing definition, if any.
    pub container_kind: Option<String>,
}

/// Cooperative cancellation flag, checked between files.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Cross-commit symbol reference resolver.
///
/// Owns the grammar registry explicitly; inject one resolver and share it
/// rather than reaching for process-global state.
#[derive(Clone)]
pub struct ReferenceResolver {
    grammars: Arc<GrammarRegistry>,
    config: ResolverConfig,
}

impl ReferenceResolver {
    pub fn new(config: ResolverConfig) -> Self {
        if let Some(threads) = config.parallel_threads {
            // The global pool can only be sized once per process; later
            // resolvers inherit whatever was built first.
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
            {
                debug!("rayon pool already initialized: {}", e);
            }
        } else {
            debug!("using {} threads for extraction", num_cpus::get());
        }

        Self {
            grammars: Arc::new(GrammarRegistry::new()),
            config,
        }
    }

    pub fn grammars(&self) -> &GrammarRegistry {
        &self.grammars
    }

    /// Resolve every call-site of `symbol` at `commit` in the mirror.
    ///
    /// Validates the language and symbol before any backend I/O, so an
    /// unsupported key never touches the mirror. An absent symbol is an
    /// empty `Ok` result, never an error.
    pub fn resolve(
        &self,
        mirror_path: &Path,
        commit: &str,
        symbol: &str,
        language: LanguageKey,
    ) -> Result<Vec<Reference>> {
        self.resolve_with_cancel(mirror_path, commit, symbol, language, &CancelFlag::new())
    }

    /// Like [`resolve`](Self::resolve), with cooperative cancellation.
    ///
    /// On cancellation partial results are discarded and
    /// [`ResolveError::Cancelled`] is returned.
    pub fn resolve_with_cancel(
        &self,
        mirror_path: &Path,
        commit: &str,
        symbol: &str,
        language: LanguageKey,
        cancel: &CancelFlag,
    ) -> Result<Vec<Reference>> {
        let start = Instant::now();
        metrics::RESOLUTIONS.inc();

        if symbol.is_empty() {
            return Err(ResolveError::EmptySymbol);
        }

        // Configuration errors surface before the mirror is touched.
        self.grammars.ensure(language)?;

        let mirror = Mirror::open(mirror_path)?;
        mirror.verify_commit(commit)?;

        let files = mirror.grep_files(commit, symbol)?;
        metrics::CANDIDATE_FILES.observe(files.len() as f64);
        if files.is_empty() {
            info!(symbol, commit, "no candidate files");
            return Ok(Vec::new());
        }

        let raw = self.extract(&mirror, commit, symbol, language, &files, cancel)?;
        let references = aggregate::merge(raw);

        metrics::REFERENCES_FOUND.observe(references.len() as f64);
        metrics::RESOLVE_LATENCY.observe(start.elapsed().as_secs_f64());
        info!(
            symbol,
            commit,
            references = references.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "resolution complete"
        );

        Ok(references)
    }

    /// Run the per-file extraction phase over an explicit candidate list.
    ///
    /// Candidates may be stale relative to `commit`: a path that no longer
    /// resolves to a blob there is skipped and recorded, as is a blob the
    /// grammar produces no tree for. Any other backend failure aborts the
    /// whole call. Output is raw and unmerged.
    pub fn extract(
        &self,
        mirror: &Mirror,
        commit: &str,
        symbol: &str,
        language: LanguageKey,
        files: &[String],
        cancel: &CancelFlag,
    ) -> Result<Vec<Reference>> {
        let binding = self.grammars.ensure(language)?;

        debug!(symbol, commit, candidates = files.len(), "extracting references");
        let skips = SkipCollector::new();

        let per_file: Vec<Vec<Reference>> = files
            .par_iter()
            .map(|path| -> Result<Vec<Reference>> {
                if cancel.is_cancelled() {
                    return Ok(Vec::new());
                }

                let blob = match mirror.read_blob(commit, path) {
                    Ok(blob) => blob,
                    Err(e @ ResolveError::MissingObject { .. }) => {
                        // Stale candidate from a differently-shaped tree
                        // state; skip rather than abort the request.
                        skips.record(path, SkipStage::BlobRead, e);
                        return Ok(Vec::new());
                    }
                    Err(e) => return Err(e),
                };

                match extractor::extract_from_blob(&binding, symbol, path, &blob) {
                    Ok(references) => Ok(references),
                    Err(e) => {
                        skips.record(path, SkipStage::Parse, e);
                        Ok(Vec::new())
                    }
                }
            })
            .collect::<Result<_>>()?;

        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        metrics::FILES_SKIPPED.inc_by(skips.count() as f64);
        skips.log_summary(self.config.max_skip_report);

        // Rayon preserves input order, so collisions resolve
        // deterministically by last-in-input-order during the merge.
        Ok(per_file.into_iter().flatten().collect())
    }

    /// Async wrapper that keeps the blocking git I/O and the rayon phase off
    /// the cooperative scheduler's threads.
    pub async fn resolve_async(
        &self,
        mirror_path: PathBuf,
        commit: String,
        symbol: String,
        language: LanguageKey,
    ) -> Result<Vec<Reference>> {
        let resolver = self.clone();
        tokio::task::spawn_blocking(move || {
            resolver.resolve(&mirror_path, &commit, &symbol, language)
        })
        .await
        .map_err(|e| ResolveError::Backend(format!("resolution task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_symbol_is_config_error() {
        let resolver = ReferenceResolver::new(ResolverConfig::default());
        let err = resolver
            .resolve(Path::new("/nonexistent"), "HEAD", "", LanguageKey::Python)
            .unwrap_err();
        assert!(matches!(err, ResolveError::EmptySymbol));
    }

    #[test]
    fn test_language_checked_before_mirror() {
        // The mirror path does not exist; a language failure must win
        // because it is validated before any backend access.
        let resolver = ReferenceResolver::new(ResolverConfig::default());
        let err = "cobol".parse::<LanguageKey>().unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedLanguage(_)));

        // With a valid language the next failure is the missing mirror.
        let err = resolver
            .resolve(Path::new("/nonexistent"), "HEAD", "x", LanguageKey::Python)
            .unwrap_err();
        assert!(matches!(err, ResolveError::Backend(_)));
    }

    #[test]
    fn test_cancel_flag() {
        let flag = CancelFlag::new();
        assert!(!flag.is_cancelled());
        flag.cancel();
        assert!(flag.is_cancelled());
    }
}
