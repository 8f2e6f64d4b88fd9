//! Prometheus metrics for the resolution engine.
//!
//! The engine itself never prints on the hot path; counters and histograms
//! here are the observability surface callers scrape or log.

use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Total number of resolution requests
    pub static ref RESOLUTIONS: Counter = Counter::with_opts(
        Opts::new(
            "refscope_resolutions_total",
            "Total number of resolution requests"
        )
    ).expect("Failed to create RESOLUTIONS counter");

    /// End-to-end resolution latency in seconds
    pub static ref RESOLVE_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "refscope_resolve_latency_seconds",
            "End-to-end resolution latency in seconds"
        ).buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])
    ).expect("Failed to create RESOLVE_LATENCY histogram");

    /// Candidate files surviving the whole-word pre-filter per request
    pub static ref CANDIDATE_FILES: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "refscope_candidate_files_count",
            "Candidate files surviving the pre-filter per request"
        ).buckets(vec![0.0, 1.0, 5.0, 10.0, 50.0, 100.0, 500.0])
    ).expect("Failed to create CANDIDATE_FILES histogram");

    /// References returned per request after deduplication
    pub static ref REFERENCES_FOUND: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "refscope_references_count",
            "References returned per request after deduplication"
        ).buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 50.0, 200.0])
    ).expect("Failed to create REFERENCES_FOUND histogram");

    /// Candidate files skipped (missing blob, parse failure)
    pub static ref FILES_SKIPPED: Counter = Counter::with_opts(
        Opts::new(
            "refscope_files_skipped_total",
            "Candidate files skipped during extraction"
        )
    ).expect("Failed to create FILES_SKIPPED counter");
}

/// Register all metrics with the global registry.
///
/// Call once at application startup. Panics if registration fails.
pub fn register_metrics() {
    REGISTRY
        .register(Box::new(RESOLUTIONS.clone()))
        .expect("Failed to register RESOLUTIONS");
    REGISTRY
        .register(Box::new(RESOLVE_LATENCY.clone()))
        .expect("Failed to register RESOLVE_LATENCY");
    REGISTRY
        .register(Box::new(CANDIDATE_FILES.clone()))
        .expect("Failed to register CANDIDATE_FILES");
    REGISTRY
        .register(Box::new(REFERENCES_FOUND.clone()))
        .expect("Failed to register REFERENCES_FOUND");
    REGISTRY
        .register(Box::new(FILES_SKIPPED.clone()))
        .expect("Failed to register FILES_SKIPPED");
}

/// Render all registered metrics in the Prometheus text format.
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .unwrap_or_default();
    String::from_utf8(buffer).unwrap_or_default()
}
