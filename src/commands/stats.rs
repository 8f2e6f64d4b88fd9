//! `refscope stats` — dump registered metrics in Prometheus text format.
//!
//! Counters cover the current process only, so a fresh CLI invocation
//! reports zeros; the surface is meant for long-lived embeddings of the
//! engine.

use anyhow::Result;

use crate::metrics;

pub async fn run() -> Result<()> {
    print!("{}", metrics::gather());
    Ok(())
}
