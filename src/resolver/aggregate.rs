//! Deduplication and deterministic ordering of raw references.

use std::collections::BTreeMap;

use crate::resolver::Reference;

/// Merge raw references into the final result list.
///
/// Groups by (file, line); when two query patterns captured the same
/// location the last one in input order is kept (colliding entries carry
/// equivalent fields in practice). The output is sorted ascending by
/// (file, line), which makes resolution idempotent regardless of the
/// per-file processing order upstream.
pub fn merge(references: Vec<Reference>) -> Vec<Reference> {
    let mut by_location: BTreeMap<(String, u32), Reference> = BTreeMap::new();
    for reference in references {
        by_location.insert((reference.file.clone(), reference.line), reference);
    }
    by_location.into_values().collect()
}
