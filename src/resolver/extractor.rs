//! Per-file reference extraction: parse, query, exact-match, container.

use streaming_iterator::StreamingIterator;
use tracing::trace;
use tree_sitter::QueryCursor;

use crate::error::{ResolveError, Result};
use crate::grammar::GrammarBinding;
use crate::resolver::container::resolve_container;
use crate::resolver::Reference;

/// Extract references to `symbol` from one blob.
///
/// Runs the language's capture query over a fresh parse of `blob`, keeps
/// only `id` captures whose decoded text equals `symbol` exactly (this
/// closes the false-positive gap left by the whole-word pre-filter), and
/// attaches the nearest enclosing container to each surviving node. Byte
/// spans are decoded with replacement, so invalid UTF-8 never fails a file.
pub fn extract_from_blob(
    binding: &GrammarBinding,
    symbol: &str,
    path: &str,
    blob: &[u8],
) -> Result<Vec<Reference>> {
    let mut parser = binding.parser()?;
    let tree = parser
        .parse(blob, None)
        .ok_or_else(|| ResolveError::Backend(format!("failed to parse {}", path)))?;

    let mut references = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(binding.query(), tree.root_node(), blob);

    while let Some(query_match) = matches.next() {
        for capture in query_match.captures {
            if capture.index != binding.id_capture() {
                continue;
            }

            let node = capture.node;
            let text = String::from_utf8_lossy(&blob[node.byte_range()]);
            if text != symbol {
                continue;
            }

            let line = node.start_position().row as u32 + 1;
            let container = resolve_container(binding.container_kinds(), node);

            trace!(path, line, "matched {}", symbol);
            references.push(Reference {
                file: path.to_string(),
                line,
                container: container
                    .map(|c| String::from_utf8_lossy(&blob[c.byte_range()]).into_owned()),
                container_kind: container.map(|c| c.kind().to_string()),
            });
        }
    }

    Ok(references)
}
