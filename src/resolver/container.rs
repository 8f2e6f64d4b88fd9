//! Enclosing-container resolution via ancestor walk.

use tree_sitter::Node;

/// Find the nearest enclosing container for a node.
///
/// Walks the ancestor chain starting at the node's parent and returns the
/// first ancestor whose kind is in `kinds`, or `None` when the root is
/// reached without a match. Nearest-enclosing wins, mirroring lexical
/// scoping: a reference inside a nested inner function attributes to the
/// inner function, not the outer one.
pub fn resolve_container<'tree>(
    kinds: &[&str],
    node: Node<'tree>,
) -> Option<Node<'tree>> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if kinds.contains(&ancestor.kind()) {
            return Some(ancestor);
        }
        current = ancestor.parent();
    }
    None
}
