//! Lazily-built registry of compiled grammar + query pairs.
//!
//! Bindings are built once per language key and cached for the process
//! lifetime. The compiled `Language` and `Query` are shareable across
//! threads; `Parser` instances are not, so workers construct their own
//! parser from a binding via [`GrammarBinding::parser`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;
use tree_sitter::{Language, Parser, Query};

use crate::error::{ResolveError, Result};
use crate::language::LanguageKey;

/// Immutable grammar + compiled capture query for one language.
pub struct GrammarBinding {
    key: LanguageKey,
    language: Language,
    query: Query,
    /// Index of the `id` capture inside the query.
    id_capture: u32,
}

impl GrammarBinding {
    fn build(key: LanguageKey) -> Result<Self> {
        let language = key.grammar();
        let query = Query::new(&language, key.query_source())
            .map_err(|e| ResolveError::Backend(format!("query for {} failed: {}", key, e)))?;
        let id_capture = query
            .capture_index_for_name("id")
            .ok_or_else(|| ResolveError::Backend(format!("query for {} lacks @id capture", key)))?;

        Ok(Self {
            key,
            language,
            query,
            id_capture,
        })
    }

    pub fn key(&self) -> LanguageKey {
        self.key
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn id_capture(&self) -> u32 {
        self.id_capture
    }

    /// Node kinds that count as enclosing containers for this language.
    pub fn container_kinds(&self) -> &'static [&'static str] {
        self.key.container_kinds()
    }

    /// Create a fresh parser configured for this language.
    ///
    /// Parsers hold mutable parse state and cannot be shared between worker
    /// threads, so each per-file parse step gets its own.
    pub fn parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ResolveError::Backend(format!("failed to set language {}: {}", self.key, e)))?;
        Ok(parser)
    }
}

/// Thread-safe, memoized registry of grammar bindings.
///
/// `ensure` is idempotent: the first call for a key compiles the grammar and
/// query, later calls return the cached binding. Read-mostly after warm-up.
pub struct GrammarRegistry {
    bindings: RwLock<HashMap<LanguageKey, Arc<GrammarBinding>>>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
        }
    }

    /// Get or build the binding for a language.
    pub fn ensure(&self, key: LanguageKey) -> Result<Arc<GrammarBinding>> {
        if let Some(binding) = self.bindings.read().unwrap().get(&key) {
            return Ok(binding.clone());
        }

        // Compile without holding the lock; a concurrent builder for the
        // same key may win the race, in which case its binding is kept.
        let binding = Arc::new(GrammarBinding::build(key)?);
        let mut map = self.bindings.write().unwrap();
        let entry = map.entry(key).or_insert_with(|| {
            debug!("compiled grammar binding for {}", key);
            binding
        });
        Ok(entry.clone())
    }

    /// Number of bindings built so far.
    pub fn len(&self) -> usize {
        self.bindings.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_builds_and_caches() {
        let registry = GrammarRegistry::new();
        assert!(registry.is_empty());

        let first = registry.ensure(LanguageKey::Python).unwrap();
        assert_eq!(registry.len(), 1);

        let second = registry.ensure(LanguageKey::Python).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_ensure_all_languages() {
        let registry = GrammarRegistry::new();
        for key in LanguageKey::all() {
            let binding = registry.ensure(*key).unwrap();
            assert_eq!(binding.key(), *key);
            assert!(binding.parser().is_ok());
        }
        assert_eq!(registry.len(), LanguageKey::all().len());
    }

    #[test]
    fn test_concurrent_ensure() {
        let registry = Arc::new(GrammarRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let key = LanguageKey::all()[i % LanguageKey::all().len()];
                    registry.ensure(key).unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(registry.len() <= LanguageKey::all().len());
    }
}
