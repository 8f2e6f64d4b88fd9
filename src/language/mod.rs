//! Supported languages and their per-grammar configuration.
//!
//! Each `LanguageKey` maps to a tree-sitter grammar, a capture query that
//! matches "identifier used as a callee" (direct calls plus member/attribute
//! calls where the grammar has them), and the set of node kinds that count as
//! enclosing containers (grammars name function/method/class shapes
//! differently per language).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tree_sitter::Language;

use crate::error::ResolveError;

/// Enumerated tag for every language the engine can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageKey {
    Python,
    Javascript,
    Typescript,
    Go,
    Java,
    C,
    Cpp,
    Rust,
}

impl LanguageKey {
    /// All registered languages, in declaration order.
    pub fn all() -> &'static [LanguageKey] {
        &[
            LanguageKey::Python,
            LanguageKey::Javascript,
            LanguageKey::Typescript,
            LanguageKey::Go,
            LanguageKey::Java,
            LanguageKey::C,
            LanguageKey::Cpp,
            LanguageKey::Rust,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageKey::Python => "python",
            LanguageKey::Javascript => "javascript",
            LanguageKey::Typescript => "typescript",
            LanguageKey::Go => "go",
            LanguageKey::Java => "java",
            LanguageKey::C => "c",
            LanguageKey::Cpp => "cpp",
            LanguageKey::Rust => "rust",
        }
    }

    /// The compiled tree-sitter grammar for this language.
    pub fn grammar(&self) -> Language {
        match self {
            LanguageKey::Python => tree_sitter_python::LANGUAGE.into(),
            LanguageKey::Javascript => tree_sitter_javascript::LANGUAGE.into(),
            LanguageKey::Typescript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            LanguageKey::Go => tree_sitter_go::LANGUAGE.into(),
            LanguageKey::Java => tree_sitter_java::LANGUAGE.into(),
            LanguageKey::C => tree_sitter_c::LANGUAGE.into(),
            LanguageKey::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            LanguageKey::Rust => tree_sitter_rust::LANGUAGE.into(),
        }
    }

    /// Capture query matching identifiers in callee position.
    ///
    /// Every pattern captures exactly one node under the `id` name; the
    /// extractor keeps only that capture and exact-matches its text.
    pub fn query_source(&self) -> &'static str {
        match self {
            LanguageKey::Python => {
                r#"
                (call function: (identifier) @id)
                (call function: (attribute attribute: (identifier) @id))
                "#
            }
            LanguageKey::Javascript => {
                r#"
                (call_expression function: (identifier) @id)
                (call_expression function: (member_expression property: (property_identifier) @id))
                "#
            }
            LanguageKey::Typescript => {
                r#"
                (call_expression function: (identifier) @id)
                (call_expression function: (member_expression property: (property_identifier) @id))
                "#
            }
            LanguageKey::Go => {
                r#"
                (call_expression function: (identifier) @id)
                (call_expression function: (selector_expression field: (field_identifier) @id))
                "#
            }
            LanguageKey::Java => {
                r#"
                (method_invocation name: (identifier) @id)
                "#
            }
            LanguageKey::C => {
                r#"
                (call_expression function: (identifier) @id)
                "#
            }
            LanguageKey::Cpp => {
                r#"
                (call_expression function: (identifier) @id)
                (call_expression function: (field_expression field: (field_identifier) @id))
                "#
            }
            LanguageKey::Rust => {
                r#"
                (call_expression function: (identifier) @id)
                (call_expression function: (field_expression field: (field_identifier) @id))
                (call_expression function: (scoped_identifier name: (identifier) @id))
                "#
            }
        }
    }

    /// Node kinds that count as an enclosing container for this language.
    pub fn container_kinds(&self) -> &'static [&'static str] {
        match self {
            LanguageKey::Python => &["function_definition", "class_definition"],
            LanguageKey::Javascript => &["function_declaration", "method_definition"],
            LanguageKey::Typescript => {
                &["function_declaration", "method_signature", "method_definition"]
            }
            LanguageKey::Go => &["function_declaration", "method_declaration"],
            LanguageKey::Java => &["method_declaration", "class_declaration"],
            LanguageKey::C => &["function_definition"],
            LanguageKey::Cpp => &["function_definition"],
            LanguageKey::Rust => &["function_item"],
        }
    }

    /// Detect a language from a file extension. `.h` defaults to C.
    pub fn from_extension(ext: &str) -> Option<LanguageKey> {
        match ext {
            "py" => Some(LanguageKey::Python),
            "js" | "jsx" | "mjs" | "cjs" => Some(LanguageKey::Javascript),
            "ts" | "tsx" => Some(LanguageKey::Typescript),
            "go" => Some(LanguageKey::Go),
            "java" => Some(LanguageKey::Java),
            "c" | "h" => Some(LanguageKey::C),
            "cc" | "cxx" | "cpp" | "c++" | "hpp" | "hxx" | "hh" => Some(LanguageKey::Cpp),
            "rs" => Some(LanguageKey::Rust),
            _ => None,
        }
    }
}

impl FromStr for LanguageKey {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(LanguageKey::Python),
            "javascript" => Ok(LanguageKey::Javascript),
            "typescript" => Ok(LanguageKey::Typescript),
            "go" => Ok(LanguageKey::Go),
            "java" => Ok(LanguageKey::Java),
            "c" => Ok(LanguageKey::C),
            "cpp" => Ok(LanguageKey::Cpp),
            "rust" => Ok(LanguageKey::Rust),
            other => Err(ResolveError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for LanguageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
