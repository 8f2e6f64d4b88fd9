//! `refscope resolve` — run one resolution and print the references.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::language::LanguageKey;
use crate::resolver::ReferenceResolver;

pub async fn run(
    symbol: &str,
    mirror: PathBuf,
    commit: String,
    lang: &str,
    json: bool,
    config: &Config,
) -> Result<()> {
    let language: LanguageKey = lang.parse()?;

    let resolver = ReferenceResolver::new(config.resolver.clone());
    let references = resolver
        .resolve_async(mirror, commit, symbol.to_string(), language)
        .await
        .with_context(|| format!("failed to resolve references for '{}'", symbol))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&references)?);
        return Ok(());
    }

    if references.is_empty() {
        println!("No references to '{}' found", symbol);
        return Ok(());
    }

    for reference in &references {
        match &reference.container_kind {
            Some(kind) => println!("{}:{} ({})", reference.file, reference.line, kind),
            None => println!("{}:{}", reference.file, reference.line),
        }
    }
    println!("{} reference(s)", references.len());

    Ok(())
}
