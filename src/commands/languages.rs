//! `refscope languages` — list the registered languages.

use anyhow::Result;

use crate::language::LanguageKey;

pub async fn run() -> Result<()> {
    for key in LanguageKey::all() {
        println!("{}", key);
    }
    Ok(())
}
