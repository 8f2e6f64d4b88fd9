pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod grammar;
pub mod language;
pub mod logging;
pub mod metrics;
pub mod resolver;

pub use config::Config;
pub use error::ResolveError;
pub use language::LanguageKey;
pub use resolver::{CancelFlag, Reference, ReferenceResolver};
