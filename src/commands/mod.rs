pub mod languages;
pub mod resolve;
pub mod stats;
