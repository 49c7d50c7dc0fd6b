//! Application-level configuration.
//!
//! - [`EngineConfig`]: resolver and recommender tunables plus default result sizes

pub mod engine_config;

pub use engine_config::EngineConfig;
