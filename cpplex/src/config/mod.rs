//! Configuration for cpplex
//!
//! Compile-time limits are generated by build.rs from `config/<profile>.toml`.
//! Runtime preferences come from `CPPLEX_*` environment variables or a TOML file.

include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{
    ConfigError, LexicalPreferences, LoggingPreferences, Preferences, PreprocessPreferences,
};

/// Which profile the compile-time constants were generated from
pub mod build_info {
    use super::compile_time;

    pub fn profile() -> &'static str {
        compile_time::PROFILE
    }

    pub fn config_dir() -> &'static str {
        compile_time::CONFIG_DIR
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}
