// Generates `compile_time` constants from `<workspace>/<config_dir>/<profile>.toml`.
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
const PRODUCTION_MAX_FILE_SIZE: u64 = 50_000_000;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    output: OutputDefaults,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
}

#[derive(serde::Deserialize)]
struct OutputDefaults {
    default_results_dir: String,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_log_message_length: usize,
}

struct BuildSettings {
    profile: String,
    config_dir: String,
    config_path: PathBuf,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CPPLEX_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=CPPLEX_CONFIG_DIR");

    let settings = match settings() {
        Ok(settings) => settings,
        Err(message) => panic!("{}", message),
    };
    println!("cargo:rerun-if-changed={}", settings.config_path.display());

    let config = match load(&settings.config_path) {
        Ok(config) => config,
        Err(message) => panic!("{}", message),
    };

    let problems = violations(&config, &settings.profile);
    if !problems.is_empty() {
        panic!(
            "{} violates compile-time limits:\n  - {}",
            settings.config_path.display(),
            problems.join("\n  - ")
        );
    }

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    let generated = render(&config, &settings);
    fs::write(Path::new(&out_dir).join("constants.rs"), generated)
        .expect("OUT_DIR is writable");
}

fn settings() -> Result<BuildSettings, String> {
    let profile = env::var("CPPLEX_BUILD_PROFILE").unwrap_or_else(|_| "development".into());
    let config_dir = env::var("CPPLEX_CONFIG_DIR").unwrap_or_else(|_| "config".into());

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|e| e.to_string())?;
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .ok_or("cpplex must live inside the workspace directory")?;

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));
    if !config_path.is_file() {
        return Err(format!(
            "No compile-time configuration for profile '{}': expected {}",
            profile,
            config_path.display()
        ));
    }

    Ok(BuildSettings {
        profile,
        config_dir,
        config_path,
    })
}

fn load(path: &Path) -> Result<CompileTimeConfig, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Invalid TOML in {}: {}", path.display(), e))
}

fn violations(config: &CompileTimeConfig, profile: &str) -> Vec<String> {
    let limits = &config.file_processing;
    let mut problems = Vec::new();

    if limits.max_file_size == 0 || limits.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        problems.push(format!(
            "file_processing.max_file_size must be in 1..={}",
            ABSOLUTE_MAX_FILE_SIZE
        ));
    }
    if limits.large_file_threshold > limits.max_file_size {
        problems.push("file_processing.large_file_threshold exceeds max_file_size".into());
    }
    if profile == "production" && limits.max_file_size > PRODUCTION_MAX_FILE_SIZE {
        problems.push(format!(
            "file_processing.max_file_size above {} is not allowed in production",
            PRODUCTION_MAX_FILE_SIZE
        ));
    }
    if config.output.default_results_dir.trim().is_empty() {
        problems.push("output.default_results_dir is empty".into());
    }
    if config.logging.max_log_message_length == 0 {
        problems.push("logging.max_log_message_length must be positive".into());
    }

    problems
}

fn render(config: &CompileTimeConfig, settings: &BuildSettings) -> String {
    format!(
        r#"// Generated by build.rs from {config_dir}/{profile}.toml

pub mod compile_time {{
    pub const PROFILE: &str = {profile:?};
    pub const CONFIG_DIR: &str = {config_dir:?};

    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {max_file_size};
        pub const LARGE_FILE_THRESHOLD: u64 = {large_file_threshold};
    }}

    pub mod output {{
        pub const DEFAULT_RESULTS_DIR: &str = {results_dir:?};
    }}

    pub mod logging {{
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {max_log_message_length};
    }}
}}
"#,
        profile = settings.profile,
        config_dir = settings.config_dir,
        max_file_size = config.file_processing.max_file_size,
        large_file_threshold = config.file_processing.large_file_threshold,
        results_dir = config.output.default_results_dir,
        max_log_message_length = config.logging.max_log_message_length,
    )
}
