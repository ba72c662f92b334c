use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::path::Path;

use super::error::Error;

/// Default location, relative to the workspace root.
pub const DEFAULT_CONFIG_PATH: &str = "crates/executor/Config.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct ExecutorConfig {
    pub buffer_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProducerConfig {
    pub batch_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    pub query_count: usize,
    pub seed: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub print_distance: bool,
    pub no_path_message: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub executor: ExecutorConfig,
    pub producer: ProducerConfig,
    pub simulator: SimulatorConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Loads configuration from built-in defaults, an optional TOML file and
/// `EXECUTOR_`-prefixed environment variables, in increasing precedence.
///
/// Nested keys use `__`, e.g. `EXECUTOR_OUTPUT__PRINT_DISTANCE=true`.
pub fn load_config(config_file_path: &Path) -> Result<Config, Error> {
    let mut builder = ConfigLoader::builder()
        .set_default("executor.buffer_size", 16)
        .and_then(|b| b.set_default("producer.batch_size", 64))
        .and_then(|b| b.set_default("simulator.query_count", 1000))
        .and_then(|b| b.set_default("simulator.seed", 42))
        .and_then(|b| b.set_default("output.print_distance", false))
        .and_then(|b| b.set_default("output.no_path_message", "No path found"))
        .and_then(|b| b.set_default("logging.level", "info"))
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    if config_file_path.exists() {
        builder = builder.add_source(File::from(config_file_path).required(true));
    }

    let s = builder
        .add_source(
            Environment::with_prefix("EXECUTOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    if app_config.executor.buffer_size == 0 || app_config.producer.batch_size == 0 {
        return Err(Error::ConfigLoadError(
            "buffer_size and batch_size must be positive".to_string(),
        ));
    }

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("does/not/exist/Config.toml")).unwrap();

        assert_eq!(config.executor.buffer_size, 16);
        assert_eq!(config.producer.batch_size, 64);
        assert_eq!(config.output.no_path_message, "No path found");
        assert!(!config.output.print_distance);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").expect("Failed to create temp file");
        temp_file
            .write_all(b"[output]\nprint_distance = true\nno_path_message = \"unreachable\"\n")
            .expect("Failed to write config");

        let config = load_config(temp_file.path()).unwrap();

        assert!(config.output.print_distance);
        assert_eq!(config.output.no_path_message, "unreachable");
        assert_eq!(config.simulator.seed, 42);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").expect("Failed to create temp file");
        temp_file
            .write_all(b"[producer]\nbatch_size = 0\n")
            .expect("Failed to write config");

        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(Error::ConfigLoadError(_))));
    }
}
