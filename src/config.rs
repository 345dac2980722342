//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Solver service endpoint.
    #[serde(default = "default_solver_url")]
    pub solver_url: String,

    /// Render budget passed to the solver, in milliseconds.
    #[serde(default = "default_solver_max_timeout_ms")]
    pub solver_max_timeout_ms: u64,

    /// Overall HTTP timeout per solver request, in seconds. Kept above the
    /// solver's own render budget.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_solver_url() -> String {
    "http://localhost:8191/v1".to_string()
}

fn default_solver_max_timeout_ms() -> u64 {
    60_000
}

fn default_request_timeout_secs() -> u64 {
    70
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver_url: default_solver_url(),
            solver_max_timeout_ms: default_solver_max_timeout_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("pewpew-tracker.toml");
        if local_config.exists() {
            debug!("Found pewpew-tracker.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("pewpew-tracker").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("PEW_SOLVER_URL") {
            self.solver_url = url;
        }

        if let Ok(timeout) = std::env::var("PEW_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.request_timeout_secs = secs;
            }
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.solver_url, "http://localhost:8191/v1");
        assert_eq!(config.solver_max_timeout_ms, 60_000);
        assert_eq!(config.request_timeout_secs, 70);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.solver_url, "http://localhost:8191/v1");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            solver_url = "http://solver.internal:8191/v1"
            request_timeout_secs = 90
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.solver_url, "http://solver.internal:8191/v1");
        assert_eq!(config.request_timeout_secs, 90);
        assert_eq!(config.solver_max_timeout_ms, 60_000);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            solver_url = "http://10.0.0.5:8191/v1"
            solver_max_timeout_ms = 30000
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.solver_url, "http://10.0.0.5:8191/v1");
        assert_eq!(config.solver_max_timeout_ms, 30_000);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"format = "csv""#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.format, OutputFormat::Csv);
    }

    // Single test for all PEW_* mutations: the process environment is
    // shared across test threads, so the overrides must not run in parallel
    // with each other.
    #[test]
    fn test_config_with_env() {
        let orig_url = std::env::var("PEW_SOLVER_URL").ok();
        let orig_timeout = std::env::var("PEW_TIMEOUT").ok();

        std::env::set_var("PEW_SOLVER_URL", "http://env:8191/v1");
        std::env::set_var("PEW_TIMEOUT", "120");

        let config = Config::new().with_env();
        assert_eq!(config.solver_url, "http://env:8191/v1");
        assert_eq!(config.request_timeout_secs, 120);

        // Unparseable timeout keeps the default.
        std::env::set_var("PEW_TIMEOUT", "not_a_number");
        let config = Config::new().with_env();
        assert_eq!(config.request_timeout_secs, 70);

        match orig_url {
            Some(v) => std::env::set_var("PEW_SOLVER_URL", v),
            None => std::env::remove_var("PEW_SOLVER_URL"),
        }
        match orig_timeout {
            Some(v) => std::env::set_var("PEW_TIMEOUT", v),
            None => std::env::remove_var("PEW_TIMEOUT"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            solver_url: "http://solver:8191/v1".to_string(),
            solver_max_timeout_ms: 45_000,
            request_timeout_secs: 55,
            format: OutputFormat::Markdown,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.solver_url, config.solver_url);
        assert_eq!(parsed.solver_max_timeout_ms, config.solver_max_timeout_ms);
        assert_eq!(parsed.request_timeout_secs, config.request_timeout_secs);
        assert_eq!(parsed.format, config.format);
    }

    #[test]
    fn test_output_format_from_str_case() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("Md").unwrap(), OutputFormat::Markdown);
    }
}
