use anyhow::{anyhow, Context, Result};
use docqa_chunker::ChunkerConfig;
use docqa_retrieval::GraderConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file when `--config` is absent
pub const CONFIG_ENV: &str = "DOCQA_CONFIG";

/// `[chunking]` and `[retrieval]` tables of the TOML configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub chunking: ChunkerConfig,
    pub retrieval: GraderConfig,
}

impl AppConfig {
    /// Resolve `--config`, then `DOCQA_CONFIG`, then built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        let config = match path {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.chunking
            .validate()
            .map_err(|e| anyhow!("[chunking] {e}"))?;
        self.retrieval
            .validate()
            .map_err(|e| anyhow!("[retrieval] {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_partial_tables() {
        let file = write_config(
            "[chunking]\nmax_chars = 3000\n\n[retrieval]\nsecondary_threshold = 0.4\n",
        );
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.chunking.max_chars, 3000);
        assert_eq!(config.chunking.fallback_chunk_size, 1800);
        assert_eq!(config.retrieval.secondary_threshold, 0.4);
        assert_eq!(config.retrieval.primary_threshold, 0.65);
    }

    #[test]
    fn rejects_inverted_thresholds_at_startup() {
        let file = write_config("[retrieval]\nprimary_threshold = 0.3\nsecondary_threshold = 0.5\n");
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("[retrieval]"));
    }

    #[test]
    fn rejects_unknown_tables() {
        let file = write_config("[chunkng]\nmax_chars = 10\n");
        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
