//! Engine and viewer settings, read from `conway.toml`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, LifeResult};

/// Boards with more cells than this are stepped in parallel (50x50).
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2500;

/// Iteration ceiling for final-state analysis when the caller gives none.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// File name looked up by the viewer in its working directory.
pub const CONFIG_FILE: &str = "conway.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LifeConfig {
    pub engine: EngineConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Cell count above which columns are computed concurrently.
    pub parallel_threshold: usize,

    /// Worker threads for the parallel path. `None` uses the machine's
    /// available parallelism.
    pub worker_threads: Option<usize>,

    /// Default ceiling for final-state analysis.
    pub max_iterations: usize,

    /// Largest width or height the board service accepts on upload.
    pub max_dimension: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            worker_threads: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_dimension: 1000,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> LifeResult<()> {
        if self.worker_threads == Some(0) {
            return Err(LifeError::InvalidConfig("engine.worker_threads must be > 0".into()));
        }
        if self.max_iterations == 0 {
            return Err(LifeError::InvalidConfig("engine.max_iterations must be > 0".into()));
        }
        if self.max_dimension == 0 {
            return Err(LifeError::InvalidConfig("engine.max_dimension must be > 0".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Side length of the square board the viewer starts with.
    pub board_size: usize,

    /// Milliseconds between generations while running.
    pub tick_millis: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self { board_size: 50, tick_millis: 200 }
    }
}

impl LifeConfig {
    pub fn validate(&self) -> LifeResult<()> {
        self.engine.validate()?;
        if self.viewer.board_size == 0 {
            return Err(LifeError::InvalidConfig("viewer.board_size must be > 0".into()));
        }
        if self.viewer.tick_millis == 0 {
            return Err(LifeError::InvalidConfig("viewer.tick_millis must be > 0".into()));
        }
        Ok(())
    }

    /// Load config from a TOML file; a missing file yields the defaults.
    pub fn load(path: &Path) -> LifeResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(source) => return Err(LifeError::Config { path: path.to_path_buf(), source }),
        };
        let config: Self = toml::from_str(&contents)
            .map_err(|source| LifeError::ConfigParse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = LifeConfig::load(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, LifeConfig::default());
        assert_eq!(cfg.engine.parallel_threshold, 2500);
        assert_eq!(cfg.engine.max_iterations, 1000);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "").expect("write");
        assert_eq!(LifeConfig::load(&path).expect("load"), LifeConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[engine]\nmax_iterations = 50\n\n[viewer]\nboard_size = 80\n").expect("write");

        let cfg = LifeConfig::load(&path).expect("load");
        assert_eq!(cfg.engine.max_iterations, 50);
        assert_eq!(cfg.engine.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(cfg.viewer.board_size, 80);
        assert_eq!(cfg.viewer.tick_millis, 200);
    }

    #[test]
    fn zero_values_are_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[engine]\nmax_iterations = 0\n").expect("write");
        assert!(matches!(LifeConfig::load(&path), Err(LifeError::InvalidConfig(_))));

        let cfg = EngineConfig { worker_threads: Some(0), ..EngineConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_file_reports_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[engine\n").expect("write");
        match LifeConfig::load(&path) {
            Err(LifeError::ConfigParse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
