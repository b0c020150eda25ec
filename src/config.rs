//! Run configuration.
//!
//! Values come from a JSON file (`config.json` by default) and may be
//! overridden from the command line:
//! ```json
//! {
//!     "repo_path": "/path/to/repo",
//!     "branch": "master",
//!     "target_file": ".gitignore",
//!     "graph_output_path": "/path/to/graphs",
//!     "visualizer_program_path": "/usr/bin/dot"
//! }
//! ```
//! `visualizer_program_path` is optional and defaults to `dot` on `PATH`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, Result};

pub const DEFAULT_VISUALIZER: &str = "dot";

/// Possibly incomplete configuration, as read from a file or the CLI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub repo_path: Option<PathBuf>,
    pub branch: Option<String>,
    pub target_file: Option<String>,
    pub graph_output_path: Option<PathBuf>,
    pub visualizer_program_path: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::Config(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Values set in `overrides` win.
    pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            repo_path: overrides.repo_path.or(self.repo_path),
            branch: overrides.branch.or(self.branch),
            target_file: overrides.target_file.or(self.target_file),
            graph_output_path: overrides.graph_output_path.or(self.graph_output_path),
            visualizer_program_path: overrides.visualizer_program_path.or(self.visualizer_program_path),
        }
    }

    pub fn resolve(self) -> Result<Config> {
        let repo_path = self.repo_path.ok_or_else(|| missing("repo_path"))?;
        let branch = non_empty(self.branch, "branch")?;
        let target_file = non_empty(self.target_file, "target_file")?;
        let graph_output_path = self.graph_output_path.ok_or_else(|| missing("graph_output_path"))?;

        Ok(Config {
            repo_path,
            branch,
            target_file,
            graph_output_path,
            visualizer_program: self
                .visualizer_program_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_VISUALIZER)),
        })
    }
}

fn missing(key: &str) -> AppError {
    AppError::Config(format!("missing required value '{}'", key))
}

fn non_empty(value: Option<String>, key: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(AppError::Config(format!("'{}' must not be empty", key))),
        None => Err(missing(key)),
    }
}

/// Fully resolved configuration threaded through a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub repo_path: PathBuf,
    pub branch: String,
    pub target_file: String,
    pub graph_output_path: PathBuf,
    pub visualizer_program: PathBuf,
}

impl Config {
    /// Last component of the repository path, resolving `.` and friends.
    pub fn repo_name(&self) -> String {
        let canonical = fs::canonicalize(&self.repo_path).unwrap_or_else(|_| self.repo_path.clone());
        canonical
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "repository".to_string())
    }

    /// `<graph_output_path>/<repo name>/<branch>`
    pub fn output_dir(&self) -> PathBuf {
        self.graph_output_path.join(self.repo_name()).join(&self.branch)
    }

    /// `graph_<target with dots replaced by underscores>`
    pub fn graph_stem(&self) -> String {
        format!("graph_{}", self.target_file.replace('.', "_"))
    }

    pub fn image_path(&self) -> PathBuf {
        self.output_dir().join(format!("{}.png", self.graph_stem()))
    }

    pub fn dot_path(&self) -> PathBuf {
        self.output_dir().join(format!("{}.dot", self.graph_stem()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ConfigFile {
        ConfigFile {
            repo_path: Some(PathBuf::from("/work/DependencyVisualizer")),
            branch: Some("master".to_string()),
            target_file: Some(".gitignore".to_string()),
            graph_output_path: Some(PathBuf::from("/work/graphs")),
            visualizer_program_path: None,
        }
    }

    #[test]
    fn loads_json_and_ignores_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "repo_path": "/work/repo",
                "branch": "main",
                "target_file": "tests.py",
                "graph_output_path": "/work/graphs",
                "visualizer_program_path": "/opt/graphviz/bin/dot",
                "extra": 42
            }"#,
        )
        .unwrap();

        let config = ConfigFile::load(&path).unwrap().resolve().unwrap();
        assert_eq!(config.branch, "main");
        assert_eq!(config.target_file, "tests.py");
        assert_eq!(config.visualizer_program, PathBuf::from("/opt/graphviz/bin/dot"));
    }

    #[test]
    fn overrides_win_and_defaults_fill_in() {
        let overrides = ConfigFile {
            branch: Some("feature".to_string()),
            ..ConfigFile::default()
        };
        let config = sample().merge(overrides).resolve().unwrap();

        assert_eq!(config.branch, "feature");
        assert_eq!(config.target_file, ".gitignore");
        assert_eq!(config.visualizer_program, PathBuf::from(DEFAULT_VISUALIZER));
    }

    #[test]
    fn rejects_missing_and_empty_values() {
        let no_target = ConfigFile {
            target_file: None,
            ..sample()
        };
        assert!(matches!(no_target.resolve(), Err(AppError::Config(_))));

        let empty_branch = ConfigFile {
            branch: Some("  ".to_string()),
            ..sample()
        };
        assert!(matches!(empty_branch.resolve(), Err(AppError::Config(_))));
    }

    #[test]
    fn rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(ConfigFile::load(&path), Err(AppError::ConfigParse(_))));
    }

    #[test]
    fn derives_output_paths() {
        let config = sample().resolve().unwrap();

        assert_eq!(config.repo_name(), "DependencyVisualizer");
        assert_eq!(config.output_dir(), PathBuf::from("/work/graphs/DependencyVisualizer/master"));
        assert_eq!(
            config.image_path(),
            PathBuf::from("/work/graphs/DependencyVisualizer/master/graph__gitignore.png")
        );
        assert_eq!(
            config.dot_path(),
            PathBuf::from("/work/graphs/DependencyVisualizer/master/graph__gitignore.dot")
        );
    }
}
