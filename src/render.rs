//! Hands the DOT text to an external Graphviz-compatible layout program.
//!
//! The DOT file is written first and only removed once the program has
//! produced the image, so a failed render leaves it behind for inspection.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{AppError, Result};

pub struct Renderer {
    program: PathBuf,
}

impl Renderer {
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }

    /// Writes `dot` to `path`, creating parent directories as needed.
    pub fn write_dot(path: &Path, dot: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, dot)?;
        tracing::info!("Wrote DOT file {}", path.display());
        Ok(())
    }

    /// Runs `<program> -Tpng <dot_path> -o <image_path>`.
    pub fn render(&self, dot_path: &Path, image_path: &Path) -> Result<()> {
        let output = Command::new(&self.program)
            .arg("-Tpng")
            .arg(dot_path)
            .arg("-o")
            .arg(image_path)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AppError::Render(format!(
                    "layout program '{}' not found",
                    self.program.display()
                )),
                _ => AppError::Render(format!("cannot run '{}': {}", self.program.display(), e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Render(format!(
                "'{}' exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }

    /// Writes, renders, then deletes the DOT file on success.
    pub fn render_to_image(&self, dot: &str, dot_path: &Path, image_path: &Path) -> Result<()> {
        Self::write_dot(dot_path, dot)?;
        self.render(dot_path, image_path)?;
        fs::remove_file(dot_path)?;
        tracing::info!("Rendered {}", image_path.display());
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOT: &str = "digraph G {\n}";

    #[test]
    fn removes_dot_file_after_success() {
        let dir = TempDir::new().unwrap();
        let dot_path = dir.path().join("out/graph.dot");
        let image_path = dir.path().join("out/graph.png");

        Renderer::new("true").render_to_image(DOT, &dot_path, &image_path).unwrap();
        assert!(!dot_path.exists());
    }

    #[test]
    fn keeps_dot_file_when_program_fails() {
        let dir = TempDir::new().unwrap();
        let dot_path = dir.path().join("graph.dot");
        let image_path = dir.path().join("graph.png");

        let err = Renderer::new("false")
            .render_to_image(DOT, &dot_path, &image_path)
            .unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
        assert_eq!(fs::read_to_string(&dot_path).unwrap(), DOT);
    }

    #[test]
    fn reports_missing_program() {
        let dir = TempDir::new().unwrap();
        let dot_path = dir.path().join("graph.dot");
        let image_path = dir.path().join("graph.png");

        let err = Renderer::new(dir.path().join("no-such-dot"))
            .render_to_image(DOT, &dot_path, &image_path)
            .unwrap_err();
        match err {
            AppError::Render(msg) => assert!(msg.contains("not found"), "{}", msg),
            other => panic!("expected render error, got {:?}", other),
        }
        assert!(dot_path.exists());
    }
}
