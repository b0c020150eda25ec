use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::git::object::ObjectHash;

/// The `.git` directory of a work tree, or a bare repository root.
#[derive(Debug, Clone)]
pub struct GitDir {
    path: PathBuf,
}

impl GitDir {
    pub fn discover<P: AsRef<Path>>(repo_path: P) -> Result<Self> {
        let repo_path = repo_path.as_ref();

        let dotgit = repo_path.join(".git");
        if dotgit.is_dir() {
            return Ok(Self { path: dotgit });
        }

        // Bare layout
        if repo_path.join("objects").is_dir() && repo_path.join("refs").is_dir() {
            return Ok(Self {
                path: repo_path.to_path_buf(),
            });
        }

        Err(AppError::RepoNotFound(repo_path.display().to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.path.join("objects")
    }

    /// Resolves `refs/heads/<branch>` to the commit it points at, falling
    /// back to `packed-refs` when there is no loose ref file.
    pub fn branch_head(&self, branch: &str) -> Result<ObjectHash> {
        let ref_name = format!("refs/heads/{}", branch);

        match fs::read_to_string(self.path.join(&ref_name)) {
            Ok(contents) => return parse_hash(contents.trim()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        match fs::read_to_string(self.path.join("packed-refs")) {
            Ok(packed) => find_packed_ref(&packed, &ref_name)
                .map(parse_hash)
                .unwrap_or_else(|| Err(AppError::RefNotFound(branch.to_string()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::RefNotFound(branch.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_hash(s: &str) -> Result<ObjectHash> {
    s.parse().map_err(|_| AppError::InvalidHash(s.to_string()))
}

fn find_packed_ref<'a>(packed: &'a str, ref_name: &str) -> Option<&'a str> {
    packed
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .filter_map(|line| line.split_once(' '))
        .find(|(_, name)| name.trim() == ref_name)
        .map(|(hash, _)| hash)
}
