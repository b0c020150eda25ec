//! Loose object store reader.
//!
//! Objects live at `objects/<first two hex chars>/<remaining 38>`, each file
//! a single zlib stream. Pack files are not consulted, so an object that is
//! only packed reads as absent.

use std::fs;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;

use crate::error::{AppError, Result};
use crate::git::object::{DecodedObject, ObjectHash, RawObject};
use crate::git::refs::GitDir;

#[derive(Debug, Clone)]
pub struct ObjectStore {
    objects_dir: PathBuf,
}

impl ObjectStore {
    pub fn new<P: AsRef<Path>>(objects_dir: P) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    pub fn open(git_dir: &GitDir) -> Self {
        Self::new(git_dir.objects_dir())
    }

    pub fn object_path(&self, hash: &ObjectHash) -> PathBuf {
        let (dir, file) = hash.loose_path_parts();
        self.objects_dir.join(dir).join(file)
    }

    /// Reads and inflates a loose object. Absence is `Ok(None)`, not an error.
    pub fn read_object(&self, hash: &ObjectHash) -> Result<Option<RawObject>> {
        let path = self.object_path(hash);

        let compressed = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::ObjectRead {
                    hash: hash.to_string(),
                    source: e,
                });
            }
        };

        let mut inflated = Vec::new();
        ZlibDecoder::new(compressed.as_slice())
            .read_to_end(&mut inflated)
            .map_err(|e| AppError::Decompress {
                hash: hash.to_string(),
                source: e,
            })?;

        let raw = RawObject::parse(inflated).map_err(|e| AppError::from_decode(hash.as_str(), e))?;
        if raw.declared_size != raw.body.len() {
            tracing::debug!(
                "Object {} declares {} bytes but has {}",
                hash,
                raw.declared_size,
                raw.body.len()
            );
        }

        Ok(Some(raw))
    }

    /// Reads and decodes an object in one step.
    pub fn load(&self, hash: &ObjectHash) -> Result<Option<DecodedObject>> {
        let Some(raw) = self.read_object(hash)? else {
            return Ok(None);
        };
        tracing::debug!("Read {} object {}", raw.kind, hash);

        raw.decode()
            .map(Some)
            .map_err(|e| AppError::from_decode(hash.as_str(), e))
    }
}
