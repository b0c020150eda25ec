//! Hand-built loose object stores.
//!
//! Objects are written under whatever hash the test chooses; the reader
//! never verifies content hashes, so fixtures can use readable ids.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::ZlibEncoder;
use git_depgraph::config::Config;
use tempfile::TempDir;

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
        fs::create_dir_all(dir.path().join(".git/refs/heads")).unwrap();
        Self { dir }
    }

    pub fn repo_path(&self) -> &Path {
        self.dir.path()
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.dir.path().join(".git/objects")
    }

    pub fn write_raw(&self, hash: &str, inflated: &[u8]) {
        let path = self.objects_dir().join(&hash[..2]).join(&hash[2..]);
        fs::create_dir_all(path.parent().unwrap()).unwrap();

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(inflated).unwrap();
        fs::write(path, encoder.finish().unwrap()).unwrap();
    }

    pub fn write_object(&self, hash: &str, kind: &str, body: &[u8]) {
        let mut inflated = format!("{} {}\0", kind, body.len()).into_bytes();
        inflated.extend_from_slice(body);
        self.write_raw(hash, &inflated);
    }

    pub fn blob(&self, hash: &str, contents: &str) {
        self.write_object(hash, "blob", contents.as_bytes());
    }

    /// `entries` are `(mode, name, hex hash)`, written in the given order.
    pub fn tree(&self, hash: &str, entries: &[(&str, &str, &str)]) {
        let mut body = Vec::new();
        for (mode, name, entry_hash) in entries {
            body.extend_from_slice(mode.as_bytes());
            body.push(b' ');
            body.extend_from_slice(name.as_bytes());
            body.push(0);
            body.extend_from_slice(&hex::decode(entry_hash).unwrap());
        }
        self.write_object(hash, "tree", &body);
    }

    pub fn commit(&self, hash: &str, tree: &str, parents: &[&str], author: &str, timestamp: i64) {
        let mut body = format!("tree {}\n", tree);
        for parent in parents {
            body.push_str(&format!("parent {}\n", parent));
        }
        body.push_str(&format!("author {} <dev@example.com> {} +0300\n", author, timestamp));
        body.push_str(&format!("committer {} <dev@example.com> {} +0300\n", author, timestamp));
        body.push_str("\nmessage\n");
        self.write_object(hash, "commit", body.as_bytes());
    }

    pub fn set_branch(&self, branch: &str, hash: &str) {
        fs::write(
            self.dir.path().join(".git/refs/heads").join(branch),
            format!("{}\n", hash),
        )
        .unwrap();
    }

    pub fn config(&self, branch: &str, target: &str) -> Config {
        Config {
            repo_path: self.repo_path().to_path_buf(),
            branch: branch.to_string(),
            target_file: target.to_string(),
            graph_output_path: self.dir.path().join("graphs"),
            visualizer_program: PathBuf::from("dot"),
        }
    }
}

/// Edge lines of a DOT document, without the header and closing brace.
pub fn edges(dot: &str) -> Vec<String> {
    assert!(dot.starts_with("digraph G {\n"), "bad header: {:?}", dot);
    assert!(dot.ends_with('}'), "bad footer: {:?}", dot);
    dot["digraph G {\n".len()..dot.len() - 1]
        .split("\"\n")
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| format!("{}\"", chunk))
        .collect()
}
