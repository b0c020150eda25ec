//! Loose object records and their decoders.
//!
//! A loose object inflates to `"<type> <size>\0<body>"`. `RawObject` holds
//! the split header and body; `decode` interprets the body by type:
//! - `commit`: newline-delimited headers (`tree`, `parent`*, `author`, ...)
//! - `tree`: repeated `<mode> <name>\0<20 raw hash bytes>` with no separator
//! - `blob`: opaque, never inspected

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Grammar failures while decoding a single object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("object header has no NUL terminator")]
    MissingHeaderTerminator,

    #[error("invalid object header: {0:?}")]
    InvalidHeader(String),

    #[error("unknown object type '{0}'")]
    UnknownType(String),

    #[error("invalid hash: {0:?}")]
    InvalidHash(String),

    #[error("commit has no tree line")]
    MissingTree,

    #[error("commit has no author line")]
    MissingAuthor,

    #[error("malformed author line: {0:?}")]
    InvalidAuthor(String),

    #[error("author timestamp out of range: {0:?}")]
    InvalidTimestamp(String),

    #[error("truncated tree entry at byte {0}")]
    TruncatedTreeEntry(usize),
}

/// A 40-character lowercase hex object id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHash(String);

impl ObjectHash {
    pub const HEX_LEN: usize = 40;
    pub const RAW_LEN: usize = 20;
    pub const SHORT_LEN: usize = 6;

    pub fn from_raw(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != Self::RAW_LEN {
            return Err(DecodeError::InvalidHash(hex::encode(bytes)));
        }
        Ok(Self(hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First six hex characters, used in node labels.
    pub fn short_id(&self) -> &str {
        &self.0[..Self::SHORT_LEN]
    }

    /// Splits into the fan-out directory and file name of the loose object.
    pub fn loose_path_parts(&self) -> (&str, &str) {
        self.0.split_at(2)
    }
}

impl FromStr for ObjectHash {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != Self::HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DecodeError::InvalidHash(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for ObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
}

impl FromStr for ObjectKind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commit" => Ok(ObjectKind::Commit),
            "tree" => Ok(ObjectKind::Tree),
            "blob" => Ok(ObjectKind::Blob),
            other => Err(DecodeError::UnknownType(other.to_string())),
        }
    }
}

/// An inflated loose object split at its header.
#[derive(Debug, Clone)]
pub struct RawObject {
    pub kind: String,
    /// Size as declared by the header; not checked against `body`.
    pub declared_size: usize,
    pub body: Vec<u8>,
}

impl RawObject {
    pub fn parse(mut inflated: Vec<u8>) -> Result<Self, DecodeError> {
        let nul = inflated
            .iter()
            .position(|&b| b == 0)
            .ok_or(DecodeError::MissingHeaderTerminator)?;

        let body = inflated.split_off(nul + 1);
        inflated.truncate(nul);
        let header = String::from_utf8(inflated)
            .map_err(|e| DecodeError::InvalidHeader(String::from_utf8_lossy(e.as_bytes()).into_owned()))?;

        let (kind, size) = header
            .split_once(' ')
            .ok_or_else(|| DecodeError::InvalidHeader(header.clone()))?;
        let declared_size = size
            .parse::<usize>()
            .map_err(|_| DecodeError::InvalidHeader(header.clone()))?;

        Ok(Self {
            kind: kind.to_string(),
            declared_size,
            body,
        })
    }

    pub fn decode(&self) -> Result<DecodedObject, DecodeError> {
        decode(&self.kind, &self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitData {
    pub tree: ObjectHash,
    pub parents: Vec<ObjectHash>,
    pub author_name: String,
    pub author_time: DateTime<Utc>,
}

impl CommitData {
    /// Author time in UTC as `YYYY-MM-DD HH:MM:SS`.
    pub fn author_date(&self) -> String {
        self.author_time.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: String,
    pub name: String,
    pub hash: ObjectHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedObject {
    Commit(CommitData),
    Tree(Vec<TreeEntry>),
    Blob,
}

pub fn decode(kind: &str, body: &[u8]) -> Result<DecodedObject, DecodeError> {
    match kind.parse::<ObjectKind>()? {
        ObjectKind::Commit => parse_commit(body).map(DecodedObject::Commit),
        ObjectKind::Tree => parse_tree(body).map(DecodedObject::Tree),
        ObjectKind::Blob => Ok(DecodedObject::Blob),
    }
}

pub fn parse_commit(body: &[u8]) -> Result<CommitData, DecodeError> {
    let text = String::from_utf8_lossy(body);
    let mut lines = text.lines().peekable();

    let tree = lines
        .next()
        .and_then(|line| line.strip_prefix("tree "))
        .ok_or(DecodeError::MissingTree)?
        .parse::<ObjectHash>()?;

    let mut parents = Vec::new();
    while let Some(parent) = lines.peek().and_then(|line| line.strip_prefix("parent ")) {
        parents.push(parent.parse::<ObjectHash>()?);
        lines.next();
    }

    let mut author = None;
    for line in lines {
        if let Some(rest) = line.strip_prefix("author ") {
            author = Some(parse_author(rest)?);
        } else if line.starts_with("committer ") {
            break;
        }
    }
    let (author_name, author_time) = author.ok_or(DecodeError::MissingAuthor)?;

    Ok(CommitData {
        tree,
        parents,
        author_name,
        author_time,
    })
}

/// Parses `"<name...> <email> <timestamp> <tz>"`.
fn parse_author(rest: &str) -> Result<(String, DateTime<Utc>), DecodeError> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(DecodeError::InvalidAuthor(rest.to_string()));
    }

    let raw_timestamp = tokens[tokens.len() - 2];
    let timestamp = raw_timestamp
        .parse::<i64>()
        .map_err(|_| DecodeError::InvalidTimestamp(raw_timestamp.to_string()))?;
    let author_time = DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| DecodeError::InvalidTimestamp(raw_timestamp.to_string()))?;

    let name = tokens[..tokens.len().saturating_sub(3)].join(" ");
    Ok((name, author_time))
}

pub fn parse_tree(body: &[u8]) -> Result<Vec<TreeEntry>, DecodeError> {
    let mut entries = Vec::new();
    let mut offset = 0;

    while offset < body.len() {
        let rest = &body[offset..];
        let truncated = DecodeError::TruncatedTreeEntry(offset);

        let space = rest.iter().position(|&b| b == b' ').ok_or(truncated.clone())?;
        let mode = String::from_utf8_lossy(&rest[..space]).into_owned();
        let rest = &rest[space + 1..];

        let nul = rest.iter().position(|&b| b == 0).ok_or(truncated.clone())?;
        let name = String::from_utf8_lossy(&rest[..nul]).into_owned();
        let rest = &rest[nul + 1..];

        if rest.len() < ObjectHash::RAW_LEN {
            return Err(truncated);
        }
        let hash = ObjectHash::from_raw(&rest[..ObjectHash::RAW_LEN])?;

        offset += space + 1 + nul + 1 + ObjectHash::RAW_LEN;
        entries.push(TreeEntry { mode, name, hash });
    }

    Ok(entries)
}
