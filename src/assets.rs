//! Sprite and sound lookup
//!
//! Keys are relative, lowercase paths such as `enemies/flyer` or `sfx/jump`.
//! A key that does not resolve to a file on disk gets a placeholder colour
//! derived from the key, so the same key always looks the same. The game
//! never stops over a missing asset.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetKeyError {
    #[error("asset key is empty")]
    Empty,
    #[error("asset key starts with '/'")]
    LeadingSlash,
    #[error("asset key contains '..'")]
    ParentTraversal,
    #[error("asset key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

pub fn validate_key(key: &str) -> Result<(), AssetKeyError> {
    if key.is_empty() {
        return Err(AssetKeyError::Empty);
    }
    if key.starts_with('/') {
        return Err(AssetKeyError::LeadingSlash);
    }
    if key.contains("..") {
        return Err(AssetKeyError::ParentTraversal);
    }
    for ch in key.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-') {
            continue;
        }
        return Err(AssetKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Sprite,
    Sound,
}

impl AssetKind {
    fn dir(&self) -> &'static str {
        match self {
            AssetKind::Sprite => "sprites",
            AssetKind::Sound => "sounds",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            AssetKind::Sprite => "png",
            AssetKind::Sound => "wav",
        }
    }
}

/// Outcome of a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    File(PathBuf),
    /// Packed RGB stand-in
    Placeholder(u32),
}

/// Stable colour for a key (FNV-1a, kept away from black)
pub fn placeholder_color(key: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in key.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    (hash & 0x00ff_ffff) | 0x0040_4040
}

/// Resolves keys under an asset root
#[derive(Debug)]
pub struct AssetResolver {
    root: PathBuf,
    warned_keys: HashSet<String>,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            warned_keys: HashSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where a valid key would live on disk
    pub fn path_for(&self, kind: AssetKind, key: &str) -> Result<PathBuf, AssetKeyError> {
        validate_key(key)?;
        Ok(self
            .root
            .join(kind.dir())
            .join(format!("{key}.{}", kind.extension())))
    }

    /// File if present, placeholder otherwise. Warns once per key.
    pub fn resolve(&mut self, kind: AssetKind, key: &str) -> Asset {
        let reason = match self.path_for(kind, key) {
            Ok(path) if path.is_file() => return Asset::File(path),
            Ok(path) => format!("missing {}", path.display()),
            Err(e) => e.to_string(),
        };
        if self.warned_keys.insert(key.to_string()) {
            log::warn!("Asset '{key}' unavailable ({reason}), using placeholder");
        }
        Asset::Placeholder(placeholder_color(key))
    }
}
