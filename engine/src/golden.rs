//! Frame-hash regression helpers.
//!
//! Render tests hash each logical frame's RGBA buffer and compare against a
//! golden JSON document. Goldens can be refreshed in place by setting
//! `ATTN_UPDATE_GOLDENS=1`.

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Environment flag helper: accepts `1/true/yes/on` (case-insensitive).
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// If set, regression tests may update golden files in-place.
pub fn update_goldens_enabled() -> bool {
    env_flag("ATTN_UPDATE_GOLDENS")
}

pub fn rgba_sha256_hex(rgba: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rgba);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameHashGolden {
    pub version: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub hash_alg: String,
    /// One hash per logical frame.
    pub hashes: Vec<String>,
}

impl FrameHashGolden {
    pub fn new(name: impl Into<String>, width: u32, height: u32, hashes: Vec<String>) -> Self {
        Self {
            version: 1,
            name: name.into(),
            width,
            height,
            hash_alg: "sha256".to_string(),
            hashes,
        }
    }
}

pub fn load_golden_json(path: impl AsRef<Path>) -> io::Result<FrameHashGolden> {
    let path = path.as_ref();
    let file = fs::File::open(path)?;
    serde_json::from_reader(io::BufReader::new(file)).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("failed parsing golden json {}: {e}", path.display()),
        )
    })
}

pub fn save_golden_json(path: impl AsRef<Path>, golden: &FrameHashGolden) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let text = serde_json::to_string_pretty(golden)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, text)
}

/// Asserts `actual` matches the golden at `path`, or rewrites the golden when
/// updates are enabled (or when no golden exists yet).
pub fn assert_or_update_golden_hashes(
    path: impl AsRef<Path>,
    actual: &FrameHashGolden,
) -> io::Result<()> {
    let path = path.as_ref();
    if update_goldens_enabled() || !path.exists() {
        save_golden_json(path, actual)?;
        return Ok(());
    }
    let expected = load_golden_json(path)?;
    if expected != *actual {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "golden mismatch for {}: expected {} frames, got {}",
                path.display(),
                expected.hashes.len(),
                actual.hashes.len()
            ),
        ));
    }
    Ok(())
}
