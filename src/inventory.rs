//! Cache directory inventory
//!
//! First phase of a dump: list what each installed variant has cached
//! and how many bytes a copy would need. Entries that cannot be opened
//! (typically index files held by a running client) stay in the listing
//! so the copy phase can retry them, but contribute nothing to the
//! space requirement.

use crate::error::{VoxdumpError, VoxdumpResult};
use crate::variant::Variant;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// One entry found in a variant's cache directory
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// File name within the cache directory
    pub name: OsString,
    /// Byte size, when the entry could be opened and is a regular file
    pub size: Option<u64>,
}

/// Scan result for a single build variant
#[derive(Debug)]
pub struct VariantInventory {
    /// The variant this inventory belongs to
    pub variant: Variant,
    /// The resolved cache directory that was scanned
    pub dir: PathBuf,
    /// Whether the cache directory exists at all
    pub exists: bool,
    /// Whether the variant counts as installed (existing, non-empty cache)
    pub present: bool,
    /// Directory entries in file-name order
    pub entries: Vec<CacheEntry>,
    /// Bytes required to copy every readable entry
    pub total_bytes: u64,
    /// Entries that could not be sized at scan time
    pub unreadable: u64,
}

impl VariantInventory {
    fn absent(variant: Variant, dir: PathBuf) -> Self {
        Self {
            variant,
            dir,
            exists: false,
            present: false,
            entries: Vec::new(),
            total_bytes: 0,
            unreadable: 0,
        }
    }
}

/// Inventory one variant's cache directory.
///
/// A missing directory is the normal "not installed" case and comes
/// back as `present = false`. An existing directory that cannot be
/// listed signals a permission or environment problem and is fatal. An
/// existing but empty directory is downgraded to "not installed" so
/// later phases skip it entirely.
pub async fn scan(variant: Variant, dir: &Path) -> VoxdumpResult<VariantInventory> {
    match fs::metadata(dir).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no cache directory for Vox {}: {}", variant, dir.display());
            return Ok(VariantInventory::absent(variant, dir.to_path_buf()));
        }
        Err(e) => {
            return Err(VoxdumpError::CacheDirUnreadable {
                variant: variant.display_name(),
                path: dir.to_path_buf(),
                source: e,
            })
        }
    }

    let listing_err = |e: io::Error| VoxdumpError::CacheDirUnreadable {
        variant: variant.display_name(),
        path: dir.to_path_buf(),
        source: e,
    };

    let mut reader = fs::read_dir(dir).await.map_err(listing_err)?;
    let mut entries = Vec::new();
    let mut total_bytes = 0u64;
    let mut unreadable = 0u64;

    while let Some(entry) = reader.next_entry().await.map_err(listing_err)? {
        let name = entry.file_name();
        match probe_size(&entry.path()).await {
            Some(len) => {
                total_bytes += len;
                entries.push(CacheEntry {
                    name,
                    size: Some(len),
                });
            }
            None => {
                unreadable += 1;
                entries.push(CacheEntry { name, size: None });
            }
        }
    }

    // read_dir yields entries in filesystem order
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let present = !entries.is_empty();
    debug!(
        "Vox {}: {} entries, {} bytes, {} unreadable",
        variant,
        entries.len(),
        total_bytes,
        unreadable
    );

    Ok(VariantInventory {
        variant,
        dir: dir.to_path_buf(),
        exists: true,
        present,
        entries,
        total_bytes,
        unreadable,
    })
}

/// Size one entry by opening it, the same access the copy phase needs.
/// `None` marks entries to retry later: locked files, subdirectories,
/// dangling links.
async fn probe_size(path: &Path) -> Option<u64> {
    let file = fs::File::open(path).await.ok()?;
    let meta = file.metadata().await.ok()?;
    if meta.is_file() {
        Some(meta.len())
    } else {
        None
    }
}

/// Format bytes as a human-readable size (e.g. "1.5 MB")
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
