//! Pre-flight storage gate
//!
//! The aggregate space requirement across all present variants is
//! checked against the destination volume before anything is written.
//! The gate treats `free == required` as insufficient, matching the
//! shipped comparison `free - required <= 0`.

use crate::error::{VoxdumpError, VoxdumpResult};
use std::path::Path;
use sysinfo::Disks;
use tracing::{debug, warn};

/// Outcome of comparing required bytes against the destination volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceCheck {
    /// Free bytes on the destination volume
    pub free: u64,
    /// Aggregate bytes the dump needs
    pub required: u64,
}

impl SpaceCheck {
    /// Whether the dump may proceed
    pub fn is_sufficient(&self) -> bool {
        self.free > self.required
    }

    /// Shortfall magnitude, zero when sufficient
    pub fn shortfall(&self) -> u64 {
        self.required.saturating_sub(self.free)
    }
}

/// Gate the run on free space at `dest`.
///
/// When the destination volume cannot be identified (overlay mounts in
/// containers are invisible to the disk list) the gate is skipped with
/// a warning instead of aborting a run that would likely succeed.
pub fn ensure_free_space(dest: &Path, required: u64) -> VoxdumpResult<()> {
    let Some(free) = available_space(dest) else {
        warn!(
            "could not determine free space for {}, skipping storage check",
            dest.display()
        );
        return Ok(());
    };

    let check = SpaceCheck { free, required };
    debug!("storage check: {} free, {} required", free, required);

    if check.is_sufficient() {
        Ok(())
    } else {
        Err(VoxdumpError::InsufficientStorage {
            shortfall: check.shortfall(),
        })
    }
}

/// Free bytes on the filesystem containing `path`, by longest matching
/// mount point. The dump root usually does not exist yet, so the probe
/// starts at the nearest existing ancestor.
pub fn available_space(path: &Path) -> Option<u64> {
    let target = nearest_existing(path)?.canonicalize().ok()?;
    let disks = Disks::new_with_refreshed_list();

    disks
        .list()
        .iter()
        .filter(|d| target.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len())
        .map(|d| d.available_space())
}

fn nearest_existing(path: &Path) -> Option<std::path::PathBuf> {
    let mut current = path;
    loop {
        if current.exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}
