//! Dump tree creation and cache copying
//!
//! One invocation produces `<root>/<timestamp>/<Variant>/...`. Copies
//! are full read-then-write, never renames, because the source cache
//! may belong to a running client. Per-file failures are counted and
//! reported; only a failure to create the tree itself aborts.

use crate::error::{VoxdumpError, VoxdumpResult};
use crate::inventory::CacheEntry;
use crate::owner::Owner;
use crate::variant::Variant;
use chrono::Local;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Filesystem-safe and lexicographically sortable by creation time
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d--%H-%M-%S";

/// One timestamped dump tree, immutable once prepared
#[derive(Debug, Clone)]
pub struct DumpRun {
    /// Second-precision identifier, doubles as the directory name
    pub timestamp: String,
    /// The dump root holding all runs
    pub root: PathBuf,
    /// `root/timestamp`, parent of the per-variant folders
    pub dir: PathBuf,
}

impl DumpRun {
    /// Create `root` and `root/<timestamp>`, handing any directory this
    /// call creates to the restored owner. Existing directories are
    /// left untouched.
    pub async fn prepare(root: &Path, owner: &Owner) -> VoxdumpResult<Self> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        create_dir_owned(root, owner).await?;
        let dir = root.join(&timestamp);
        create_dir_owned(&dir, owner).await?;

        debug!("prepared dump run at {}", dir.display());
        Ok(Self {
            timestamp,
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Output folder for one variant within this run
    pub fn variant_dir(&self, variant: Variant) -> PathBuf {
        self.dir.join(variant.display_name())
    }
}

/// Tally of one variant's copy pass
#[derive(Debug, Default)]
pub struct CopyOutcome {
    /// Destination paths written successfully, in entry order
    pub copied: Vec<PathBuf>,
    /// Source entries that could not be read (in use by the client)
    pub unreadable: u64,
    /// Destination writes that failed
    pub write_failed: u64,
}

/// Copy one variant's cache entries into its run folder.
///
/// Read failures are the expected in-use case and only counted; write
/// failures are logged and counted so the rest of the cache is still
/// recovered. Every written file is chowned to the restored owner on
/// Unix. `on_file` is invoked before each attempt for progress display.
pub async fn copy_variant(
    run: &DumpRun,
    variant: Variant,
    entries: &[CacheEntry],
    from_dir: &Path,
    owner: &Owner,
    mut on_file: impl FnMut(&OsStr),
) -> VoxdumpResult<CopyOutcome> {
    let dest = run.variant_dir(variant);
    create_dir_owned(&dest, owner).await?;

    let mut outcome = CopyOutcome::default();
    for entry in entries {
        on_file(&entry.name);

        let src = from_dir.join(&entry.name);
        let bytes = match fs::read(&src).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("cannot read {}: {}", src.display(), e);
                outcome.unreadable += 1;
                continue;
            }
        };

        let dst = dest.join(&entry.name);
        if let Err(e) = fs::write(&dst, &bytes).await {
            warn!("write failed for {}: {}", dst.display(), e);
            outcome.write_failed += 1;
            continue;
        }

        owner.restore(&dst);
        outcome.copied.push(dst);
    }

    Ok(outcome)
}

/// Create a directory if absent and hand it to the restored owner
async fn create_dir_owned(path: &Path, owner: &Owner) -> VoxdumpResult<()> {
    match fs::create_dir(path).await {
        Ok(()) => {
            owner.restore(path);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(VoxdumpError::DumpDirCreate {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
