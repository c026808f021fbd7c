//! Owner identity resolution for permission restoration
//!
//! Dumps are often taken under sudo (mandatory on macOS). Files written
//! by the elevated process would end up root-owned, so the identity of
//! the invoking user is resolved up front and every created file and
//! directory is handed back to it.

use crate::error::{VoxdumpError, VoxdumpResult};
use crate::platform::Platform;
use std::env;
use std::path::{Path, PathBuf};

/// The non-elevated identity copied files are restored to
#[derive(Debug, Clone)]
pub struct Owner {
    /// Effective uid of this process (absent on Windows)
    euid: Option<u32>,
    /// Restoration target uid (absent on Windows)
    pub uid: Option<u32>,
    /// Invoking user's name, for display only
    pub username: String,
    /// Home directory caches are resolved against
    pub home: PathBuf,
}

impl Owner {
    /// Resolve the owner identity from the process environment.
    ///
    /// Under sudo the `SUDO_UID`/`SUDO_USER` variables point back at the
    /// invoking user; without them the effective identity is its own
    /// restoration target. An unparseable `SUDO_UID` is fatal rather
    /// than silently dumping root-owned files.
    pub fn resolve(platform: Platform) -> VoxdumpResult<Self> {
        let euid = current_euid();
        let home = dirs::home_dir().ok_or(VoxdumpError::HomeDirUnavailable)?;
        let login_name = env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());

        if !platform.has_ownership() {
            return Ok(Self {
                euid,
                uid: None,
                username: login_name,
                home,
            });
        }

        let sudo_user = env::var("SUDO_USER").ok();
        let uid = restore_uid(euid, env::var("SUDO_UID").ok().as_deref())?;

        // sudo on macOS resolves $HOME to /var/root; caches live under
        // the invoking user's home instead
        let home = match (&platform, &sudo_user) {
            (Platform::MacOs, Some(user)) if uid != Some(0) => {
                PathBuf::from(format!("/Users/{}", user))
            }
            _ => home,
        };

        Ok(Self {
            euid,
            uid,
            username: sudo_user.unwrap_or(login_name),
            home,
        })
    }

    /// Whether the process runs with elevated privileges
    pub fn is_elevated(&self) -> bool {
        self.euid == Some(0)
    }

    /// Hand a created file or directory back to the restored identity.
    ///
    /// Best-effort: a failed chown leaves the file readable by the
    /// elevated user and is not worth aborting a dump over.
    #[cfg(unix)]
    pub fn restore(&self, path: &Path) {
        if let Some(uid) = self.uid {
            if let Err(e) = std::os::unix::fs::chown(path, Some(uid), Some(uid)) {
                tracing::debug!("chown {} to uid {} failed: {}", path.display(), uid, e);
            }
        }
    }

    #[cfg(not(unix))]
    pub fn restore(&self, path: &Path) {
        let _ = path;
    }
}

/// Pick the restoration uid from the effective uid and `SUDO_UID`
fn restore_uid(euid: Option<u32>, sudo_uid: Option<&str>) -> VoxdumpResult<Option<u32>> {
    match sudo_uid {
        Some(raw) => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|_| VoxdumpError::SudoUidInvalid {
                value: raw.to_string(),
            }),
        None => Ok(euid),
    }
}

#[cfg(unix)]
fn current_euid() -> Option<u32> {
    // geteuid cannot fail
    Some(unsafe { libc::geteuid() })
}

#[cfg(not(unix))]
fn current_euid() -> Option<u32> {
    None
}
