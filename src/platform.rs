//! Platform detection and cache path resolution
//!
//! Each supported platform stores Vox caches under a different root.
//! Resolution is pure path formatting; nothing here touches the
//! filesystem.

use crate::error::{VoxdumpError, VoxdumpResult};
use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};

/// Supported host platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    /// Linux (XDG config layout)
    Linux,
    /// macOS (Application Support layout)
    #[value(name = "macos")]
    MacOs,
    /// Windows (roaming AppData layout)
    Windows,
}

impl Platform {
    /// Detect the platform from the compile-time OS tag.
    ///
    /// Anything outside the supported set is a fatal configuration
    /// error; there is no sensible fallback path grammar.
    pub fn detect() -> VoxdumpResult<Self> {
        Self::from_os_tag(std::env::consts::OS)
            .ok_or_else(|| VoxdumpError::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }

    /// Map an `std::env::consts::OS` style tag to a platform
    pub fn from_os_tag(tag: &str) -> Option<Self> {
        match tag {
            "linux" => Some(Self::Linux),
            "macos" => Some(Self::MacOs),
            "windows" => Some(Self::Windows),
            _ => None,
        }
    }

    /// Resolve the cache directory for one build variant install.
    ///
    /// Two substitution slots: the home directory and the variant's
    /// directory segment. The Windows grammar keeps backslashes so the
    /// resolved path matches what the installer wrote.
    pub fn cache_dir(&self, home: &Path, build_dir: &str) -> PathBuf {
        match self {
            Self::Linux => home.join(".config").join(build_dir).join("Cache"),
            Self::MacOs => home
                .join("Library")
                .join("Application Support")
                .join(build_dir)
                .join("Cache"),
            Self::Windows => PathBuf::from(format!(
                "{}\\AppData\\Roaming\\{}\\Cache",
                home.display(),
                build_dir
            )),
        }
    }

    /// Whether file ownership transfer applies on this platform
    pub fn has_ownership(&self) -> bool {
        !matches!(self, Self::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_tag_mapping() {
        assert_eq!(Platform::from_os_tag("linux"), Some(Platform::Linux));
        assert_eq!(Platform::from_os_tag("macos"), Some(Platform::MacOs));
        assert_eq!(Platform::from_os_tag("windows"), Some(Platform::Windows));
        assert_eq!(Platform::from_os_tag("freebsd"), None);
    }

    #[test]
    fn linux_cache_dir() {
        let dir = Platform::Linux.cache_dir(Path::new("/home/kay"), "voxptb");
        assert_eq!(dir, PathBuf::from("/home/kay/.config/voxptb/Cache"));
    }

    #[test]
    fn macos_cache_dir() {
        let dir = Platform::MacOs.cache_dir(Path::new("/Users/kay"), "vox");
        assert_eq!(
            dir,
            PathBuf::from("/Users/kay/Library/Application Support/vox/Cache")
        );
    }

    #[test]
    fn windows_cache_dir_uses_backslashes() {
        let dir = Platform::Windows.cache_dir(Path::new("C:\\Users\\kay"), "voxcanary");
        assert_eq!(
            dir.to_string_lossy(),
            "C:\\Users\\kay\\AppData\\Roaming\\voxcanary\\Cache"
        );
    }

    #[test]
    fn ownership_applies_off_windows() {
        assert!(Platform::Linux.has_ownership());
        assert!(Platform::MacOs.has_ownership());
        assert!(!Platform::Windows.has_ownership());
    }
}
