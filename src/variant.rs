//! Installable Vox build variants
//!
//! The four release channels ship as separate installs with separate
//! cache directories. The set is fixed; variants are always processed
//! in the order of [`Variant::ALL`].

use serde::Serialize;
use std::fmt;

/// One installable build channel of the Vox client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Regular public release
    Stable,
    /// Public test build
    Ptb,
    /// Canary channel
    Canary,
    /// Internal development build
    Development,
}

impl Variant {
    /// All variants, in fixed processing and reporting order
    pub const ALL: [Variant; 4] = [
        Variant::Stable,
        Variant::Ptb,
        Variant::Canary,
        Variant::Development,
    ];

    /// Human-facing channel name, also used as the dump subfolder name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Ptb => "PTB",
            Self::Canary => "Canary",
            Self::Development => "Development",
        }
    }

    /// Directory segment the installer uses under the platform config root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Stable => "vox",
            Self::Ptb => "voxptb",
            Self::Canary => "voxcanary",
            Self::Development => "voxdevelopment",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
