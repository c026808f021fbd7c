//! Voxdump - cache dump and file-type recovery for Vox chat clients
//!
//! Locates the per-platform cache directory of every installed Vox
//! build variant, copies the contents into a timestamped dump tree and
//! identifies copied files by their magic bytes.

pub mod cli;
pub mod dump;
pub mod error;
pub mod inventory;
pub mod owner;
pub mod platform;
pub mod storage;
pub mod ui;
pub mod variant;

pub use error::{VoxdumpError, VoxdumpResult};
