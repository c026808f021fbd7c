//! Dump output tree
//!
//! Writing the timestamped run directory, copying cache files into it,
//! and the post-copy file-type identification pass.

pub mod classify;
pub mod writer;

pub use classify::{classify_copied, classify_file, sniff, ClassifyOutcome};
pub use writer::{copy_variant, CopyOutcome, DumpRun};
