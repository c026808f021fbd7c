//! CLI command implementations

pub mod dump;
pub mod scan;

pub use dump::execute as dump;
pub use scan::execute as scan;
