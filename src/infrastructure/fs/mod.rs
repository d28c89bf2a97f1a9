//! File System Implementations

mod scanner;

pub use scanner::{scan_sources, SourceScan};
