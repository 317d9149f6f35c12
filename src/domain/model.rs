use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One input image plus the ordering key extracted from its filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub key: u64,
}

/// A contiguous run of entries combined into one output image.
/// `index` is 1-based, in formation order.
#[derive(Debug, Clone)]
pub struct Batch {
    pub index: usize,
    pub entries: Vec<ImageEntry>,
}

/// Saved output paths for a full run, in batch order.
#[derive(Debug, Clone)]
pub struct StackReport {
    pub outputs: Vec<PathBuf>,
}

/// What to do with a filename whose stem yields no usable numeric key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingKeyPolicy {
    /// Abort the whole run.
    Fail,
    /// Drop the file with a warning.
    Skip,
}
