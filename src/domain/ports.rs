use crate::domain::model::{Batch, ImageEntry, MissingKeyPolicy, StackReport};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub trait Storage {
    /// Lists the plain files in `dir`. Reads nothing else.
    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    /// Writes `data` under the storage's base path, creating parent
    /// directories as needed.
    fn write_file(&self, name: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn target_width(&self) -> u32;
    fn group_size(&self) -> usize;
    fn missing_key_policy(&self) -> MissingKeyPolicy;

    fn filename_prefix(&self) -> &str {
        "combined"
    }
}

pub trait Pipeline {
    fn scan(&self) -> Result<Vec<ImageEntry>>;
    fn group(&self, entries: Vec<ImageEntry>) -> Result<Vec<Batch>>;
    fn compose(&self, batches: Vec<Batch>) -> Result<StackReport>;
}
