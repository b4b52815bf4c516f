//! Whole-document persistence: one opaque text blob, read and overwritten in
//! full. No partial reads, no locking, no versioning.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::BudgetError;

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Abstraction over document stores. The gateway and the tracker only ever
/// exchange the full blob.
pub trait DocumentStore: Send + Sync {
    /// Returns the current raw document, or [`BudgetError::NotFound`] when no
    /// document has ever been saved.
    fn load(&self) -> Result<String>;

    /// Overwrites the stored document entirely.
    fn save(&self, text: &str) -> Result<()>;
}

/// Filesystem-backed store keeping the document at `<root>/data/troskovnik.md`.
#[derive(Clone)]
pub struct TextStore {
    data_file: PathBuf,
}

impl TextStore {
    pub fn new(root: Option<PathBuf>) -> Self {
        let app_root = root.unwrap_or_else(crate::utils::app_data_dir);
        Self {
            data_file: crate::utils::data_file_in(&app_root),
        }
    }

    pub fn new_default() -> Self {
        Self::new(None)
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

impl DocumentStore for TextStore {
    fn load(&self) -> Result<String> {
        if !self.data_file.exists() {
            return Err(BudgetError::NotFound);
        }
        Ok(fs::read_to_string(&self.data_file)?)
    }

    fn save(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            fs::create_dir_all(parent)?;
        }
        write_atomic(&self.data_file, text)
    }
}

/// Stages the content to a temporary sibling file and renames it over the
/// target, so a failed write cannot truncate the existing document.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let tmp = tmp_path(path);
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}
