//! Draft persistence.
//!
//! A draft folder holds exactly two JSON files, one per document.

use draftkit_core::{DraftError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::document::{ContentDocument, MetaInfoDocument};

/// File name of the content document.
pub const CONTENT_FILE_NAME: &str = "draft_content.json";
/// File name of the meta-info document.
pub const META_INFO_FILE_NAME: &str = "draft_meta_info.json";

/// Writes the two documents of a draft into its folder.
pub trait DraftStore {
    fn write(&self, folder: &Path, content: &ContentDocument, meta_info: &MetaInfoDocument) -> Result<()>;
}

impl<S: DraftStore + ?Sized> DraftStore for &S {
    fn write(&self, folder: &Path, content: &ContentDocument, meta_info: &MetaInfoDocument) -> Result<()> {
        (**self).write(folder, content, meta_info)
    }
}

/// Store writing pretty-printed JSON to the local filesystem.
///
/// The folder is created if needed. Files already in it other than the two
/// documents are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDraftStore;

impl DraftStore for FsDraftStore {
    fn write(&self, folder: &Path, content: &ContentDocument, meta_info: &MetaInfoDocument) -> Result<()> {
        std::fs::create_dir_all(folder)?;
        write_json(&folder.join(CONTENT_FILE_NAME), content)?;
        write_json(&folder.join(META_INFO_FILE_NAME), meta_info)?;
        debug!(folder = %folder.display(), "Wrote draft documents");
        Ok(())
    }
}

/// Read both documents back from a draft folder.
pub fn load_documents(folder: &Path) -> Result<(ContentDocument, MetaInfoDocument)> {
    let content = read_json(&folder.join(CONTENT_FILE_NAME))?;
    let meta_info = read_json(&folder.join(META_INFO_FILE_NAME))?;
    Ok((content, meta_info))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_vec_pretty(value).map_err(|e| {
        DraftError::Serialization(format!("Failed to serialize {}: {}", path.display(), e))
    })?;
    std::fs::write(path, data)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read(path)?;
    serde_json::from_slice(&data)
        .map_err(|e| DraftError::Serialization(format!("Failed to parse {}: {}", path.display(), e)))
}
