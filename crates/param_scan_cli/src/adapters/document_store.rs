use std::fs;
use std::path::PathBuf;

use anyhow::Context;

pub trait DocumentStore {
    fn write_document(&self, name: &str, body: &[u8]) -> anyhow::Result<PathBuf>;
}

/// Writes documents as files below one directory, creating it on first write.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    directory: PathBuf,
}

impl FileDocumentStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl DocumentStore for FileDocumentStore {
    fn write_document(&self, name: &str, body: &[u8]) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!("failed to create output directory {}", self.directory.display())
        })?;
        let path = self.directory.join(name);
        fs::write(&path, body)
            .with_context(|| format!("failed to write document {}", path.display()))?;
        Ok(path)
    }
}
