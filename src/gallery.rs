//! # Gallery store
//!
//! Persisted, ordered collection of captured photos. The store is an explicit
//! abstraction handed to the capture flow after encoding succeeds; the
//! pipeline itself never touches it. Append and delete-by-id are the only
//! mutations.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::GalleryError;
use crate::pipeline::types::CaptureArtifact;

/// One gallery record; the encoded bytes live in the photo file next to the
/// index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryEntry {
    /// Unique identifier (capture timestamp in milliseconds)
    pub id: String,

    /// Era identifier of the photo
    pub era: String,

    /// Aspect format identifier
    pub format: String,

    /// Capture time, Unix milliseconds
    pub timestamp: i64,

    /// Photo filename relative to the gallery directory
    pub file: String,
}

/// Storage abstraction for captured photos
pub trait GalleryStore {
    /// Append a successfully captured photo; newest first
    fn append(&mut self, artifact: &CaptureArtifact) -> Result<GalleryEntry, GalleryError>;

    /// Delete a photo by identifier
    fn delete(&mut self, id: &str) -> Result<(), GalleryError>;

    /// All entries, newest first
    fn entries(&self) -> &[GalleryEntry];
}

const INDEX_FILE: &str = "gallery.json";

/// File-backed gallery: a JSON index plus one JPEG per photo
pub struct FileGallery {
    dir: PathBuf,
    entries: Vec<GalleryEntry>,
}

impl FileGallery {
    /// Open (or create) a gallery directory and load its index
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, GalleryError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let index_path = dir.join(INDEX_FILE);
        let entries = if index_path.exists() {
            let content = fs::read_to_string(&index_path)?;
            serde_json::from_str(&content)
                .map_err(|e| GalleryError::LoadFailed { reason: e.to_string() })?
        } else {
            Vec::new()
        };

        Ok(Self { dir, entries })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute path of a stored photo
    pub fn photo_path(&self, entry: &GalleryEntry) -> PathBuf {
        self.dir.join(&entry.file)
    }

    fn persist_index(&self) -> Result<(), GalleryError> {
        let content = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| GalleryError::PersistFailed { reason: e.to_string() })?;
        fs::write(self.dir.join(INDEX_FILE), content)?;
        Ok(())
    }
}

impl GalleryStore for FileGallery {
    fn append(&mut self, artifact: &CaptureArtifact) -> Result<GalleryEntry, GalleryError> {
        let timestamp = artifact.timestamp.timestamp_millis();
        let entry = GalleryEntry {
            id: timestamp.to_string(),
            era: artifact.era_id.clone(),
            format: artifact.format_id.clone(),
            timestamp,
            file: artifact.filename(),
        };

        fs::write(self.dir.join(&entry.file), &artifact.bytes)?;
        self.entries.insert(0, entry.clone());
        self.persist_index()?;

        debug!("Gallery now holds {} photos", self.entries.len());
        Ok(entry)
    }

    fn delete(&mut self, id: &str) -> Result<(), GalleryError> {
        let position = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| GalleryError::NotFound { id: id.to_string() })?;

        let entry = self.entries.remove(position);
        let path = self.dir.join(&entry.file);
        if path.exists() {
            fs::remove_file(path)?;
        }
        self.persist_index()
    }

    fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }
}
