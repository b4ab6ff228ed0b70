//! NoteStore — flat-file note storage.
//!
//! The whole collection lives in one JSON file: every read loads the full
//! array, every mutation rewrites it. Mutations serialize behind a single
//! async lock so concurrent writers cannot lose each other's updates.
//! A failure mid-write can still leave a truncated file behind (known
//! limitation of the whole-file strategy).

use chrono::Utc;
use notes_service_types::{Note, NotePayload};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::id;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("note not found: {id}")]
    NotFound { id: String },
    #[error("failed to read notes file: {0}")]
    Read(#[source] io::Error),
    #[error("notes file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to write notes file: {0}")]
    Write(#[source] io::Error),
    #[error("note {id} missing from store after write")]
    WriteVerification { id: String },
}

/// NoteStore wrapping a single JSON file holding the ordered note array.
pub struct NoteStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl NoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the full collection. A store file that does not
    /// exist yet loads as the empty collection.
    pub async fn load(&self) -> Result<Vec<Note>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Read(e)),
        };

        Ok(serde_json::from_str(&raw)?)
    }

    /// Serialize the collection as pretty JSON (4-space indent) and
    /// overwrite the store file (creates parent directories as needed).
    pub async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(StoreError::Write)?;
            }
        }

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        notes.serialize(&mut ser)?;

        tokio::fs::write(&self.path, buf)
            .await
            .map_err(StoreError::Write)
    }

    /// Append a new note with a fresh id and creation timestamps, persist,
    /// and verify the written store actually contains the id before
    /// reporting success.
    pub async fn add(&self, payload: NotePayload) -> Result<String, StoreError> {
        let _guard = self.write_lock.lock().await;

        let now = Utc::now();
        let note = Note {
            id: id::generate(),
            title: payload.title,
            tags: payload.tags,
            body: payload.body,
            created_at: now,
            updated_at: now,
        };
        let note_id = note.id.clone();

        let mut notes = self.load().await?;
        notes.push(note);
        self.save(&notes).await?;

        let written = self.load().await?;
        if !written.iter().any(|n| n.id == note_id) {
            return Err(StoreError::WriteVerification { id: note_id });
        }

        Ok(note_id)
    }

    /// The full collection in insertion order.
    pub async fn all(&self) -> Result<Vec<Note>, StoreError> {
        self.load().await
    }

    /// Linear search for a note by id.
    pub async fn find(&self, note_id: &str) -> Result<Note, StoreError> {
        let notes = self.load().await?;
        notes
            .into_iter()
            .find(|n| n.id == note_id)
            .ok_or_else(|| StoreError::NotFound {
                id: note_id.to_string(),
            })
    }

    /// Replace a note's mutable fields (title, tags, body) and bump its
    /// `updated_at`. Id and `created_at` are preserved.
    pub async fn edit(&self, note_id: &str, payload: NotePayload) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut notes = self.load().await?;
        let note = notes
            .iter_mut()
            .find(|n| n.id == note_id)
            .ok_or_else(|| StoreError::NotFound {
                id: note_id.to_string(),
            })?;

        note.title = payload.title;
        note.tags = payload.tags;
        note.body = payload.body;
        note.updated_at = Utc::now();

        self.save(&notes).await
    }

    /// Remove a note by id and persist before returning.
    pub async fn delete(&self, note_id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut notes = self.load().await?;
        let len_before = notes.len();
        notes.retain(|n| n.id != note_id);

        if notes.len() == len_before {
            return Err(StoreError::NotFound {
                id: note_id.to_string(),
            });
        }

        self.save(&notes).await
    }
}
