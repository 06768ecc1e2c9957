//! Note collection with write-through persistence.
//!
//! # Invariants
//! - Every mutation rewrites the full collection to storage before returning.
//! - Notes are addressed by [`NoteId`], never by display position.
//! - `update` never changes a note's `timestamp`.
//! - No operation fails: bad ids are no-ops, write failures are logged and
//!   kept in [`NoteStore::last_error`].

use std::path::Path;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{ExportError, StorageError};
use crate::note::{Note, NoteId, decode_notes};
use crate::search::SearchQuery;
use crate::storage::{KeyValueStore, NOTES_KEY};

pub const EXPORT_FILE_NAME: &str = "notes_export.json";

pub type Clock = Box<dyn FnMut() -> i64>;

pub struct NoteStore<S: KeyValueStore> {
    storage: S,
    notes: Vec<Note>,
    clock: Clock,
    last_error: Option<StorageError>,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn open(storage: S) -> Self {
        Self::with_clock(storage, Box::new(|| Utc::now().timestamp_millis()))
    }

    /// Like [`NoteStore::open`] with a custom epoch-millis clock.
    pub fn with_clock(storage: S, mut clock: Clock) -> Self {
        let mut last_error = None;
        let raw = match storage.get(NOTES_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "failed to read notes; starting empty");
                last_error = Some(err);
                None
            }
        };
        let decoded = decode_notes(raw.as_deref(), clock());
        if decoded.coerced > 0 {
            warn!(coerced = decoded.coerced, "coerced malformed note entries");
        }
        info!(notes = decoded.notes.len(), "loaded notes");
        Self {
            storage,
            notes: decoded.notes,
            clock,
            last_error,
        }
    }

    /// Appends a note unless both title and content are blank.
    pub fn add(&mut self, title: &str, content: &str, category: &str) -> Option<NoteId> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() && content.is_empty() {
            return None;
        }
        let note = Note {
            id: NoteId::new(),
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            timestamp: (self.clock)(),
        };
        let id = note.id;
        self.notes.push(note);
        debug!(%id, "added note");
        self.persist();
        Some(id)
    }

    pub fn update(&mut self, id: NoteId, title: &str, content: &str, category: &str) -> bool {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            debug!(%id, "update of unknown note ignored");
            return false;
        };
        note.title = title.to_string();
        note.content = content.to_string();
        note.category = category.to_string();
        debug!(%id, "updated note");
        self.persist();
        true
    }

    pub fn delete(&mut self, id: NoteId) -> bool {
        let Some(index) = self.notes.iter().position(|n| n.id == id) else {
            debug!(%id, "delete of unknown note ignored");
            return false;
        };
        self.notes.remove(index);
        debug!(%id, "deleted note");
        self.persist();
        true
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Notes containing `filter` in title, content or category, newest first.
    pub fn list(&self, filter: &str) -> Vec<&Note> {
        self.list_matching(&SearchQuery::plain(filter))
    }

    pub fn list_matching(&self, query: &SearchQuery) -> Vec<&Note> {
        let mut listed: Vec<&Note> = self.notes.iter().filter(|n| query.matches(n)).collect();
        // stable: equal timestamps keep insertion order
        listed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        listed
    }

    /// Pretty-printed JSON of the whole collection in storage order.
    pub fn export(&self) -> Vec<u8> {
        // a Vec of plain structs cannot fail to serialize
        serde_json::to_vec_pretty(&self.notes).unwrap_or_default()
    }

    pub fn export_to(&self, path: &Path) -> Result<(), ExportError> {
        let bytes = serde_json::to_vec_pretty(&self.notes)?;
        std::fs::write(path, bytes).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), notes = self.notes.len(), "exported notes");
        Ok(())
    }

    /// All notes in storage order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn last_error(&self) -> Option<&StorageError> {
        self.last_error.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.notes) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to serialize notes");
                return;
            }
        };
        match self.storage.set(NOTES_KEY, &payload) {
            Ok(()) => self.last_error = None,
            Err(err) => {
                warn!(error = %err, "failed to persist notes");
                self.last_error = Some(err);
            }
        }
    }
}

/// The add/edit form.
///
/// Submitting while `editing` is set saves changes to that note instead of
/// creating a new one.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    pub title: String,
    pub category: String,
    pub content: String,
    editing: Option<NoteId>,
}

impl Composer {
    pub fn editing(&self) -> Option<NoteId> {
        self.editing
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Save Changes"
        } else {
            "Add Note"
        }
    }

    pub fn begin_edit(&mut self, note: &Note) {
        self.title = note.title.clone();
        self.category = note.category.clone();
        self.content = note.content.clone();
        self.editing = Some(note.id);
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if the store changed. Blank submissions leave the form as is.
    pub fn submit<S: KeyValueStore>(&mut self, store: &mut NoteStore<S>) -> bool {
        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() && content.is_empty() {
            return false;
        }
        let changed = match self.editing {
            Some(id) => store.update(id, title, content, &self.category),
            None => store.add(title, content, &self.category).is_some(),
        };
        self.cancel();
        changed
    }
}
