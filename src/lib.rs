//! Notes with local persistence plus a scratch drawing canvas.
//!
//! The two halves are independent: [`store::NoteStore`] keeps notes in a
//! [`storage::KeyValueStore`], and [`canvas::CanvasSession`] owns the stroke
//! history and renders it to a raster image. [`app`] wires both into an
//! eframe window.

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod logging;
pub mod note;
pub mod prefs;
pub mod search;
pub mod share;
pub mod storage;
pub mod store;

pub use canvas::{CanvasSession, HexColor, Point, Stroke, StrokeHistory, Tool};
pub use config::Config;
pub use error::{ColorError, ConfigError, ExportError, SearchError, ShareError, StorageError};
pub use note::{Note, NoteId};
pub use prefs::Preferences;
pub use search::{Debouncer, SearchQuery};
pub use share::{ShareChannel, ShareOutcome};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{Composer, NoteStore};
