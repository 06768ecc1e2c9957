use tracing::warn;

use crate::storage::{DARK_MODE_KEY, KeyValueStore};

/// Persisted chrome state.
pub struct Preferences<S: KeyValueStore> {
    storage: S,
    dark_mode: bool,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn load(storage: S) -> Self {
        let dark_mode = match storage.get(DARK_MODE_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!(error = %err, "failed to read dark mode flag");
                false
            }
        };
        Self { storage, dark_mode }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flips dark mode, persists it and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        let value = if self.dark_mode { "true" } else { "false" };
        if let Err(err) = self.storage.set(DARK_MODE_KEY, value) {
            warn!(error = %err, "failed to persist dark mode flag");
        }
        self.dark_mode
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.dark_mode { "☀" } else { "🌙" }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
