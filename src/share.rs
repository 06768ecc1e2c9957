use arboard::Clipboard;
use tracing::{debug, info};

use crate::error::ShareError;
use crate::note::Note;

pub fn share_text(note: &Note) -> String {
    format!("📝 {}\n\n{}", note.display_title(), note.content)
}

/// A way of handing note text to the outside world.
pub trait ShareChannel {
    fn name(&self) -> &'static str;

    fn share(&mut self, title: &str, text: &str) -> Result<(), ShareError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Delivered { channel: &'static str },
    /// Nothing worked; the user has to copy the text by hand.
    ManualCopy(String),
}

/// Tries each channel in order and stops at the first that succeeds.
pub fn share(note: &Note, channels: &mut [&mut dyn ShareChannel]) -> ShareOutcome {
    let text = share_text(note);
    let title = if note.title.is_empty() {
        "Note"
    } else {
        note.title.as_str()
    };
    for channel in channels.iter_mut() {
        match channel.share(title, &text) {
            Ok(()) => {
                debug!(channel = channel.name(), "shared note");
                return ShareOutcome::Delivered {
                    channel: channel.name(),
                };
            }
            Err(err) => info!(error = %err, "share channel failed; trying next"),
        }
    }
    ShareOutcome::ManualCopy(text)
}

/// System clipboard through `arboard`.
pub struct ClipboardChannel {
    clipboard: Option<Clipboard>,
}

impl ClipboardChannel {
    pub const NAME: &'static str = "clipboard";

    pub fn new() -> Self {
        Self {
            clipboard: Clipboard::new().ok(),
        }
    }
}

impl Default for ClipboardChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareChannel for ClipboardChannel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn share(&mut self, _title: &str, text: &str) -> Result<(), ShareError> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or(ShareError::Unavailable(Self::NAME))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|err| ShareError::Failed {
                channel: Self::NAME,
                reason: err.to_string(),
            })
    }
}
