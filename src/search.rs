use std::time::{Duration, Instant};

use regex::{Regex, RegexBuilder};

use crate::error::SearchError;
use crate::note::Note;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A compiled note filter.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// Case-insensitive substring; empty matches everything.
    Plain(String),
    Regex(Regex),
}

impl SearchQuery {
    pub fn plain(text: &str) -> Self {
        Self::Plain(text.to_lowercase())
    }

    pub fn parse(text: &str, regex_mode: bool) -> Result<Self, SearchError> {
        if !regex_mode || text.is_empty() {
            return Ok(Self::plain(text));
        }
        let regex = RegexBuilder::new(text).case_insensitive(true).build()?;
        Ok(Self::Regex(regex))
    }

    pub fn matches(&self, note: &Note) -> bool {
        match self {
            Self::Plain(needle) => note.matches(needle),
            Self::Regex(regex) => {
                regex.is_match(&note.title)
                    || regex.is_match(&note.content)
                    || regex.is_match(&note.category)
            }
        }
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

/// Coalesces a burst of inputs into the last one.
///
/// Every `schedule` replaces the pending value and restarts the window, so a
/// value is delivered by `poll` only once input has been quiet for `delay`.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((deadline, _)) if *deadline <= now);
        if due {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    /// Time left until the pending value fires, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(deadline, _)| deadline.saturating_duration_since(now))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
