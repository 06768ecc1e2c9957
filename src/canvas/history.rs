//! Linear undo/redo over strokes.
//!
//! # Invariants
//! - A stroke lives in exactly one of `committed` or `undone`; strokes move
//!   between them, they are never copied.
//! - `commit` always empties `undone`: a new stroke invalidates redo.

use super::stroke::Stroke;

#[derive(Debug, Clone, Default)]
pub struct StrokeHistory {
    /// Oldest first.
    committed: Vec<Stroke>,
    /// Most recently undone last.
    undone: Vec<Stroke>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self, stroke: Stroke) {
        self.committed.push(stroke);
        self.undone.clear();
    }

    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(stroke) => {
                self.undone.push(stroke);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(stroke) => {
                self.committed.push(stroke);
                true
            }
            None => false,
        }
    }

    pub fn committed(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn undone(&self) -> &[Stroke] {
        &self.undone
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
}
