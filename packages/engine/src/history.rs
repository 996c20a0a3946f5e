//! Undo/redo over content snapshots.
//!
//! Because content operations are copy-on-write, history is a stack of
//! whole sequences rather than inverse mutations: undo swaps the current
//! sequence for the previous snapshot, redo swaps it back. A new edit
//! clears the redo stack.

use pagecraft_page::Block;

#[derive(Debug)]
pub struct ContentHistory {
    past: Vec<Vec<Block>>,
    future: Vec<Vec<Block>>,
    max_levels: usize,
}

impl ContentHistory {
    /// Default bound of 100 undo levels.
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_levels,
        }
    }

    /// Record the sequence as it was before an edit.
    pub fn record(&mut self, before: Vec<Block>) {
        self.past.push(before);
        if self.max_levels > 0 && self.past.len() > self.max_levels {
            self.past.remove(0);
        }
        self.future.clear();
    }

    /// Step back, exchanging `current` for the previous snapshot.
    pub fn undo(&mut self, current: Vec<Block>) -> Option<Vec<Block>> {
        let previous = self.past.pop()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: Vec<Block>) -> Option<Vec<Block>> {
        let next = self.future.pop()?;
        self.past.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

impl Default for ContentHistory {
    fn default() -> Self {
        Self::new()
    }
}
