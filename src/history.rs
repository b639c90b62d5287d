pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// One reversible edit: the state before, the state after, and a label for
/// status lines ("Undid edit on 'spark_fade'").
#[derive(Clone, Debug)]
pub struct EditRecord<T> {
    pub label: String,
    pub before: T,
    pub after: T,
}

/// Bounded undo/redo stacks. Recording a new edit clears the redo side;
/// the oldest records fall off once the limit is hit.
pub struct EditHistory<T> {
    undo: Vec<EditRecord<T>>,
    redo: Vec<EditRecord<T>>,
    limit: usize,
}

impl<T: Clone> Default for EditHistory<T> {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl<T: Clone> EditHistory<T> {
    pub fn with_limit(limit: usize) -> Self {
        Self { undo: Vec::new(), redo: Vec::new(), limit: limit.max(1) }
    }

    pub fn record(&mut self, label: impl Into<String>, before: T, after: T) {
        self.undo.push(EditRecord { label: label.into(), before, after });
        self.redo.clear();
        if self.undo.len() > self.limit {
            self.undo.remove(0);
        }
    }

    /// Moves the newest record onto the redo stack and returns the state
    /// the caller should apply.
    pub fn undo(&mut self) -> Option<T> {
        let record = self.undo.pop()?;
        let state = record.before.clone();
        self.redo.push(record);
        Some(state)
    }

    pub fn redo(&mut self) -> Option<T> {
        let record = self.redo.pop()?;
        let state = record.after.clone();
        self.undo.push(record);
        Some(state)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Label of the edit `undo` would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo.last().map(|record| record.label.as_str())
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.redo.last().map(|record| record.label.as_str())
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
