/// Snapshot stacks for undo/redo.
///
/// A new snapshot clears the redo stack. The oldest snapshot is dropped once
/// the undo stack exceeds its limit.
#[derive(Debug, Clone)]
pub struct UndoHistory<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    limit: usize,
}

pub const DEFAULT_LIMIT: usize = 500;

impl<T: Clone> UndoHistory<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Save `state` before making changes
    pub fn save(&mut self, state: T) {
        self.undo_stack.push(state);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }

    /// Previous state, with `current` kept for redo. `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &T) -> Option<T> {
        let prev = self.undo_stack.pop()?;
        self.redo_stack.push(current.clone());
        Some(prev)
    }

    pub fn redo(&mut self, current: &T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current.clone());
        Some(next)
    }

    /// Number of undo steps available.
    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }
}

impl<T: Clone> Default for UndoHistory<T> {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_redo_round_trip() {
        let mut h = UndoHistory::new(10);
        h.save(1);
        assert_eq!(h.undo(&2), Some(1));
        assert_eq!(h.redo(&1), Some(2));
        assert_eq!(h.redo(&2), None);
    }

    #[test]
    fn new_snapshot_clears_redo() {
        let mut h = UndoHistory::new(10);
        h.save("a");
        h.undo(&"b");
        h.save("c");
        assert_eq!(h.redo(&"c"), None);
    }

    #[test]
    fn limit_drops_oldest() {
        let mut h = UndoHistory::new(3);
        for i in 0..5 {
            h.save(i);
        }
        assert_eq!(h.depth(), 3);
        assert_eq!(h.undo(&5), Some(4));
        assert_eq!(h.undo(&4), Some(3));
        assert_eq!(h.undo(&3), Some(2));
        assert_eq!(h.undo(&2), None);
    }

    #[test]
    fn empty_history_is_none() {
        let mut h: UndoHistory<u8> = UndoHistory::default();
        assert_eq!(h.depth(), 0);
        assert_eq!(h.undo(&0), None);
    }
}
