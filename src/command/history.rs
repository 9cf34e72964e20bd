/// Linear, snapshot-based undo/redo log.
///
/// The log is never empty and `cursor` always points at the entry that
/// matches the live state. Entries after the cursor are redo-able; the next
/// `record` discards them, so history never branches.
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    /// Snapshots, oldest first
    entries: Vec<T>,
    /// Index of the entry matching the live state
    cursor: usize,
}

impl<T> History<T> {
    /// Creates a history holding a single initial entry
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Drops every entry and starts over from `initial`
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }

    /// Records a new entry after the cursor, discarding any redo-able future
    pub fn record(&mut self, entry: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    /// Replaces the entry under the cursor without growing the log
    pub fn amend(&mut self, entry: T) {
        self.entries[self.cursor] = entry;
    }

    /// Steps back one entry. Returns `None` when already at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Steps forward one entry. Returns `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: the log always holds at least one entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_advances_cursor() {
        let mut history = History::new(0);
        history.record(1);
        history.record(2);
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(*history.current(), 2);
    }

    #[test]
    fn test_undo_redo_bounds_are_ignored() {
        let mut history = History::new("a");
        assert!(!history.can_undo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.cursor(), 0);

        history.record("b");
        assert_eq!(history.undo(), Some(&"a"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some(&"b"));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_record_after_undo_truncates_future() {
        let mut history = History::new(0);
        history.record(1);
        history.record(2);
        history.undo();
        history.undo();
        assert!(history.can_redo());

        history.record(9);
        assert!(!history.can_redo());
        assert_eq!(history.entries(), &[0, 9]);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_amend_keeps_length() {
        let mut history = History::new(0);
        history.record(1);
        history.amend(5);
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(), Some(&0));
        assert_eq!(history.redo(), Some(&5));
    }

    #[test]
    fn test_reset_leaves_single_entry() {
        let mut history = History::new(0);
        history.record(1);
        history.reset(7);
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo() && !history.can_redo());
    }
}
