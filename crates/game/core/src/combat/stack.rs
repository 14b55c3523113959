//! Timed buffer of pending moves.
//!
//! Each round has two phases: [`CombatStack::advance_time`] moves every due
//! entry into the resolved buffer, and [`CombatStack::extract_resolved_moves`]
//! (or its alias [`CombatStack::resolved_moves`]) hands that buffer to the
//! caller. Advancing again before extracting would drop the buffered entries,
//! so it panics instead.

/// A pending entry and the rounds left before it resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackEntry<T> {
    pub item: T,
    pub time_left: u32,
}

/// Time-indexed multiset of pending items.
///
/// Pending entries are kept in insertion order; queries sort them stably by
/// `time_left`, so ties keep insertion order.
#[derive(Clone, Debug)]
pub struct CombatStack<T> {
    pending: Vec<StackEntry<T>>,
    resolved: Vec<T>,
    last_extracted: Vec<T>,
    awaiting_extraction: bool,
}

impl<T> Default for CombatStack<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            resolved: Vec::new(),
            last_extracted: Vec::new(),
            awaiting_extraction: false,
        }
    }
}

impl<T: Clone> CombatStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `item` to resolve after `time_left` advances.
    ///
    /// An entry added at 0 resolves on the next advance, like one added at 1.
    pub fn add_move(&mut self, item: T, time_left: u32) {
        tracing::trace!(time_left, "stack entry added");
        self.pending.push(StackEntry { item, time_left });
    }

    /// Advances time by one round.
    ///
    /// # Panics
    ///
    /// Panics if the previous advance was not followed by
    /// [`CombatStack::extract_resolved_moves`].
    pub fn advance_time(&mut self) {
        assert!(
            !self.awaiting_extraction,
            "advance_time called twice without extracting resolved moves"
        );

        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|entry| entry.time_left <= 1);
        due.sort_by_key(|entry| entry.time_left);

        self.pending = waiting
            .into_iter()
            .map(|mut entry| {
                entry.time_left -= 1;
                entry
            })
            .collect();
        self.resolved = due.into_iter().map(|entry| entry.item).collect();
        self.awaiting_extraction = true;

        tracing::trace!(
            resolved = self.resolved.len(),
            pending = self.pending.len(),
            "stack advanced"
        );
    }

    /// Returns the items resolved by the last advance, exactly once.
    pub fn extract_resolved_moves(&mut self) -> Vec<T> {
        if !std::mem::replace(&mut self.awaiting_extraction, false) {
            return Vec::new();
        }
        let resolved = std::mem::take(&mut self.resolved);
        self.last_extracted = resolved.clone();
        resolved
    }

    /// Same as [`CombatStack::extract_resolved_moves`]: the batch is consumed
    /// and the next advance is allowed.
    pub fn resolved_moves(&mut self) -> Vec<T> {
        self.extract_resolved_moves()
    }

    /// Read-only view of the batch most recently consumed. Empty calls after
    /// a consumption do not replace it.
    pub fn last_resolved(&self) -> &[T] {
        &self.last_extracted
    }

    /// Pending items paired with their remaining time, soonest first.
    pub fn moves_times_remaining(&self) -> Vec<(&T, u32)> {
        let mut entries: Vec<_> = self
            .pending
            .iter()
            .map(|entry| (&entry.item, entry.time_left))
            .collect();
        entries.sort_by_key(|&(_, time_left)| time_left);
        entries
    }

    /// Pending items grouped by remaining time, soonest first.
    pub fn moves_remaining(&self) -> Vec<(u32, Vec<&T>)> {
        let mut groups: Vec<(u32, Vec<&T>)> = Vec::new();
        for (item, time_left) in self.moves_times_remaining() {
            match groups.last_mut() {
                Some((time, items)) if *time == time_left => items.push(item),
                _ => groups.push((time_left, vec![item])),
            }
        }
        groups
    }

    /// Keeps only pending entries whose item satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.pending.retain(|entry| keep(&entry.item));
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
