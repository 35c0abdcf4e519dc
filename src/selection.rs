//! Which monitors the user wants blacked out.
//!
//! Entries are keyed by position in the enumerated monitor list. When the list
//! is rebuilt, flags carry over by index only: a monitor that moved position
//! inherits whatever flag its slot had, new trailing slots start selected, and
//! flags past the new length are dropped. Monitor identity is not tracked.

use tracing::debug;

use crate::error::{BlackoutError, Result};
use crate::monitor::Monitor;

/// One row of the selection checklist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionEntry {
    /// Position of the monitor in the enumerated list.
    pub index: usize,
    pub selected: bool,
}

/// Ordered selection flags, one per enumerated monitor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
}

impl Selection {
    /// One entry per monitor, all selected.
    pub fn initialize(monitors: &[Monitor]) -> Self {
        Self::rebuild(monitors, &[])
    }

    /// Rebuild for a (possibly different) monitor list, carrying flags over by position.
    pub fn rebuild(monitors: &[Monitor], previous: &[SelectionEntry]) -> Self {
        let entries = (0..monitors.len())
            .map(|index| SelectionEntry {
                index,
                selected: previous.get(index).is_none_or(|prev| prev.selected),
            })
            .collect();
        Self { entries }
    }

    /// Flip the flag for `index` and return its new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(BlackoutError::IndexOutOfRange { index, len })?;
        entry.selected = !entry.selected;
        debug!(index, selected = entry.selected, "toggled monitor");
        Ok(entry.selected)
    }

    /// Indices selected right now, in monitor order.
    ///
    /// The returned vector is detached from the selection; later toggles do
    /// not change it.
    pub fn snapshot(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.index)
            .collect()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(|e| e.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|e| e.selected).count()
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
