// crates/lumacut-core/src/history.rs
//
// EditorState: the applied FilterValue plus a linear undo/redo history.
//
// One snapshot list and a cursor, rather than separate undo/redo stacks:
//   history[index] == current   after every transition
//   commit truncates everything after `index`, then appends
//   undo/redo move the cursor and are silent no-ops at the ends
//
// Owned by exactly one editor screen. Async suggestion results reach it only
// through `commit` (via `apply_suggestion`) on the owning thread.

use serde::{Deserialize, Serialize};

use crate::filter::{FieldUpdate, FilterValue};
use crate::presets::FilterPreset;
use crate::suggestion::RemoteSuggestion;

/// Default cap on retained snapshots.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    current: FilterValue,
    history: Vec<FilterValue>,
    index:   usize,
    limit:   usize,
}

impl Default for EditorState {
    fn default() -> Self { Self::new() }
}

impl EditorState {
    /// Fresh state: one identity snapshot, cursor at 0.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Keep at most `limit` snapshots (minimum 1). Oldest entries drop first.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            current: FilterValue::IDENTITY,
            history: vec![FilterValue::IDENTITY],
            index:   0,
            limit:   limit.max(1),
        }
    }

    pub fn current(&self) -> &FilterValue { &self.current }
    pub fn history(&self) -> &[FilterValue] { &self.history }
    pub fn index(&self) -> usize { self.index }

    pub fn can_undo(&self) -> bool { self.index > 0 }
    pub fn can_redo(&self) -> bool { self.index + 1 < self.history.len() }

    // ── Transitions ───────────────────────────────────────────────────────────

    /// Make `value` current. Discards any redo branch.
    pub fn commit(&mut self, value: FilterValue) {
        self.history.truncate(self.index + 1);
        self.history.push(value);

        let overflow = self.history.len().saturating_sub(self.limit);
        if overflow > 0 {
            self.history.drain(..overflow);
        }

        self.index   = self.history.len() - 1;
        self.current = value;
        log::debug!("[history] commit → {} entries, index {}", self.history.len(), self.index);
    }

    /// Step back one snapshot. Returns false (and changes nothing) at the start.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index  -= 1;
        self.current = self.history[self.index];
        log::debug!("[history] undo → index {}", self.index);
        true
    }

    /// Step forward one snapshot. Returns false (and changes nothing) at the end.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.index  += 1;
        self.current = self.history[self.index];
        log::debug!("[history] redo → index {}", self.index);
        true
    }

    /// Replace the whole history with `[initial]`. Called on mount and on new media.
    pub fn reset(&mut self, initial: FilterValue) {
        self.history.clear();
        self.history.push(initial);
        self.index   = 0;
        self.current = initial;
        log::debug!("[history] reset");
    }

    // ── Convenience transitions ───────────────────────────────────────────────

    /// Commit the current value with one field replaced.
    pub fn set_field(&mut self, update: FieldUpdate) {
        let next = self.current.with(update);
        self.commit(next);
    }

    pub fn apply_preset(&mut self, preset: &FilterPreset) {
        self.commit(preset.value);
    }

    /// Merge the present fields of `suggestion` over the current value and
    /// commit. Returns false when the suggestion carries no numeric fields
    /// (description-only), in which case nothing is committed.
    pub fn apply_suggestion(&mut self, suggestion: &RemoteSuggestion) -> bool {
        if !suggestion.has_values() {
            return false;
        }
        let merged = suggestion.merge_onto(&self.current);
        self.commit(merged);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterField;

    fn v(brightness: f32) -> FilterValue {
        FilterValue { brightness, ..FilterValue::IDENTITY }
    }

    fn assert_invariant(s: &EditorState) {
        assert!(s.index() < s.history().len());
        assert_eq!(s.history()[s.index()], *s.current());
    }

    #[test]
    fn fresh_state_has_single_identity_entry() {
        let s = EditorState::new();
        assert_eq!(s.history(), &[FilterValue::IDENTITY]);
        assert_eq!(s.index(), 0);
        assert!(!s.can_undo());
        assert!(!s.can_redo());
    }

    #[test]
    fn undo_on_fresh_state_is_noop() {
        let mut s = EditorState::new();
        let before = s.clone();
        assert!(!s.undo());
        assert_eq!(s, before);
    }

    #[test]
    fn undo_redo_round_trip() {
        let mut s = EditorState::new();
        s.commit(v(120.0));
        assert!(s.undo());
        assert!(s.current().is_identity());
        assert!(s.redo());
        assert_eq!(*s.current(), v(120.0));

        let before = s.clone();
        assert!(!s.redo());
        assert_eq!(s, before);
        assert_invariant(&s);
    }

    #[test]
    fn commit_after_undo_discards_redo_branch() {
        let mut s = EditorState::new();
        s.commit(v(110.0));
        s.commit(v(120.0));
        s.undo();
        s.commit(v(130.0));

        assert!(!s.redo());
        assert_eq!(s.history(), &[FilterValue::IDENTITY, v(110.0), v(130.0)]);
        assert_invariant(&s);
    }

    #[test]
    fn reset_replaces_history() {
        let mut s = EditorState::new();
        s.commit(v(110.0));
        s.commit(v(120.0));
        s.reset(v(90.0));
        assert_eq!(s.history(), &[v(90.0)]);
        assert_eq!(s.index(), 0);
        assert_invariant(&s);
    }

    #[test]
    fn limit_drops_oldest_and_keeps_cursor_valid() {
        let mut s = EditorState::with_limit(3);
        for b in [101.0, 102.0, 103.0, 104.0] {
            s.commit(v(b));
        }
        assert_eq!(s.history(), &[v(102.0), v(103.0), v(104.0)]);
        assert_eq!(s.index(), 2);
        assert_invariant(&s);
    }

    #[test]
    fn set_field_commits_one_field_change() {
        let mut s = EditorState::new();
        s.set_field(FieldUpdate::new(FilterField::Contrast, 140.0));
        assert_eq!(s.current().contrast, 140.0);
        assert_eq!(s.current().brightness, 100.0);
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn description_only_suggestion_commits_nothing() {
        let mut s = EditorState::new();
        let before = s.clone();
        let sug = RemoteSuggestion::description_only("looks fine");
        assert!(!s.apply_suggestion(&sug));
        assert_eq!(s, before);
    }

    #[test]
    fn partial_suggestion_preserves_absent_fields() {
        let mut s = EditorState::new();
        s.commit(v(120.0));
        let sug = RemoteSuggestion { contrast: Some(140.0), ..Default::default() };
        assert!(s.apply_suggestion(&sug));
        assert_eq!(
            *s.current(),
            FilterValue { brightness: 120.0, contrast: 140.0, ..FilterValue::IDENTITY },
        );
    }
}
