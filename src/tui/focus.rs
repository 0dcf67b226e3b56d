use std::collections::HashMap;

use crate::model::RosterState;

use super::nav::FocusTarget;

/// Element-level focus for the roster grid: which commit pill is focused and
/// which row the view should bring on screen next.
///
/// Pill counts are refreshed from the roster with [`PillFocus::sync`] before
/// each key is dispatched, mirroring a widget tree rebuilt every frame.
#[derive(Debug, Clone, Default)]
pub struct PillFocus {
    counts: HashMap<String, usize>,
    active: Option<(String, usize)>,
    scroll_request: Option<String>,
}

impl PillFocus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh pill counts and pull the focused pill back into range if its
    /// row shrank or disappeared.
    pub fn sync(&mut self, state: &RosterState) {
        self.counts = state
            .positions
            .iter()
            .map(|p| (p.id.clone(), p.commits.len()))
            .collect();
        self.active = self.active.take().and_then(|(row, idx)| {
            let count = self.counts.get(&row).copied().unwrap_or(0);
            (count > 0).then(|| (row, idx.min(count - 1)))
        });
    }

    /// Focused pill as (row id, index)
    pub fn active(&self) -> Option<(&str, usize)> {
        self.active.as_ref().map(|(row, idx)| (row.as_str(), *idx))
    }

    /// Latest scroll request, consumed by the renderer
    pub fn take_scroll_request(&mut self) -> Option<String> {
        self.scroll_request.take()
    }
}

impl FocusTarget for PillFocus {
    fn active_pill_index(&self, row_id: &str) -> Option<usize> {
        match &self.active {
            Some((row, idx)) if row == row_id => Some(*idx),
            _ => None,
        }
    }

    fn pill_count(&self, row_id: &str) -> usize {
        self.counts.get(row_id).copied().unwrap_or(0)
    }

    fn focus_pill(&mut self, row_id: &str, index: usize) {
        if index < self.pill_count(row_id) {
            self.active = Some((row_id.to_string(), index));
        }
    }

    fn blur_active(&mut self) {
        self.active = None;
    }

    fn scroll_row_into_view(&mut self, row_id: &str) {
        self.scroll_request = Some(row_id.to_string());
    }
}
