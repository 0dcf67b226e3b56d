//! Keyboard focus controller for the roster grid.
//!
//! Focus has two levels: a whole group row, and one commit "pill" inside the
//! focused row. Only the row is stored here. Which pill (if any) has focus is
//! asked of the [`FocusTarget`] every time, so the view stays the single
//! source of truth for element focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::KeyValueStore;
use crate::store::RosterStore;

/// The focusable surface the controller drives
pub trait FocusTarget {
    /// Index of the focused pill within `row_id`, if one is focused
    fn active_pill_index(&self, row_id: &str) -> Option<usize>;
    fn pill_count(&self, row_id: &str) -> usize;
    fn focus_pill(&mut self, row_id: &str, index: usize);
    /// Drop pill focus wherever it is
    fn blur_active(&mut self);
    /// Best effort; a later request supersedes an earlier one
    fn scroll_row_into_view(&mut self, row_id: &str);
}

/// Edits the controller can issue
pub trait CommitActions {
    fn add_commit(&mut self, pos_id: &str, stars: u8, is_ath: bool);
    fn remove_last_commit(&mut self, pos_id: &str);
}

impl<S: KeyValueStore> CommitActions for RosterStore<S> {
    fn add_commit(&mut self, pos_id: &str, stars: u8, is_ath: bool) {
        RosterStore::add_commit(self, pos_id, stars, is_ath);
    }

    fn remove_last_commit(&mut self, pos_id: &str) {
        RosterStore::remove_last_commit(self, pos_id);
    }
}

/// What the key was aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// The roster grid
    Grid,
    /// A text-entry field; the controller leaves these keys alone
    TextEntry,
}

/// Whether the controller acted on a key. A consumed key must not fall
/// through to any default handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavController {
    focused_row_id: Option<String>,
    /// Next commit added gets the athlete flag; cleared after use
    ath_pending: bool,
}

impl NavController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_row_id(&self) -> Option<&str> {
        self.focused_row_id.as_deref()
    }

    pub fn ath_pending(&self) -> bool {
        self.ath_pending
    }

    /// Pointer-driven focus change from the view
    pub fn set_focus(&mut self, focus: &mut dyn FocusTarget, id: &str) {
        focus.blur_active();
        self.focused_row_id = Some(id.to_string());
    }

    /// Handle one key press. `row_ids` is the current display order.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        target: KeyTarget,
        row_ids: &[String],
        actions: &mut dyn CommitActions,
        focus: &mut dyn FocusTarget,
    ) -> KeyOutcome {
        if target == KeyTarget::TextEntry {
            return KeyOutcome::Ignored;
        }
        // Chorded keys belong to the application
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return KeyOutcome::Ignored;
        }

        let active_pill = self
            .focused_row_id
            .as_deref()
            .and_then(|row| focus.active_pill_index(row));

        match key.code {
            KeyCode::Char(c @ '1'..='5') => {
                let Some(row) = self.focused_row_id.as_deref() else {
                    return KeyOutcome::Ignored;
                };
                if active_pill.is_some() {
                    return KeyOutcome::Ignored;
                }
                let stars = c as u8 - b'0';
                actions.add_commit(row, stars, self.ath_pending);
                self.ath_pending = false;
            }

            KeyCode::Char('a') | KeyCode::Char('A') => {
                if active_pill.is_some() {
                    return KeyOutcome::Ignored;
                }
                self.ath_pending = !self.ath_pending;
            }

            KeyCode::Right => {
                let Some(row) = self.focused_row_id.as_deref() else {
                    return KeyOutcome::Ignored;
                };
                let count = focus.pill_count(row);
                if count == 0 {
                    return KeyOutcome::Ignored;
                }
                match active_pill {
                    None => focus.focus_pill(row, 0),
                    Some(idx) if idx + 1 < count => focus.focus_pill(row, idx + 1),
                    Some(_) => {}
                }
            }

            KeyCode::Left => {
                let (Some(row), Some(idx)) = (self.focused_row_id.as_deref(), active_pill) else {
                    return KeyOutcome::Ignored;
                };
                if idx == 0 {
                    focus.blur_active();
                } else {
                    focus.focus_pill(row, idx - 1);
                }
            }

            KeyCode::Delete | KeyCode::Backspace => {
                let Some(row) = self.focused_row_id.as_deref() else {
                    return KeyOutcome::Ignored;
                };
                // A focused pill removes itself
                if active_pill.is_some() {
                    return KeyOutcome::Ignored;
                }
                actions.remove_last_commit(row);
                self.ath_pending = false;
            }

            KeyCode::Up => {
                focus.blur_active();
                let current = self.current_index(row_ids);
                let next = match current {
                    Some(i) if i > 0 => row_ids.get(i - 1),
                    _ => row_ids.last(),
                };
                self.move_to(next, focus);
            }

            KeyCode::Down => {
                focus.blur_active();
                let current = self.current_index(row_ids);
                let next = match current {
                    Some(i) if i + 1 < row_ids.len() => row_ids.get(i + 1),
                    _ => row_ids.first(),
                };
                self.move_to(next, focus);
            }

            KeyCode::Esc => {
                if active_pill.is_some() {
                    focus.blur_active();
                } else {
                    self.ath_pending = false;
                }
            }

            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Consumed
    }

    fn current_index(&self, row_ids: &[String]) -> Option<usize> {
        let row = self.focused_row_id.as_deref()?;
        row_ids.iter().position(|id| id == row)
    }

    fn move_to(&mut self, next: Option<&String>, focus: &mut dyn FocusTarget) {
        if let Some(id) = next {
            self.focused_row_id = Some(id.clone());
            focus.scroll_row_into_view(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Records edits instead of applying them
    #[derive(Default)]
    struct Recorder {
        added: Vec<(String, u8, bool)>,
        removed: Vec<String>,
    }

    impl CommitActions for Recorder {
        fn add_commit(&mut self, pos_id: &str, stars: u8, is_ath: bool) {
            self.added.push((pos_id.to_string(), stars, is_ath));
        }

        fn remove_last_commit(&mut self, pos_id: &str) {
            self.removed.push(pos_id.to_string());
        }
    }

    /// Pill focus stand-in with fixed pill counts per row
    #[derive(Default)]
    struct FakeFocus {
        counts: HashMap<String, usize>,
        active: Option<(String, usize)>,
        scrolled: Vec<String>,
    }

    impl FakeFocus {
        fn with_pills(pairs: &[(&str, usize)]) -> Self {
            FakeFocus {
                counts: pairs.iter().map(|(id, n)| (id.to_string(), *n)).collect(),
                ..Default::default()
            }
        }
    }

    impl FocusTarget for FakeFocus {
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
            self.active = Some((row_id.to_string(), index));
        }

        fn blur_active(&mut self) {
            self.active = None;
        }

        fn scroll_row_into_view(&mut self, row_id: &str) {
            self.scrolled.push(row_id.to_string());
        }
    }

    fn rows() -> Vec<String> {
        vec!["G1".into(), "G2".into(), "G3".into()]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    struct Harness {
        nav: NavController,
        actions: Recorder,
        focus: FakeFocus,
        rows: Vec<String>,
    }

    impl Harness {
        fn new(focus: FakeFocus) -> Self {
            Harness {
                nav: NavController::new(),
                actions: Recorder::default(),
                focus,
                rows: rows(),
            }
        }

        fn press(&mut self, code: KeyCode) -> KeyOutcome {
            self.nav.handle_key(
                key(code),
                KeyTarget::Grid,
                &self.rows,
                &mut self.actions,
                &mut self.focus,
            )
        }
    }

    #[test]
    fn digit_adds_commit_with_pending_flag() {
        let mut h = Harness::new(FakeFocus::default());
        h.nav.set_focus(&mut h.focus, "G1");
        assert_eq!(h.nav.focused_row_id(), Some("G1"));

        assert_eq!(h.press(KeyCode::Char('3')), KeyOutcome::Consumed);
        assert_eq!(h.actions.added, vec![("G1".to_string(), 3, false)]);
        assert!(!h.nav.ath_pending());

        h.press(KeyCode::Char('a'));
        assert!(h.nav.ath_pending());
        h.press(KeyCode::Char('3'));
        assert_eq!(h.actions.added[1], ("G1".to_string(), 3, true));
        assert!(!h.nav.ath_pending());
    }

    #[test]
    fn digits_outside_range_or_without_row_are_ignored() {
        let mut h = Harness::new(FakeFocus::default());
        assert_eq!(h.press(KeyCode::Char('3')), KeyOutcome::Ignored);
        h.nav.set_focus(&mut h.focus, "G1");
        assert_eq!(h.press(KeyCode::Char('6')), KeyOutcome::Ignored);
        assert_eq!(h.press(KeyCode::Char('0')), KeyOutcome::Ignored);
        assert!(h.actions.added.is_empty());
    }

    #[test]
    fn digit_with_pill_focused_is_ignored() {
        let mut h = Harness::new(FakeFocus::with_pills(&[("G1", 2)]));
        h.nav.set_focus(&mut h.focus, "G1");
        h.press(KeyCode::Right);
        assert_eq!(h.press(KeyCode::Char('4')), KeyOutcome::Ignored);
        assert!(h.actions.added.is_empty());
    }

    #[test]
    fn ath_toggle_works_without_row_but_not_on_pill() {
        let mut h = Harness::new(FakeFocus::with_pills(&[("G1", 1)]));
        assert_eq!(h.press(KeyCode::Char('A')), KeyOutcome::Consumed);
        assert!(h.nav.ath_pending());
        h.press(KeyCode::Char('a'));
        assert!(!h.nav.ath_pending());

        h.nav.set_focus(&mut h.focus, "G1");
        h.press(KeyCode::Right);
        assert_eq!(h.press(KeyCode::Char('a')), KeyOutcome::Ignored);
        assert!(!h.nav.ath_pending());
    }

    #[test]
    fn arrow_down_wraps_to_first_row() {
        let mut h = Harness::new(FakeFocus::default());
        h.nav.set_focus(&mut h.focus, "G3");
        assert_eq!(h.press(KeyCode::Down), KeyOutcome::Consumed);
        assert_eq!(h.nav.focused_row_id(), Some("G1"));
        assert_eq!(h.focus.scrolled, vec!["G1".to_string()]);
    }

    #[test]
    fn arrow_up_wraps_to_last_row() {
        let mut h = Harness::new(FakeFocus::default());
        h.nav.set_focus(&mut h.focus, "G1");
        h.press(KeyCode::Up);
        assert_eq!(h.nav.focused_row_id(), Some("G3"));
        h.press(KeyCode::Up);
        assert_eq!(h.nav.focused_row_id(), Some("G2"));
    }

    #[test]
    fn arrows_from_no_focus() {
        let mut h = Harness::new(FakeFocus::default());
        h.press(KeyCode::Down);
        assert_eq!(h.nav.focused_row_id(), Some("G1"));

        let mut h = Harness::new(FakeFocus::default());
        h.press(KeyCode::Up);
        assert_eq!(h.nav.focused_row_id(), Some("G3"));
    }

    #[test]
    fn unknown_focused_row_moves_into_sequence() {
        let mut h = Harness::new(FakeFocus::default());
        h.nav.set_focus(&mut h.focus, "gone");
        h.press(KeyCode::Down);
        assert_eq!(h.nav.focused_row_id(), Some("G1"));
    }

    #[test]
    fn vertical_arrows_with_no_rows_still_consume() {
        let mut h = Harness::new(FakeFocus::default());
        h.rows.clear();
        assert_eq!(h.press(KeyCode::Down), KeyOutcome::Consumed);
        assert_eq!(h.press(KeyCode::Up), KeyOutcome::Consumed);
        assert_eq!(h.nav.focused_row_id(), None);
        assert!(h.focus.scrolled.is_empty());
    }

    #[test]
    fn vertical_arrows_blur_pill() {
        let mut h = Harness::new(FakeFocus::with_pills(&[("G1", 2)]));
        h.nav.set_focus(&mut h.focus, "G1");
        h.press(KeyCode::Right);
        assert!(h.focus.active.is_some());
        h.press(KeyCode::Down);
        assert!(h.focus.active.is_none());
        assert_eq!(h.nav.focused_row_id(), Some("G2"));
    }

    #[test]
    fn left_from_first_pill_returns_to_row_and_right_reenters() {
        let mut h = Harness::new(FakeFocus::with_pills(&[("G1", 3)]));
        h.nav.set_focus(&mut h.focus, "G1");
        h.focus.focus_pill("G1", 0);

        assert_eq!(h.press(KeyCode::Left), KeyOutcome::Consumed);
        assert!(h.focus.active.is_none());
        assert_eq!(h.nav.focused_row_id(), Some("G1"));

        assert_eq!(h.press(KeyCode::Right), KeyOutcome::Consumed);
        assert_eq!(h.focus.active, Some(("G1".to_string(), 0)));
    }

    #[test]
    fn right_walks_pills_and_stops_at_last() {
        let mut h = Harness::new(FakeFocus::with_pills(&[("G1", 2)]));
        h.nav.set_focus(&mut h.focus, "G1");
        h.press(KeyCode::Right);
        h.press(KeyCode::Right);
        assert_eq!(h.focus.active, Some(("G1".to_string(), 1)));
        assert_eq!(h.press(KeyCode::Right), KeyOutcome::Consumed);
        assert_eq!(h.focus.active, Some(("G1".to_string(), 1)));
        h.press(KeyCode::Left);
        assert_eq!(h.focus.active, Some(("G1".to_string(), 0)));
    }

    #[test]
    fn right_without_pills_or_row_is_ignored() {
        let mut h = Harness::new(FakeFocus::default());
        assert_eq!(h.press(KeyCode::Right), KeyOutcome::Ignored);
        h.nav.set_focus(&mut h.focus, "G2");
        assert_eq!(h.press(KeyCode::Right), KeyOutcome::Ignored);
        assert_eq!(h.press(KeyCode::Left), KeyOutcome::Ignored);
    }

    #[test]
    fn delete_removes_last_commit_only_in_row_focus() {
        let mut h = Harness::new(FakeFocus::with_pills(&[("G1", 1)]));
        assert_eq!(h.press(KeyCode::Delete), KeyOutcome::Ignored);

        h.nav.set_focus(&mut h.focus, "G1");
        h.press(KeyCode::Char('a'));
        assert_eq!(h.press(KeyCode::Backspace), KeyOutcome::Consumed);
        assert_eq!(h.actions.removed, vec!["G1".to_string()]);
        assert!(!h.nav.ath_pending());

        h.press(KeyCode::Right);
        assert_eq!(h.press(KeyCode::Delete), KeyOutcome::Ignored);
        assert_eq!(h.actions.removed.len(), 1);
    }

    #[test]
    fn escape_blurs_pill_and_keeps_pending_flag() {
        let mut h = Harness::new(FakeFocus::with_pills(&[("G1", 1)]));
        h.nav.set_focus(&mut h.focus, "G1");
        h.press(KeyCode::Char('a'));
        h.press(KeyCode::Right);
        assert_eq!(h.press(KeyCode::Esc), KeyOutcome::Consumed);
        assert!(h.focus.active.is_none());
        assert!(h.nav.ath_pending());

        h.press(KeyCode::Esc);
        assert!(!h.nav.ath_pending());
        assert_eq!(h.nav.focused_row_id(), Some("G1"));
    }

    #[test]
    fn set_focus_blurs_active_pill() {
        let mut h = Harness::new(FakeFocus::with_pills(&[("G1", 1)]));
        h.nav.set_focus(&mut h.focus, "G1");
        h.press(KeyCode::Right);
        h.nav.set_focus(&mut h.focus, "G2");
        assert!(h.focus.active.is_none());
        assert_eq!(h.nav.focused_row_id(), Some("G2"));
    }

    #[test]
    fn text_entry_and_chords_are_left_alone() {
        let mut h = Harness::new(FakeFocus::default());
        h.nav.set_focus(&mut h.focus, "G1");
        let outcome = h.nav.handle_key(
            key(KeyCode::Char('3')),
            KeyTarget::TextEntry,
            &h.rows,
            &mut h.actions,
            &mut h.focus,
        );
        assert_eq!(outcome, KeyOutcome::Ignored);
        let outcome = h.nav.handle_key(
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL),
            KeyTarget::Grid,
            &h.rows,
            &mut h.actions,
            &mut h.focus,
        );
        assert_eq!(outcome, KeyOutcome::Ignored);
        assert!(h.actions.added.is_empty());
        assert!(!h.nav.ath_pending());
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut h = Harness::new(FakeFocus::default());
        h.nav.set_focus(&mut h.focus, "G1");
        assert_eq!(h.press(KeyCode::Char('q')), KeyOutcome::Ignored);
        assert_eq!(h.press(KeyCode::Enter), KeyOutcome::Ignored);
    }

    #[test]
    fn drives_a_real_store() {
        use crate::io::storage::MemoryStore;
        use crate::model::BuiltinDefaults;

        let mut store = RosterStore::open(MemoryStore::new(), "k", Box::new(BuiltinDefaults));
        let ids = store.state().position_ids();
        let mut nav = NavController::new();
        let mut focus = FakeFocus::default();
        nav.set_focus(&mut focus, "qb");
        nav.handle_key(key(KeyCode::Char('5')), KeyTarget::Grid, &ids, &mut store, &mut focus);
        nav.handle_key(key(KeyCode::Char('2')), KeyTarget::Grid, &ids, &mut store, &mut focus);
        nav.handle_key(key(KeyCode::Delete), KeyTarget::Grid, &ids, &mut store, &mut focus);
        let qb = store.state().position("qb").unwrap();
        assert_eq!(qb.commits.len(), 1);
        assert_eq!(qb.commits[0].stars, 5);
        assert_eq!(store.storage().write_count(), 3);
    }
}
