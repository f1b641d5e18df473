//! Single-slot selection state machine for the map's region features.
//!
//! At most one region is selected at a time. The slot is owned by `App`
//! and mutated only through the transition methods here; everything that
//! depends on it (chart projection, symbol panel) is re-derived from
//! `selected()` on each render, so map and chart cannot drift apart.

/// Current selection: none ("all regions" view) or one region by
/// catalog index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a click on region `index`.
    ///
    /// Clicking the already-selected region toggles it off; clicking a
    /// different region reselects directly, with no intermediate
    /// unselected state.
    pub fn click(&mut self, index: usize) {
        if self.current == Some(index) {
            self.current = None;
        } else {
            self.current = Some(index);
        }
    }

    /// Explicit close action: back to the all-regions view.
    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn selected(&self) -> Option<usize> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_selects_from_unselected() {
        let mut s = SelectionState::new();
        s.click(2);
        assert_eq!(s.selected(), Some(2));
    }

    #[test]
    fn reclick_toggles_off() {
        let mut s = SelectionState::new();
        s.click(1);
        s.click(1);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn click_other_region_reselects_directly() {
        let mut s = SelectionState::new();
        s.click(0);
        s.click(3);
        assert_eq!(s.selected(), Some(3));
    }

    #[test]
    fn close_clears_selection() {
        let mut s = SelectionState::new();
        s.click(5);
        s.close();
        assert_eq!(s.selected(), None);
        // close on an empty slot is a no-op
        s.close();
        assert_eq!(s.selected(), None);
    }
}
