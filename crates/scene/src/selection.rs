use foundation::MarkerId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// At most one marker; map clicks auto-select the new marker.
    Single,
    /// Ordered set of markers; map clicks leave the selection alone.
    Multi,
}

/// Selection state, tagged by mode.
///
/// Ordering contract:
/// - `Multi` keeps markers in the order they were selected. Removing a marker
///   preserves the relative order of the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(Option<MarkerId>),
    Multi(Vec<MarkerId>),
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Selection::Single(None),
            SelectionMode::Multi => Selection::Multi(Vec::new()),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            Selection::Single(_) => SelectionMode::Single,
            Selection::Multi(_) => SelectionMode::Multi,
        }
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[MarkerId] {
        match self {
            Selection::Single(one) => one.as_slice(),
            Selection::Multi(many) => many,
        }
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.ids().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    pub fn clear(&mut self) {
        match self {
            Selection::Single(one) => *one = None,
            Selection::Multi(many) => many.clear(),
        }
    }

    /// Toggles `id`.
    ///
    /// - `Single`: the same marker deselects, a different one replaces.
    /// - `Multi`: present removes, absent appends.
    ///
    /// Returns `true` if `id` is selected afterwards.
    pub fn toggle(&mut self, id: MarkerId) -> bool {
        match self {
            Selection::Single(one) => {
                if *one == Some(id) {
                    *one = None;
                    false
                } else {
                    *one = Some(id);
                    true
                }
            }
            Selection::Multi(many) => {
                if many.contains(&id) {
                    many.retain(|m| *m != id);
                    false
                } else {
                    many.push(id);
                    true
                }
            }
        }
    }

    /// Makes `id` the sole selected marker. Only meaningful in `Single` mode;
    /// `Multi` is left untouched.
    pub fn select_only(&mut self, id: MarkerId) {
        if let Selection::Single(one) = self {
            *one = Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Selection, SelectionMode};
    use foundation::MarkerId;

    fn m(n: u64) -> MarkerId {
        MarkerId::new(n)
    }

    #[test]
    fn single_toggle_replaces_then_deselects() {
        let mut s = Selection::new(SelectionMode::Single);
        assert!(s.toggle(m(1)));
        assert_eq!(s.ids(), &[m(1)]);
        assert!(s.toggle(m(2)));
        assert_eq!(s.ids(), &[m(2)]);
        assert!(!s.toggle(m(2)));
        assert!(s.is_empty());
    }

    #[test]
    fn multi_toggle_twice_restores_order() {
        let mut s = Selection::new(SelectionMode::Multi);
        s.toggle(m(3));
        s.toggle(m(1));
        s.toggle(m(2));
        let before = s.clone();

        s.toggle(m(7));
        s.toggle(m(7));
        assert_eq!(s, before);

        s.toggle(m(1));
        assert_eq!(s.ids(), &[m(3), m(2)]);
        s.toggle(m(1));
        assert_eq!(s.ids(), &[m(3), m(2), m(1)]);
    }

    #[test]
    fn select_only_is_single_mode_only() {
        let mut single = Selection::new(SelectionMode::Single);
        single.select_only(m(4));
        assert_eq!(single.ids(), &[m(4)]);

        let mut multi = Selection::new(SelectionMode::Multi);
        multi.select_only(m(4));
        assert!(multi.is_empty());
    }

    #[test]
    fn clear_keeps_mode() {
        let mut s = Selection::Multi(vec![m(1), m(2)]);
        s.clear();
        assert_eq!(s, Selection::new(SelectionMode::Multi));
        assert_eq!(s.mode(), SelectionMode::Multi);
    }
}
