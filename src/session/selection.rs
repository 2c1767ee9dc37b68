//! Currently selected stop, kept outside the colormap

/// Index of the stop the user is working on, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<usize>);

impl Selection {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<usize> {
        self.0
    }

    pub fn select(&mut self, index: usize) {
        self.0 = Some(index);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Keep the selection pointing at the same stop after `removed` is deleted
    pub fn on_removed(&mut self, removed: usize) {
        self.0 = match self.0 {
            Some(selected) if selected == removed => None,
            Some(selected) if selected > removed => Some(selected - 1),
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_removed_adjusts_selection() {
        let mut selection = Selection::none();
        selection.on_removed(1);
        assert_eq!(selection.get(), None);

        selection.select(3);
        selection.on_removed(1);
        assert_eq!(selection.get(), Some(2));

        selection.on_removed(5);
        assert_eq!(selection.get(), Some(2));

        selection.on_removed(2);
        assert_eq!(selection.get(), None);
    }
}
