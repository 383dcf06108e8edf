// SPDX-License-Identifier: MPL-2.0
//! Wrap-around position tracking inside the gallery list.

/// Tracks the selected index in a list of `len` photos.
///
/// Stepping past either end wraps around. An empty list has no position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryNavigator {
    len: usize,
    index: usize,
}

impl GalleryNavigator {
    /// Creates a navigator positioned at `start`, reduced modulo `len`.
    #[must_use]
    pub fn new(len: usize, start: usize) -> Self {
        let index = if len == 0 { 0 } else { start % len };
        Self { len, index }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current index, or `None` when the list is empty.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    /// Moves forward one position, wrapping from the last item to the first.
    pub fn next(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.index = (self.index + 1) % self.len;
        Some(self.index)
    }

    /// Moves back one position, wrapping from the first item to the last.
    pub fn previous(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.index = if self.index == 0 {
            self.len - 1
        } else {
            self.index - 1
        };
        Some(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_to_first() {
        let mut nav = GalleryNavigator::new(3, 2);
        assert_eq!(nav.next(), Some(0));
        assert_eq!(nav.next(), Some(1));
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut nav = GalleryNavigator::new(3, 0);
        assert_eq!(nav.previous(), Some(2));
        assert_eq!(nav.previous(), Some(1));
    }

    #[test]
    fn single_item_stays_in_place() {
        let mut nav = GalleryNavigator::new(1, 0);
        assert_eq!(nav.next(), Some(0));
        assert_eq!(nav.previous(), Some(0));
    }

    #[test]
    fn empty_list_has_no_position() {
        let mut nav = GalleryNavigator::new(0, 4);
        assert!(nav.is_empty());
        assert_eq!(nav.current(), None);
        assert_eq!(nav.next(), None);
        assert_eq!(nav.previous(), None);
    }

    #[test]
    fn start_is_reduced_modulo_len() {
        let nav = GalleryNavigator::new(4, 9);
        assert_eq!(nav.current(), Some(1));
    }
}
