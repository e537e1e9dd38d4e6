//! Cyclic navigation over an ordered match list.
//!
//! The navigator only tracks positions. Whoever renders the text decides
//! how the current match is emphasized and scrolled into view.

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A "current match" pointer that wraps at both ends.
///
/// The pointer starts at index 0 with nothing emphasized; the first step
/// moves it and marks the landing index as current. Build a new navigator
/// (or call [`MatchNavigator::reset`]) whenever the text or query changes.
#[derive(Debug, Clone, Default)]
pub struct MatchNavigator {
    len: usize,
    position: usize,
    current: Option<usize>,
}

impl MatchNavigator {
    /// Creates a navigator over `len` matches.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            position: 0,
            current: None,
        }
    }

    /// Forgets the previous position and adopts a new match count.
    pub fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    /// Moves the pointer one match in `direction`, wrapping around.
    ///
    /// Returns the new current index, or `None` (without side effects)
    /// when there are no matches.
    pub fn step(&mut self, direction: Direction) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.position = match direction {
            Direction::Forward => (self.position + 1) % self.len,
            Direction::Backward => (self.position + self.len - 1) % self.len,
        };
        self.current = Some(self.position);
        self.current
    }

    /// Jumps straight to match `idx` and marks it current.
    ///
    /// Returns `None` (without side effects) when `idx` is out of range.
    pub fn select(&mut self, idx: usize) -> Option<usize> {
        if idx >= self.len {
            return None;
        }
        self.position = idx;
        self.current = Some(idx);
        self.current
    }

    /// Returns the pointer position, or `None` when there are no matches.
    pub fn position(&self) -> Option<usize> {
        (self.len > 0).then_some(self.position)
    }

    /// Returns the match currently marked for emphasis, if any.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Returns the number of matches being navigated.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there is nothing to navigate.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_is_noop() {
        let mut nav = MatchNavigator::new(0);
        assert_eq!(nav.step(Direction::Forward), None);
        assert_eq!(nav.step(Direction::Backward), None);
        assert_eq!(nav.current(), None);
        assert_eq!(nav.position(), None);
    }

    #[test]
    fn test_backward_from_zero_wraps_to_last() {
        let mut nav = MatchNavigator::new(4);
        assert_eq!(nav.position(), Some(0));
        assert_eq!(nav.step(Direction::Backward), Some(3));
        assert_eq!(nav.current(), Some(3));
    }

    #[test]
    fn test_forward_wraps_to_first() {
        let mut nav = MatchNavigator::new(2);
        assert_eq!(nav.step(Direction::Forward), Some(1));
        assert_eq!(nav.step(Direction::Forward), Some(0));
    }

    #[test]
    fn test_single_match_stays_put() {
        let mut nav = MatchNavigator::new(1);
        assert_eq!(nav.step(Direction::Forward), Some(0));
        assert_eq!(nav.step(Direction::Backward), Some(0));
    }

    #[test]
    fn test_reset_clears_emphasis() {
        let mut nav = MatchNavigator::new(3);
        nav.step(Direction::Forward);
        nav.reset(5);
        assert_eq!(nav.current(), None);
        assert_eq!(nav.position(), Some(0));
        assert_eq!(nav.len(), 5);
    }

    #[test]
    fn test_select_then_step() {
        let mut nav = MatchNavigator::new(3);
        assert_eq!(nav.select(3), None);
        assert_eq!(nav.current(), None);
        assert_eq!(nav.select(2), Some(2));
        assert_eq!(nav.step(Direction::Forward), Some(0));
    }

    proptest! {
        #[test]
        fn prop_n_forward_steps_cycle(len in 1usize..50, warmup in 0usize..20) {
            let mut nav = MatchNavigator::new(len);
            for _ in 0..warmup {
                nav.step(Direction::Forward);
            }
            let start = nav.position();
            for _ in 0..len {
                nav.step(Direction::Forward);
            }
            prop_assert_eq!(nav.position(), start);
        }

        #[test]
        fn prop_backward_undoes_forward(len in 1usize..50, steps in 0usize..20) {
            let mut nav = MatchNavigator::new(len);
            for _ in 0..steps {
                nav.step(Direction::Forward);
            }
            let before = nav.position();
            nav.step(Direction::Forward);
            nav.step(Direction::Backward);
            prop_assert_eq!(nav.position(), before);
        }
    }
}
