use std::collections::BTreeSet;

use gridstar_core::{Point, Range};

use crate::error::{ConfigError, SearchError};

/// Set of impassable cells.
///
/// The start and goal cells can never be added. Once frozen (when the
/// search starts) every mutation is rejected.
#[derive(Clone, Debug)]
pub struct BlockedCells {
    rng: Range,
    start: Point,
    goal: Point,
    cells: BTreeSet<Point>,
    frozen: bool,
}

impl BlockedCells {
    pub fn new(rng: Range, start: Point, goal: Point) -> Self {
        Self {
            rng,
            start,
            goal,
            cells: BTreeSet::new(),
            frozen: false,
        }
    }

    /// Change which cells are protected from being blocked. Cells already in
    /// the set are kept.
    pub(crate) fn protect(&mut self, start: Point, goal: Point) {
        self.start = start;
        self.goal = goal;
    }

    fn check_mutable(&self, p: Point) -> Result<(), SearchError> {
        if self.frozen {
            return Err(ConfigError::RegistryFrozen(Some(p)).into());
        }
        if !self.rng.contains(p) {
            return Err(SearchError::OutOfBounds {
                pos: p,
                range: self.rng,
            });
        }
        Ok(())
    }

    /// Block `p`. Returns whether the set changed; blocking the start or
    /// goal is a no-op.
    pub fn add(&mut self, p: Point) -> Result<bool, SearchError> {
        self.check_mutable(p)?;
        if p == self.start || p == self.goal {
            return Ok(false);
        }
        Ok(self.cells.insert(p))
    }

    /// Unblock `p`. Returns whether the set changed.
    pub fn remove(&mut self, p: Point) -> Result<bool, SearchError> {
        self.check_mutable(p)?;
        Ok(self.cells.remove(&p))
    }

    /// Flip `p` and return whether it is blocked afterwards.
    pub fn toggle(&mut self, p: Point) -> Result<bool, SearchError> {
        if self.contains(p) {
            self.remove(p)?;
            Ok(false)
        } else {
            self.add(p)
        }
    }

    /// Unblock everything.
    pub fn clear(&mut self) -> Result<(), SearchError> {
        if self.frozen {
            return Err(ConfigError::RegistryFrozen(None).into());
        }
        self.cells.clear();
        Ok(())
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.cells.contains(&p)
    }

    /// Reject every further mutation.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn thaw(&mut self) {
        self.frozen = false;
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Blocked cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BlockedCells {
        BlockedCells::new(Range::with_size(5, 5), Point::new(0, 0), Point::new(4, 4))
    }

    #[test]
    fn add_remove_contains() {
        let mut b = registry();
        assert_eq!(b.add(Point::new(2, 2)), Ok(true));
        assert_eq!(b.add(Point::new(2, 2)), Ok(false));
        assert!(b.contains(Point::new(2, 2)));
        assert_eq!(b.remove(Point::new(2, 2)), Ok(true));
        assert!(!b.contains(Point::new(2, 2)));
        assert!(b.is_empty());
    }

    #[test]
    fn endpoints_cannot_be_blocked() {
        let mut b = registry();
        assert_eq!(b.add(Point::new(0, 0)), Ok(false));
        assert_eq!(b.toggle(Point::new(4, 4)), Ok(false));
        assert!(b.is_empty());
    }

    #[test]
    fn toggle_flips() {
        let mut b = registry();
        assert_eq!(b.toggle(Point::new(1, 3)), Ok(true));
        assert_eq!(b.toggle(Point::new(1, 3)), Ok(false));
        assert!(!b.contains(Point::new(1, 3)));
    }

    #[test]
    fn out_of_bounds_is_reported() {
        let mut b = registry();
        assert!(matches!(
            b.add(Point::new(5, 1)),
            Err(SearchError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn frozen_rejects_mutation() {
        let mut b = registry();
        b.add(Point::new(1, 1)).unwrap();
        b.freeze();
        assert_eq!(
            b.add(Point::new(2, 1)),
            Err(SearchError::Config(ConfigError::RegistryFrozen(Some(Point::new(2, 1)))))
        );
        assert!(b.remove(Point::new(1, 1)).is_err());
        assert_eq!(
            b.clear(),
            Err(SearchError::Config(ConfigError::RegistryFrozen(None)))
        );
        assert!(b.contains(Point::new(1, 1)));
    }

    #[test]
    fn iter_is_row_major() {
        let mut b = registry();
        for p in [Point::new(3, 1), Point::new(1, 2), Point::new(0, 1)] {
            b.add(p).unwrap();
        }
        let cells: Vec<_> = b.iter().collect();
        assert_eq!(cells, vec![Point::new(0, 1), Point::new(3, 1), Point::new(1, 2)]);
    }
}
