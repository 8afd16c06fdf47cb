use gridstar_core::{Point, Range};

/// Cells the search has finished expanding, as a bitmap over the grid.
#[derive(Clone, Debug)]
pub struct ClosedSet {
    rng: Range,
    bits: Vec<bool>,
    count: usize,
}

impl ClosedSet {
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            bits: vec![false; rng.len()],
            count: 0,
        }
    }

    /// Mark `p` closed. Returns `false` if it was already closed or lies
    /// outside the grid.
    pub fn add(&mut self, p: Point) -> bool {
        let Some(i) = self.rng.index_of(p) else {
            return false;
        };
        if self.bits[i] {
            return false;
        }
        self.bits[i] = true;
        self.count += 1;
        true
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.rng.index_of(p).is_some_and(|i| self.bits[i])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Closed cells in row-major order.
    pub fn snapshot(&self) -> Vec<Point> {
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &closed)| closed)
            .map(|(i, _)| self.rng.point_at(i))
            .collect()
    }

    pub fn clear(&mut self) {
        self.bits.fill(false);
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_once() {
        let mut c = ClosedSet::new(Range::with_size(3, 3));
        assert!(c.add(Point::new(1, 2)));
        assert!(!c.add(Point::new(1, 2)));
        assert!(c.contains(Point::new(1, 2)));
        assert!(!c.contains(Point::new(2, 1)));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn outside_is_never_closed() {
        let mut c = ClosedSet::new(Range::with_size(3, 3));
        assert!(!c.add(Point::new(3, 0)));
        assert!(!c.contains(Point::new(-1, 0)));
        assert!(c.is_empty());
    }

    #[test]
    fn snapshot_row_major() {
        let mut c = ClosedSet::new(Range::with_size(3, 3));
        c.add(Point::new(2, 2));
        c.add(Point::new(0, 1));
        c.add(Point::new(2, 0));
        assert_eq!(
            c.snapshot(),
            vec![Point::new(2, 0), Point::new(0, 1), Point::new(2, 2)]
        );
        c.clear();
        assert!(c.snapshot().is_empty());
    }
}
