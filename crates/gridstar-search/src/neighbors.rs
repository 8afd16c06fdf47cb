use gridstar_core::{Point, Range};

/// King-move offsets, `dx` outer and `dy` inner. This order decides the
/// push order of neighbours and with it the engine's tie-breaking.
pub const KING_MOVES: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(-1, 0),
    Point::new(-1, 1),
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
];

/// Cached neighbour computation helper.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the in-range king-move neighbours of `p` for which `keep`
    /// returns `true`, in [`KING_MOVES`] order.
    pub fn king(&mut self, p: Point, rng: Range, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for d in KING_MOVES {
            let n = p + d;
            if rng.contains(n) && keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cell_has_eight() {
        let mut nb = Neighbors::new();
        let got = nb.king(Point::new(2, 2), Range::with_size(5, 5), |_| true);
        assert_eq!(got.len(), 8);
        assert_eq!(got[0], Point::new(1, 1));
        assert_eq!(got[7], Point::new(3, 3));
        assert!(got.iter().all(|&n| n.is_adjacent(Point::new(2, 2))));
    }

    #[test]
    fn corner_is_clipped() {
        let mut nb = Neighbors::new();
        let got = nb.king(Point::new(0, 0), Range::with_size(5, 5), |_| true);
        assert_eq!(got, &[Point::new(0, 1), Point::new(1, 0), Point::new(1, 1)]);
    }

    #[test]
    fn predicate_filters() {
        let mut nb = Neighbors::new();
        let got = nb.king(Point::new(1, 1), Range::with_size(3, 3), |n| n.x != 0);
        assert_eq!(got.len(), 5);
    }
}
