use gridstar_core::Point;

use crate::distance::manhattan;
use crate::traits::CostModel;

/// The fixed cost model: Manhattan distance for both the step cost and the
/// heuristic.
///
/// Under king-move adjacency a diagonal step costs 2, so the heuristic is
/// exact along straight and diagonal lines but is not a lower bound in
/// general. Paths are valid but not guaranteed to be cheapest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl CostModel for Manhattan {
    #[inline]
    fn step_cost(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }

    #[inline]
    fn heuristic(&self, from: Point, goal: Point) -> i32 {
        manhattan(from, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_and_diagonal_steps() {
        let c = Manhattan;
        let p = Point::new(2, 2);
        assert_eq!(c.step_cost(p, Point::new(3, 2)), 1);
        assert_eq!(c.step_cost(p, Point::new(1, 1)), 2);
    }

    #[test]
    fn heuristic_is_manhattan() {
        let c = Manhattan;
        assert_eq!(c.heuristic(Point::new(2, 2), Point::new(12, 12)), 20);
        assert_eq!(c.heuristic(Point::new(4, 4), Point::new(4, 4)), 0);
    }
}
