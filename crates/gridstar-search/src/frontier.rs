use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use gridstar_core::Point;

use crate::grid::Node;

/// A discovered cell waiting in the frontier, with the costs it was pushed
/// with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierEntry {
    pub pos: Point,
    pub g_cost: i32,
    pub h_cost: i32,
    seq: u64,
}

impl FrontierEntry {
    #[inline]
    pub fn f_cost(&self) -> i32 {
        self.g_cost + self.h_cost
    }
}

impl Ord for FrontierEntry {
    /// Reversed so `BinaryHeap` (max-heap) pops the smallest `f` first,
    /// then the smallest `g`, then the earliest push.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost()
            .cmp(&self.f_cost())
            .then_with(|| other.g_cost.cmp(&self.g_cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The open list: cells discovered but not yet expanded.
///
/// Membership is by coordinate only. A cell can be present at most once.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    members: HashSet<Point>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `pos` with the costs currently in `node`. Returns `false` and
    /// leaves the frontier untouched if `pos` is already present.
    pub fn push(&mut self, pos: Point, node: &Node) -> bool {
        if !self.members.insert(pos) {
            return false;
        }
        self.heap.push(FrontierEntry {
            pos,
            g_cost: node.g_cost,
            h_cost: node.h_cost,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        true
    }

    /// Remove and return the entry with the lowest `(f, g, push order)`.
    pub fn pop_min(&mut self) -> Option<FrontierEntry> {
        let entry = self.heap.pop()?;
        self.members.remove(&entry.pos);
        Some(entry)
    }

    #[inline]
    pub fn contains(&self, pos: Point) -> bool {
        self.members.contains(&pos)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Coordinates in the order they would be popped.
    pub fn snapshot(&self) -> Vec<Point> {
        let mut sorted = self.heap.clone().into_sorted_vec();
        sorted.reverse();
        sorted.into_iter().map(|e| e.pos).collect()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
        self.next_seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(g: i32, h: i32) -> Node {
        Node {
            g_cost: g,
            h_cost: h,
            parent: None,
        }
    }

    #[test]
    fn pops_by_f_then_g() {
        let mut f = Frontier::new();
        f.push(Point::new(0, 0), &node(5, 5)); // f 10
        f.push(Point::new(1, 0), &node(4, 4)); // f 8, g 4
        f.push(Point::new(2, 0), &node(2, 6)); // f 8, g 2
        assert_eq!(f.pop_min().unwrap().pos, Point::new(2, 0));
        assert_eq!(f.pop_min().unwrap().pos, Point::new(1, 0));
        assert_eq!(f.pop_min().unwrap().pos, Point::new(0, 0));
        assert!(f.pop_min().is_none());
    }

    #[test]
    fn full_ties_pop_in_push_order() {
        let mut f = Frontier::new();
        let pts = [Point::new(3, 3), Point::new(0, 0), Point::new(2, 1)];
        for p in pts {
            f.push(p, &node(2, 2));
        }
        let popped: Vec<_> = std::iter::from_fn(|| f.pop_min().map(|e| e.pos)).collect();
        assert_eq!(popped, pts);
    }

    #[test]
    fn membership_is_by_coordinate() {
        let mut f = Frontier::new();
        assert!(f.push(Point::new(1, 1), &node(3, 3)));
        // Cheaper costs do not replace the resident entry.
        assert!(!f.push(Point::new(1, 1), &node(0, 1)));
        assert_eq!(f.len(), 1);
        assert!(f.contains(Point::new(1, 1)));
        let e = f.pop_min().unwrap();
        assert_eq!((e.g_cost, e.h_cost, e.f_cost()), (3, 3, 6));
        assert!(!f.contains(Point::new(1, 1)));
        assert!(f.is_empty());
    }

    #[test]
    fn snapshot_is_pop_order() {
        let mut f = Frontier::new();
        f.push(Point::new(0, 0), &node(1, 9));
        f.push(Point::new(1, 0), &node(1, 1));
        f.push(Point::new(2, 0), &node(1, 4));
        assert_eq!(
            f.snapshot(),
            vec![Point::new(1, 0), Point::new(2, 0), Point::new(0, 0)]
        );
        assert_eq!(f.len(), 3);
    }
}
