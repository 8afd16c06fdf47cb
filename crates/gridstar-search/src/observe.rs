use gridstar_core::Point;

/// Immutable picture of the engine taken right after a cell was selected
/// for expansion.
///
/// Owns its data, so it can be handed to another thread for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// The cell just popped from the frontier.
    pub current: Point,
    /// Frontier members in pop order, `current` excluded.
    pub frontier: Vec<Point>,
    /// Closed cells in row-major order, `current` excluded.
    pub closed: Vec<Point>,
    /// Number of completed expansions before this step.
    pub iteration: usize,
}

impl Observation {
    #[inline]
    pub fn in_frontier(&self, p: Point) -> bool {
        self.frontier.contains(&p)
    }

    /// `closed` is sorted row-major, which matches `Point`'s ordering.
    #[inline]
    pub fn is_closed(&self, p: Point) -> bool {
        self.closed.binary_search(&p).is_ok()
    }
}
