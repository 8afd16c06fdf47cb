use gridstar_core::{Point, Range};

use crate::error::{ConfigError, SearchError};

/// Search-time record attached to one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Best known cost from the start.
    pub g_cost: i32,
    /// Estimated cost to the goal.
    pub h_cost: i32,
    /// Predecessor on the best known path; `None` for the start and for
    /// cells the search has not reached.
    pub parent: Option<Point>,
}

impl Node {
    #[inline]
    pub fn f_cost(&self) -> i32 {
        self.g_cost + self.h_cost
    }
}

/// Fixed-size arena holding one [`Node`] per cell, stored row-major.
///
/// Parent links are coordinates into this arena, never references.
#[derive(Clone, Debug)]
pub struct GridModel {
    rng: Range,
    nodes: Vec<Node>,
}

impl GridModel {
    /// Allocate a `width` × `height` grid of zeroed nodes.
    pub fn new(width: i32, height: i32) -> Result<Self, SearchError> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::NonPositiveDimensions { width, height }.into());
        }
        let rng = Range::with_size(width, height);
        Ok(Self {
            rng,
            nodes: vec![Node::default(); rng.len()],
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.rng.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.rng.height()
    }

    /// The rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.rng.contains(p)
    }

    /// Node at `p`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&Node> {
        self.rng.index_of(p).map(|i| &self.nodes[i])
    }

    #[inline]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut Node> {
        let i = self.rng.index_of(p)?;
        Some(&mut self.nodes[i])
    }

    /// Like [`GridModel::get`], but reports an out-of-bounds error.
    pub fn node(&self, p: Point) -> Result<&Node, SearchError> {
        self.get(p).ok_or(SearchError::OutOfBounds {
            pos: p,
            range: self.rng,
        })
    }

    /// Zero every node.
    pub fn reset(&mut self) {
        self.nodes.fill(Node::default());
    }

    /// Follow parent links from `to` back to the first node without a
    /// parent, returning the coordinates in start-to-`to` order.
    ///
    /// Fails if a link leaves the grid or the chain is longer than the grid
    /// has cells, which would mean a cycle.
    pub fn trace_back(&self, to: Point) -> Result<Vec<Point>, SearchError> {
        let mut path = Vec::new();
        let mut cur = Some(to);
        while let Some(p) = cur {
            if path.len() >= self.nodes.len() {
                return Err(SearchError::InternalInvariant(format!(
                    "parent chain from {to} does not terminate"
                )));
            }
            let node = self.get(p).ok_or_else(|| {
                SearchError::InternalInvariant(format!("parent link {p} is outside the grid"))
            })?;
            path.push(p);
            cur = node.parent;
        }
        path.reverse();
        Ok(path)
    }
}
