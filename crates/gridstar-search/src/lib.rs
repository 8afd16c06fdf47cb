//! Step-wise A* search on a fixed-size grid.
//!
//! A [`SearchEngine`] owns one search session: a [`GridModel`] arena of
//! nodes, the [`BlockedCells`] registry, the [`Frontier`] and the
//! [`ClosedSet`]. It is driven one expansion at a time with
//! [`SearchEngine::advance`], so a renderer can show every step, or run to
//! the end with [`SearchEngine::run_to_completion`].
//!
//! Movement is king-move (eight neighbours). Step cost and heuristic are
//! both the Manhattan distance ([`Manhattan`]), so a diagonal step costs 2.
//! Ties on `f` are broken by lower `g`, then by push order, which makes
//! every run reproducible.
//!
//! ```
//! use gridstar_core::Point;
//! use gridstar_search::{SearchConfig, SearchEngine, SearchOutcome};
//!
//! let cfg = SearchConfig::new(5, 5, Point::new(0, 0), Point::new(4, 4));
//! let mut engine = SearchEngine::new(&cfg).unwrap();
//! engine.begin().unwrap();
//! let outcome = engine.run_to_completion().unwrap();
//! assert_eq!(outcome.path().map(|p| p.len()), Some(5));
//! assert!(matches!(outcome, SearchOutcome::Found(_)));
//! ```
//!
//! # Components
//!
//! | Type | Role |
//! |---|---|
//! | [`GridModel`] | one [`Node`] per cell, parent links by coordinate |
//! | [`BlockedCells`] | impassable cells, frozen once running |
//! | [`CostModel`] | step cost and heuristic |
//! | [`Frontier`] | open list ordered by `(f, g, push order)` |
//! | [`ClosedSet`] | expanded cells |
//! | [`SearchEngine`] | the state machine tying them together |

mod blocked;
mod closed;
mod config;
mod cost;
mod distance;
mod engine;
mod error;
mod frontier;
mod grid;
mod neighbors;
mod observe;
mod traits;

pub use blocked::BlockedCells;
pub use closed::ClosedSet;
pub use config::{BLOCKED, GOAL, OPEN, START, START_GOAL, ScenarioError, SearchConfig};
pub use cost::Manhattan;
pub use distance::{chebyshev, manhattan};
pub use engine::{SearchEngine, SearchOutcome, SearchState, Step};
pub use error::{ConfigError, SearchError};
pub use frontier::{Frontier, FrontierEntry};
pub use grid::{GridModel, Node};
pub use neighbors::{KING_MOVES, Neighbors};
pub use observe::Observation;
pub use traits::{CostModel, SearchObserver};
