//! The step-wise A* driver.
//!
//! ```text
//! Idle --begin--> Running --advance--> Found | Exhausted
//! ```
//!
//! One [`SearchEngine::advance`] call pops one cell, reports it through an
//! [`Observation`] and either finishes or expands it. Pacing and rendering
//! are left to the caller.

use gridstar_core::Point;
use log::{debug, trace};

use crate::blocked::BlockedCells;
use crate::closed::ClosedSet;
use crate::config::SearchConfig;
use crate::cost::Manhattan;
use crate::error::{ConfigError, SearchError};
use crate::frontier::Frontier;
use crate::grid::{GridModel, Node};
use crate::neighbors::Neighbors;
use crate::observe::Observation;
use crate::traits::{CostModel, SearchObserver};

/// Lifecycle of a search session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// Accepting configuration changes.
    Idle,
    Running,
    /// Terminal: the goal was reached.
    Found,
    /// Terminal: the frontier ran dry without reaching the goal.
    Exhausted,
}

impl SearchState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

/// Result of a single [`SearchEngine::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A cell was expanded; the search goes on.
    Expanded(Observation),
    /// The popped cell was the goal.
    Found {
        observation: Observation,
        path: Vec<Point>,
    },
    /// Nothing left to expand. No path exists.
    Exhausted,
}

/// How a finished search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// Coordinates from start to goal, both included.
    Found(Vec<Point>),
    Exhausted,
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::Found(path) => Some(path),
            Self::Exhausted => None,
        }
    }
}

/// What one iteration produced, carrying whatever the caller snapshotted.
enum Progress<T> {
    Expanded(T),
    Found(T, Vec<Point>),
    Exhausted,
}

/// A search session over one grid.
///
/// Owns the grid arena, the blocked cells, the frontier and the closed set.
/// None of them is handed out mutably; observers get owned snapshots.
pub struct SearchEngine<C: CostModel = Manhattan> {
    cost: C,
    grid: GridModel,
    blocked: BlockedCells,
    frontier: Frontier,
    closed: ClosedSet,
    neighbors: Neighbors,
    start: Point,
    goal: Point,
    allow_same_endpoints: bool,
    state: SearchState,
    iteration: usize,
    path: Option<Vec<Point>>,
    fault: Option<SearchError>,
}

impl SearchEngine<Manhattan> {
    /// Build an idle session with the Manhattan cost model.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Self::with_cost(config, Manhattan)
    }
}

impl<C: CostModel> SearchEngine<C> {
    /// Build an idle session with a custom cost model.
    ///
    /// Start and goal are only validated by [`SearchEngine::begin`]; blocked
    /// cells outside the grid are rejected here.
    pub fn with_cost(config: &SearchConfig, cost: C) -> Result<Self, SearchError> {
        let grid = GridModel::new(config.width, config.height)?;
        let rng = grid.range();
        let mut blocked = BlockedCells::new(rng, config.start, config.goal);
        for &p in &config.blocked {
            blocked.add(p)?;
        }
        Ok(Self {
            cost,
            grid,
            blocked,
            frontier: Frontier::new(),
            closed: ClosedSet::new(rng),
            neighbors: Neighbors::new(),
            start: config.start,
            goal: config.goal,
            allow_same_endpoints: config.allow_same_endpoints,
            state: SearchState::Idle,
            iteration: 0,
            path: None,
            fault: None,
        })
    }

    fn require(&self, command: &'static str, state: SearchState) -> Result<(), SearchError> {
        if self.state != state {
            return Err(SearchError::InvalidState {
                command,
                state: self.state,
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Idle commands
    // -----------------------------------------------------------------------

    /// Move the endpoints. Only valid while idle.
    pub fn set_endpoints(&mut self, start: Point, goal: Point) -> Result<(), SearchError> {
        self.require("set_endpoints", SearchState::Idle)?;
        self.start = start;
        self.goal = goal;
        self.blocked.protect(start, goal);
        Ok(())
    }

    /// Flip the blocked state of `p`, returning whether it is now blocked.
    ///
    /// Start and goal never become blocked. Fails with
    /// [`ConfigError::RegistryFrozen`] once the search has begun.
    pub fn toggle_blocked(&mut self, p: Point) -> Result<bool, SearchError> {
        self.blocked.toggle(p)
    }

    /// Block `p`. Returns whether anything changed.
    pub fn block(&mut self, p: Point) -> Result<bool, SearchError> {
        self.blocked.add(p)
    }

    /// Unblock `p`. Returns whether anything changed.
    pub fn unblock(&mut self, p: Point) -> Result<bool, SearchError> {
        self.blocked.remove(p)
    }

    /// Unblock every cell.
    pub fn clear_blocked(&mut self) -> Result<(), SearchError> {
        self.blocked.clear()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.grid.contains(self.start) {
            return Err(ConfigError::StartOutOfBounds(self.start));
        }
        if !self.grid.contains(self.goal) {
            return Err(ConfigError::GoalOutOfBounds(self.goal));
        }
        if self.start == self.goal && !self.allow_same_endpoints {
            return Err(ConfigError::SameEndpoints(self.start));
        }
        if self.blocked.contains(self.start) {
            return Err(ConfigError::StartBlocked(self.start));
        }
        if self.blocked.contains(self.goal) {
            return Err(ConfigError::GoalBlocked(self.goal));
        }
        Ok(())
    }

    /// Check the configuration and enter `Running` with the start cell as
    /// the only frontier member. On error nothing changes.
    pub fn begin(&mut self) -> Result<(), SearchError> {
        self.require("begin", SearchState::Idle)?;
        if let Err(e) = self.validate() {
            debug!("[AStar] begin rejected: {e}");
            return Err(e.into());
        }

        self.grid.reset();
        let start = Node {
            g_cost: 0,
            h_cost: self.cost.heuristic(self.start, self.goal),
            parent: None,
        };
        let slot = self.grid.get_mut(self.start).ok_or_else(|| {
            SearchError::InternalInvariant(format!("start {} vanished from the grid", self.start))
        })?;
        *slot = start;
        self.blocked.freeze();
        self.frontier.push(self.start, &start);
        self.state = SearchState::Running;
        debug!(
            "[AStar] begin: {}x{} grid, start={} goal={} blocked={}",
            self.grid.width(),
            self.grid.height(),
            self.start,
            self.goal,
            self.blocked.len()
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Running
    // -----------------------------------------------------------------------

    fn fail(&mut self, err: SearchError) -> SearchError {
        debug!("[AStar] aborting: {err}");
        self.fault = Some(err.clone());
        err
    }

    /// Perform one iteration of the search.
    ///
    /// After an internal invariant error every further call returns that
    /// same error.
    pub fn advance(&mut self) -> Result<Step, SearchError> {
        Ok(match self.step(Self::observation)? {
            Progress::Expanded(observation) => Step::Expanded(observation),
            Progress::Found(observation, path) => Step::Found { observation, path },
            Progress::Exhausted => Step::Exhausted,
        })
    }

    fn observation(&self, current: Point) -> Observation {
        Observation {
            current,
            frontier: self.frontier.snapshot(),
            closed: self.closed.snapshot(),
            iteration: self.iteration,
        }
    }

    /// One iteration. `snapshot` runs right after the pop, before `current`
    /// is closed; callers without an observer pass a no-op so no snapshot is
    /// built.
    fn step<T>(
        &mut self,
        snapshot: impl FnOnce(&Self, Point) -> T,
    ) -> Result<Progress<T>, SearchError> {
        if let Some(err) = &self.fault {
            return Err(err.clone());
        }
        self.require("advance", SearchState::Running)?;

        let Some(entry) = self.frontier.pop_min() else {
            self.state = SearchState::Exhausted;
            debug!("[AStar] exhausted after {} iterations", self.iteration);
            return Ok(Progress::Exhausted);
        };
        let current = entry.pos;
        trace!(
            "[AStar] step {}: current={} f={} g={} open={} closed={}",
            self.iteration,
            current,
            entry.f_cost(),
            entry.g_cost,
            self.frontier.len(),
            self.closed.len()
        );
        let observation = snapshot(self, current);

        if current == self.goal {
            let path = match self.grid.trace_back(current) {
                Ok(path) => path,
                Err(e) => return Err(self.fail(e)),
            };
            if path.first() != Some(&self.start) {
                return Err(self.fail(SearchError::InternalInvariant(format!(
                    "path from {} does not lead back to start {}",
                    current, self.start
                ))));
            }
            debug!(
                "[AStar] found goal after {} iterations, {} steps, cost {}",
                self.iteration,
                path.len() - 1,
                entry.g_cost
            );
            self.state = SearchState::Found;
            self.path = Some(path.clone());
            return Ok(Progress::Found(observation, path));
        }

        self.closed.add(current);

        let rng = self.grid.range();
        let blocked = &self.blocked;
        let closed = &self.closed;
        let candidates = self
            .neighbors
            .king(current, rng, |n| !blocked.contains(n) && !closed.contains(n));

        let mut unresolved = None;
        for &n in candidates {
            // Frontier residents keep the costs they were pushed with.
            if self.frontier.contains(n) {
                continue;
            }
            let Some(node) = self.grid.get_mut(n) else {
                unresolved = Some(n);
                break;
            };
            node.g_cost = entry.g_cost + self.cost.step_cost(current, n);
            node.h_cost = self.cost.heuristic(n, self.goal);
            node.parent = Some(current);
            self.frontier.push(n, node);
        }
        if let Some(n) = unresolved {
            return Err(self.fail(SearchError::InternalInvariant(format!(
                "neighbour {n} of {current} cannot be resolved by the grid"
            ))));
        }

        self.iteration += 1;
        Ok(Progress::Expanded(observation))
    }

    /// Advance until the search ends, feeding every observation to
    /// `observer`. Returns the stored outcome if the search already ended.
    pub fn run_with<O: SearchObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<SearchOutcome, SearchError> {
        if let Some(outcome) = self.outcome() {
            return Ok(outcome);
        }
        loop {
            match self.advance()? {
                Step::Expanded(obs) => observer.observe(&obs),
                Step::Found { observation, path } => {
                    observer.observe(&observation);
                    return Ok(SearchOutcome::Found(path));
                }
                Step::Exhausted => return Ok(SearchOutcome::Exhausted),
            }
        }
    }

    /// Advance until the search ends.
    pub fn run_to_completion(&mut self) -> Result<SearchOutcome, SearchError> {
        if let Some(outcome) = self.outcome() {
            return Ok(outcome);
        }
        loop {
            match self.step(|_, _| ())? {
                Progress::Expanded(()) => {}
                Progress::Found((), path) => return Ok(SearchOutcome::Found(path)),
                Progress::Exhausted => return Ok(SearchOutcome::Exhausted),
            }
        }
    }

    /// Advance at most `max_steps` times. Returns the outcome if the search
    /// ended within the budget, `None` if it is still running.
    pub fn run_until(&mut self, max_steps: usize) -> Result<Option<SearchOutcome>, SearchError> {
        if let Some(outcome) = self.outcome() {
            return Ok(Some(outcome));
        }
        for _ in 0..max_steps {
            match self.step(|_, _| ())? {
                Progress::Expanded(()) => {}
                Progress::Found((), path) => return Ok(Some(SearchOutcome::Found(path))),
                Progress::Exhausted => return Ok(Some(SearchOutcome::Exhausted)),
            }
        }
        Ok(None)
    }

    /// Return to `Idle`, keeping grid size, endpoints and blocked cells.
    pub fn reset(&mut self) {
        self.blocked.thaw();
        self.grid.reset();
        self.frontier.clear();
        self.closed.clear();
        self.state = SearchState::Idle;
        self.iteration = 0;
        self.path = None;
        self.fault = None;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Completed expansions so far.
    #[inline]
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    #[inline]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    #[inline]
    pub fn blocked(&self) -> &BlockedCells {
        &self.blocked
    }

    #[inline]
    pub fn cost_model(&self) -> &C {
        &self.cost
    }

    /// Whether `p` is waiting in the frontier.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.frontier.contains(p)
    }

    #[inline]
    pub fn is_closed(&self, p: Point) -> bool {
        self.closed.contains(p)
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    #[inline]
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// The path, once `Found`.
    pub fn path(&self) -> Option<&[Point]> {
        self.path.as_deref()
    }

    /// Accumulated cost of the path, once `Found`.
    pub fn path_cost(&self) -> Option<i32> {
        self.path.as_ref()?;
        self.grid.get(self.goal).map(|n| n.g_cost)
    }

    /// The outcome, once terminal.
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.state {
            SearchState::Found => self.path.clone().map(SearchOutcome::Found),
            SearchState::Exhausted => Some(SearchOutcome::Exhausted),
            SearchState::Idle | SearchState::Running => None,
        }
    }
}
