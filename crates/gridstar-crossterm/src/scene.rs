//! Owned snapshots of a search, built from the engine while idle and from
//! [`Observation`]s while running.

use gridstar_core::{Point, Range};
use gridstar_search::{CostModel, Observation, SearchEngine, SearchState};

/// What a single cell shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Blocked,
    Open,
    Closed,
    /// The cell being expanded in the latest step.
    Current,
    /// On the final path.
    Path,
    Start,
    Goal,
}

impl CellKind {
    /// Plain-text symbol. Matches the scenario format for `#`, `.`, `S`, `G`.
    pub fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Blocked => '#',
            Self::Open => 'o',
            Self::Closed => 'x',
            Self::Current => '@',
            Self::Path => '*',
            Self::Start => 'S',
            Self::Goal => 'G',
        }
    }
}

/// Everything a renderer needs, detached from the engine.
#[derive(Clone, Debug)]
pub struct Scene {
    pub range: Range,
    pub start: Point,
    pub goal: Point,
    pub blocked: Vec<Point>,
    pub frontier: Vec<Point>,
    pub closed: Vec<Point>,
    pub current: Option<Point>,
    pub iteration: usize,
    pub path: Option<Vec<Point>>,
    pub state: SearchState,
    /// Shown instead of the status line when set.
    pub note: Option<String>,
}

impl Scene {
    /// Snapshot the engine as it is now.
    pub fn from_engine<C: CostModel>(engine: &SearchEngine<C>) -> Self {
        let range = engine.grid().range();
        Self {
            range,
            start: engine.start(),
            goal: engine.goal(),
            blocked: engine.blocked().iter().collect(),
            frontier: range.iter().filter(|&p| engine.is_open(p)).collect(),
            closed: range.iter().filter(|&p| engine.is_closed(p)).collect(),
            current: None,
            iteration: engine.iteration(),
            path: engine.path().map(<[Point]>::to_vec),
            state: engine.state(),
            note: None,
        }
    }

    /// Take over the frontier, closed set and counter of a step.
    pub fn apply(&mut self, obs: &Observation) {
        self.frontier.clone_from(&obs.frontier);
        self.closed.clone_from(&obs.closed);
        self.current = Some(obs.current);
        self.iteration = obs.iteration;
        self.state = SearchState::Running;
    }

    /// Record how the search ended.
    pub fn finish(&mut self, path: Option<Vec<Point>>) {
        self.state = if path.is_some() {
            SearchState::Found
        } else {
            SearchState::Exhausted
        };
        self.path = path;
    }

    pub fn kind(&self, p: Point) -> CellKind {
        if p == self.start {
            CellKind::Start
        } else if p == self.goal {
            CellKind::Goal
        } else if self.path.as_ref().is_some_and(|path| path.contains(&p)) {
            CellKind::Path
        } else if self.current == Some(p) {
            CellKind::Current
        } else if self.closed.binary_search(&p).is_ok() {
            CellKind::Closed
        } else if self.frontier.contains(&p) {
            CellKind::Open
        } else if self.blocked.binary_search(&p).is_ok() {
            CellKind::Blocked
        } else {
            CellKind::Empty
        }
    }

    /// Title line, e.g. `A* Algorithm Iteration: 12`.
    pub fn title(&self) -> String {
        format!("A* Algorithm Iteration: {}", self.iteration)
    }

    /// One-line summary of the state.
    pub fn status(&self) -> String {
        if let Some(note) = &self.note {
            return note.clone();
        }
        match self.state {
            SearchState::Idle => format!("Editing: {} blocked cells", self.blocked.len()),
            SearchState::Running => format!(
                "Searching: {} open, {} closed",
                self.frontier.len(),
                self.closed.len()
            ),
            SearchState::Found => match &self.path {
                Some(path) => format!("Found: {} steps", path.len().saturating_sub(1)),
                None => "Found".to_string(),
            },
            SearchState::Exhausted => "No valid path found".to_string(),
        }
    }
}

/// Render the scene as text, one line per row.
pub fn render_ascii(scene: &Scene) -> String {
    let mut out = String::with_capacity(scene.range.len() + scene.range.height() as usize);
    for y in scene.range.min.y..scene.range.max.y {
        for x in scene.range.min.x..scene.range.max.x {
            out.push(scene.kind(Point::new(x, y)).symbol());
        }
        out.push('\n');
    }
    out
}
