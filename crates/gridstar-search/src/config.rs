//! Session configuration and ASCII scenarios.
//!
//! A scenario is a rectangle of characters, one line per row:
//!
//! ```text
//! S....
//! .....
//! ####.
//! .....
//! ....G
//! ```
//!
//! `#` is a blocked cell, `.` an open cell, `S` the start and `G` the goal.
//! `X` marks a cell that is both start and goal.

use std::fmt;

use gridstar_core::Point;

/// Everything needed to build a [`SearchEngine`](crate::SearchEngine).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub width: i32,
    pub height: i32,
    pub start: Point,
    pub goal: Point,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocked: Vec<Point>,
    /// Accept `start == goal` as a trivial one-cell search instead of
    /// rejecting it at `begin`.
    #[cfg_attr(feature = "serde", serde(default = "allow_same_endpoints_default"))]
    pub allow_same_endpoints: bool,
}

#[cfg(feature = "serde")]
fn allow_same_endpoints_default() -> bool {
    true
}

impl Default for SearchConfig {
    /// A 15×15 board from (2, 2) to (12, 12).
    fn default() -> Self {
        Self {
            width: 15,
            height: 15,
            start: Point::new(2, 2),
            goal: Point::new(12, 12),
            blocked: Vec::new(),
            allow_same_endpoints: true,
        }
    }
}

pub const BLOCKED: char = '#';
pub const OPEN: char = '.';
pub const START: char = 'S';
pub const GOAL: char = 'G';
pub const START_GOAL: char = 'X';

impl SearchConfig {
    /// Open grid of the given size.
    pub fn new(width: i32, height: i32, start: Point, goal: Point) -> Self {
        Self {
            width,
            height,
            start,
            goal,
            blocked: Vec::new(),
            allow_same_endpoints: true,
        }
    }

    /// Add blocked cells.
    pub fn with_blocked(mut self, cells: impl IntoIterator<Item = Point>) -> Self {
        self.blocked.extend(cells);
        self
    }

    /// Parse an ASCII scenario. Leading and trailing blank lines are ignored,
    /// as is trailing whitespace on each line.
    pub fn from_ascii(text: &str) -> Result<Self, ScenarioError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .skip_while(|l| l.is_empty())
            .collect();
        let lines: Vec<&str> = match lines.iter().rposition(|l| !l.is_empty()) {
            Some(last) => lines[..=last].to_vec(),
            None => return Err(ScenarioError::Empty),
        };

        let width = lines[0].chars().count();
        let mut start = None;
        let mut goal = None;
        let mut blocked = Vec::new();

        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ScenarioError::InconsistentWidth {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    OPEN => {}
                    BLOCKED => blocked.push(p),
                    START => {
                        if start.replace(p).is_some() {
                            return Err(ScenarioError::DuplicateStart(p));
                        }
                    }
                    GOAL => {
                        if goal.replace(p).is_some() {
                            return Err(ScenarioError::DuplicateGoal(p));
                        }
                    }
                    START_GOAL => {
                        if start.replace(p).is_some() {
                            return Err(ScenarioError::DuplicateStart(p));
                        }
                        if goal.replace(p).is_some() {
                            return Err(ScenarioError::DuplicateGoal(p));
                        }
                    }
                    _ => return Err(ScenarioError::InvalidChar { ch, pos: p }),
                }
            }
        }

        Ok(Self {
            width: width as i32,
            height: lines.len() as i32,
            start: start.ok_or(ScenarioError::MissingStart)?,
            goal: goal.ok_or(ScenarioError::MissingGoal)?,
            blocked,
            allow_same_endpoints: true,
        })
    }

    /// Render back to the ASCII form accepted by [`SearchConfig::from_ascii`].
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x, y);
                let ch = if p == self.start && p == self.goal {
                    START_GOAL
                } else if p == self.start {
                    START
                } else if p == self.goal {
                    GOAL
                } else if self.blocked.contains(&p) {
                    BLOCKED
                } else {
                    OPEN
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

/// Errors that can occur when parsing an ASCII scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    Empty,
    /// Line `line` (0-based) does not have the width of the first line.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    InvalidChar { ch: char, pos: Point },
    MissingStart,
    MissingGoal,
    DuplicateStart(Point),
    DuplicateGoal(Point),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "scenario: no rows"),
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "scenario: line {line} has {found} cells, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "scenario: invalid cell \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingStart => write!(f, "scenario: no start cell `{START}`"),
            Self::MissingGoal => write!(f, "scenario: no goal cell `{GOAL}`"),
            Self::DuplicateStart(p) => write!(f, "scenario: second start cell at {p}"),
            Self::DuplicateGoal(p) => write!(f, "scenario: second goal cell at {p}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL: &str = "
S....
.....
####.
.....
....G
";

    #[test]
    fn parse_scenario() {
        let cfg = SearchConfig::from_ascii(WALL).unwrap();
        assert_eq!((cfg.width, cfg.height), (5, 5));
        assert_eq!(cfg.start, Point::new(0, 0));
        assert_eq!(cfg.goal, Point::new(4, 4));
        assert_eq!(cfg.blocked.len(), 4);
        assert!(cfg.blocked.iter().all(|p| p.y == 2 && p.x < 4));
    }

    #[test]
    fn ascii_round_trip_preserves_layout() {
        let cfg = SearchConfig::from_ascii(WALL).unwrap();
        assert_eq!(cfg.to_ascii(), WALL.trim_start());
    }

    #[test]
    fn shared_endpoint_round_trips() {
        let cfg = SearchConfig::new(3, 3, Point::new(1, 1), Point::new(1, 1));
        assert_eq!(cfg.to_ascii(), "...\n.X.\n...\n");
        assert_eq!(SearchConfig::from_ascii(&cfg.to_ascii()), Ok(cfg));
        assert_eq!(
            SearchConfig::from_ascii("SX\n.."),
            Err(ScenarioError::DuplicateStart(Point::new(1, 0)))
        );
        assert_eq!(
            SearchConfig::from_ascii("X.\n.G"),
            Err(ScenarioError::DuplicateGoal(Point::new(1, 1)))
        );
    }

    #[test]
    fn default_matches_classic_board() {
        let cfg = SearchConfig::default();
        assert_eq!((cfg.width, cfg.height), (15, 15));
        assert_eq!(cfg.start, Point::new(2, 2));
        assert_eq!(cfg.goal, Point::new(12, 12));
        assert!(cfg.allow_same_endpoints);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(SearchConfig::from_ascii("\n\n"), Err(ScenarioError::Empty));
        assert_eq!(
            SearchConfig::from_ascii("S..\n..\n..G"),
            Err(ScenarioError::InconsistentWidth {
                line: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            SearchConfig::from_ascii("S.x\n..G"),
            Err(ScenarioError::InvalidChar {
                ch: 'x',
                pos: Point::new(2, 0)
            })
        );
        assert_eq!(
            SearchConfig::from_ascii("...\n..G"),
            Err(ScenarioError::MissingStart)
        );
        assert_eq!(
            SearchConfig::from_ascii("S.G\n..G"),
            Err(ScenarioError::DuplicateGoal(Point::new(2, 1)))
        );
    }

    #[test]
    fn error_display() {
        let err = ScenarioError::InvalidChar {
            ch: '?',
            pos: Point::new(1, 0),
        };
        assert_eq!(
            err.to_string(),
            "scenario: invalid cell \u{201c}?\u{201d} at (1, 0)"
        );
    }
}
