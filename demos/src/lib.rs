//! Editor session behind the `astar` visualizer.
//!
//! [`Session`] owns the engine and applies editor [`Input`]s to it. It knows
//! nothing about the terminal, so the binary only has to shuttle events in
//! and scenes out.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Duration;

use gridstar_core::Point;
use gridstar_crossterm::Input;
use gridstar_search::{SearchConfig, SearchEngine, SearchError, SearchState};
use log::debug;
use rand::{Rng, RngExt};

/// Pause between drawn steps.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(30);

/// Chance of a free cell being blocked by [`Input::Scatter`].
pub const SCATTER_DENSITY: f64 = 0.25;

/// What the caller should do after an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Redraw the board and keep polling.
    Continue,
    /// The search has begun; drive it to the end.
    Run,
    Quit,
}

/// Load a scenario: `.json` files are decoded as a [`SearchConfig`], anything
/// else is read as an ASCII map.
pub fn load_config(path: &Path) -> Result<SearchConfig, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let config = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&text)?
    } else {
        SearchConfig::from_ascii(&text)?
    };
    Ok(config)
}

/// Block each free cell with probability `density`. Returns how many cells
/// were newly blocked.
pub fn scatter(
    engine: &mut SearchEngine,
    rng: &mut impl Rng,
    density: f64,
) -> Result<usize, SearchError> {
    let cells: Vec<Point> = engine.grid().range().iter().collect();
    let mut added = 0;
    for p in cells {
        if rng.random_bool(density) && engine.block(p)? {
            added += 1;
        }
    }
    debug!("scattered {added} obstacles");
    Ok(added)
}

/// One editing and searching session.
pub struct Session {
    engine: SearchEngine,
}

impl Session {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            engine: SearchEngine::new(config)?,
        })
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SearchEngine {
        &mut self.engine
    }

    /// Apply an input. Edits are ignored once the search has begun, and
    /// `Reset` only applies to a finished search.
    pub fn handle(&mut self, input: Input, rng: &mut impl Rng) -> Result<Control, SearchError> {
        let idle = self.engine.state() == SearchState::Idle;
        match input {
            Input::Quit => return Ok(Control::Quit),
            Input::Block(p) if idle => {
                self.engine.block(p)?;
            }
            Input::Unblock(p) if idle => {
                self.engine.unblock(p)?;
            }
            Input::Scatter if idle => {
                scatter(&mut self.engine, rng, SCATTER_DENSITY)?;
            }
            Input::Clear if idle => self.engine.clear_blocked()?,
            Input::Start if idle => {
                self.engine.begin()?;
                return Ok(Control::Run);
            }
            Input::Reset if self.engine.state().is_terminal() => self.engine.reset(),
            _ => {}
        }
        Ok(Control::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstar_search::{ConfigError, SearchOutcome};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> Session {
        let cfg = SearchConfig::new(6, 6, Point::new(0, 0), Point::new(5, 5));
        Session::new(&cfg).unwrap()
    }

    #[test]
    fn edits_then_search() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(7);
        let wall = Point::new(2, 2);
        assert_eq!(s.handle(Input::Block(wall), &mut rng), Ok(Control::Continue));
        assert!(s.engine().blocked().contains(wall));
        assert_eq!(s.handle(Input::Start, &mut rng), Ok(Control::Run));

        // Editing is ignored while running.
        s.handle(Input::Unblock(wall), &mut rng).unwrap();
        assert!(s.engine().blocked().contains(wall));
        s.handle(Input::Reset, &mut rng).unwrap();
        assert_eq!(s.engine().state(), SearchState::Running);

        let outcome = s.engine_mut().run_to_completion().unwrap();
        assert!(matches!(outcome, SearchOutcome::Found(_)));
        s.handle(Input::Reset, &mut rng).unwrap();
        assert_eq!(s.engine().state(), SearchState::Idle);
        s.handle(Input::Unblock(wall), &mut rng).unwrap();
        assert!(!s.engine().blocked().contains(wall));
    }

    #[test]
    fn scatter_spares_endpoints_and_is_seeded() {
        let mut a = session();
        let mut b = session();
        let added = scatter(&mut a.engine, &mut StdRng::seed_from_u64(3), 0.5).unwrap();
        scatter(&mut b.engine, &mut StdRng::seed_from_u64(3), 0.5).unwrap();
        assert_eq!(added, a.engine().blocked().len());
        assert!(a.engine().blocked().iter().eq(b.engine().blocked().iter()));
        assert!(!a.engine().blocked().contains(Point::new(0, 0)));
        assert!(!a.engine().blocked().contains(Point::new(5, 5)));

        let mut rng = StdRng::seed_from_u64(0);
        a.handle(Input::Clear, &mut rng).unwrap();
        assert!(a.engine().blocked().is_empty());
    }

    #[test]
    fn rejected_start_stays_idle() {
        let cfg = SearchConfig::new(3, 3, Point::new(1, 1), Point::new(1, 1));
        let cfg = SearchConfig {
            allow_same_endpoints: false,
            ..cfg
        };
        let mut s = Session::new(&cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            s.handle(Input::Start, &mut rng),
            Err(SearchError::Config(ConfigError::SameEndpoints(Point::new(1, 1))))
        );
        assert_eq!(s.engine().state(), SearchState::Idle);
        assert_eq!(s.handle(Input::Quit, &mut rng), Ok(Control::Quit));
    }

    #[test]
    fn loads_ascii_and_json() {
        let dir = std::env::temp_dir();
        let ascii = dir.join("gridstar-demo-scenario.txt");
        fs::write(&ascii, "S.#\n..G\n").unwrap();
        let cfg = load_config(&ascii).unwrap();
        assert_eq!((cfg.width, cfg.height), (3, 2));
        assert_eq!(cfg.blocked, vec![Point::new(2, 0)]);

        let json = dir.join("gridstar-demo-scenario.json");
        fs::write(&json, serde_json::to_string(&cfg).unwrap()).unwrap();
        let back = load_config(&json).unwrap();
        assert_eq!(back.goal, Point::new(2, 1));
        assert_eq!(back.blocked, cfg.blocked);
        let _ = fs::remove_file(ascii);
        let _ = fs::remove_file(json);
    }
}
