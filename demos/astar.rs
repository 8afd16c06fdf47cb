//! Terminal A* visualizer.
//!
//! Run: cargo run --bin astar [SCENARIO] [DELAY_MS]
//!
//! SCENARIO is a `.json` search config or an ASCII map (`#` blocked, `.`
//! open, `S` start, `G` goal). Without it a 15x15 board is used.

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use gridstar_crossterm::{Input, Scene, TermView};
use gridstar_demos::{Control, DEFAULT_DELAY, Session, load_config};
use gridstar_search::{SearchConfig, SearchObserver, Step};
use rand::Rng;

const POLL: Duration = Duration::from_millis(50);

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => SearchConfig::default(),
    };
    let delay = match args.next() {
        Some(ms) => Duration::from_millis(ms.parse()?),
        None => DEFAULT_DELAY,
    };

    let mut session = Session::new(&config)?;
    let mut view = TermView::new(Scene::from_engine(session.engine()), delay);
    let mut rng = rand::rng();

    view.init()?;
    let result = run(&mut session, &mut view, &mut rng);
    view.close();
    result
}

fn run(session: &mut Session, view: &mut TermView, rng: &mut impl Rng) -> Result<(), Box<dyn Error>> {
    view.draw()?;
    loop {
        let Some(input) = view.poll(POLL)? else {
            continue;
        };
        match session.handle(input, rng) {
            Ok(Control::Quit) => return Ok(()),
            Ok(Control::Run) => {
                if !search(session, view)? {
                    return Ok(());
                }
                view.set_scene(Scene::from_engine(session.engine()));
            }
            Ok(Control::Continue) => view.set_scene(Scene::from_engine(session.engine())),
            Err(e) => view.scene_mut().note = Some(e.to_string()),
        }
        view.draw()?;
    }
}

/// Step the search, drawing each expansion. Returns `false` if the user quit
/// before it finished.
fn search(session: &mut Session, view: &mut TermView) -> Result<bool, Box<dyn Error>> {
    loop {
        match session.engine_mut().advance()? {
            Step::Expanded(obs) => view.observe(&obs),
            Step::Found { observation, .. } => {
                view.observe(&observation);
                return Ok(true);
            }
            Step::Exhausted => return Ok(true),
        }
        if let Some(e) = view.take_error() {
            return Err(e.into());
        }
        if view.poll(Duration::ZERO)? == Some(Input::Quit) {
            return Ok(false);
        }
    }
}
