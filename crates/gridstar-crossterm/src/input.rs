//! Mapping of terminal events to editor commands.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use gridstar_core::{Point, Range};

/// A command for the interactive editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Main button pressed or dragged over a cell.
    Block(Point),
    /// Secondary button pressed or dragged over a cell.
    Unblock(Point),
    /// Start the search.
    Start,
    /// Scatter random obstacles.
    Scatter,
    /// Remove all obstacles.
    Clear,
    /// Back to editing after a finished search.
    Reset,
    Quit,
    /// The terminal was resized; redraw.
    Redraw,
}

/// Where the grid sits on the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Screen cell of grid coordinate (0, 0).
    pub origin: Point,
    /// Terminal columns per grid cell.
    pub cell_width: i32,
    pub grid: Range,
}

impl Layout {
    /// Grid coordinate under the terminal cell at `column`, `row`.
    pub fn to_grid(&self, column: u16, row: u16) -> Option<Point> {
        let x = column as i32 - self.origin.x;
        let y = row as i32 - self.origin.y;
        if x < 0 || y < 0 {
            return None;
        }
        let p = Point::new(x / self.cell_width, y) + self.grid.min;
        self.grid.contains(p).then_some(p)
    }

    /// Terminal cell of the left edge of grid coordinate `p`.
    pub fn to_screen(&self, p: Point) -> (u16, u16) {
        let rel = p - self.grid.min;
        (
            (self.origin.x + rel.x * self.cell_width) as u16,
            (self.origin.y + rel.y) as u16,
        )
    }
}

/// Map a crossterm event. Mouse events outside the grid are dropped.
pub fn map_event(ev: &Event, layout: &Layout) -> Option<Input> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) => {
            if *kind == KeyEventKind::Release {
                return None;
            }
            match code {
                KeyCode::Char(' ') => Some(Input::Start),
                KeyCode::Char('r') => Some(Input::Scatter),
                KeyCode::Char('c') => Some(Input::Clear),
                KeyCode::Enter | KeyCode::Backspace => Some(Input::Reset),
                KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
                _ => None,
            }
        }
        Event::Mouse(me) => {
            let p = layout.to_grid(me.column, me.row)?;
            match me.kind {
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                    Some(Input::Block(p))
                }
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => Some(Input::Unblock(p)),
                _ => None,
            }
        }
        Event::Resize(..) => Some(Input::Redraw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent};

    fn layout() -> Layout {
        Layout {
            origin: Point::new(1, 2),
            cell_width: 2,
            grid: Range::with_size(5, 4),
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn screen_to_grid() {
        let l = layout();
        assert_eq!(l.to_grid(1, 2), Some(Point::new(0, 0)));
        assert_eq!(l.to_grid(2, 2), Some(Point::new(0, 0)));
        assert_eq!(l.to_grid(3, 3), Some(Point::new(1, 1)));
        assert_eq!(l.to_grid(0, 2), None);
        assert_eq!(l.to_grid(11, 2), None);
        assert_eq!(l.to_grid(1, 6), None);
        assert_eq!(l.to_screen(Point::new(4, 3)), (9, 5));
    }

    #[test]
    fn mouse_buttons() {
        let l = layout();
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 3), &l),
            Some(Input::Block(Point::new(2, 1)))
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Drag(MouseButton::Right), 5, 3), &l),
            Some(Input::Unblock(Point::new(2, 1)))
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Moved, 5, 3), &l),
            None
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Left), 0, 0), &l),
            None
        );
    }

    #[test]
    fn keys() {
        let l = layout();
        let key = |c| Event::Key(KeyEvent::new(c, KeyModifiers::NONE));
        assert_eq!(map_event(&key(KeyCode::Char(' ')), &l), Some(Input::Start));
        assert_eq!(map_event(&key(KeyCode::Esc), &l), Some(Input::Quit));
        assert_eq!(map_event(&key(KeyCode::Char('r')), &l), Some(Input::Scatter));
        assert_eq!(map_event(&key(KeyCode::Char('z')), &l), None);
        assert_eq!(map_event(&Event::Resize(80, 24), &l), Some(Input::Redraw));
    }
}
