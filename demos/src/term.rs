//! Crossterm terminal front-end.
//!
//! Each grid cell is drawn as two terminal columns so the grid looks roughly
//! square. The status line sits one row below the grid.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use gridstar_core::{CellState, Color, Grid, Pos};

use crate::Input;

const CELL_WIDTH: u16 = 2;

/// Maps a palette [`Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    CtColor::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

/// Maps a crossterm key to an editor input.
fn key_input(code: KeyCode) -> Option<Input> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Input::Move { drow: -1, dcol: 0 }),
        KeyCode::Down | KeyCode::Char('j') => Some(Input::Move { drow: 1, dcol: 0 }),
        KeyCode::Left | KeyCode::Char('h') => Some(Input::Move { drow: 0, dcol: -1 }),
        KeyCode::Right | KeyCode::Char('l') => Some(Input::Move { drow: 0, dcol: 1 }),
        KeyCode::Enter => Some(Input::Place),
        KeyCode::Backspace | KeyCode::Delete => Some(Input::Erase),
        KeyCode::Char(' ') => Some(Input::Search),
        KeyCode::Char('c') => Some(Input::ClearMarks),
        KeyCode::Char('g') => Some(Input::NewGrid),
        KeyCode::Char('r') => Some(Input::Randomize),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        _ => None,
    }
}

/// Terminal cell to grid cell.
pub fn screen_to_cell(column: u16, row: u16) -> Pos {
    Pos::new(row as i32, (column / CELL_WIDTH) as i32)
}

/// Owns the terminal for the lifetime of the demo.
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    /// Enter raw mode and the alternate screen, with mouse capture.
    pub fn open() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }

    /// Block up to `timeout` for the next meaningful input.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let input = match event::read()? {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                key_input(code)
            }
            Event::Mouse(me) => {
                let p = screen_to_cell(me.column, me.row);
                match me.kind {
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left) => Some(Input::PlaceAt(p)),
                    MouseEventKind::Down(MouseButton::Right)
                    | MouseEventKind::Drag(MouseButton::Right) => Some(Input::EraseAt(p)),
                    _ => None,
                }
            }
            _ => None,
        };
        Ok(input)
    }

    /// Whether an abort key is waiting, without blocking.
    pub fn abort_requested(&mut self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                if matches!(code, KeyCode::Esc | KeyCode::Char('q')) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Draw the whole grid, the cursor and the status line.
    pub fn draw(&mut self, grid: &Grid, cursor: Option<Pos>, status: &str) -> io::Result<()> {
        for cell in grid.iter() {
            let p = cell.pos();
            let state = cell.state();
            let bg = state.color();
            let fg = if state == CellState::Barrier {
                Color::WHITE
            } else {
                Color::BLACK
            };
            let text = if cursor == Some(p) { "[]" } else { "  " };
            queue!(
                self.out,
                cursor::MoveTo(p.col as u16 * CELL_WIDTH, p.row as u16),
                SetForegroundColor(to_ct_color(fg)),
                SetBackgroundColor(to_ct_color(bg)),
                Print(text)
            )?;
        }
        queue!(
            self.out,
            ResetColor,
            cursor::MoveTo(0, grid.size() as u16 + 1),
            terminal::Clear(ClearType::CurrentLine),
            Print(status)
        )?;
        self.out.flush()
    }

    /// Restore the terminal. Errors are ignored on the way out.
    fn close(&mut self) {
        let _ = execute!(
            self.out,
            ResetColor,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.close();
    }
}
