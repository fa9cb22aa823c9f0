//! Editor model for the interactive A* demo.
//!
//! The [`Editor`] owns the grid, a keyboard cursor and a status line. It is
//! driven by abstract [`Input`]s so the same logic can be tested without a
//! terminal; `term` maps crossterm events onto those inputs and draws the
//! grid back out.

pub mod term;

use clap::Parser;
use gridstar_core::{CancelToken, CellState, Grid, GridError, Pos};
use gridstar_paths::{AstarSearch, PathResult, SearchStats};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HELP: &str = "arrows move  enter place  bksp erase  space search  \
c clear marks  g new grid  r random walls  q quit";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Command-line configuration for the demo.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "astar-demo", about = "Draw walls on a grid and watch A* search it")]
pub struct DemoConfig {
    /// Cells per side.
    #[arg(long, default_value_t = 25)]
    pub size: i32,

    /// Pause after each search step, in milliseconds.
    #[arg(long, default_value_t = 15)]
    pub step_delay_ms: u64,

    /// Fraction of cells turned into walls by the `r` key.
    #[arg(long, default_value_t = 0.28, value_parser = parse_density)]
    pub density: f64,

    /// Seed for wall randomisation; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if d.is_finite() && (0.0..=1.0).contains(&d) {
        Ok(d)
    } else {
        Err(format!("{s} is not a fraction between 0 and 1"))
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            size: 25,
            step_delay_ms: 15,
            density: 0.28,
            seed: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Front-end independent user intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Move { drow: i32, dcol: i32 },
    /// Place at the cursor (start, then end, then walls).
    Place,
    /// Reset the cell under the cursor.
    Erase,
    /// Primary click on a cell.
    PlaceAt(Pos),
    /// Secondary click on a cell.
    EraseAt(Pos),
    Search,
    ClearMarks,
    NewGrid,
    Randomize,
    Quit,
}

/// What the driver should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Redraw,
    Search,
    Quit,
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

pub struct Editor {
    grid: Grid,
    cursor: Pos,
    status: String,
    config: DemoConfig,
    rng: StdRng,
    search: AstarSearch,
}

impl Editor {
    pub fn new(config: DemoConfig) -> Result<Self, GridError> {
        let grid = Grid::new(config.size)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            grid,
            cursor: Pos::ZERO,
            status: HELP.to_string(),
            config,
            rng,
            search: AstarSearch::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Apply one input. Edits wipe the marks of a finished search first.
    pub fn handle(&mut self, input: Input) -> Action {
        match input {
            Input::Move { drow, dcol } => {
                let next = self.cursor.shift(drow, dcol);
                if self.grid.contains(next) {
                    self.cursor = next;
                }
            }
            Input::Place => self.place(self.cursor),
            Input::Erase => self.erase(self.cursor),
            Input::PlaceAt(p) => {
                if self.grid.contains(p) {
                    self.cursor = p;
                    self.place(p);
                }
            }
            Input::EraseAt(p) => {
                if self.grid.contains(p) {
                    self.cursor = p;
                    self.erase(p);
                }
            }
            Input::Search => {
                if self.grid.start().is_none() || self.grid.end().is_none() {
                    self.status = "place a start and an end first".to_string();
                    return Action::Redraw;
                }
                return Action::Search;
            }
            Input::ClearMarks => {
                self.grid.clear_search();
                self.status = HELP.to_string();
            }
            Input::NewGrid => {
                self.grid.clear();
                self.status = HELP.to_string();
            }
            Input::Randomize => self.randomize(),
            Input::Quit => return Action::Quit,
        }
        Action::Redraw
    }

    fn place(&mut self, p: Pos) {
        self.grid.clear_search();
        match self.grid.place(p) {
            Ok(state) => log::debug!("placed {state} at {p}"),
            Err(e) => self.status = e.to_string(),
        }
    }

    fn erase(&mut self, p: Pos) {
        self.grid.clear_search();
        if let Err(e) = self.grid.reset(p) {
            self.status = e.to_string();
        }
    }

    /// Replace every wall with a fresh random layout, keeping the endpoints.
    pub fn randomize(&mut self) {
        self.grid.clear_search();
        let density = match self.config.density {
            d if d.is_finite() => d.clamp(0.0, 1.0),
            _ => 0.0,
        };
        let cells: Vec<Pos> = self.grid.bounds().iter().collect();
        for p in cells {
            let state = self.grid.state(p).unwrap_or_default();
            if state.is_endpoint() {
                continue;
            }
            let next = if self.rng.random_bool(density) {
                CellState::Barrier
            } else {
                CellState::Unvisited
            };
            self.grid.set_state(p, next).ok();
        }
        self.status = format!("{} walls", self.grid.barriers().count());
    }

    /// Run A* between the placed endpoints. `on_step` sees the grid after
    /// every expansion; `cancel` is checked between expansions.
    pub fn run_search<F>(&mut self, cancel: CancelToken, on_step: F) -> PathResult
    where
        F: FnMut(&Grid),
    {
        self.search = AstarSearch::new().with_cancel(cancel);
        let result = self.search.find_marked_path(&mut self.grid, on_step);
        self.status = describe(&result, self.search.stats());
        log::info!("{}", self.status);
        result
    }
}

fn describe(result: &PathResult, stats: SearchStats) -> String {
    match result {
        PathResult::Found(path) => format!(
            "path of {} moves, {} cells expanded",
            path.cost(),
            stats.expanded
        ),
        PathResult::NotFound => format!("no path ({} cells expanded)", stats.expanded),
        other => other.to_string(),
    }
}
