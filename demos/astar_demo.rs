//! Interactive A* visualizer in the terminal.
//!
//! Run: cargo run --bin astar-demo -- --size 30

use std::io;
use std::thread;
use std::time::Duration;

use clap::Parser;
use gridstar_core::CancelToken;
use gridstar_demos::term::Terminal;
use gridstar_demos::{Action, DemoConfig, Editor};

const SEARCHING: &str = "searching... esc or q to stop";

fn run(editor: &mut Editor, term: &mut Terminal) -> io::Result<()> {
    let delay = Duration::from_millis(editor.config().step_delay_ms);
    term.draw(editor.grid(), Some(editor.cursor()), editor.status())?;
    loop {
        let Some(input) = term.poll_input(Duration::from_millis(250))? else {
            continue;
        };
        match editor.handle(input) {
            Action::Quit => return Ok(()),
            Action::Redraw => {}
            Action::Search => {
                let cancel = CancelToken::new();
                let mut failure: Option<io::Error> = None;
                editor.run_search(cancel.clone(), |grid| {
                    if failure.is_some() {
                        return;
                    }
                    let step = term.draw(grid, None, SEARCHING).and_then(|()| {
                        thread::sleep(delay);
                        term.abort_requested()
                    });
                    match step {
                        Ok(true) => cancel.cancel(),
                        Ok(false) => {}
                        Err(e) => {
                            cancel.cancel();
                            failure = Some(e);
                        }
                    }
                });
                if let Some(e) = failure {
                    return Err(e);
                }
            }
        }
        term.draw(editor.grid(), Some(editor.cursor()), editor.status())?;
    }
}

fn main() {
    let config = DemoConfig::parse();
    let mut editor = match Editor::new(config) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    // The terminal is restored when `term` drops, before any error prints.
    let result = Terminal::open().and_then(|mut term| run(&mut editor, &mut term));
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
