//! Interactive A* visualiser in the terminal.
//!
//! Run: cargo run --bin astar-viz -- --size 30

use std::error::Error;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use gridstar_demos::{ArgError, Editor, HELP_LINE, USAGE, VizConfig, describe};
use gridstar_paths::{Control, Step};
use gridstar_term::{Input, Scene, Terminal};

const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<(), Box<dyn Error>> {
    let config = match VizConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ArgError::HelpRequested) => {
            println!("{USAGE}");
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let mut editor = match &config.map {
        Some(path) => Editor::from_map(std::fs::read_to_string(path)?.parse()?),
        None => Editor::new(config.size),
    };
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));

    let mut term = Terminal::new().with_mouse(config.mouse);
    term.init()?;
    let result = event_loop(&mut term, &mut editor, &config, &mut rng);
    term.close();
    result
}

fn event_loop(
    term: &mut Terminal,
    editor: &mut Editor,
    config: &VizConfig,
    rng: &mut StdRng,
) -> Result<(), Box<dyn Error>> {
    let mut status = String::from(HELP_LINE);
    loop {
        term.draw(&editor.scene(&status))?;
        let Some(input) = term.poll_input(IDLE_POLL)? else {
            continue;
        };
        match input {
            Input::Char('q') | Input::Escape => return Ok(()),
            Input::Arrow(dir) => editor.move_cursor(dir),
            Input::Enter => {
                editor.place(editor.cursor());
            }
            Input::Backspace | Input::Char('x') => editor.reset(editor.cursor()),
            Input::Primary(c) => {
                editor.set_cursor(c);
                editor.place(c);
            }
            Input::Secondary(c) => editor.reset(c),
            Input::Char('c') => {
                editor.clear();
                status = String::from(HELP_LINE);
            }
            Input::Char('r') => {
                let n = editor.scatter(rng, config.density);
                status = format!("{n} barriers");
            }
            Input::Char(' ') => status = run_search(term, editor, config)?,
            _ => {}
        }
    }
}

/// Run one animated search. Esc or q stops it, as does the time limit.
fn run_search(
    term: &mut Terminal,
    editor: &mut Editor,
    config: &VizConfig,
) -> Result<String, Box<dyn Error>> {
    let started = Instant::now();
    let mut io_error = None;

    let result = editor.run(&mut |step: &Step<'_>| {
        let status = format!(
            "searching: {} expanded, {} queued (esc to stop)",
            step.iteration, step.frontier_len
        );
        let scene = Scene {
            grid: step.grid,
            state: Some(step.state),
            start: Some(step.start),
            goal: Some(step.goal),
            cursor: None,
            status: &status,
        };
        if let Err(e) = term.draw(&scene) {
            io_error = Some(e);
            return Control::Abort;
        }
        // The poll doubles as the per-step delay.
        match term.poll_input(config.step_delay) {
            Ok(Some(Input::Escape | Input::Char('q'))) => return Control::Abort,
            Ok(_) => {}
            Err(e) => {
                io_error = Some(e);
                return Control::Abort;
            }
        }
        if config.time_limit.is_some_and(|limit| started.elapsed() >= limit) {
            return Control::Abort;
        }
        Control::Continue
    });

    if let Some(e) = io_error {
        return Err(e.into());
    }
    Ok(describe(&result, editor.last_stats()))
}
