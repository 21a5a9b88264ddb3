//! rundiff - view the file changes of an agent run

mod app;
mod cli;
mod config;
mod logger;
mod print;
mod tui;
mod views;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::Cli;
use crossterm::event::{self, Event, KeyEventKind};
use rundiff_core::{DiffSession, RunDiff, ViewMode};
use std::io::{self, Read, Write};
use std::time::Duration;
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;
    let _log_guard = logger::init(&config.log_path, cli.debug || config.debug)?;

    let input = read_input(&cli)?;
    let mut session = open_session(&input)?;

    session.set_view_mode(if cli.split {
        ViewMode::Split
    } else {
        config.view_mode
    });
    if cli.expand_all || config.expand_all {
        session.expand_all();
    }

    if cli.check {
        println!("ok: {}", session.summary());
        return Ok(());
    }

    if cli.print {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        print::write_session(&mut out, &session, cli.width)?;
        out.flush()?;
        return Ok(());
    }

    let mut app = App::new(session, config.theme.resolve());
    run_viewer(&mut app)
}

fn read_input(cli: &Cli) -> Result<String> {
    match cli.input_path() {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read run diff: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read run diff from stdin")?;
            Ok(buf)
        }
    }
}

fn open_session(input: &str) -> Result<DiffSession> {
    let run = RunDiff::from_json(input).context("Run diff is not valid JSON")?;
    info!(run = %run.run_id, files = run.diffs.len(), "loaded run diff");
    run.into_session().map_err(|e| {
        error!(error = %e, "run diff failed validation");
        anyhow::Error::new(e).context("Run diff failed validation")
    })
}

fn run_viewer(app: &mut App) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init_tui().context("Failed to set up the terminal")?;

    // Draw errors must still reach restore_tui
    let result = event_loop(&mut terminal, app);

    tui::restore_tui()?;
    result
}

fn event_loop(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| views::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
    Ok(())
}
