//! Terminal lifecycle for the viewer.
//!
//! Key events are read from the controlling tty, so a run document can be
//! piped in on stdin while the viewer is open.

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout, BufWriter, Stdout};
use std::panic;

pub type Tui = Terminal<CrosstermBackend<BufWriter<Stdout>>>;

/// Enable raw mode and enter the alternate screen.
///
/// Call [`restore_tui`] on every exit path once this returns `Ok`. On error
/// the terminal has already been restored.
pub fn init_tui() -> io::Result<Tui> {
    enable_raw_mode()?;
    or_restore(enter_screen, || {
        let _ = restore_tui();
    })
}

fn enter_screen() -> io::Result<Tui> {
    let mut out = BufWriter::new(stdout());
    execute!(out, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Run a setup step that follows `enable_raw_mode`, calling `restore` if it
/// fails
fn or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> io::Result<T> {
    setup().map_err(|err| {
        restore();
        err
    })
}

/// Leave the alternate screen and disable raw mode. Safe to call twice.
pub fn restore_tui() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Restore the terminal before the default panic message is printed.
///
/// Must be installed before [`init_tui`].
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_tui();
        original_hook(panic_info);
    }));
}
