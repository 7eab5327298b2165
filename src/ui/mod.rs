//! Interactive syntax tree viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: viewer state, folding, keyboard event loop
//! - **[`panes`]**: stateless render functions for the tree, details and
//!   status bar
//! - **[`theme`]**: color palette, including one color per node kind
//!
//! [`view`] takes over the terminal for the duration of the session and
//! restores it on every exit path.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;

use crate::tree::SyntaxNode;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Browse `root` until the user quits.
pub fn view(root: &SyntaxNode, show_epsilon: bool) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode()?;
        return Err(err);
    }

    let result = Terminal::new(CrosstermBackend::new(stdout)).and_then(|mut terminal| {
        let res = App::new(root, show_epsilon).run(&mut terminal);
        terminal.show_cursor()?;
        res
    });

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}
