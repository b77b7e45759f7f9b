use std::{io, time::Duration};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{prelude::*, widgets::*};

mod state_grid;
mod tui;

pub use state_grid::{StateGrid, DIVIDER, STATE_FILL, TERMINAL_FILL};

/// Show `grid` on the alternate screen until the user presses `q` or `Esc`
///
/// Restores the terminal on exit, including when drawing fails
pub fn show(grid: &StateGrid) -> io::Result<()> {
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, grid);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, grid: &StateGrid) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render_frame(frame, grid))?;

        if event::poll(Duration::from_millis(100))?
            && matches!(
                event_keycode(&event::read()?),
                Some(KeyCode::Char('q') | KeyCode::Esc)
            )
        {
            return Ok(());
        }
    }
}

fn render_frame(frame: &mut Frame, grid: &StateGrid) {
    let [main_area, hint_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.size());

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title("Gridworld");
    let grid_area = block.inner(main_area);
    frame.render_widget(block, main_area);
    frame.render_widget(grid, grid_area);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::from(" q ").light_cyan().bold(),
            Span::raw(": Close"),
        ])),
        hint_area,
    );
}

/// Takes an event, checks if it is a key press event, and returns the [`KeyCode`]
fn event_keycode(event: &Event) -> Option<KeyCode> {
    let Event::Key(key) = event else {
        return None;
    };

    if key.kind != KeyEventKind::Press {
        return None;
    }

    Some(key.code)
}
