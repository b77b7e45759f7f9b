use ratatui::{prelude::*, widgets::*};

use crate::gridworld::{State, GRID_SIZE, TERMINAL_STATE};

/// Fill of the two terminal corners
pub const TERMINAL_FILL: Color = Color::Rgb(0xc4, 0xc4, 0xc4);
/// Fill of every playable state
pub const STATE_FILL: Color = Color::Rgb(0xff, 0xff, 0xff);
/// Color of the lines between cells
pub const DIVIDER: Color = Color::Rgb(0x28, 0x28, 0x28);

/// A two-color map of the gridworld, one labelled cell per state and no legend
#[derive(Debug, Clone, PartialEq)]
pub struct StateGrid {
    layout: [[State; GRID_SIZE]; GRID_SIZE],
}

impl StateGrid {
    pub fn new(layout: [[State; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { layout }
    }

    /// Split `area` into the grid's cells, indexed `[row][col]`
    pub fn cell_areas(area: Rect) -> [[Rect; GRID_SIZE]; GRID_SIZE] {
        let rows: [Rect; GRID_SIZE] =
            Layout::vertical([Constraint::Ratio(1, GRID_SIZE as u32); GRID_SIZE]).areas(area);

        rows.map(|row| {
            Layout::horizontal([Constraint::Ratio(1, GRID_SIZE as u32); GRID_SIZE]).areas(row)
        })
    }

    fn fill(state: State) -> Color {
        if state == TERMINAL_STATE {
            TERMINAL_FILL
        } else {
            STATE_FILL
        }
    }
}

impl Widget for &StateGrid {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cells = StateGrid::cell_areas(area);

        for (i, row) in self.layout.iter().enumerate() {
            for (j, &state) in row.iter().enumerate() {
                let cell = cells[i][j];
                if cell.is_empty() {
                    continue;
                }

                // Dividers only between cells, the outer edge stays bare
                let mut borders = Borders::NONE;
                if j + 1 < GRID_SIZE {
                    borders |= Borders::RIGHT;
                }
                if i + 1 < GRID_SIZE {
                    borders |= Borders::BOTTOM;
                }

                let block = Block::default()
                    .borders(borders)
                    .border_style(Style::default().fg(DIVIDER))
                    .style(Style::default().bg(StateGrid::fill(state)));

                let inner = block.inner(cell);
                block.render(cell, buf);

                if inner.height == 0 {
                    continue;
                }

                let label = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
                Paragraph::new(state.to_string())
                    .style(Style::default().fg(Color::Black))
                    .alignment(Alignment::Center)
                    .render(label, buf);
            }
        }
    }
}
