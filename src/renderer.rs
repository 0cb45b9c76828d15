use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::config::{GridSize, CELL_COLUMNS, GLYPH_FOOD, GLYPH_SOLID, THEME};
use crate::game::GridState;
use crate::session::{Phase, Session, TickSource};
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_briefing, render_game_over_menu, render_start_menu};

/// Renders the full frame from the session's read-only view.
pub fn render<T: TickSource>(frame: &mut Frame<'_>, session: &Session<T>) {
    let state = session.state();
    let frame_area = frame.area();
    let area = render_hud(frame, frame_area, state, session.high_score());

    let Some(board) = board_area(area, state.bounds()) else {
        frame.render_widget(
            Paragraph::new(Line::from("Terminal too small"))
                .alignment(Alignment::Center)
                .style(Style::new().fg(THEME.muted)),
            area,
        );
        return;
    };

    let block = Block::bordered()
        .border_style(Style::new().fg(THEME.border_fg))
        .style(Style::new().bg(THEME.play_bg));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    if session.phase() != Phase::StartScreen {
        render_food(frame, inner, state);
        render_snake(frame, inner, state);
    }

    match session.phase() {
        Phase::StartScreen => render_start_menu(frame, board, session.high_score()),
        Phase::Briefing => render_briefing(frame, board, session.high_score()),
        Phase::GameOver => {
            if let Some(outcome) = session.outcome() {
                render_game_over_menu(
                    frame,
                    board,
                    outcome,
                    session.high_score(),
                    state.death_reason(),
                );
            }
        }
        Phase::Playing => {}
    }
}

/// Centers the bordered board inside `area`, or `None` when it does not fit.
fn board_area(area: Rect, bounds: GridSize) -> Option<Rect> {
    let width = bounds.width.checked_mul(CELL_COLUMNS)?.checked_add(2)?;
    let height = bounds.height.checked_add(2)?;
    if width > area.width || height > area.height {
        return None;
    }

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    Some(board)
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GridState) {
    let Some((x, y)) = logical_to_terminal(inner, state.bounds(), state.food()) else {
        return;
    };

    let style = Style::new().fg(THEME.food).bg(THEME.play_bg);
    let buffer = frame.buffer_mut();
    for column in 0..CELL_COLUMNS {
        buffer.set_string(x + column, y, GLYPH_FOOD, style);
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GridState) {
    let body_style = Style::new().fg(THEME.snake_body);
    let head_style = Style::new()
        .fg(THEME.snake_head)
        .add_modifier(Modifier::BOLD);

    let buffer = frame.buffer_mut();
    // Tail first so the head wins when segments coincide.
    for (index, segment) in state.cells().iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *segment) else {
            continue;
        };

        let style = if index == 0 { head_style } else { body_style };
        for column in 0..CELL_COLUMNS {
            buffer.set_string(x + column, y, GLYPH_SOLID, style);
        }
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    use crate::config::{GameConfig, GridSize, GLYPH_SOLID};
    use crate::input::GameInput;
    use crate::score::MemoryScoreStore;
    use crate::session::{ManualTicker, Session};
    use crate::snake::Position;

    use super::{board_area, logical_to_terminal};

    const GRID: GridSize = GridSize {
        width: 5,
        height: 4,
    };

    #[test]
    fn cells_map_to_two_terminal_columns() {
        let inner = Rect::new(3, 2, 10, 4);

        assert_eq!(
            logical_to_terminal(inner, GRID, Position { x: 0, y: 0 }),
            Some((3, 2))
        );
        assert_eq!(
            logical_to_terminal(inner, GRID, Position { x: 4, y: 3 }),
            Some((11, 5))
        );
        assert_eq!(
            logical_to_terminal(inner, GRID, Position { x: 5, y: 0 }),
            None
        );
    }

    #[test]
    fn board_does_not_fit_small_area() {
        assert!(board_area(Rect::new(0, 0, 11, 6), GRID).is_none());
        assert_eq!(
            board_area(Rect::new(0, 0, 12, 6), GRID),
            Some(Rect::new(0, 0, 12, 6))
        );
    }

    #[test]
    fn playing_frame_draws_the_head_in_its_cell() {
        let config = GameConfig {
            grid: GRID,
            initial_body_length: 2,
            seed: Some(1),
            ..GameConfig::default()
        };
        let store = MemoryScoreStore::default();
        let mut session = Session::new(config, ManualTicker::default(), &store);
        session.apply_input(GameInput::Confirm, &store);
        session.apply_input(GameInput::Confirm, &store);

        let mut terminal =
            Terminal::new(TestBackend::new(40, 12)).expect("test terminal should build");
        terminal
            .draw(|frame| super::render(frame, &session))
            .expect("draw should succeed");

        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut solid_cells = 0;
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if buffer[(x, y)].symbol() == GLYPH_SOLID {
                    solid_cells += 1;
                }
            }
        }

        // Coincident body at the origin: exactly one cell, two columns wide.
        assert_eq!(solid_cells, 2);
    }
}
