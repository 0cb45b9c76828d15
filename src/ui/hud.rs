use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::THEME;
use crate::game::GridState;

const SEPARATOR: &str = " │ ";

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GridState, high_score: u32) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let fields = hud_fields(state, high_score);
    let compact = line_width(&fields, false) > usize::from(hud_area.width);

    frame.render_widget(
        Paragraph::new(info_line(&fields, compact, THEME.hud_label, THEME.hud_value))
            .alignment(Alignment::Center),
        hud_area,
    );

    play_area
}

/// Label/value pairs in display order: full label, compact label, value.
fn hud_fields(state: &GridState, high_score: u32) -> [(&'static str, &'static str, String); 4] {
    let bounds = state.bounds();
    [
        ("Score", "S", state.score().to_string()),
        ("Hi", "H", high_score.max(state.score()).to_string()),
        ("Length", "L", state.cells().len().to_string()),
        ("Grid", "G", format!("{}x{}", bounds.width, bounds.height)),
    ]
}

fn line_width(fields: &[(&'static str, &'static str, String)], compact: bool) -> usize {
    let separators = SEPARATOR.width() * fields.len().saturating_sub(1);
    fields
        .iter()
        .map(|(label, short, value)| {
            let label = if compact { short } else { label };
            label.width() + ": ".width() + value.width()
        })
        .sum::<usize>()
        + separators
}

fn info_line(
    fields: &[(&'static str, &'static str, String)],
    compact: bool,
    label_color: Color,
    value_color: Color,
) -> Line<'static> {
    let mut spans = Vec::with_capacity(fields.len() * 3);
    for (index, (label, short, value)) in fields.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, Style::default().fg(label_color)));
        }

        let label = if compact { *short } else { *label };
        spans.push(Span::styled(
            format!("{label}: "),
            Style::default().fg(label_color),
        ));
        spans.push(Span::styled(value.clone(), Style::default().fg(value_color)));
    }

    Line::from(spans)
}
