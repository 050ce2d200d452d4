pub mod dashboard;
pub mod status_row;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::kv::KvStore;
use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Render the whole dashboard screen
pub fn render<S: KvStore>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    let [header, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, app, header);
    dashboard::render_dashboard(frame, app, body);
    status_row::render_status_row(frame, app, status);
}

fn render_header<S: KvStore>(frame: &mut Frame, app: &App<S>, area: ratatui::layout::Rect) {
    let bg = app.theme.background;
    let couple = if app.config.planner.couple.is_empty() {
        "aisle".to_string()
    } else {
        format!("aisle · {}", app.config.planner.couple)
    };
    let who = match app.planner.identity() {
        Some(identity) => format!("signed in: {identity}"),
        None => "not signed in".to_string(),
    };

    let width = area.width as usize;
    let left_width = display_width(&couple);
    let right_width = display_width(&who);
    let padding = width.saturating_sub(left_width + right_width);

    let line = Line::from(vec![
        Span::styled(couple, Style::default().fg(app.theme.text_bright).bg(bg)),
        Span::styled(" ".repeat(padding), Style::default().bg(bg)),
        Span::styled(who, Style::default().fg(app.theme.dim).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
