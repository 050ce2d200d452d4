use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::kv::KvStore;
use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row<S: KvStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Normal => {
            let hint = "q quit   \u{2190}/\u{2192} slideshow   1-5 jump   d edit date";
            Line::from(Span::styled(
                format!("{hint:<width$}"),
                Style::default().fg(app.theme.dim).bg(bg),
            ))
        }
        Mode::EditDate => {
            let mut spans = vec![
                Span::styled(
                    format!("date: {}", app.date_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            match &app.date_error {
                Some(error) => {
                    spans.push(Span::styled(
                        format!("  {error}"),
                        Style::default().fg(app.theme.red).bg(bg),
                    ));
                }
                None => {
                    spans.push(Span::styled(
                        "  Enter apply  Esc cancel",
                        Style::default().fg(app.theme.dim).bg(bg),
                    ));
                }
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn normal_mode_shows_key_hints() {
        let app = test_app(&[]);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.contains("q quit"));
        assert!(output.contains("d edit date"));
    }

    #[test]
    fn edit_mode_shows_buffer_and_errors() {
        let mut app = test_app(&[]);
        app.mode = Mode::EditDate;
        app.date_input = "2031-06".into();
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.contains("date: 2031-06"));
        assert!(output.contains("Enter apply"));

        app.date_error = Some("not a date: '2031-06'".into());
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.contains("not a date"));
    }
}
