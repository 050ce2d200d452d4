use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::io::kv::KvStore;
use crate::sched::CountdownPhase;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Render the dashboard body: countdown + slideshow on top, stats below.
pub fn render_dashboard<S: KvStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let [top, stats] =
        Layout::vertical([Constraint::Min(7), Constraint::Length(6)]).areas(area);
    let [countdown, slideshow] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(top);

    render_countdown(frame, app, countdown);
    render_slideshow(frame, app, slideshow);
    render_stats(frame, app, stats);
}

fn panel_block(title: &str, app_theme: &crate::tui::theme::Theme) -> Block<'static> {
    Block::bordered()
        .title(format!(" {title} "))
        .border_style(Style::default().fg(app_theme.dim))
        .title_style(Style::default().fg(app_theme.highlight))
        .style(Style::default().bg(app_theme.background))
}

fn render_countdown<S: KvStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let block = panel_block("Countdown to the Big Day", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let date = app.planner.wedding_date();
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::default());

    match app.countdown.phase() {
        CountdownPhase::Idle => {
            lines.push(Line::from(Span::styled(
                "Press d to pick your wedding date and start the countdown.",
                Style::default().fg(theme.text),
            )));
        }
        CountdownPhase::Elapsed => {
            lines.push(Line::from(Span::styled(
                "Congratulations!",
                Style::default()
                    .fg(theme.green)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "Wishing you a lifetime of love and happiness.",
                Style::default().fg(theme.text),
            )));
        }
        CountdownPhase::Running => match app.countdown.state() {
            Some(cd) => {
                let number = |n: i64, unit: &str| {
                    vec![
                        Span::styled(
                            format!("{n:>4}"),
                            Style::default()
                                .fg(theme.highlight)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!(" {unit}  "), Style::default().fg(theme.dim)),
                    ]
                };
                let mut spans = Vec::new();
                spans.extend(number(cd.days, "days"));
                spans.extend(number(cd.hours, "hours"));
                spans.extend(number(cd.minutes, "min"));
                spans.extend(number(cd.seconds, "sec"));
                lines.push(Line::from(spans));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    format!("Counting down to {date}..."),
                    Style::default().fg(theme.text),
                )));
            }
        },
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Wedding date: {date}  (d to change)"),
        Style::default().fg(theme.dim),
    )));

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.background)),
        inner,
    );
}

fn render_slideshow<S: KvStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let block = panel_block("Slideshow", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let slides = app.planner.slides();
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::default());

    if slides.is_empty() {
        lines.push(Line::from(Span::styled(
            "No images yet.",
            Style::default().fg(theme.text),
        )));
        lines.push(Line::from(Span::styled(
            "Add up to five with: aisle slides add <url>",
            Style::default().fg(theme.dim),
        )));
    } else {
        let index = app.slideshow.active().min(slides.len() - 1);
        let image = &slides[index];
        let width = inner.width.saturating_sub(2) as usize;

        lines.push(Line::from(Span::styled(
            truncate_to_width(&image.url, width),
            Style::default().fg(theme.text_bright),
        )));
        if !image.caption.is_empty() {
            lines.push(Line::from(Span::styled(
                truncate_to_width(&image.caption, width),
                Style::default().fg(theme.text),
            )));
        }
        lines.push(Line::default());

        let cadence = if app.slideshow.is_rotating() {
            "auto-advances every 5 minutes"
        } else {
            "add a second image to start rotating"
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}/{}] ", index + 1, slides.len()),
                Style::default().fg(theme.yellow),
            ),
            Span::styled(cadence, Style::default().fg(theme.dim)),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(theme.background)),
        inner,
    );
}

fn render_stats<S: KvStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let block = panel_block("At a Glance", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let glance = app.planner.at_a_glance();
    let cells = [
        (
            format!("{}/{}", glance.guests_attending, glance.guests_total),
            "guests attending".to_string(),
            theme.green,
        ),
        (
            format!("{}/{}", glance.tasks_done, glance.tasks_total),
            "tasks done".to_string(),
            theme.yellow,
        ),
        (
            glance.vendors_booked.to_string(),
            "vendors booked".to_string(),
            theme.text_bright,
        ),
        (
            format!("${}", glance.budget_remaining),
            "budget remaining".to_string(),
            theme.highlight,
        ),
    ];

    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(inner);
    for ((value, label, color), column) in cells.into_iter().zip(columns.iter()) {
        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(label, Style::default().fg(theme.dim))).centered(),
        ];
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme.background)),
            *column,
        );
    }
}
