use serde::Serialize;

use crate::model::budget::{self, BudgetItem};
use crate::model::guest::{Guest, RsvpStatus};
use crate::model::image::BoardImage;
use crate::model::task::Task;
use crate::model::theme::ThemeIdea;
use crate::model::vendor::Vendor;
use crate::directory::DirectoryVendor;
use crate::sched::{CountdownPhase, CountdownState};
use crate::util::unicode::pad_to_width;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub tasks: &'a [Task],
    pub done: usize,
    pub progress_percent: u32,
}

#[derive(Serialize)]
pub struct GuestListJson<'a> {
    pub guests: &'a [Guest],
    pub attending: usize,
    pub declined: usize,
    pub pending: usize,
}

#[derive(Serialize)]
pub struct BudgetJson<'a> {
    pub items: &'a [BudgetItem],
    pub total_estimated: String,
    pub total_actual: String,
    pub remaining: String,
}

#[derive(Serialize)]
pub struct CountdownJson {
    pub wedding_date: String,
    pub phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<i64>,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    format!("[{}] {:>3}  {}", check, task.id, task.text)
}

pub fn format_task_listing(tasks: &[Task]) -> Vec<String> {
    let mut lines: Vec<String> = tasks.iter().map(format_task_line).collect();
    let done = tasks.iter().filter(|t| t.completed).count();
    let percent = progress_percent(done, tasks.len());
    lines.push(format!("{done}/{} done ({percent}%)", tasks.len()));
    lines
}

pub fn progress_percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u32
}

pub fn format_guest_listing(guests: &[Guest]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {} {} {} notes",
        pad_to_width("id", 4),
        pad_to_width("name", 24),
        pad_to_width("side", 6),
        pad_to_width("rsvp", 10),
    ));
    for guest in guests {
        lines.push(format!(
            "{} {} {} {} {}",
            pad_to_width(&guest.id.to_string(), 4),
            pad_to_width(&guest.name, 24),
            pad_to_width(guest.side.label(), 6),
            pad_to_width(guest.status.label(), 10),
            guest.notes,
        ));
    }
    let attending = guests.iter().filter(|g| g.status == RsvpStatus::Attending).count();
    let declined = guests.iter().filter(|g| g.status == RsvpStatus::Declined).count();
    let pending = guests.len() - attending - declined;
    lines.push(format!(
        "{} guests: {attending} attending, {declined} declined, {pending} pending",
        guests.len()
    ));
    lines
}

pub fn format_budget_listing(items: &[BudgetItem]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {} {:>12} {:>12} {:>12}",
        pad_to_width("id", 4),
        pad_to_width("category", 20),
        "estimated",
        "actual",
        "remaining",
    ));
    for item in items {
        lines.push(format!(
            "{} {} {:>12} {:>12} {:>12}",
            pad_to_width(&item.id.to_string(), 4),
            pad_to_width(&item.category, 20),
            format!("${}", item.estimated),
            format!("${}", item.actual),
            format!("${}", item.line_remaining()),
        ));
    }
    lines.push(format!(
        "total: estimated ${}, actual ${}, remaining ${}",
        budget::total_estimated(items),
        budget::total_actual(items),
        budget::remaining(items),
    ));
    lines
}

pub fn format_vendor_listing(vendors: &[Vendor]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {} {} {} {} email",
        pad_to_width("id", 4),
        pad_to_width("name", 24),
        pad_to_width("category", 14),
        pad_to_width("status", 12),
        pad_to_width("phone", 12),
    ));
    for vendor in vendors {
        lines.push(format!(
            "{} {} {} {} {} {}",
            pad_to_width(&vendor.id.to_string(), 4),
            pad_to_width(&vendor.name, 24),
            pad_to_width(&vendor.category, 14),
            pad_to_width(vendor.status.label(), 12),
            pad_to_width(&vendor.phone, 12),
            vendor.email,
        ));
    }
    lines
}

pub fn format_directory_listing(vendors: &[&DirectoryVendor]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {} {} {} {} contact",
        pad_to_width("id", 4),
        pad_to_width("name", 24),
        pad_to_width("category", 14),
        pad_to_width("location", 18),
        pad_to_width("rating", 12),
    ));
    for vendor in vendors {
        lines.push(format!(
            "{} {} {} {} {} {} / {}",
            pad_to_width(&vendor.id.to_string(), 4),
            pad_to_width(vendor.name, 24),
            pad_to_width(vendor.category, 14),
            pad_to_width(vendor.location, 18),
            pad_to_width(&format!("{:.1} ({})", vendor.rating, vendor.reviews), 12),
            vendor.phone,
            vendor.email,
        ));
    }
    lines
}

pub fn format_image_listing(images: &[BoardImage]) -> Vec<String> {
    images
        .iter()
        .map(|img| {
            if img.caption.is_empty() {
                format!("{:>3}  {}", img.id, img.url)
            } else {
                format!("{:>3}  {}  ({})", img.id, img.url, img.caption)
            }
        })
        .collect()
}

pub fn format_theme(theme: &ThemeIdea) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("{:>3}  {}", theme.id, theme.theme_name));
    lines.push(format!("     {}", theme.description));
    if !theme.color_palette.is_empty() {
        let palette = theme
            .color_palette
            .iter()
            .map(|c| format!("{} {}", c.hex, c.name))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("     palette: {palette}"));
    }
    lines
}

pub fn format_countdown(
    wedding_date: &str,
    phase: CountdownPhase,
    state: Option<CountdownState>,
) -> Vec<String> {
    match phase {
        CountdownPhase::Idle => vec!["No wedding date set. Try: aisle date set 2026-09-12".into()],
        CountdownPhase::Elapsed => vec![
            format!("The big day ({wedding_date}) has arrived!"),
            "Congratulations! Wishing you a lifetime of love and happiness.".into(),
        ],
        CountdownPhase::Running => match state {
            Some(cd) => vec![format!(
                "{wedding_date}: {} days, {} hours, {} minutes, {} seconds to go",
                cd.days, cd.hours, cd.minutes, cd.seconds
            )],
            None => vec![format!("Counting down to {wedding_date}...")],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_line_shows_checkbox() {
        let mut task = Task::new("Book venue");
        task.id = 2;
        assert_eq!(format_task_line(&task), "[ ]   2  Book venue");
        task.completed = true;
        assert_eq!(format_task_line(&task), "[x]   2  Book venue");
    }

    #[test]
    fn progress_rounds() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(3, 3), 100);
    }

    #[test]
    fn guest_listing_has_summary_row() {
        let guests = crate::model::guest::default_guests();
        let lines = format_guest_listing(&guests);
        assert!(lines.last().unwrap().contains("4 guests"));
        assert!(lines.last().unwrap().contains("2 attending"));
    }
}
