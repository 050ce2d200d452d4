use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::io::kv::KvStore;

use super::app::{App, Mode};

/// Route a key press to the active mode.
pub fn handle_key<S: KvStore>(app: &mut App<S>, key: KeyEvent, now: Instant) {
    match app.mode {
        Mode::Normal => handle_normal(app, key, now),
        Mode::EditDate => handle_edit_date(app, key, now),
    }
}

fn handle_normal<S: KvStore>(app: &mut App<S>, key: KeyEvent, now: Instant) {
    let slides = app.planner.slides().len();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.slideshow.next(slides, now);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.slideshow.previous(slides, now);
        }
        KeyCode::Char(c @ '1'..='5') => {
            let index = (c as usize) - ('1' as usize);
            app.slideshow.jump_to(index, slides, now);
        }
        KeyCode::Char('d') => {
            app.date_input = app.planner.wedding_date().to_string();
            app.date_error = None;
            app.mode = Mode::EditDate;
        }
        _ => {}
    }
}

fn handle_edit_date<S: KvStore>(app: &mut App<S>, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.date_error = None;
        }
        KeyCode::Enter => {
            app.commit_date_input(now);
        }
        KeyCode::Backspace => {
            app.date_input.pop();
            app.date_error = None;
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            if app.date_input.len() < 10 {
                app.date_input.push(c);
            }
            app.date_error = None;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::kv::MemoryStore;
    use crate::model::config::PlannerConfig;
    use crate::planner::Planner;
    use crate::sched::CountdownPhase;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;

    fn test_app() -> App<MemoryStore> {
        let mut planner = Planner::new(MemoryStore::new());
        planner.sign_in("test");
        for i in 0..3 {
            planner.add_slide(&format!("https://example.com/{i}.jpg"), "");
        }
        App::new(planner, PlannerConfig::default(), Instant::now())
    }

    fn press<S: KvStore>(app: &mut App<S>, code: KeyCode, now: Instant) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    #[test]
    fn q_quits() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'), Instant::now());
        assert!(app.should_quit);
    }

    #[test]
    fn arrows_navigate_slideshow() {
        let mut app = test_app();
        let now = Instant::now();
        press(&mut app, KeyCode::Right, now);
        assert_eq!(app.slideshow.active(), 1);
        press(&mut app, KeyCode::Left, now);
        assert_eq!(app.slideshow.active(), 0);
        press(&mut app, KeyCode::Char('3'), now);
        assert_eq!(app.slideshow.active(), 2);
        // Out-of-range digit is a no-op
        press(&mut app, KeyCode::Char('5'), now);
        assert_eq!(app.slideshow.active(), 2);
    }

    #[test]
    fn date_editor_round_trip() {
        let mut app = test_app();
        let now = Instant::now();
        press(&mut app, KeyCode::Char('d'), now);
        assert_eq!(app.mode, Mode::EditDate);

        app.date_input.clear();
        for c in "2031-06-14".chars() {
            press(&mut app, KeyCode::Char(c), now);
        }
        press(&mut app, KeyCode::Enter, now);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(
            app.planner.wedding_date(),
            NaiveDate::from_ymd_opt(2031, 6, 14).unwrap()
        );
        assert_eq!(app.countdown.phase(), CountdownPhase::Running);
    }

    #[test]
    fn invalid_date_shows_error_and_keeps_editing() {
        let mut app = test_app();
        let now = Instant::now();
        press(&mut app, KeyCode::Char('d'), now);
        app.date_input = "2031-99-99".into();
        press(&mut app, KeyCode::Enter, now);

        assert_eq!(app.mode, Mode::EditDate);
        assert!(app.date_error.is_some());

        press(&mut app, KeyCode::Esc, now);
        assert_eq!(app.mode, Mode::Normal);
    }
}
