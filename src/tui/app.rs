use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::json_store::JsonFileStore;
use crate::io::kv::KvStore;
use crate::io::lock::StoreLock;
use crate::io::planner_io;
use crate::io::watcher::StoreWatcher;
use crate::model::config::PlannerConfig;
use crate::planner::Planner;
use crate::sched::{Countdown, Slideshow};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    EditDate,
}

/// Main dashboard state
pub struct App<S: KvStore> {
    pub planner: Planner<S>,
    pub config: PlannerConfig,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    pub countdown: Countdown,
    pub slideshow: Slideshow,
    /// Date editor buffer (EditDate mode)
    pub date_input: String,
    pub date_error: Option<String>,
    /// Where the lock lives for the brief per-write acquisitions
    pub aisle_dir: Option<PathBuf>,
}

impl<S: KvStore> App<S> {
    pub fn new(planner: Planner<S>, config: PlannerConfig, now: Instant) -> Self {
        let theme = Theme::from_config(&config.ui);
        let mut app = App {
            planner,
            config,
            theme,
            mode: Mode::Normal,
            should_quit: false,
            countdown: Countdown::new(),
            slideshow: Slideshow::new(),
            date_input: String::new(),
            date_error: None,
            aisle_dir: None,
        };
        app.resync_timers(now);
        app
    }

    /// Point both timers at the current planner state: re-target the
    /// countdown and reconcile the slideshow with the image count.
    pub fn resync_timers(&mut self, now: Instant) {
        self.countdown
            .set_target(Some(self.planner.wedding_date()), now);
        self.slideshow.sync_len(self.planner.slides().len(), now);
    }

    /// One event-loop turn of timer work. Returns true when something
    /// visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.countdown.poll(now, Local::now().naive_local());
        if let Some(advance) = self.slideshow.poll(now) {
            changed |= self
                .slideshow
                .apply_advance(advance, self.planner.slides().len());
        }
        changed
    }

    /// Commit the date editor buffer. Invalid input stays in the editor
    /// with an error; a valid date is persisted and restarts the countdown.
    pub fn commit_date_input(&mut self, now: Instant) {
        match NaiveDate::parse_from_str(self.date_input.trim(), "%Y-%m-%d") {
            Ok(date) => {
                // Hold the write lock only for the store write itself
                let _lock = match self.aisle_dir.as_deref() {
                    Some(dir) => match StoreLock::acquire_default(dir) {
                        Ok(lock) => Some(lock),
                        Err(e) => {
                            tracing::warn!(error = %e, "writing without the store lock");
                            None
                        }
                    },
                    None => None,
                };
                self.planner.set_wedding_date(date);
                self.countdown.set_target(Some(date), now);
                self.mode = Mode::Normal;
                self.date_error = None;
            }
            Err(_) => {
                self.date_error = Some(format!("not a date: '{}'", self.date_input.trim()));
            }
        }
    }

    /// Cancel both timers. Nothing fires after this.
    pub fn teardown(&mut self) {
        self.countdown.teardown();
        self.slideshow.teardown();
    }
}

impl App<JsonFileStore> {
    /// Reload everything after an external process wrote the store. A grown
    /// slideshow jumps to the newly added image; a shrunken one clamps.
    pub fn handle_external_change(&mut self, now: Instant) {
        let before = self.planner.slides().len();
        self.planner.refresh_from_disk();
        let after = self.planner.slides().len();

        self.countdown
            .set_target(Some(self.planner.wedding_date()), now);
        if after > before {
            self.slideshow.image_added(after, now);
        } else if after < before {
            self.slideshow.image_removed(after, now);
        } else {
            self.slideshow.sync_len(after, now);
        }
    }
}

/// Run the dashboard
pub fn run(planning_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match planning_dir {
        Some(dir) => std::fs::canonicalize(dir)?,
        None => std::env::current_dir()?,
    };
    let root = planner_io::discover_planner(&start)?;
    let aisle_dir = planner_io::aisle_dir(&root);
    let config = planner_io::read_config(&aisle_dir)?;
    let store = planner_io::open_store(&aisle_dir)?;
    let planner = Planner::new(store);

    let mut app = App::new(planner, config, Instant::now());
    app.aisle_dir = Some(aisle_dir.clone());

    let watcher = StoreWatcher::start(&aisle_dir).ok();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Timers must be dead before the terminal goes back
    app.teardown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<JsonFileStore>,
    watcher: Option<&StoreWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key, Instant::now());
        }

        let now = Instant::now();
        if let Some(watcher) = watcher
            && !watcher.poll().is_empty()
        {
            app.handle_external_change(now);
        }
        app.tick(now);

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn seed_aisle(root: &std::path::Path) -> std::path::PathBuf {
        let aisle = root.join("aisle");
        std::fs::create_dir_all(&aisle).unwrap();
        std::fs::write(aisle.join("config.toml"), "").unwrap();
        aisle
    }

    #[test]
    fn external_slide_addition_becomes_active() {
        let tmp = TempDir::new().unwrap();
        let aisle = seed_aisle(tmp.path());

        let mut planner = Planner::new(planner_io::open_store(&aisle).unwrap());
        planner.sign_in("sam");
        planner.add_slide("https://example.com/a.jpg", "");
        planner.add_slide("https://example.com/b.jpg", "");

        let now = Instant::now();
        let mut app = App::new(planner, PlannerConfig::default(), now);
        assert_eq!(app.slideshow.active(), 0);

        // Another process appends a third slide
        let mut other = Planner::new(planner_io::open_store(&aisle).unwrap());
        other.add_slide("https://example.com/c.jpg", "");

        app.handle_external_change(now);
        assert_eq!(app.planner.slides().len(), 3);
        assert_eq!(app.slideshow.active(), 2);
        assert!(app.slideshow.is_rotating());
    }

    #[test]
    fn external_removal_clamps_the_index() {
        let tmp = TempDir::new().unwrap();
        let aisle = seed_aisle(tmp.path());

        let mut planner = Planner::new(planner_io::open_store(&aisle).unwrap());
        planner.sign_in("sam");
        for name in ["a", "b", "c"] {
            planner.add_slide(&format!("https://example.com/{name}.jpg"), "");
        }

        let now = Instant::now();
        let mut app = App::new(planner, PlannerConfig::default(), now);
        app.slideshow.jump_to(2, 3, now);

        let mut other = Planner::new(planner_io::open_store(&aisle).unwrap());
        other.remove_slide(2);

        app.handle_external_change(now);
        assert_eq!(app.planner.slides().len(), 2);
        assert_eq!(app.slideshow.active(), 1);
    }
}
