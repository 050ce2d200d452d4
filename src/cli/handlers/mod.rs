mod init;
pub use init::cmd_init;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::directory;
use crate::io::json_store::JsonFileStore;
use crate::io::lock::StoreLock;
use crate::io::planner_io;
use crate::model::guest::{GuestSide, RsvpStatus};
use crate::model::vendor::{Vendor, VendorStatus};
use crate::planner::Planner;
use crate::sched::countdown::{CountdownPhase, compute_countdown};
use crate::vision::{GeminiGenerator, VisionSession};

type CliError = Box<dyn std::error::Error>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    let dir = cli.planning_dir.as_deref();

    match cli.command {
        None => {
            // No subcommand → the dashboard; handled in main.rs
            Ok(())
        }
        Some(cmd) => match cmd {
            // Init is handled in main.rs before discovery
            Commands::Init(args) => cmd_init(args),

            Commands::Signin(args) => cmd_signin(dir, args),
            Commands::Signout => cmd_signout(dir),
            Commands::Whoami => cmd_whoami(dir),
            Commands::Date(args) => cmd_date(dir, args, json),
            Commands::Task(args) => cmd_task(dir, args, json),
            Commands::Guest(args) => cmd_guest(dir, args, json),
            Commands::Budget(args) => cmd_budget(dir, args, json),
            Commands::Vendor(args) => cmd_vendor(dir, args, json),
            Commands::Mood(args) => cmd_mood(dir, args, json),
            Commands::Slides(args) => cmd_slides(dir, args, json),
            Commands::Vision(args) => cmd_vision(dir, args, json),
            Commands::Find(args) => cmd_find(dir, args),
        },
    }
}

// ---------------------------------------------------------------------------
// Shared plumbing
// ---------------------------------------------------------------------------

/// Resolve the planning root: the -C override, or walk up from cwd.
fn resolve_root(planning_dir: Option<&str>) -> Result<PathBuf, CliError> {
    let start = match planning_dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{dir}': {e}"))?,
        None => std::env::current_dir()?,
    };
    Ok(planner_io::discover_planner(&start)?)
}

fn open_planner(planning_dir: Option<&str>) -> Result<(PathBuf, Planner<JsonFileStore>), CliError> {
    let root = resolve_root(planning_dir)?;
    let aisle = planner_io::aisle_dir(&root);
    let store = planner_io::open_store(&aisle)?;
    Ok((aisle, Planner::new(store)))
}

/// Open the planner with the write lock held; the lock lives as long as the
/// returned guard.
fn open_planner_locked(
    planning_dir: Option<&str>,
) -> Result<(StoreLock, Planner<JsonFileStore>), CliError> {
    let root = resolve_root(planning_dir)?;
    let aisle = planner_io::aisle_dir(&root);
    let lock = StoreLock::acquire_default(&aisle)?;
    let store = planner_io::open_store(&aisle)?;
    Ok((lock, Planner::new(store)))
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_amount(s: &str) -> Result<Decimal, CliError> {
    s.trim()
        .trim_start_matches('$')
        .parse::<Decimal>()
        .map_err(|_| format!("not an amount: '{s}'").into())
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

fn cmd_signin(dir: Option<&str>, args: SigninArgs) -> Result<(), CliError> {
    let (_lock, mut planner) = open_planner_locked(dir)?;
    match planner.sign_in(&args.name) {
        Some(identity) => {
            println!("signed in as {identity}");
            Ok(())
        }
        None => Err("name cannot be blank".into()),
    }
}

fn cmd_signout(dir: Option<&str>) -> Result<(), CliError> {
    let (_lock, mut planner) = open_planner_locked(dir)?;
    planner.sign_out();
    println!("signed out");
    Ok(())
}

fn cmd_whoami(dir: Option<&str>) -> Result<(), CliError> {
    let (_aisle, planner) = open_planner(dir)?;
    match planner.identity() {
        Some(identity) => println!("{identity}"),
        None => println!("(not signed in)"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Date & countdown
// ---------------------------------------------------------------------------

fn cmd_date(dir: Option<&str>, args: DateCmd, json: bool) -> Result<(), CliError> {
    match args.action {
        Some(DateAction::Set(set)) => {
            let date = NaiveDate::parse_from_str(set.date.trim(), "%Y-%m-%d")
                .map_err(|_| format!("not a date: '{}' (expected YYYY-MM-DD)", set.date))?;
            let (_lock, mut planner) = open_planner_locked(dir)?;
            planner.set_wedding_date(date);
            println!("wedding date set to {date}");
            Ok(())
        }
        None => {
            let (_aisle, planner) = open_planner(dir)?;
            let date = planner.wedding_date();
            let state = compute_countdown(date, Local::now().naive_local());
            let (phase, snapshot) = if state.total_ms < 0 {
                (CountdownPhase::Elapsed, None)
            } else {
                (CountdownPhase::Running, Some(state))
            };
            if json {
                return print_json(&CountdownJson {
                    wedding_date: date.to_string(),
                    phase: match phase {
                        CountdownPhase::Idle => "idle",
                        CountdownPhase::Running => "running",
                        CountdownPhase::Elapsed => "elapsed",
                    },
                    days: snapshot.map(|s| s.days),
                    hours: snapshot.map(|s| s.hours),
                    minutes: snapshot.map(|s| s.minutes),
                    seconds: snapshot.map(|s| s.seconds),
                });
            }
            print_lines(&format_countdown(&date.to_string(), phase, snapshot));
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

fn cmd_task(dir: Option<&str>, args: TaskCmd, json: bool) -> Result<(), CliError> {
    match args.action.unwrap_or(TaskAction::List) {
        TaskAction::List => {
            let (_aisle, planner) = open_planner(dir)?;
            let tasks = planner.tasks();
            if json {
                let done = tasks.iter().filter(|t| t.completed).count();
                return print_json(&TaskListJson {
                    tasks,
                    done,
                    progress_percent: progress_percent(done, tasks.len()),
                });
            }
            print_lines(&format_task_listing(tasks));
            Ok(())
        }
        TaskAction::Add(add) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            let id = planner
                .add_task(&add.text)
                .ok_or("task text cannot be blank")?;
            println!("{id}");
            Ok(())
        }
        TaskAction::Done(arg) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            if !planner.complete_task(arg.id, true) {
                return Err(format!("no task with id {}", arg.id).into());
            }
            Ok(())
        }
        TaskAction::Undo(arg) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            if !planner.complete_task(arg.id, false) {
                return Err(format!("no task with id {}", arg.id).into());
            }
            Ok(())
        }
        TaskAction::Rm(arg) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            if !planner.remove_task(arg.id) {
                return Err(format!("no task with id {}", arg.id).into());
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Guests
// ---------------------------------------------------------------------------

fn cmd_guest(dir: Option<&str>, args: GuestCmd, json: bool) -> Result<(), CliError> {
    match args.action.unwrap_or(GuestAction::List) {
        GuestAction::List => {
            let (_aisle, planner) = open_planner(dir)?;
            let guests = planner.guests();
            if json {
                return print_json(&GuestListJson {
                    guests,
                    attending: guests
                        .iter()
                        .filter(|g| g.status == RsvpStatus::Attending)
                        .count(),
                    declined: guests
                        .iter()
                        .filter(|g| g.status == RsvpStatus::Declined)
                        .count(),
                    pending: guests
                        .iter()
                        .filter(|g| g.status == RsvpStatus::Pending)
                        .count(),
                });
            }
            print_lines(&format_guest_listing(guests));
            Ok(())
        }
        GuestAction::Add(add) => {
            let side = GuestSide::parse(&add.side)
                .ok_or_else(|| format!("not a side: '{}' (bride, groom or both)", add.side))?;
            let (_lock, mut planner) = open_planner_locked(dir)?;
            let id = planner
                .add_guest(&add.name, side, &add.notes)
                .ok_or("guest name cannot be blank")?;
            println!("{id}");
            Ok(())
        }
        GuestAction::Rsvp(rsvp) => {
            let status = RsvpStatus::parse(&rsvp.status).ok_or_else(|| {
                format!(
                    "not a status: '{}' (pending, attending or declined)",
                    rsvp.status
                )
            })?;
            let (_lock, mut planner) = open_planner_locked(dir)?;
            if !planner.set_rsvp(rsvp.id, status) {
                return Err(format!("no guest with id {}", rsvp.id).into());
            }
            Ok(())
        }
        GuestAction::Rm(arg) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            if !planner.remove_guest(arg.id) {
                return Err(format!("no guest with id {}", arg.id).into());
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

fn cmd_budget(dir: Option<&str>, args: BudgetCmd, json: bool) -> Result<(), CliError> {
    match args.action.unwrap_or(BudgetAction::List) {
        BudgetAction::List => {
            let (_aisle, planner) = open_planner(dir)?;
            let items = planner.budget();
            if json {
                return print_json(&BudgetJson {
                    items,
                    total_estimated: crate::model::budget::total_estimated(items).to_string(),
                    total_actual: crate::model::budget::total_actual(items).to_string(),
                    remaining: crate::model::budget::remaining(items).to_string(),
                });
            }
            print_lines(&format_budget_listing(items));
            Ok(())
        }
        BudgetAction::Add(add) => {
            let estimated = parse_amount(&add.estimated)?;
            let (_lock, mut planner) = open_planner_locked(dir)?;
            let id = planner
                .add_budget_item(&add.category, estimated)
                .ok_or("budget line needs a category and a positive estimate")?;
            println!("{id}");
            Ok(())
        }
        BudgetAction::Actual(actual) => {
            let amount = parse_amount(&actual.amount)?;
            let (_lock, mut planner) = open_planner_locked(dir)?;
            if !planner.set_actual(actual.id, amount) {
                return Err(format!("no budget line with id {}", actual.id).into());
            }
            Ok(())
        }
        BudgetAction::Rm(arg) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            if !planner.remove_budget_item(arg.id) {
                return Err(format!("no budget line with id {}", arg.id).into());
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Vendors
// ---------------------------------------------------------------------------

fn cmd_vendor(dir: Option<&str>, args: VendorCmd, json: bool) -> Result<(), CliError> {
    match args.action.unwrap_or(VendorAction::List) {
        VendorAction::List => {
            let (_aisle, planner) = open_planner(dir)?;
            if json {
                return print_json(&planner.vendors());
            }
            print_lines(&format_vendor_listing(planner.vendors()));
            Ok(())
        }
        VendorAction::Add(add) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            let mut vendor = Vendor::new(add.name.trim(), add.category.trim());
            vendor.phone = add.phone.trim().to_string();
            vendor.email = add.email.trim().to_string();
            let id = planner
                .add_vendor(vendor)
                .ok_or("vendor needs a name and a category")?;
            println!("{id}");
            Ok(())
        }
        VendorAction::Status(status) => {
            let parsed = VendorStatus::parse(&status.status).ok_or_else(|| {
                format!(
                    "not a status: '{}' (researching, contacted, booked or paid)",
                    status.status
                )
            })?;
            let (_lock, mut planner) = open_planner_locked(dir)?;
            if !planner.set_vendor_status(status.id, parsed) {
                return Err(format!("no vendor with id {}", status.id).into());
            }
            Ok(())
        }
        VendorAction::Rm(arg) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            if !planner.remove_vendor(arg.id) {
                return Err(format!("no vendor with id {}", arg.id).into());
            }
            Ok(())
        }
        VendorAction::Directory(filter) => {
            let listings: Vec<_> = match filter.category.as_deref() {
                Some(category) => directory::by_category(category),
                None => directory::directory_vendors().iter().collect(),
            };
            print_lines(&format_directory_listing(&listings));
            Ok(())
        }
        VendorAction::Book(arg) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            let id = planner
                .add_vendor_from_directory(arg.id)
                .ok_or_else(|| format!("no directory listing with id {}", arg.id))?;
            println!("{id}");
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Mood board & slideshow
// ---------------------------------------------------------------------------

fn cmd_mood(dir: Option<&str>, args: MoodCmd, json: bool) -> Result<(), CliError> {
    match args.action.unwrap_or(ImageAction::List) {
        ImageAction::List => {
            let (_aisle, planner) = open_planner(dir)?;
            if json {
                return print_json(&planner.mood_images());
            }
            print_lines(&format_image_listing(planner.mood_images()));
            Ok(())
        }
        ImageAction::Add(add) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            let id = planner
                .add_mood_image(&add.url, &add.caption)
                .ok_or("not a valid image URL")?;
            println!("{id}");
            Ok(())
        }
        ImageAction::Rm(arg) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            if !planner.remove_mood_image(arg.id) {
                return Err(format!("no image with id {}", arg.id).into());
            }
            Ok(())
        }
    }
}

fn cmd_slides(dir: Option<&str>, args: SlidesCmd, json: bool) -> Result<(), CliError> {
    match args.action.unwrap_or(ImageAction::List) {
        ImageAction::List => {
            let (_aisle, planner) = open_planner(dir)?;
            if json {
                return print_json(&planner.slides());
            }
            print_lines(&format_image_listing(planner.slides()));
            Ok(())
        }
        ImageAction::Add(add) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            let id = planner
                .add_slide(&add.url, &add.caption)
                .ok_or("slideshow is full (5 images) or the URL is invalid")?;
            println!("{id}");
            Ok(())
        }
        ImageAction::Rm(arg) => {
            let (_lock, mut planner) = open_planner_locked(dir)?;
            if !planner.remove_slide(arg.id) {
                return Err(format!("no slide with id {}", arg.id).into());
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Vision board
// ---------------------------------------------------------------------------

fn cmd_vision(dir: Option<&str>, args: VisionCmd, json: bool) -> Result<(), CliError> {
    match args.action.unwrap_or(VisionAction::List) {
        VisionAction::List => {
            let (_aisle, planner) = open_planner(dir)?;
            if json {
                return print_json(&planner.themes());
            }
            if planner.themes().is_empty() {
                println!("No theme ideas yet. Try: aisle vision generate \"a rustic barn wedding\"");
                return Ok(());
            }
            for theme in planner.themes() {
                print_lines(&format_theme(theme));
            }
            Ok(())
        }
        VisionAction::Generate(generate) => {
            let root = resolve_root(dir)?;
            let aisle = planner_io::aisle_dir(&root);
            let config = planner_io::read_config(&aisle)?;
            let generator = GeminiGenerator::from_env(&config.vision)?;

            let mut session = VisionSession::new();
            if !session.begin(generator, &generate.prompt) {
                return Err("prompt cannot be blank".into());
            }
            println!("Generating ideas...");

            match session.wait() {
                Some(themes) => {
                    let _lock = StoreLock::acquire_default(&aisle)?;
                    let store = planner_io::open_store(&aisle)?;
                    let mut planner = Planner::new(store);
                    planner.set_themes(themes);
                    for theme in planner.themes() {
                        print_lines(&format_theme(theme));
                    }
                    Ok(())
                }
                None => {
                    // Generation failures are shown, not propagated
                    if let Some(message) = session.error() {
                        println!("{message}");
                    }
                    Ok(())
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn cmd_find(dir: Option<&str>, args: FindArgs) -> Result<(), CliError> {
    let (_aisle, planner) = open_planner(dir)?;
    let re = search_regex(&args.pattern)?;

    let mut lines = Vec::new();
    for task in planner.tasks() {
        if re.is_match(&task.text) {
            lines.push(format!("task    {}", format_task_line(task)));
        }
    }
    for guest in planner.guests() {
        if re.is_match(&guest.name) || re.is_match(&guest.notes) {
            lines.push(format!(
                "guest   {:>3}  {} ({})",
                guest.id,
                guest.name,
                guest.status.label()
            ));
        }
    }
    for vendor in planner.vendors() {
        if re.is_match(&vendor.name) || re.is_match(&vendor.category) {
            lines.push(format!(
                "vendor  {:>3}  {} [{}]",
                vendor.id, vendor.name, vendor.category
            ));
        }
    }

    if lines.is_empty() {
        println!("no matches");
    } else {
        print_lines(&lines);
    }
    Ok(())
}

/// Compile a case-insensitive regex, falling back to a literal match when
/// the pattern itself does not compile.
fn search_regex(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){pattern}"))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
}
