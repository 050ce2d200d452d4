use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aisle", about = concat!("[<3] aisle v", env!("CARGO_PKG_VERSION"), " - plan the big day from your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different planning directory
    #[arg(short = 'C', long = "planning-dir", global = true)]
    pub planning_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new planning directory
    Init(InitArgs),
    /// Sign in with a display name (partitions all saved data)
    Signin(SigninArgs),
    /// Sign out, returning to the anonymous sample data
    Signout,
    /// Show the signed-in name
    Whoami,
    /// Show the countdown, or set the wedding date
    Date(DateCmd),
    /// Manage the to-do list
    Task(TaskCmd),
    /// Manage the guest list
    Guest(GuestCmd),
    /// Manage the budget
    Budget(BudgetCmd),
    /// Manage your vendors and browse the directory
    Vendor(VendorCmd),
    /// Manage the mood board
    Mood(MoodCmd),
    /// Manage the dashboard slideshow (max 5 images)
    Slides(SlidesCmd),
    /// Generate and view wedding theme ideas
    Vision(VisionCmd),
    /// Search tasks, guests and vendors by regex
    Find(FindArgs),
}

// ---------------------------------------------------------------------------
// Init / identity args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Couple display name (default: inferred from directory name)
    #[arg(long)]
    pub couple: Option<String>,
    /// Reinitialize even if aisle/ already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct SigninArgs {
    /// Display name; normalized to a storage key (trimmed, lower-cased,
    /// spaces become underscores)
    pub name: String,
}

// ---------------------------------------------------------------------------
// Date
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct DateCmd {
    #[command(subcommand)]
    pub action: Option<DateAction>,
}

#[derive(Subcommand)]
pub enum DateAction {
    /// Set the wedding date
    Set(DateSetArgs),
}

#[derive(Args)]
pub struct DateSetArgs {
    /// The big day, as YYYY-MM-DD
    pub date: String,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TaskCmd {
    #[command(subcommand)]
    pub action: Option<TaskAction>,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks (default)
    List,
    /// Add a task
    Add(TaskAddArgs),
    /// Mark a task done
    Done(IdArg),
    /// Mark a task not done
    Undo(IdArg),
    /// Remove a task
    Rm(IdArg),
}

#[derive(Args)]
pub struct TaskAddArgs {
    /// Task text, e.g. "Book photographer"
    pub text: String,
}

#[derive(Args)]
pub struct IdArg {
    /// Record id (shown in list output)
    pub id: u64,
}

// ---------------------------------------------------------------------------
// Guests
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct GuestCmd {
    #[command(subcommand)]
    pub action: Option<GuestAction>,
}

#[derive(Subcommand)]
pub enum GuestAction {
    /// List guests (default)
    List,
    /// Add a guest
    Add(GuestAddArgs),
    /// Update a guest's RSVP (pending, attending, declined)
    Rsvp(GuestRsvpArgs),
    /// Remove a guest
    Rm(IdArg),
}

#[derive(Args)]
pub struct GuestAddArgs {
    /// Guest name
    pub name: String,
    /// Which side invited them (bride, groom, both)
    #[arg(long, default_value = "both")]
    pub side: String,
    /// Free-form notes (dietary, plus-one, ...)
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Args)]
pub struct GuestRsvpArgs {
    pub id: u64,
    /// New status: pending, attending or declined
    pub status: String,
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BudgetCmd {
    #[command(subcommand)]
    pub action: Option<BudgetAction>,
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// List budget lines with totals (default)
    List,
    /// Add a budget line
    Add(BudgetAddArgs),
    /// Record actual spend for a line
    Actual(BudgetActualArgs),
    /// Remove a budget line
    Rm(IdArg),
}

#[derive(Args)]
pub struct BudgetAddArgs {
    /// Category, e.g. "Flowers"
    pub category: String,
    /// Estimated cost (must be positive)
    pub estimated: String,
}

#[derive(Args)]
pub struct BudgetActualArgs {
    pub id: u64,
    /// Actual amount spent
    pub amount: String,
}

// ---------------------------------------------------------------------------
// Vendors
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct VendorCmd {
    #[command(subcommand)]
    pub action: Option<VendorAction>,
}

#[derive(Subcommand)]
pub enum VendorAction {
    /// List your vendors (default)
    List,
    /// Add a vendor
    Add(VendorAddArgs),
    /// Update a vendor's status (researching, contacted, booked, paid)
    Status(VendorStatusArgs),
    /// Remove a vendor
    Rm(IdArg),
    /// Browse the read-only vendor directory
    Directory(VendorDirectoryArgs),
    /// Copy a directory listing into your vendors
    Book(IdArg),
}

#[derive(Args)]
pub struct VendorAddArgs {
    pub name: String,
    pub category: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub email: String,
}

#[derive(Args)]
pub struct VendorStatusArgs {
    pub id: u64,
    /// New status: researching, contacted, booked or paid
    pub status: String,
}

#[derive(Args)]
pub struct VendorDirectoryArgs {
    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct MoodCmd {
    #[command(subcommand)]
    pub action: Option<ImageAction>,
}

#[derive(Args)]
pub struct SlidesCmd {
    #[command(subcommand)]
    pub action: Option<ImageAction>,
}

#[derive(Subcommand)]
pub enum ImageAction {
    /// List images (default)
    List,
    /// Add an image by URL
    Add(ImageAddArgs),
    /// Remove an image
    Rm(IdArg),
}

#[derive(Args)]
pub struct ImageAddArgs {
    /// Image URL (http(s) or data URI)
    pub url: String,
    #[arg(long, default_value = "")]
    pub caption: String,
}

// ---------------------------------------------------------------------------
// Vision board
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct VisionCmd {
    #[command(subcommand)]
    pub action: Option<VisionAction>,
}

#[derive(Subcommand)]
pub enum VisionAction {
    /// List saved theme ideas (default)
    List,
    /// Generate fresh theme ideas from a description
    Generate(VisionGenerateArgs),
}

#[derive(Args)]
pub struct VisionGenerateArgs {
    /// Free-text description, e.g. "a cozy rustic barn wedding in autumn"
    pub prompt: String,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct FindArgs {
    /// Regex pattern (case-insensitive)
    pub pattern: String,
}
