use chrono::{Local, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::directory;
use crate::identity::IdentityProvider;
use crate::io::json_store::JsonFileStore;
use crate::io::kv::KvStore;
use crate::model::budget::{self, BudgetItem};
use crate::model::guest::{self, Guest, GuestSide, RsvpStatus};
use crate::model::image::{self, BoardImage};
use crate::model::task::{self, Task};
use crate::model::theme::{self, ThemeIdea};
use crate::model::vendor::{self, Vendor, VendorStatus};
use crate::sched::MAX_SLIDES;
use crate::sync::{SyncedCollection, SyncedValue};

pub const NS_TASKS: &str = "wedding_tasks";
pub const NS_GUESTS: &str = "wedding_guests";
pub const NS_BUDGET: &str = "wedding_budget";
pub const NS_VENDORS: &str = "wedding_my_vendors";
pub const NS_MOOD: &str = "wedding_moodboard_images";
pub const NS_SLIDES: &str = "wedding_dashboard_images";
pub const NS_THEMES: &str = "wedding_vision_themes";
pub const NS_DATE: &str = "wedding_date";

/// Default wedding date when none has been saved: six months out.
fn default_wedding_date() -> NaiveDate {
    let today = Local::now().date_naive();
    today
        .checked_add_months(Months::new(6))
        .unwrap_or(today)
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtAGlance {
    pub guests_total: usize,
    pub guests_attending: usize,
    pub tasks_total: usize,
    pub tasks_done: usize,
    pub vendors_booked: usize,
    pub budget_remaining: Decimal,
}

/// The whole planning state for one process: the durable store, the active
/// identity and every synced collection, all kept in step.
///
/// Every list the app shows is a [`SyncedCollection`]; a sign-in or sign-out
/// reloads them all for the new identity in one pass. Mutations go through
/// the methods here so the collection picks the id and persists before the
/// call returns.
pub struct Planner<S: KvStore> {
    store: S,
    identity: IdentityProvider,
    tasks: SyncedCollection<Task>,
    guests: SyncedCollection<Guest>,
    budget: SyncedCollection<BudgetItem>,
    vendors: SyncedCollection<Vendor>,
    mood: SyncedCollection<BoardImage>,
    slides: SyncedCollection<BoardImage>,
    themes: SyncedCollection<ThemeIdea>,
    wedding_date: SyncedValue<NaiveDate>,
}

impl<S: KvStore> Planner<S> {
    /// Open a planner over `store`, restoring the last signed-in identity
    /// and loading every collection for it.
    pub fn new(store: S) -> Self {
        let identity = IdentityProvider::load(&store);
        let mut planner = Planner {
            store,
            identity,
            tasks: SyncedCollection::new(NS_TASKS, task::default_tasks, Task::is_valid),
            guests: SyncedCollection::new(NS_GUESTS, guest::default_guests, Guest::is_valid),
            budget: SyncedCollection::new(NS_BUDGET, budget::default_budget, BudgetItem::is_valid),
            vendors: SyncedCollection::new(NS_VENDORS, vendor::default_vendors, Vendor::is_valid),
            mood: SyncedCollection::new(NS_MOOD, image::default_mood_images, BoardImage::is_valid),
            slides: SyncedCollection::new(NS_SLIDES, image::default_slides, BoardImage::is_valid)
                .with_capacity_limit(MAX_SLIDES),
            themes: SyncedCollection::new(NS_THEMES, theme::default_themes, ThemeIdea::is_valid),
            wedding_date: SyncedValue::new(NS_DATE, default_wedding_date),
        };
        planner.activate_all();
        planner
    }

    /// Reload every collection for the current identity.
    pub fn activate_all(&mut self) {
        let identity = self.identity.current().map(str::to_string);
        let identity = identity.as_deref();
        self.tasks.activate(&self.store, identity);
        self.guests.activate(&self.store, identity);
        self.budget.activate(&self.store, identity);
        self.vendors.activate(&self.store, identity);
        self.mood.activate(&self.store, identity);
        self.slides.activate(&self.store, identity);
        self.themes.activate(&self.store, identity);
        self.wedding_date.activate(&self.store, identity);
    }

    // -----------------------------------------------------------------------
    // Identity
    // -----------------------------------------------------------------------

    pub fn identity(&self) -> Option<&str> {
        self.identity.current()
    }

    /// Sign in as `raw` (normalized), then reload everything for the new
    /// identity. Blank names are rejected.
    pub fn sign_in(&mut self, raw: &str) -> Option<String> {
        let identity = self.identity.sign_in(&mut self.store, raw)?;
        self.activate_all();
        Some(identity)
    }

    /// Sign out and fall back to the anonymous data sets.
    pub fn sign_out(&mut self) {
        self.identity.sign_out(&mut self.store);
        self.activate_all();
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        self.tasks.records()
    }

    pub fn add_task(&mut self, text: &str) -> Option<u64> {
        self.tasks.add(&mut self.store, Task::new(text.trim()))
    }

    pub fn toggle_task(&mut self, id: u64) -> bool {
        self.tasks
            .update(&mut self.store, id, |t| t.completed = !t.completed)
    }

    pub fn complete_task(&mut self, id: u64, completed: bool) -> bool {
        self.tasks
            .update(&mut self.store, id, |t| t.completed = completed)
    }

    pub fn remove_task(&mut self, id: u64) -> bool {
        self.tasks.remove(&mut self.store, id)
    }

    // -----------------------------------------------------------------------
    // Guests
    // -----------------------------------------------------------------------

    pub fn guests(&self) -> &[Guest] {
        self.guests.records()
    }

    pub fn add_guest(&mut self, name: &str, side: GuestSide, notes: &str) -> Option<u64> {
        let mut guest = Guest::new(name.trim(), side);
        guest.notes = notes.trim().to_string();
        self.guests.add(&mut self.store, guest)
    }

    pub fn set_rsvp(&mut self, id: u64, status: RsvpStatus) -> bool {
        self.guests.update(&mut self.store, id, |g| g.status = status)
    }

    pub fn remove_guest(&mut self, id: u64) -> bool {
        self.guests.remove(&mut self.store, id)
    }

    // -----------------------------------------------------------------------
    // Budget
    // -----------------------------------------------------------------------

    pub fn budget(&self) -> &[BudgetItem] {
        self.budget.records()
    }

    pub fn add_budget_item(&mut self, category: &str, estimated: Decimal) -> Option<u64> {
        self.budget
            .add(&mut self.store, BudgetItem::new(category.trim(), estimated))
    }

    pub fn set_actual(&mut self, id: u64, actual: Decimal) -> bool {
        self.budget.update(&mut self.store, id, |i| i.actual = actual)
    }

    pub fn remove_budget_item(&mut self, id: u64) -> bool {
        self.budget.remove(&mut self.store, id)
    }

    // -----------------------------------------------------------------------
    // Vendors
    // -----------------------------------------------------------------------

    pub fn vendors(&self) -> &[Vendor] {
        self.vendors.records()
    }

    pub fn add_vendor(&mut self, vendor: Vendor) -> Option<u64> {
        self.vendors.add(&mut self.store, vendor)
    }

    /// Copy a directory listing into the couple's own vendor list.
    pub fn add_vendor_from_directory(&mut self, directory_id: u64) -> Option<u64> {
        let listing = directory::by_id(directory_id)?;
        let mut vendor = Vendor::new(listing.name, listing.category);
        vendor.phone = listing.phone.to_string();
        vendor.email = listing.email.to_string();
        vendor.status = VendorStatus::Contacted;
        self.vendors.add(&mut self.store, vendor)
    }

    pub fn set_vendor_status(&mut self, id: u64, status: VendorStatus) -> bool {
        self.vendors
            .update(&mut self.store, id, |v| v.status = status)
    }

    pub fn remove_vendor(&mut self, id: u64) -> bool {
        self.vendors.remove(&mut self.store, id)
    }

    // -----------------------------------------------------------------------
    // Mood board & slideshow images
    // -----------------------------------------------------------------------

    pub fn mood_images(&self) -> &[BoardImage] {
        self.mood.records()
    }

    pub fn add_mood_image(&mut self, url: &str, caption: &str) -> Option<u64> {
        let mut img = BoardImage::new(url.trim());
        img.caption = caption.trim().to_string();
        self.mood.add(&mut self.store, img)
    }

    pub fn remove_mood_image(&mut self, id: u64) -> bool {
        self.mood.remove(&mut self.store, id)
    }

    pub fn slides(&self) -> &[BoardImage] {
        self.slides.records()
    }

    /// Add a slideshow image. Returns `None` for an invalid URL or when the
    /// slideshow is already at its five-image cap.
    pub fn add_slide(&mut self, url: &str, caption: &str) -> Option<u64> {
        let mut img = BoardImage::new(url.trim());
        img.caption = caption.trim().to_string();
        self.slides.add(&mut self.store, img)
    }

    pub fn remove_slide(&mut self, id: u64) -> bool {
        self.slides.remove(&mut self.store, id)
    }

    // -----------------------------------------------------------------------
    // Vision themes & wedding date
    // -----------------------------------------------------------------------

    pub fn themes(&self) -> &[ThemeIdea] {
        self.themes.records()
    }

    /// Replace the vision board with a fresh generation run.
    pub fn set_themes(&mut self, themes: Vec<ThemeIdea>) {
        self.themes.replace_all(&mut self.store, themes);
    }

    pub fn wedding_date(&self) -> NaiveDate {
        *self.wedding_date.get()
    }

    pub fn set_wedding_date(&mut self, date: NaiveDate) {
        self.wedding_date.set(&mut self.store, date);
    }

    // -----------------------------------------------------------------------
    // Derived
    // -----------------------------------------------------------------------

    pub fn at_a_glance(&self) -> AtAGlance {
        let guests = self.guests.records();
        let tasks = self.tasks.records();
        AtAGlance {
            guests_total: guests.len(),
            guests_attending: guests
                .iter()
                .filter(|g| g.status == RsvpStatus::Attending)
                .count(),
            tasks_total: tasks.len(),
            tasks_done: tasks.iter().filter(|t| t.completed).count(),
            vendors_booked: self
                .vendors
                .records()
                .iter()
                .filter(|v| matches!(v.status, VendorStatus::Booked | VendorStatus::Paid))
                .count(),
            budget_remaining: budget::remaining(self.budget.records()),
        }
    }
}

impl Planner<JsonFileStore> {
    /// Re-read the store file and reload every collection. Called when the
    /// watcher reports an external write.
    pub fn refresh_from_disk(&mut self) {
        if let Err(e) = self.store.reload() {
            tracing::warn!(error = %e, "could not re-read store file");
            return;
        }
        self.identity = IdentityProvider::load(&self.store);
        self.activate_all();
    }
}
