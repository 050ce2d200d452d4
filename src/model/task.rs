use serde::{Deserialize, Serialize};

/// A single checklist task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Create a new incomplete task. The id is assigned by the collection on add.
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            id: 0,
            text: text.into(),
            completed: false,
        }
    }

    /// A task is addable when its text is non-blank.
    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

impl crate::sync::Record for Task {
    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Starter checklist shown before any tasks have been saved.
pub fn default_tasks() -> Vec<Task> {
    let seed = [
        ("Set a budget", true),
        ("Create guest list", true),
        ("Book a venue", false),
        ("Hire a photographer", false),
        ("Send save-the-dates", false),
        ("Book caterer", false),
        ("Buy wedding rings", false),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, (text, completed))| Task {
            id: i as u64,
            text: (*text).to_string(),
            completed: *completed,
        })
        .collect()
}
