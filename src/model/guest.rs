use serde::{Deserialize, Serialize};

/// RSVP status for a guest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsvpStatus {
    Pending,
    Attending,
    Declined,
}

impl RsvpStatus {
    pub fn label(self) -> &'static str {
        match self {
            RsvpStatus::Pending => "Pending",
            RsvpStatus::Attending => "Attending",
            RsvpStatus::Declined => "Declined",
        }
    }

    /// Parse a status from user input (case-insensitive).
    pub fn parse(s: &str) -> Option<RsvpStatus> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Some(RsvpStatus::Pending),
            "attending" => Some(RsvpStatus::Attending),
            "declined" => Some(RsvpStatus::Declined),
            _ => None,
        }
    }
}

/// Which side of the wedding party invited the guest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuestSide {
    Bride,
    Groom,
    Both,
}

impl GuestSide {
    pub fn label(self) -> &'static str {
        match self {
            GuestSide::Bride => "Bride",
            GuestSide::Groom => "Groom",
            GuestSide::Both => "Both",
        }
    }

    pub fn parse(s: &str) -> Option<GuestSide> {
        match s.to_ascii_lowercase().as_str() {
            "bride" => Some(GuestSide::Bride),
            "groom" => Some(GuestSide::Groom),
            "both" => Some(GuestSide::Both),
            _ => None,
        }
    }
}

/// A guest on the invitation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: u64,
    pub name: String,
    pub side: GuestSide,
    pub status: RsvpStatus,
    #[serde(default)]
    pub notes: String,
}

impl Guest {
    pub fn new(name: impl Into<String>, side: GuestSide) -> Self {
        Guest {
            id: 0,
            name: name.into(),
            side,
            status: RsvpStatus::Pending,
            notes: String::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

impl crate::sync::Record for Guest {
    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Starter guest list shown before any guests have been saved.
pub fn default_guests() -> Vec<Guest> {
    let seed = [
        ("Eleanor Vance", GuestSide::Bride, RsvpStatus::Attending),
        ("Arthur Pendleton", GuestSide::Groom, RsvpStatus::Attending),
        ("Clara Oswald", GuestSide::Bride, RsvpStatus::Pending),
        ("James Harper", GuestSide::Groom, RsvpStatus::Declined),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, (name, side, status))| Guest {
            id: i as u64,
            name: (*name).to_string(),
            side: *side,
            status: *status,
            notes: String::new(),
        })
        .collect()
}
