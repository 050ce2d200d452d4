use serde::{Deserialize, Serialize};

/// Where a vendor stands in the booking pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VendorStatus {
    Researching,
    Contacted,
    Booked,
    Paid,
}

impl VendorStatus {
    pub fn label(self) -> &'static str {
        match self {
            VendorStatus::Researching => "Researching",
            VendorStatus::Contacted => "Contacted",
            VendorStatus::Booked => "Booked",
            VendorStatus::Paid => "Paid",
        }
    }

    pub fn parse(s: &str) -> Option<VendorStatus> {
        match s.to_ascii_lowercase().as_str() {
            "researching" => Some(VendorStatus::Researching),
            "contacted" => Some(VendorStatus::Contacted),
            "booked" => Some(VendorStatus::Booked),
            "paid" => Some(VendorStatus::Paid),
            _ => None,
        }
    }
}

/// A vendor the couple is working with (distinct from the read-only directory)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: u64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub status: VendorStatus,
}

impl Vendor {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Vendor {
            id: 0,
            name: name.into(),
            category: category.into(),
            phone: String::new(),
            email: String::new(),
            status: VendorStatus::Researching,
        }
    }

    /// A vendor is addable when both name and category are non-blank.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.category.trim().is_empty()
    }
}

impl crate::sync::Record for Vendor {
    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Starter vendor list shown before any vendors have been saved.
pub fn default_vendors() -> Vec<Vendor> {
    let seed = [
        (
            "Evergreen Photography",
            "Photography",
            "555-1234",
            "contact@evergreen.com",
            VendorStatus::Booked,
        ),
        (
            "The Grand Ballroom",
            "Venue",
            "555-5678",
            "events@grandballroom.com",
            VendorStatus::Paid,
        ),
        (
            "Blossom & Bloom",
            "Florist",
            "555-8765",
            "info@blossom.com",
            VendorStatus::Contacted,
        ),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, (name, category, phone, email, status))| Vendor {
            id: i as u64,
            name: (*name).to_string(),
            category: (*category).to_string(),
            phone: (*phone).to_string(),
            email: (*email).to_string(),
            status: *status,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status() {
        assert_eq!(VendorStatus::parse("booked"), Some(VendorStatus::Booked));
        assert_eq!(VendorStatus::parse("PAID"), Some(VendorStatus::Paid));
        assert_eq!(VendorStatus::parse("ghosted"), None);
    }

    #[test]
    fn vendor_needs_name_and_category() {
        assert!(!Vendor::new("", "Venue").is_valid());
        assert!(!Vendor::new("The Barn", " ").is_valid());
        assert!(Vendor::new("The Barn", "Venue").is_valid());
    }
}
