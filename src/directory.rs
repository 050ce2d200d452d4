//! Read-only vendor directory.
//!
//! A static catalog the couple can browse and copy entries from into their
//! own vendor list. Nothing here is persisted or mutated.

/// A vendor listed in the public directory
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryVendor {
    pub id: u64,
    pub name: &'static str,
    pub category: &'static str,
    pub location: &'static str,
    pub rating: f32,
    pub reviews: u32,
    pub phone: &'static str,
    pub email: &'static str,
}

/// The full directory, in listing order.
pub fn directory_vendors() -> &'static [DirectoryVendor] {
    DIRECTORY
}

/// Directory entries matching a category (case-insensitive).
pub fn by_category(category: &str) -> Vec<&'static DirectoryVendor> {
    DIRECTORY
        .iter()
        .filter(|v| v.category.eq_ignore_ascii_case(category))
        .collect()
}

/// Find a directory entry by its listing id.
pub fn by_id(id: u64) -> Option<&'static DirectoryVendor> {
    DIRECTORY.iter().find(|v| v.id == id)
}

static DIRECTORY: &[DirectoryVendor] = &[
    DirectoryVendor {
        id: 101,
        name: "Elegance Venues",
        category: "Venue",
        location: "New York, NY",
        rating: 4.9,
        reviews: 152,
        phone: "555-0101",
        email: "contact@elegance.com",
    },
    DirectoryVendor {
        id: 102,
        name: "Timeless Photography",
        category: "Photography",
        location: "Los Angeles, CA",
        rating: 5.0,
        reviews: 210,
        phone: "555-0102",
        email: "hello@timeless.photo",
    },
    DirectoryVendor {
        id: 103,
        name: "Gourmet Catering Co.",
        category: "Catering",
        location: "Chicago, IL",
        rating: 4.8,
        reviews: 180,
        phone: "555-0103",
        email: "events@gourmetco.com",
    },
    DirectoryVendor {
        id: 104,
        name: "Bloom & Petal Florists",
        category: "Florist",
        location: "Miami, FL",
        rating: 4.9,
        reviews: 130,
        phone: "555-0104",
        email: "designs@bloompetal.com",
    },
    DirectoryVendor {
        id: 105,
        name: "Rhythmic Beats DJ",
        category: "Music",
        location: "New York, NY",
        rating: 4.7,
        reviews: 95,
        phone: "555-0105",
        email: "bookings@rhythmicbeats.com",
    },
    DirectoryVendor {
        id: 106,
        name: "Sweet Creations Bakery",
        category: "Bakery",
        location: "San Francisco, CA",
        rating: 5.0,
        reviews: 198,
        phone: "555-0106",
        email: "orders@sweetcreations.com",
    },
    DirectoryVendor {
        id: 107,
        name: "The Lakeside Manor",
        category: "Venue",
        location: "Chicago, IL",
        rating: 4.8,
        reviews: 112,
        phone: "555-0107",
        email: "lakeside@events.com",
    },
    DirectoryVendor {
        id: 108,
        name: "Candid Moments Films",
        category: "Videography",
        location: "Los Angeles, CA",
        rating: 4.9,
        reviews: 140,
        phone: "555-0108",
        email: "candid@films.com",
    },
    DirectoryVendor {
        id: 109,
        name: "A-List Planners",
        category: "Planner",
        location: "Miami, FL",
        rating: 5.0,
        reviews: 88,
        phone: "555-0109",
        email: "plan@alist.com",
    },
    DirectoryVendor {
        id: 110,
        name: "Floral Dreams",
        category: "Florist",
        location: "New York, NY",
        rating: 4.8,
        reviews: 99,
        phone: "555-0110",
        email: "info@floraldreams.com",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_filter_is_case_insensitive() {
        let venues = by_category("venue");
        assert_eq!(venues.len(), 2);
        assert!(venues.iter().all(|v| v.category == "Venue"));
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(by_id(102).unwrap().name, "Timeless Photography");
        assert!(by_id(999).is_none());
    }
}
