use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A budget line: what we planned to spend vs. what we actually spent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: u64,
    pub category: String,
    pub estimated: Decimal,
    pub actual: Decimal,
}

impl BudgetItem {
    pub fn new(category: impl Into<String>, estimated: Decimal) -> Self {
        BudgetItem {
            id: 0,
            category: category.into(),
            estimated,
            actual: Decimal::ZERO,
        }
    }

    /// A line is addable when it has a category and a positive estimate.
    pub fn is_valid(&self) -> bool {
        !self.category.trim().is_empty() && self.estimated > Decimal::ZERO
    }

    /// Estimated minus actual for this line.
    pub fn line_remaining(&self) -> Decimal {
        self.estimated - self.actual
    }
}

impl crate::sync::Record for BudgetItem {
    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Sum of estimates across all lines.
pub fn total_estimated(items: &[BudgetItem]) -> Decimal {
    items.iter().map(|i| i.estimated).sum()
}

/// Sum of actual spend across all lines.
pub fn total_actual(items: &[BudgetItem]) -> Decimal {
    items.iter().map(|i| i.actual).sum()
}

/// Total estimated minus total actual.
pub fn remaining(items: &[BudgetItem]) -> Decimal {
    total_estimated(items) - total_actual(items)
}

/// Starter budget shown before any lines have been saved.
pub fn default_budget() -> Vec<BudgetItem> {
    let seed: [(&str, i64, i64); 4] = [
        ("Venue", 10_000, 12_000),
        ("Catering", 8_000, 7_500),
        ("Photography", 3_000, 3_000),
        ("Dress & Attire", 2_500, 0),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, (category, estimated, actual))| BudgetItem {
            id: i as u64,
            category: (*category).to_string(),
            estimated: Decimal::from(*estimated),
            actual: Decimal::from(*actual),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals() {
        let items = default_budget();
        assert_eq!(total_estimated(&items), Decimal::from(23_500));
        assert_eq!(total_actual(&items), Decimal::from(22_500));
        assert_eq!(remaining(&items), Decimal::from(1_000));
    }

    #[test]
    fn non_positive_estimate_is_invalid() {
        assert!(!BudgetItem::new("Flowers", Decimal::ZERO).is_valid());
        assert!(!BudgetItem::new("Flowers", Decimal::from(-50)).is_valid());
        assert!(BudgetItem::new("Flowers", Decimal::from(800)).is_valid());
        assert!(!BudgetItem::new("  ", Decimal::from(800)).is_valid());
    }
}
