//! Plain-text shopping list built from cart ingredient totals.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::types::ShoppingListRow;

pub const SHOPPING_LIST_HEADER: &str = "Your shopping list:";
pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Ingredient totals keyed by (name, measurement unit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    totals: BTreeMap<(String, String), i64>,
}

impl ShoppingList {
    /// Merge rows that share a (name, unit) key. Grouped and ungrouped input give the same list.
    pub fn from_rows(rows: impl IntoIterator<Item = ShoppingListRow>) -> Self {
        let mut totals = BTreeMap::new();
        for row in rows {
            *totals.entry((row.name, row.measurement_unit)).or_insert(0) += row.amount;
        }
        Self { totals }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Totals in (name, unit) order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &str, i64)> {
        self.totals
            .iter()
            .map(|((name, unit), amount)| (name.as_str(), unit.as_str(), *amount))
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{SHOPPING_LIST_HEADER}")?;
        for (name, unit, amount) in self.items() {
            writeln!(f, "{name} {amount} {unit}")?;
        }
        Ok(())
    }
}
