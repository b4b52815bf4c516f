//! In-memory budget document: settings, categories, expenses, and history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Spending category. Identified by the `"<emoji> <name>"` composite key;
/// there is no separate stable id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub emoji: String,
    pub name: String,
}

impl Category {
    pub fn new(emoji: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            emoji: emoji.into(),
            name: name.into(),
        }
    }

    /// Lookup key used for the expense map and the persisted document.
    pub fn composite_key(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

/// Single expense line. Duplicates are legal and matched by first occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseItem {
    pub name: String,
    pub amount: i64,
    #[serde(default)]
    pub note: String,
}

impl ExpenseItem {
    pub fn new(name: impl Into<String>, amount: i64, note: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            note: note.into(),
        }
    }
}

/// UI theme stored alongside the budget settings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Tolerant parse: empty or unrecognized values fall back to dark.
    pub fn parse(value: &str) -> Self {
        match value {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Root of the budget state and the sole unit of persistence.
///
/// The expense map is keyed by composite key; serialization order is driven
/// by `categories`, so map ordering never reaches the persisted document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetDocument {
    pub salary: i64,
    pub theme: Theme,
    pub categories: Vec<Category>,
    pub expenses: BTreeMap<String, Vec<ExpenseItem>>,
    pub history: Vec<String>,
}

impl Default for BudgetDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetDocument {
    pub fn new() -> Self {
        Self {
            salary: 0,
            theme: Theme::Dark,
            categories: Vec::new(),
            expenses: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|cat| cat.composite_key() == key)
    }

    /// Stored (unsorted) expense list for a composite key.
    pub fn items(&self, key: &str) -> &[ExpenseItem] {
        self.expenses.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of a category's expense amounts.
    pub fn category_total(&self, category: &Category) -> i64 {
        self.items(&category.composite_key())
            .iter()
            .map(|item| item.amount)
            .sum()
    }

    /// Sum over all categories.
    pub fn total_expenses(&self) -> i64 {
        self.categories
            .iter()
            .map(|cat| self.category_total(cat))
            .sum()
    }

    /// Salary minus total expenses. May be negative; never clamped.
    pub fn remaining(&self) -> i64 {
        self.salary - self.total_expenses()
    }

    /// Display view: items sorted by descending amount. The sort is stable,
    /// so equal amounts keep their stored relative order.
    pub fn display_items(&self, category: &Category) -> Vec<ExpenseItem> {
        let mut items = self.items(&category.composite_key()).to_vec();
        items.sort_by(|a, b| b.amount.cmp(&a.amount));
        items
    }
}
