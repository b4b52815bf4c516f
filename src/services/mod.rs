//! Mutation operations over the budget document.
//!
//! Every state change appends exactly one history entry. Invalid mutations
//! (empty required fields, identity-match failure) are silent no-ops; the
//! `bool` return tells the caller whether anything changed and therefore
//! whether a persistence round-trip is due.

use chrono::Utc;

use crate::document::{BudgetDocument, Category, ExpenseItem};

const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn log(doc: &mut BudgetDocument, message: String) {
    let stamp = Utc::now().format(HISTORY_TIMESTAMP_FORMAT);
    doc.history.push(format!("{} | {}", stamp, message));
}

/// Locates an expense item by full value match against the stored (unsorted)
/// list. Duplicates resolve to the first occurrence.
fn find_item(doc: &BudgetDocument, key: &str, item: &ExpenseItem) -> Option<usize> {
    doc.items(key).iter().position(|candidate| candidate == item)
}

pub struct ItemService;

impl ItemService {
    /// Appends an item to a category's expense list.
    pub fn add(doc: &mut BudgetDocument, key: &str, item: ExpenseItem) -> bool {
        let message = format!("Dodato: {} {} RSD", item.name, item.amount);
        doc.expenses.entry(key.to_string()).or_default().push(item);
        log(doc, message);
        true
    }

    /// Replaces an item located by value match. When `target_key` names a
    /// different category, the item moves to the end of that list instead.
    /// No-op when the original item cannot be found.
    pub fn edit(
        doc: &mut BudgetDocument,
        key: &str,
        original: &ExpenseItem,
        updated: ExpenseItem,
        target_key: Option<&str>,
    ) -> bool {
        let Some(index) = find_item(doc, key, original) else {
            return false;
        };
        let target = target_key.unwrap_or(key);

        if target != key {
            if let Some(list) = doc.expenses.get_mut(key) {
                list.remove(index);
            }
            let message = format!("Premešteno: {} iz {} u {}", updated.name, key, target);
            doc.expenses
                .entry(target.to_string())
                .or_default()
                .push(updated);
            log(doc, message);
        } else {
            let old_amount = original.amount;
            let message = format!(
                "Izmenjeno: {} {} -> {} RSD",
                updated.name, old_amount, updated.amount
            );
            if let Some(list) = doc.expenses.get_mut(key) {
                list[index] = updated;
            }
            log(doc, message);
        }
        true
    }

    /// Removes an item located by value match. No-op when absent.
    pub fn remove(doc: &mut BudgetDocument, key: &str, item: &ExpenseItem) -> bool {
        let Some(index) = find_item(doc, key, item) else {
            return false;
        };
        if let Some(list) = doc.expenses.get_mut(key) {
            list.remove(index);
        }
        log(
            doc,
            format!("Obrisano: {} {} RSD", item.name, item.amount),
        );
        true
    }
}

pub struct CategoryService;

impl CategoryService {
    /// Appends a category and installs an empty expense list under its key.
    /// No-op when either field is empty. An existing list under the same
    /// composite key is replaced (source behavior, see DESIGN.md).
    pub fn add(doc: &mut BudgetDocument, emoji: &str, name: &str) -> bool {
        if emoji.is_empty() || name.is_empty() {
            return false;
        }
        let category = Category::new(emoji, name);
        let key = category.composite_key();
        doc.categories.push(category);
        doc.expenses.insert(key.clone(), Vec::new());
        log(doc, format!("Dodata kategorija: {}", key));
        true
    }

    /// Rewrites a category's fields in place and moves its expense list to
    /// the new composite key. A collision with another category's key
    /// silently replaces that list (source behavior, see DESIGN.md). One log
    /// entry covers the whole rename.
    pub fn rename(doc: &mut BudgetDocument, key: &str, new_emoji: &str, new_name: &str) -> bool {
        if new_emoji.is_empty() || new_name.is_empty() {
            return false;
        }
        let Some(index) = doc
            .categories
            .iter()
            .position(|cat| cat.composite_key() == key)
        else {
            return false;
        };
        let new_key = format!("{} {}", new_emoji, new_name);
        let items = doc.expenses.remove(key).unwrap_or_default();
        doc.expenses.insert(new_key.clone(), items);
        doc.categories[index].emoji = new_emoji.to_string();
        doc.categories[index].name = new_name.to_string();
        log(doc, format!("Izmenjena kategorija: {} -> {}", key, new_key));
        true
    }

    /// Removes a category and discards its entire expense list. Confirmation
    /// is the caller's responsibility. No-op when the key is unknown.
    pub fn remove(doc: &mut BudgetDocument, key: &str) -> bool {
        let Some(index) = doc
            .categories
            .iter()
            .position(|cat| cat.composite_key() == key)
        else {
            return false;
        };
        doc.categories.remove(index);
        doc.expenses.remove(key);
        log(doc, format!("Obrisana kategorija: {}", key));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_category() -> BudgetDocument {
        let mut doc = BudgetDocument::new();
        doc.salary = 1000;
        CategoryService::add(&mut doc, "🍔", "Hrana");
        doc
    }

    #[test]
    fn add_item_logs_and_appends() {
        let mut doc = doc_with_category();
        assert!(ItemService::add(
            &mut doc,
            "🍔 Hrana",
            ExpenseItem::new("Pizza", 500, "petak")
        ));
        assert_eq!(doc.items("🍔 Hrana").len(), 1);
        assert_eq!(doc.history.len(), 2);
        assert!(doc.history[1].ends_with("Dodato: Pizza 500 RSD"));
    }

    #[test]
    fn edit_item_in_place_logs_amount_transition() {
        let mut doc = doc_with_category();
        let original = ExpenseItem::new("Pizza", 500, "petak");
        ItemService::add(&mut doc, "🍔 Hrana", original.clone());
        let before = doc.category_total(&doc.categories[0].clone());
        assert!(ItemService::edit(
            &mut doc,
            "🍔 Hrana",
            &original,
            ExpenseItem::new("Pizza", 300, "petak"),
            None,
        ));
        let after = doc.category_total(&doc.categories[0].clone());
        assert_eq!(before - after, 200);
        assert!(doc
            .history
            .last()
            .unwrap()
            .ends_with("Izmenjeno: Pizza 500 -> 300 RSD"));
    }

    #[test]
    fn edit_item_moves_between_categories() {
        let mut doc = doc_with_category();
        CategoryService::add(&mut doc, "🎮", "Igre");
        let original = ExpenseItem::new("Pizza", 500, "");
        ItemService::add(&mut doc, "🍔 Hrana", original.clone());
        assert!(ItemService::edit(
            &mut doc,
            "🍔 Hrana",
            &original,
            original.clone(),
            Some("🎮 Igre"),
        ));
        assert!(doc.items("🍔 Hrana").is_empty());
        assert_eq!(doc.items("🎮 Igre").len(), 1);
        assert!(doc
            .history
            .last()
            .unwrap()
            .ends_with("Premešteno: Pizza iz 🍔 Hrana u 🎮 Igre"));
    }

    #[test]
    fn edit_of_missing_item_is_a_silent_noop() {
        let mut doc = doc_with_category();
        let history_before = doc.history.len();
        assert!(!ItemService::edit(
            &mut doc,
            "🍔 Hrana",
            &ExpenseItem::new("Nema", 1, ""),
            ExpenseItem::new("Nema", 2, ""),
            None,
        ));
        assert_eq!(doc.history.len(), history_before);
    }

    #[test]
    fn duplicate_items_match_first_occurrence() {
        let mut doc = doc_with_category();
        let item = ExpenseItem::new("Kafa", 100, "");
        ItemService::add(&mut doc, "🍔 Hrana", item.clone());
        ItemService::add(&mut doc, "🍔 Hrana", item.clone());
        ItemService::add(&mut doc, "🍔 Hrana", ExpenseItem::new("Sok", 80, ""));
        assert!(ItemService::remove(&mut doc, "🍔 Hrana", &item));
        let names: Vec<&str> = doc
            .items("🍔 Hrana")
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Kafa", "Sok"]);
    }

    #[test]
    fn remove_item_logs_deletion() {
        let mut doc = doc_with_category();
        let item = ExpenseItem::new("Pizza", 500, "");
        ItemService::add(&mut doc, "🍔 Hrana", item.clone());
        assert!(ItemService::remove(&mut doc, "🍔 Hrana", &item));
        assert!(doc.items("🍔 Hrana").is_empty());
        assert!(doc.history.last().unwrap().ends_with("Obrisano: Pizza 500 RSD"));
    }

    #[test]
    fn add_category_rejects_empty_fields() {
        let mut doc = BudgetDocument::new();
        assert!(!CategoryService::add(&mut doc, "", "Hrana"));
        assert!(!CategoryService::add(&mut doc, "🍔", ""));
        assert!(doc.categories.is_empty());
        assert!(doc.history.is_empty());
    }

    #[test]
    fn rename_moves_expense_list_to_new_key() {
        let mut doc = doc_with_category();
        ItemService::add(&mut doc, "🍔 Hrana", ExpenseItem::new("Pizza", 500, ""));
        assert!(CategoryService::rename(&mut doc, "🍔 Hrana", "🥗", "Ishrana"));
        assert_eq!(doc.categories[0], Category::new("🥗", "Ishrana"));
        assert!(doc.items("🍔 Hrana").is_empty());
        assert_eq!(doc.items("🥗 Ishrana").len(), 1);
        assert!(doc
            .history
            .last()
            .unwrap()
            .ends_with("Izmenjena kategorija: 🍔 Hrana -> 🥗 Ishrana"));
    }

    #[test]
    fn rename_collision_replaces_other_list() {
        let mut doc = doc_with_category();
        CategoryService::add(&mut doc, "🎮", "Igre");
        ItemService::add(&mut doc, "🍔 Hrana", ExpenseItem::new("Pizza", 500, ""));
        ItemService::add(&mut doc, "🎮 Igre", ExpenseItem::new("Igra", 200, ""));
        // Renaming onto an occupied key drops that key's list.
        assert!(CategoryService::rename(&mut doc, "🍔 Hrana", "🎮", "Igre"));
        let names: Vec<&str> = doc
            .items("🎮 Igre")
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Pizza"]);
    }

    #[test]
    fn remove_category_discards_items() {
        let mut doc = doc_with_category();
        ItemService::add(&mut doc, "🍔 Hrana", ExpenseItem::new("Pizza", 500, ""));
        assert!(CategoryService::remove(&mut doc, "🍔 Hrana"));
        assert!(doc.categories.is_empty());
        assert!(!doc.expenses.contains_key("🍔 Hrana"));
        assert!(doc
            .history
            .last()
            .unwrap()
            .ends_with("Obrisana kategorija: 🍔 Hrana"));
    }

    #[test]
    fn remove_of_unknown_category_is_a_silent_noop() {
        let mut doc = doc_with_category();
        let history_before = doc.history.len();
        assert!(!CategoryService::remove(&mut doc, "👻 Duh"));
        assert_eq!(doc.history.len(), history_before);
    }
}
