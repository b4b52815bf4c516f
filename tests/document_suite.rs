use troskovnik::{
    codec::{decode, encode},
    document::{BudgetDocument, ExpenseItem},
    services::{CategoryService, ItemService},
};

/// Builds a document purely through the mutation operations, the way the
/// round-trip contract expects.
fn built_document() -> BudgetDocument {
    let mut doc = BudgetDocument::new();
    doc.salary = 90000;
    CategoryService::add(&mut doc, "🍔", "Hrana");
    CategoryService::add(&mut doc, "🚗", "Prevoz");
    ItemService::add(&mut doc, "🍔 Hrana", ExpenseItem::new("Pizza", 500, "petak"));
    ItemService::add(&mut doc, "🍔 Hrana", ExpenseItem::new("Kafa", 150, ""));
    ItemService::add(&mut doc, "🚗 Prevoz", ExpenseItem::new("Gorivo", 3000, "mesečno"));
    doc
}

#[test]
fn decode_encode_identity_for_service_built_documents() {
    let doc = built_document();
    assert_eq!(decode(&encode(&doc)), doc);
}

#[test]
fn reencoding_a_decoded_document_is_semantically_stable() {
    let messy = "junk before anything\n\n## Podešavanja\n- Plata: 1000\nnot a field\n- Tema: light\n\n## Nepoznata sekcija\n- ovo se ignoriše\n\n## Kategorije\n- 🍔 Brza hrana\n\n## Troškovi\n### 🍔 Brza hrana\n- Pizza | 500 | petak\n- Burger | nije broj |\n\n## Istorija\n- 2025-01-01 10:00 | Dodato: Pizza 500 RSD\n";
    let first = decode(messy);
    let second = decode(&encode(&first));
    assert_eq!(first, second);
}

#[test]
fn category_lifecycle_leaves_no_orphans() {
    // Add category, add item, delete category: the map entry disappears and
    // exactly three history entries record the sequence.
    let mut doc = BudgetDocument::new();
    CategoryService::add(&mut doc, "🎮", "Igre");
    ItemService::add(&mut doc, "🎮 Igre", ExpenseItem::new("Pretplata", 200, ""));
    CategoryService::remove(&mut doc, "🎮 Igre");

    assert!(doc.categories.is_empty());
    assert!(!doc.expenses.contains_key("🎮 Igre"));
    assert_eq!(doc.history.len(), 3);
    assert!(doc.history[0].ends_with("Dodata kategorija: 🎮 Igre"));
    assert!(doc.history[1].ends_with("Dodato: Pretplata 200 RSD"));
    assert!(doc.history[2].ends_with("Obrisana kategorija: 🎮 Igre"));
}

#[test]
fn amount_edit_logs_transition_and_shrinks_total() {
    let mut doc = built_document();
    let category = doc.categories[0].clone();
    let before = doc.category_total(&category);
    let original = ExpenseItem::new("Pizza", 500, "petak");
    ItemService::edit(
        &mut doc,
        "🍔 Hrana",
        &original,
        ExpenseItem::new("Pizza", 300, "petak"),
        None,
    );
    assert_eq!(before - doc.category_total(&category), 200);
    assert!(doc
        .history
        .last()
        .unwrap()
        .ends_with("Izmenjeno: Pizza 500 -> 300 RSD"));
}

#[test]
fn rename_onto_existing_key_replaces_that_list() {
    // Risky but intended under the current design: the colliding category's
    // list is dropped, not merged.
    let mut doc = built_document();
    CategoryService::rename(&mut doc, "🍔 Hrana", "🚗", "Prevoz");
    let names: Vec<&str> = doc
        .items("🚗 Prevoz")
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, vec!["Pizza", "Kafa"]);
    // Both categories now collapse to the same composite key.
    assert_eq!(doc.categories.len(), 2);
    assert_eq!(doc.categories[0].composite_key(), "🚗 Prevoz");
    assert_eq!(doc.categories[1].composite_key(), "🚗 Prevoz");
}

#[test]
fn history_survives_round_trips_verbatim() {
    let mut doc = built_document();
    ItemService::remove(&mut doc, "🍔 Hrana", &ExpenseItem::new("Kafa", 150, ""));
    let restored = decode(&encode(&doc));
    assert_eq!(restored.history, doc.history);
    assert!(restored
        .history
        .last()
        .unwrap()
        .ends_with("Obrisano: Kafa 150 RSD"));
}

#[test]
fn moved_item_lands_at_end_of_target_list() {
    let mut doc = built_document();
    let original = ExpenseItem::new("Pizza", 500, "petak");
    ItemService::edit(
        &mut doc,
        "🍔 Hrana",
        &original,
        original.clone(),
        Some("🚗 Prevoz"),
    );
    let names: Vec<&str> = doc
        .items("🚗 Prevoz")
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, vec!["Gorivo", "Pizza"]);
    assert_eq!(decode(&encode(&doc)), doc);
}
