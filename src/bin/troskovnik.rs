//! Terminal client for the budget document. Destructive operations go
//! through confirmation prompts; everything else maps one menu action to one
//! mutation and its persistence round-trip.

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use troskovnik::{
    chart,
    document::ExpenseItem,
    errors::BudgetError,
    storage::TextStore,
    tracker::BudgetTracker,
};

fn main() {
    troskovnik::init();
    if let Err(err) = run() {
        eprintln!("{} {}", "Greška:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), BudgetError> {
    let mut tracker = BudgetTracker::open(Box::new(TextStore::new_default()))?;

    loop {
        print_overview(&tracker);
        let actions = [
            "Dodaj stavku",
            "Izmeni stavku",
            "Obriši stavku",
            "Dodaj kategoriju",
            "Preimenuj kategoriju",
            "Obriši kategoriju",
            "Promeni platu",
            "Istorija",
            "Izlaz",
        ];
        let choice = select_with_default("Troškovnik", &actions, 0)?;
        match choice {
            0 => add_item(&mut tracker)?,
            1 => edit_item(&mut tracker)?,
            2 => delete_item(&mut tracker)?,
            3 => add_category(&mut tracker)?,
            4 => rename_category(&mut tracker)?,
            5 => delete_category(&mut tracker)?,
            6 => change_salary(&mut tracker)?,
            7 => print_history(&tracker),
            _ => return Ok(()),
        }
    }
}

fn print_overview(tracker: &BudgetTracker) {
    let doc = tracker.document();
    println!("\n{}", "=== Troškovnik ===".bold());
    println!("Plata: {}", chart::format_currency(doc.salary).green());
    for category in &doc.categories {
        let total = doc.category_total(category);
        println!(
            "  {}  {}",
            category.composite_key(),
            chart::format_currency(total).yellow()
        );
        for item in doc.display_items(category) {
            let note = if item.note.is_empty() {
                String::new()
            } else {
                format!("  ({})", item.note)
            };
            println!(
                "      {} {}{}",
                item.name,
                chart::format_currency(item.amount),
                note.dimmed()
            );
        }
    }
    println!(
        "Ukupno: {}   Ostaje: {}",
        chart::format_currency(doc.total_expenses()).yellow(),
        chart::format_currency(doc.remaining()).cyan()
    );
}

fn print_history(tracker: &BudgetTracker) {
    println!("\n{}", "=== Istorija ===".bold());
    for entry in &tracker.document().history {
        println!("  {}", entry);
    }
}

fn add_item(tracker: &mut BudgetTracker) -> Result<(), BudgetError> {
    let Some(key) = select_category(tracker)? else {
        return Ok(());
    };
    let name: String = input("Naziv")?;
    let amount: i64 = input("Iznos (RSD)")?;
    let note: String = input_allow_empty("Napomena")?;
    tracker.add_item(&key, ExpenseItem::new(name, amount, note))?;
    Ok(())
}

fn edit_item(tracker: &mut BudgetTracker) -> Result<(), BudgetError> {
    let Some(key) = select_category(tracker)? else {
        return Ok(());
    };
    let Some(original) = select_item(tracker, &key)? else {
        return Ok(());
    };
    let name: String = input_with_default("Naziv", &original.name)?;
    let amount: i64 = input_with_default("Iznos (RSD)", &original.amount.to_string())?;
    let note: String = input_allow_empty_with_default("Napomena", &original.note)?;

    let keys = category_keys(tracker);
    let current = keys.iter().position(|k| *k == key).unwrap_or(0);
    let target_index = select_with_default("Kategorija", &keys, current)?;
    let target = keys[target_index].clone();
    let target_key = if target == key { None } else { Some(target.as_str()) };

    tracker.edit_item(&key, &original, ExpenseItem::new(name, amount, note), target_key)?;
    Ok(())
}

fn delete_item(tracker: &mut BudgetTracker) -> Result<(), BudgetError> {
    let Some(key) = select_category(tracker)? else {
        return Ok(());
    };
    let Some(item) = select_item(tracker, &key)? else {
        return Ok(());
    };
    let prompt = format!("Da li ste sigurni da želite da obrišete \"{}\"?", item.name);
    if confirm(&prompt)? {
        tracker.remove_item(&key, &item)?;
    }
    Ok(())
}

fn add_category(tracker: &mut BudgetTracker) -> Result<(), BudgetError> {
    let emoji: String = input("Emoji")?;
    let name: String = input("Naziv")?;
    tracker.add_category(&emoji, &name)?;
    Ok(())
}

fn rename_category(tracker: &mut BudgetTracker) -> Result<(), BudgetError> {
    let Some(key) = select_category(tracker)? else {
        return Ok(());
    };
    let emoji: String = input("Novi emoji")?;
    let name: String = input("Novi naziv")?;
    tracker.rename_category(&key, &emoji, &name)?;
    Ok(())
}

fn delete_category(tracker: &mut BudgetTracker) -> Result<(), BudgetError> {
    let Some(key) = select_category(tracker)? else {
        return Ok(());
    };
    let item_count = tracker.document().items(&key).len();
    let prompt = if item_count > 0 {
        format!(
            "Kategorija \"{}\" ima {} stavki. Da li ste sigurni?",
            key, item_count
        )
    } else {
        format!(
            "Da li ste sigurni da želite da obrišete kategoriju \"{}\"?",
            key
        )
    };
    if confirm(&prompt)? {
        tracker.remove_category(&key)?;
    }
    Ok(())
}

fn change_salary(tracker: &mut BudgetTracker) -> Result<(), BudgetError> {
    let salary: i64 = input_with_default("Plata (RSD)", &tracker.document().salary.to_string())?;
    tracker.set_salary(salary)
}

fn category_keys(tracker: &BudgetTracker) -> Vec<String> {
    tracker
        .document()
        .categories
        .iter()
        .map(|cat| cat.composite_key())
        .collect()
}

fn select_category(tracker: &BudgetTracker) -> Result<Option<String>, BudgetError> {
    let keys = category_keys(tracker);
    if keys.is_empty() {
        println!("{}", "Nema kategorija.".dimmed());
        return Ok(None);
    }
    let index = select_with_default("Kategorija", &keys, 0)?;
    Ok(Some(keys[index].clone()))
}

fn select_item(tracker: &BudgetTracker, key: &str) -> Result<Option<ExpenseItem>, BudgetError> {
    let category = match tracker.document().category(key) {
        Some(category) => category.clone(),
        None => return Ok(None),
    };
    let items = tracker.document().display_items(&category);
    if items.is_empty() {
        println!("{}", "Nema stavki.".dimmed());
        return Ok(None);
    }
    let labels: Vec<String> = items
        .iter()
        .map(|item| format!("{} | {}", item.name, chart::format_currency(item.amount)))
        .collect();
    let index = select_with_default("Stavka", &labels, 0)?;
    Ok(Some(items[index].clone()))
}

fn select_with_default<T: ToString>(
    prompt: &str,
    items: &[T],
    default: usize,
) -> Result<usize, BudgetError> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(prompt_error)
}

fn confirm(prompt: &str) -> Result<bool, BudgetError> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(prompt_error)
}

fn input<T>(prompt: &str) -> Result<T, BudgetError>
where
    T: std::str::FromStr + Clone + std::fmt::Display,
    T::Err: std::fmt::Display + std::fmt::Debug,
{
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()
        .map_err(prompt_error)
}

fn input_with_default<T>(prompt: &str, default: &str) -> Result<T, BudgetError>
where
    T: std::str::FromStr + Clone + std::fmt::Display,
    T::Err: std::fmt::Display + std::fmt::Debug,
{
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(default)
        .interact_text()
        .map_err(prompt_error)
}

fn input_allow_empty(prompt: &str) -> Result<String, BudgetError> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

fn input_allow_empty_with_default(prompt: &str, default: &str) -> Result<String, BudgetError> {
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(default)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

fn prompt_error(err: dialoguer::Error) -> BudgetError {
    BudgetError::Storage(err.to_string())
}
