//! Text codec for the persisted budget document.
//!
//! The format is line-oriented: `## ` opens a top-level section, `### ` opens
//! a per-category scope inside the expenses section, and `- ` lines carry the
//! payload. Decoding is tolerant by contract: malformed numbers coerce to 0,
//! unknown sections and stray lines are dropped, and no input ever fails.
//! Encoding is deterministic, so the document round-trips byte-for-byte once
//! it has passed through this codec.

use crate::document::{BudgetDocument, Category, ExpenseItem, Theme};

const TITLE_LINE: &str = "# Troškovnik";
const SECTION_SETTINGS: &str = "Podešavanja";
const SECTION_CATEGORIES: &str = "Kategorije";
const SECTION_EXPENSES: &str = "Troškovi";
const SECTION_HISTORY: &str = "Istorija";
const SALARY_FIELD: &str = "Plata:";
const THEME_FIELD: &str = "Tema:";

/// Parses a raw document into the in-memory model. Never fails.
pub fn decode(text: &str) -> BudgetDocument {
    let mut doc = BudgetDocument::new();
    let mut section = String::new();
    let mut current_category = String::new();

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(rest) = line.strip_prefix("## ") {
            section = rest.trim().to_string();
            current_category.clear();
            continue;
        }

        if section == SECTION_EXPENSES {
            if let Some(rest) = line.strip_prefix("### ") {
                current_category = rest.trim().to_string();
                // The scope key registers a list only when it looks like a
                // composite key; plain item lines create it lazily anyway.
                if split_emoji_name(&current_category).is_some() {
                    doc.expenses.entry(current_category.clone()).or_default();
                }
                continue;
            }
        }

        let Some(content) = line.strip_prefix("- ") else {
            continue;
        };

        match section.as_str() {
            SECTION_SETTINGS => decode_setting(&mut doc, content),
            SECTION_CATEGORIES => {
                if let Some((emoji, name)) = split_emoji_name(content) {
                    let category = Category::new(emoji, name);
                    doc.expenses.entry(category.composite_key()).or_default();
                    doc.categories.push(category);
                }
            }
            SECTION_EXPENSES if !current_category.is_empty() => {
                if let Some(item) = decode_item(content) {
                    doc.expenses
                        .entry(current_category.clone())
                        .or_default()
                        .push(item);
                }
            }
            SECTION_HISTORY => doc.history.push(content.to_string()),
            _ => {}
        }
    }

    doc
}

/// Serializes the model back into the canonical document text.
pub fn encode(doc: &BudgetDocument) -> String {
    let mut out = String::new();
    out.push_str(TITLE_LINE);
    out.push_str("\n\n");

    out.push_str(&format!("## {}\n", SECTION_SETTINGS));
    out.push_str(&format!("- {} {}\n", SALARY_FIELD, doc.salary));
    out.push_str(&format!("- {} {}\n\n", THEME_FIELD, doc.theme.as_str()));

    out.push_str(&format!("## {}\n", SECTION_CATEGORIES));
    for category in &doc.categories {
        out.push_str(&format!("- {}\n", category.composite_key()));
    }
    out.push('\n');

    out.push_str(&format!("## {}\n", SECTION_EXPENSES));
    for category in &doc.categories {
        let key = category.composite_key();
        out.push_str(&format!("### {}\n", key));
        // Stored order, not the display sort.
        for item in doc.items(&key) {
            out.push_str(&format!(
                "- {} | {} | {}\n",
                item.name, item.amount, item.note
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!("## {}\n", SECTION_HISTORY));
    for entry in &doc.history {
        out.push_str(&format!("- {}\n", entry));
    }

    out
}

fn decode_setting(doc: &mut BudgetDocument, content: &str) {
    if content.starts_with(SALARY_FIELD) {
        doc.salary = content
            .split(':')
            .nth(1)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0);
    } else if content.starts_with(THEME_FIELD) {
        let value = content.split(':').nth(1).map(str::trim).unwrap_or("");
        doc.theme = Theme::parse(value);
    }
}

fn decode_item(content: &str) -> Option<ExpenseItem> {
    let parts: Vec<&str> = content.split('|').map(str::trim).collect();
    if parts.len() < 2 {
        return None;
    }
    Some(ExpenseItem::new(
        parts[0],
        parts[1].parse().unwrap_or(0),
        parts.get(2).copied().unwrap_or(""),
    ))
}

/// Splits `"<emoji> <name>"` on the first whitespace run. Both halves must be
/// non-empty; the name may itself contain spaces.
fn split_emoji_name(content: &str) -> Option<(&str, &str)> {
    let first_ws = content.find(char::is_whitespace)?;
    let (emoji, rest) = content.split_at(first_ws);
    let name = rest.trim_start();
    if emoji.is_empty() || name.is_empty() {
        None
    } else {
        Some((emoji, name))
    }
}
