//! Chart collaborator: turns the document into a ready-to-render doughnut
//! payload. Pure data in, pure data out; the caller owns whatever chart
//! handle it renders with.

use serde::Serialize;

use crate::document::BudgetDocument;

/// Cockpit palette, assigned to slices in rotation.
const PALETTE: [&str; 10] = [
    "#4a9eff", "#ff4757", "#00d26a", "#ffa502", "#7c3aed", "#ff6b9d", "#00d4ff", "#a8e063",
    "#ff7f50", "#5352ed",
];

/// One slice per category with a positive total, labeled by composite key.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
    pub colors: Vec<String>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builds the chart payload from the document. Categories whose total is
/// zero or negative produce no slice.
pub fn prepare(doc: &BudgetDocument) -> ChartData {
    let mut labels = Vec::new();
    let mut values = Vec::new();
    let mut colors = Vec::new();

    for category in &doc.categories {
        let total = doc.category_total(category);
        if total > 0 {
            colors.push(PALETTE[labels.len() % PALETTE.len()].to_string());
            labels.push(category.composite_key());
            values.push(total);
        }
    }

    ChartData {
        labels,
        values,
        colors,
    }
}

/// Formats an integer amount in the sr-RS style: thousands grouped with a
/// dot, suffixed with the currency code.
pub fn format_currency(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{} RSD", grouped)
    } else {
        format!("{} RSD", grouped)
    }
}
