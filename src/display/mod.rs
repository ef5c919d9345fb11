//! Text rendering for terminal output
//!
//! Pure formatting helpers; nothing here touches the domain state or the
//! console directly, which keeps the output testable as plain strings.

use crate::models::Notice;
use crate::services::Report;

/// Format the wallet name listing, e.g. `Your wallets: Main Savings`
pub fn format_wallet_list(names: &[String]) -> String {
    if names.is_empty() {
        return "You have no wallets yet.".to_string();
    }
    format!("Your wallets: {}", names.join(" "))
}

/// Format a category name listing for report selection prompts
pub fn format_category_names(heading: &str, names: &[String]) -> String {
    if names.is_empty() {
        return format!("{} (none)", heading);
    }
    format!("{} {}", heading, names.join(" "))
}

/// Format a report block: heading, one line per category, not-found lines
/// for unmatched filter names, and a total.
pub fn format_report(heading: &str, report: &Report, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(heading);
    output.push('\n');

    for entry in &report.entries {
        match entry.remaining {
            Some(remaining) => output.push_str(&format!(
                "  {}: {}, remaining budget: {}\n",
                entry.name,
                entry.amount.format_with_symbol(symbol),
                remaining.format_with_symbol(symbol)
            )),
            None => output.push_str(&format!(
                "  {}: {}\n",
                entry.name,
                entry.amount.format_with_symbol(symbol)
            )),
        }
    }

    for name in &report.missing {
        output.push_str(&format!("  Category {} not found!\n", name));
    }

    output.push_str(&format!("Total: {}", report.total.format_with_symbol(symbol)));
    output
}

/// Format advisory notices, one per line
pub fn format_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
