//! Category display formatting

use crate::models::UNCATEGORIZED;

/// Format the registry as a numbered list
pub fn format_category_list(labels: &[String]) -> String {
    let mut output = String::from("Categories:\n");
    for (idx, label) in labels.iter().enumerate() {
        let marker = if label == UNCATEGORIZED { " (default)" } else { "" };
        output.push_str(&format!("  {:>2}. {}{}\n", idx + 1, label, marker));
    }
    output
}
