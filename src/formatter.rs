//! Best-effort cleanup of raw ingredient and direction text.
//!
//! The dataset stores ingredients as stringified lists (`"['1 c. sugar', '2 eggs']"`)
//! and directions as prose. Neither is parsed properly: these are plain string
//! transforms with known blind spots (escaped commas, nested lists, abbreviations and
//! decimals inside sentences). Values that are not strings pass through unchanged.

use crate::corpus::RawField;

/// Render a stringified list as a bulleted list.
///
/// ```
/// use awful_recipes::corpus::RawField;
/// use awful_recipes::formatter::format_list;
///
/// let raw = RawField::from("['Salt', 'Pepper']");
/// assert_eq!(format_list(&raw).to_string(), "- Salt\n- Pepper");
/// ```
pub fn format_list(raw: &RawField) -> RawField {
    let Some(text) = raw.as_text() else {
        return raw.clone();
    };

    // One bracket each side: "[['a', 'b']]" keeps its inner brackets.
    let text = text.strip_prefix('[').unwrap_or(text);
    let text = text.strip_suffix(']').unwrap_or(text);
    let cleaned = text.replace(['"', '\''], "");

    let items: Vec<String> = cleaned
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| format!("- {item}"))
        .collect();

    RawField::Text(items.join("\n"))
}

/// Render period-delimited prose as a numbered list.
///
/// Splits on the literal `". "`, so "approx. 2 cups" or "3. 5 minutes" are split too.
/// Each fragment loses one trailing period so the last step reads like the others.
pub fn format_steps(raw: &RawField) -> RawField {
    let Some(text) = raw.as_text() else {
        return raw.clone();
    };

    let steps: Vec<String> = text
        .split(". ")
        .map(|fragment| {
            let fragment = fragment.trim();
            fragment.strip_suffix('.').unwrap_or(fragment).trim_end()
        })
        .filter(|fragment| !fragment.is_empty())
        .enumerate()
        .map(|(position, step)| format!("{}. {step}", position + 1))
        .collect();

    RawField::Text(steps.join("\n"))
}
