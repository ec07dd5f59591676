//! `{{NAME}}` placeholder substitution for prompt templates.

use std::collections::BTreeMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replaces every `{{NAME}}` whose name is in `vars` with its value.
///
/// The template is scanned once from left to right. Unknown placeholders are
/// left verbatim and inserted values are never scanned again, so a value
/// containing `{{NAME}}` appears literally in the output.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use pr_inbox::render::apply;
///
/// let vars = BTreeMap::from([("X".to_owned(), "a".to_owned())]);
/// assert_eq!(apply("{{X}}-{{X}}", &vars), "a-a");
/// assert_eq!(apply("{{Y}}", &vars), "{{Y}}");
/// ```
#[must_use]
pub fn apply(template: &str, vars: &BTreeMap<String, String>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut position = 0;
    // First `}}` at or after the current placeholder name.
    let mut next_close: Option<usize> = None;

    while let Some(start) = find_from(template, OPEN, position) {
        let name_start = start + OPEN.len();
        if next_close.is_none_or(|close| close < name_start) {
            next_close = find_from(template, CLOSE, name_start);
        }
        let Some(close) = next_close else {
            break;
        };

        output.push_str(template.get(position..start).unwrap_or_default());
        match template.get(name_start..close).and_then(|name| vars.get(name)) {
            Some(value) => {
                output.push_str(value);
                position = close + CLOSE.len();
            }
            None => {
                // Emit one brace and rescan, so "{{{X}}" still resolves "{{X}}".
                output.push('{');
                position = start + 1;
            }
        }
    }

    output.push_str(template.get(position..).unwrap_or_default());
    output
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .find(needle)
        .map(|offset| from + offset)
}
