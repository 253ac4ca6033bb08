//! `{{key}}` placeholder substitution and name casing

use std::collections::BTreeMap;

use super::error::ScaffoldError;

/// Replace every `{{key}}` in `text` with its value.
///
/// Whitespace inside the braces is ignored. An unterminated `{{` is kept
/// as literal text. `template` only names the source in errors.
pub fn render(template: &str, text: &str, values: &BTreeMap<String, String>) -> Result<String, ScaffoldError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            break;
        };
        let key = after_open[..end].trim();
        let value = values.get(key).ok_or_else(|| ScaffoldError::MissingParam {
            template: template.to_string(),
            key: key.to_string(),
        })?;
        out.push_str(&rest[..start]);
        out.push_str(value);
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Split a name into words on separators and lower-to-upper case changes
pub fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in name.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_numeric();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `user profile` → `UserProfile`
pub fn pascal_case(name: &str) -> String {
    words(name)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// `UserProfile` → `user_profile`
pub fn snake_case(name: &str) -> String {
    words(name)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
