//! Identifier normalization for application and module names.
//!
//! The project name arrives as free text (a directory name or a CLI
//! argument) and must become a camel-case identifier usable as an AngularJS
//! module name.
//!
//! | Input            | `app_identifier` |
//! |------------------|------------------|
//! | "My Cool App!"   | "myCoolApp"      |
//! | "my-app"         | "myApp"          |
//! | "MyApp"          | "myApp"          |
//! | "HTTPServer"     | "httpServer"     |

use crate::domain::error::DomainError;

/// Normalize free text into a camel-case application identifier.
pub fn app_identifier(raw: &str) -> Result<String, DomainError> {
    let words = split_words(raw);
    if words.is_empty() {
        return Err(DomainError::InvalidProjectName {
            name: raw.to_string(),
            reason: "name contains no letters or digits".into(),
        });
    }

    let mut out = String::with_capacity(raw.len());
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    Ok(out)
}

/// Convert a module suffix into PascalCase (`"app"` -> `"App"`).
///
/// An empty suffix stays empty, which disables suffixing.
pub fn classify(suffix: &str) -> String {
    split_words(suffix).iter().map(|w| capitalize(w)).collect()
}

/// Script module name: identifier plus classified suffix.
pub fn script_app_name(app_name: &str, suffix: &str) -> String {
    format!("{}{}", app_name, classify(suffix))
}

/// Convert to kebab-case, used for package names.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lowercase words.
///
/// Any character that is not alphanumeric separates words. Within a run of
/// alphanumerics, a lower-to-upper transition (`myApp`) and an acronym
/// boundary (`HTTPServer`) also split.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
