//! Naming conventions for generated code
//!
//! Converts the free-form name a user types (`"Blog Post"`, `"userProfile"`,
//! `"order-item"`) into the canonical forms the generated FastAPI code needs:
//! a Python identifier, a class name, a URL-friendly kebab form and a plural.

use inflector::Inflector;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ScaffoldError};

/// Prefix applied when an identifier would otherwise start with a digit
pub const IDENTIFIER_PREFIX: &str = "app_";

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("static regex"));

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("child", "children"),
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
];

/// Canonical forms of a user-supplied name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameForms {
    /// `snake_case` Python identifier, e.g. `blog_post`
    pub identifier: String,
    /// Plural of the identifier, e.g. `blog_posts`
    pub plural_identifier: String,
    /// `PascalCase` class name, e.g. `BlogPost`
    pub class_identifier: String,
    /// kebab-case form, e.g. `blog-post`
    pub kebab_identifier: String,
    /// The input exactly as given
    pub display_name: String,
}

impl NameForms {
    /// Human-readable title, e.g. `Blog Post`
    #[must_use]
    pub fn title(&self) -> String {
        title_case(&self.identifier)
    }
}

/// Normalize a raw name into all of its canonical forms
///
/// # Errors
///
/// Returns [`ScaffoldError::InvalidName`] when the name is empty or contains
/// no ASCII letter or digit.
///
/// # Examples
///
/// ```
/// use fastforge::naming::normalize;
///
/// let forms = normalize("Blog Post").unwrap();
/// assert_eq!(forms.identifier, "blog_post");
/// assert_eq!(forms.class_identifier, "BlogPost");
/// assert_eq!(forms.kebab_identifier, "blog-post");
/// assert_eq!(forms.plural_identifier, "blog_posts");
/// ```
pub fn normalize(raw: &str) -> Result<NameForms> {
    let mut identifier = to_snake_case(raw);
    if identifier.is_empty() {
        return Err(ScaffoldError::InvalidName(raw.to_string()));
    }

    if identifier
        .chars()
        .next()
        .is_some_and(|c| !c.is_ascii_alphabetic() && c != '_')
    {
        identifier = format!("{IDENTIFIER_PREFIX}{identifier}");
    }

    Ok(NameForms {
        plural_identifier: pluralize(&identifier),
        class_identifier: to_pascal_case(&identifier),
        kebab_identifier: identifier.replace('_', "-"),
        display_name: raw.to_string(),
        identifier,
    })
}

/// Convert text to `snake_case`
///
/// Non-alphanumeric runs become word boundaries, and a boundary is inserted
/// before an uppercase letter that follows a lowercase letter or digit.
/// Consecutive capitals stay in one word: `HTTPServer` becomes `httpserver`.
#[must_use]
pub fn to_snake_case(text: &str) -> String {
    let spaced = NON_ALPHANUMERIC.replace_all(text, " ");
    let split = CAMEL_BOUNDARY.replace_all(&spaced, "$1 $2");
    split
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert `snake_case` to `PascalCase`
#[must_use]
pub fn to_pascal_case(identifier: &str) -> String {
    identifier
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect()
}

/// Human-readable title of an identifier (`user_profile` becomes `User Profile`)
#[must_use]
pub fn title_case(identifier: &str) -> String {
    identifier.to_title_case()
}

/// Escape text for a double-quoted Python string literal
///
/// The result is also a valid TOML basic string and a quoted `.env` value.
///
/// # Examples
///
/// ```
/// use fastforge::naming::escape_string_literal;
///
/// assert_eq!(escape_string_literal(r#"Post" name"#), r#"Post\" name"#);
/// assert_eq!(escape_string_literal("a\\b"), r"a\\b");
/// ```
#[must_use]
pub fn escape_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str(r#"\""#),
            '\n' => out.push_str(r"\n"),
            '\r' => out.push_str(r"\r"),
            '\t' => out.push_str(r"\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}

/// Pluralize an English word
///
/// Rules in priority order: irregular table, sibilant endings take `es`,
/// consonant + `y` becomes `ies`, otherwise append `s`.
///
/// # Examples
///
/// ```
/// use fastforge::naming::pluralize;
///
/// assert_eq!(pluralize("user"), "users");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("box"), "boxes");
/// assert_eq!(pluralize("child"), "children");
/// ```
#[must_use]
pub fn pluralize(word: &str) -> String {
    let lower = word.to_lowercase();

    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(single, _)| *single == lower) {
        return (*plural).to_string();
    }

    if lower.ends_with(['s', 'x', 'z']) || lower.ends_with("sh") || lower.ends_with("ch") {
        return format!("{word}es");
    }

    if let Some(stem) = word.strip_suffix('y') {
        let preceded_by_consonant = stem
            .chars()
            .next_back()
            .is_some_and(|c| !"aeiou".contains(c));
        if preceded_by_consonant {
            return format!("{stem}ies");
        }
    }

    format!("{word}s")
}

/// Singularize an English word
///
/// Heuristic inverse of [`pluralize`]; it does not round-trip every input
/// (`bus` pluralizes to `buses` but `buses` singularizes to `buse`).
///
/// # Examples
///
/// ```
/// use fastforge::naming::singularize;
///
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("boxes"), "box");
/// assert_eq!(singularize("people"), "person");
/// ```
#[must_use]
pub fn singularize(word: &str) -> String {
    let lower = word.to_lowercase();

    if let Some((single, _)) = IRREGULAR_PLURALS.iter().find(|(_, plural)| *plural == lower) {
        return (*single).to_string();
    }

    if word.len() > 3 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }

    if word.len() > 2 && word.ends_with("es") {
        let sibilant = ["sses", "shes", "ches", "xes", "zes"]
            .iter()
            .any(|suffix| word.ends_with(suffix));
        return if sibilant {
            word[..word.len() - 2].to_string()
        } else {
            word[..word.len() - 1].to_string()
        };
    }

    if word.len() > 1 {
        if let Some(stem) = word.strip_suffix('s') {
            return stem.to_string();
        }
    }

    word.to_string()
}
