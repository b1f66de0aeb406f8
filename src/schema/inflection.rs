//! English inflection for relationship field names.
//!
//! Table names are usually snake_case, so only the last segment is inflected:
//! `order_item` → `order_items`, `sales_person` → `sales_people`.
//! Irregular forms common in schemas are checked before falling back to the
//! `inflector` crate.

use inflector::Inflector;

/// Irregular plurals that inflector gets wrong or that appear often in schemas.
static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("shelf", "shelves"),
    ("potato", "potatoes"),
    ("hero", "heroes"),
    ("analysis", "analyses"),
    ("basis", "bases"),
    ("crisis", "crises"),
    ("thesis", "theses"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("medium", "media"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
];

/// Words with the same singular and plural form.
static UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "metadata",
    "money",
    "news",
    "series",
    "sheep",
    "species",
    "staff",
];

/// Split `prefix_last` into (`prefix_`, `last`).
fn split_last_segment(name: &str) -> (&str, &str) {
    match name.rfind('_') {
        Some(idx) if idx + 1 < name.len() => name.split_at(idx + 1),
        _ => ("", name),
    }
}

fn pluralize_word(word: &str) -> String {
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *singular || lower == *plural {
            return plural.to_string();
        }
    }

    word.to_plural()
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *plural || lower == *singular {
            return singular.to_string();
        }
    }

    word.to_singular()
}

/// Pluralize the last snake_case segment of a name.
pub fn pluralize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let (prefix, last) = split_last_segment(name);
    format!("{}{}", prefix, pluralize_word(last))
}

/// Singularize the last snake_case segment of a name.
pub fn singularize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let (prefix, last) = split_last_segment(name);
    format!("{}{}", prefix, singularize_word(last))
}
