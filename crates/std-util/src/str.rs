//! Identifier case conversion for names derived from catalog objects.

use heck::{ToSnakeCase, ToUpperCamelCase};

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

pub fn upper_camel_case(src: &str) -> String {
    src.to_upper_camel_case()
}

/// Singular form of the last `_`-separated word, `order_items` -> `order_item`.
pub fn singularize(src: &str) -> String {
    map_last_word(src, |word| pluralizer::pluralize(word, 1, false))
}

/// Plural form of the last `_`-separated word, `order_item` -> `order_items`.
pub fn pluralize(src: &str) -> String {
    map_last_word(src, |word| pluralizer::pluralize(word, 2, false))
}

fn map_last_word(src: &str, f: impl FnOnce(&str) -> String) -> String {
    match src.rsplit_once('_') {
        Some((head, last)) => format!("{head}_{}", f(last)),
        None => f(src),
    }
}
