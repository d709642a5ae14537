use std_util::str;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try",
    "type", "unsafe", "use", "where", "while", "yield",
];

/// Field identifier for a native column or argument name, escaping
/// keywords as raw identifiers.
pub fn field_ident(native: &str) -> String {
    let mut ident = str::snake_case(native);

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if KEYWORDS.contains(&ident.as_str()) {
        // `self`, `super`, and `crate` cannot be raw identifiers
        if matches!(ident.as_str(), "self" | "super" | "crate") {
            ident.push('_');
        } else {
            ident.insert_str(0, "r#");
        }
    }

    ident
}

/// Variant identifier for an enum label.
pub fn variant_ident(label: &str) -> String {
    let ident = str::upper_camel_case(label);
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("V{ident}")
    } else {
        ident
    }
}
