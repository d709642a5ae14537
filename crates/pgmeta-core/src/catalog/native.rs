use serde::Serialize;
use std::fmt;

/// A database type as the catalog describes it, before any mapping to a
/// target-language type.
///
/// `name` is always canonical: the SQL spellings the catalog prints
/// (`integer`, `character varying(255)`, `timestamp with time zone`) and the
/// internal spellings (`int4`, `varchar`, `timestamptz`) fold onto one name,
/// type modifiers are dropped, and arrays are spelled `elem[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NativeType {
    pub name: String,
    pub kind: NativeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum NativeKind {
    /// A base type identified by its name alone.
    Simple,

    /// An array whose elements have the boxed type.
    Array(Box<NativeType>),

    /// An enum type with its labels in declaration order.
    Enum(Vec<String>),

    /// A composite (row) type.
    Composite(Vec<NativeField>),

    /// A domain over the boxed base type.
    Domain(Box<NativeType>),

    /// A pseudo type such as `unknown` or `anyelement`. The database reports
    /// these when it cannot infer a parameter's type.
    Pseudo,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NativeField {
    pub name: String,
    pub ty: NativeType,
}

/// (spelling, canonical name)
const ALIASES: &[(&str, &str)] = &[
    ("bigint", "int8"),
    ("bigserial", "int8"),
    ("boolean", "bool"),
    ("character", "bpchar"),
    ("character varying", "varchar"),
    ("decimal", "numeric"),
    ("double precision", "float8"),
    ("int", "int4"),
    ("integer", "int4"),
    ("real", "float4"),
    ("serial", "int4"),
    ("smallint", "int2"),
    ("smallserial", "int2"),
    ("time with time zone", "timetz"),
    ("time without time zone", "time"),
    ("timestamp with time zone", "timestamptz"),
    ("timestamp without time zone", "timestamp"),
];

const PSEUDO: &[&str] = &[
    "any",
    "anyarray",
    "anycompatible",
    "anycompatiblearray",
    "anyelement",
    "anyenum",
    "anynonarray",
    "anyrange",
    "record",
    "unknown",
    "void",
];

impl NativeType {
    /// A simple type, or a pseudo type if `name` names one.
    pub fn simple(name: &str) -> NativeType {
        let name = canonical_name(name);
        let kind = if PSEUDO.contains(&name.as_str()) {
            NativeKind::Pseudo
        } else {
            NativeKind::Simple
        };
        NativeType { name, kind }
    }

    pub fn array(element: NativeType) -> NativeType {
        NativeType {
            name: format!("{}[]", element.name),
            kind: NativeKind::Array(Box::new(element)),
        }
    }

    pub fn enumeration(name: &str, labels: Vec<String>) -> NativeType {
        NativeType {
            name: canonical_name(name),
            kind: NativeKind::Enum(labels),
        }
    }

    pub fn composite(name: &str, fields: Vec<NativeField>) -> NativeType {
        NativeType {
            name: canonical_name(name),
            kind: NativeKind::Composite(fields),
        }
    }

    pub fn domain(name: &str, base: NativeType) -> NativeType {
        NativeType {
            name: canonical_name(name),
            kind: NativeKind::Domain(Box::new(base)),
        }
    }

    /// Parses a type name as written in configuration, e.g. `bigint`,
    /// `text[]`, or `_int4`.
    pub fn parse(src: &str) -> NativeType {
        let src = src.trim();
        if let Some(element) = src.strip_suffix("[]") {
            return NativeType::array(NativeType::parse(element));
        }
        // `_int4` is the catalog's own name for `int4[]`
        if let Some(element) = src.strip_prefix('_') {
            if !element.is_empty() {
                return NativeType::array(NativeType::parse(element));
            }
        }
        NativeType::simple(src)
    }

    pub fn is_pseudo(&self) -> bool {
        matches!(self.kind, NativeKind::Pseudo)
    }

    pub fn as_array(&self) -> Option<&NativeType> {
        match &self.kind {
            NativeKind::Array(element) => Some(element),
            _ => None,
        }
    }

    /// True for `timestamp` and `timestamptz`, looking through domains.
    pub fn is_timestamp(&self) -> bool {
        match &self.kind {
            NativeKind::Domain(base) => base.is_timestamp(),
            _ => self.name == "timestamp" || self.name == "timestamptz",
        }
    }

    /// True for `json` and `jsonb`, looking through domains.
    pub fn is_json(&self) -> bool {
        match &self.kind {
            NativeKind::Domain(base) => base.is_json(),
            _ => self.name == "json" || self.name == "jsonb",
        }
    }

    /// True for `timestamptz`, looking through domains.
    pub fn has_timezone(&self) -> bool {
        match &self.kind {
            NativeKind::Domain(base) => base.has_timezone(),
            _ => self.name == "timestamptz",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Folds a type spelling onto its canonical name.
pub(crate) fn canonical_name(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut depth = 0;
    let mut has_modifier = false;

    for c in src.trim().chars() {
        match c {
            '(' => {
                depth += 1;
                has_modifier = true;
            }
            ')' => depth -= 1,
            '"' => {}
            _ if depth > 0 => {}
            c => out.extend(c.to_lowercase()),
        }
    }

    // Collapse the whitespace left behind by stripped type modifiers:
    // `timestamp(3) with time zone`
    let out = out.split_whitespace().collect::<Vec<_>>().join(" ");
    let out = out.strip_prefix("public.").unwrap_or(&out);
    let out = out.strip_prefix("pg_catalog.").unwrap_or(out);

    // Bare `char` (printed `"char"`) is the internal one-byte type;
    // `char(n)` is the blank-padded `character(n)`.
    if out == "char" && has_modifier {
        return "bpchar".to_string();
    }

    ALIASES
        .iter()
        .find(|(alias, _)| *alias == out)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| out.to_string())
}
