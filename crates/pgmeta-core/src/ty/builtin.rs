use super::{Hook, TypeDescriptor};

/// (canonical native name, target type)
const PLAIN: &[(&str, &str)] = &[
    ("bool", "bool"),
    ("int2", "i16"),
    ("int4", "i32"),
    ("int8", "i64"),
    ("float4", "f32"),
    ("float8", "f64"),
    ("oid", "u32"),
    ("char", "i8"),
    ("text", "String"),
    ("varchar", "String"),
    ("bpchar", "String"),
    ("name", "String"),
    ("citext", "String"),
    ("bytea", "Vec<u8>"),
    ("uuid", "uuid::Uuid"),
    ("json", "serde_json::Value"),
    ("jsonb", "serde_json::Value"),
    ("numeric", "rust_decimal::Decimal"),
    ("date", "chrono::NaiveDate"),
    ("time", "chrono::NaiveTime"),
    ("inet", "std::net::IpAddr"),
];

/// Timestamps are decoded through `postgres_types::Timestamp` so the
/// infinite values the database can hold surface as errors instead of
/// failed decodes.
const TIMESTAMPS: &[(&str, &str)] = &[
    ("timestamp", "chrono::NaiveDateTime"),
    ("timestamptz", "chrono::DateTime<chrono::Utc>"),
];

/// The built-in mapping for a canonical native type name, if there is one.
/// Arrays are handled by the registry in terms of their element type.
pub(super) fn lookup(key: &str) -> Option<TypeDescriptor> {
    if let Some((_, name)) = PLAIN.iter().find(|(native, _)| *native == key) {
        return Some(TypeDescriptor::plain(key, *name));
    }

    let (_, name) = TIMESTAMPS.iter().find(|(native, _)| *native == key)?;
    Some(TypeDescriptor::plain(key, *name).through_wire(
        format!("postgres_types::Timestamp<{name}>"),
        Hook::new("pgmeta_core::runtime::finite({expr})?"),
        Hook::new("{expr}.map(pgmeta_core::runtime::finite).transpose()?"),
    ))
}

/// Array of `element`, with nullable elements.
pub(super) fn array(key: &str, element: &TypeDescriptor) -> TypeDescriptor {
    let name = format!("Vec<{}>", element.null_name);
    let ty = TypeDescriptor::plain(key, name);
    match &element.decl {
        Some(decl) => ty.with_decl(decl.clone()),
        None => ty,
    }
}
