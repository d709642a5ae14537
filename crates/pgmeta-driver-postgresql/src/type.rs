use pgmeta_core::catalog::{NativeField, NativeKind, NativeType};
use postgres::types::{Kind, Type};

/// Converts a type reported by the server into a [`NativeType`], keeping
/// enum labels, composite fields, domain bases, and array elements.
pub(crate) fn native_type(ty: &Type) -> NativeType {
    match ty.kind() {
        Kind::Array(element) => NativeType::array(native_type(element)),
        Kind::Enum(labels) => NativeType::enumeration(ty.name(), labels.clone()),
        Kind::Composite(fields) => NativeType::composite(
            ty.name(),
            fields
                .iter()
                .map(|field| NativeField {
                    name: field.name().to_string(),
                    ty: native_type(field.type_()),
                })
                .collect(),
        ),
        Kind::Domain(base) => NativeType::domain(ty.name(), native_type(base)),
        Kind::Pseudo => NativeType {
            kind: NativeKind::Pseudo,
            ..NativeType::simple(ty.name())
        },
        _ => NativeType::simple(ty.name()),
    }
}

/// The built-in server type for a canonical native name, used to pass
/// describe hints without a catalog lookup.
pub(crate) fn builtin_type(native: &NativeType) -> Option<Type> {
    if let Some(element) = native.as_array() {
        return builtin_array_type(&element.name);
    }

    Some(match native.name.as_str() {
        "bool" => Type::BOOL,
        "int2" => Type::INT2,
        "int4" => Type::INT4,
        "int8" => Type::INT8,
        "float4" => Type::FLOAT4,
        "float8" => Type::FLOAT8,
        "numeric" => Type::NUMERIC,
        "oid" => Type::OID,
        "char" => Type::CHAR,
        "text" => Type::TEXT,
        "varchar" => Type::VARCHAR,
        "bpchar" => Type::BPCHAR,
        "name" => Type::NAME,
        "bytea" => Type::BYTEA,
        "uuid" => Type::UUID,
        "json" => Type::JSON,
        "jsonb" => Type::JSONB,
        "date" => Type::DATE,
        "time" => Type::TIME,
        "timestamp" => Type::TIMESTAMP,
        "timestamptz" => Type::TIMESTAMPTZ,
        "inet" => Type::INET,
        _ => return None,
    })
}

fn builtin_array_type(element: &str) -> Option<Type> {
    Some(match element {
        "bool" => Type::BOOL_ARRAY,
        "int2" => Type::INT2_ARRAY,
        "int4" => Type::INT4_ARRAY,
        "int8" => Type::INT8_ARRAY,
        "float4" => Type::FLOAT4_ARRAY,
        "float8" => Type::FLOAT8_ARRAY,
        "numeric" => Type::NUMERIC_ARRAY,
        "text" => Type::TEXT_ARRAY,
        "varchar" => Type::VARCHAR_ARRAY,
        "bytea" => Type::BYTEA_ARRAY,
        "uuid" => Type::UUID_ARRAY,
        "jsonb" => Type::JSONB_ARRAY,
        "date" => Type::DATE_ARRAY,
        "timestamp" => Type::TIMESTAMP_ARRAY,
        "timestamptz" => Type::TIMESTAMPTZ_ARRAY,
        _ => return None,
    })
}

/// A hint the server treats as "infer this parameter".
pub(crate) fn unspecified() -> Type {
    Type::new("unspecified".into(), 0, Kind::Simple, "pg_catalog".into())
}
