use super::TypeDescriptor;
use serde::Serialize;
use std::fmt::Write;

/// A named type the emitted code must declare exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decl", rename_all = "snake_case")]
pub enum TypeDecl {
    /// A native enum type.
    Enum(EnumDecl),

    /// A native composite type.
    Composite(RowDecl),

    /// A row-accessor type for a table or a query result.
    Row(RowDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDecl {
    pub name: String,

    /// Native enum type name.
    pub native: String,

    pub variants: Vec<EnumVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumVariant {
    pub ident: String,
    pub label: String,
}

/// A struct with one field per column, decoded from a row cursor.
///
/// Field order is the decode order fixed at resolution time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDecl {
    pub name: String,
    pub fields: Vec<RowField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowField {
    /// Native column name.
    pub column: String,

    /// Field identifier.
    pub ident: String,

    pub ty: TypeDescriptor,
    pub nullable: bool,
}

impl TypeDecl {
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Enum(decl) => &decl.name,
            TypeDecl::Composite(decl) | TypeDecl::Row(decl) => &decl.name,
        }
    }

    /// A compact rendering of the declaration's shape. Two registrations
    /// under one name are compatible exactly when their signatures match.
    pub fn signature(&self) -> String {
        let mut sig = String::new();
        match self {
            TypeDecl::Enum(decl) => {
                let _ = write!(sig, "enum {}", decl.native);
                for variant in &decl.variants {
                    let _ = write!(sig, "\n{} = {:?}", variant.ident, variant.label);
                }
            }
            TypeDecl::Composite(decl) | TypeDecl::Row(decl) => {
                sig.push_str(if matches!(self, TypeDecl::Row(_)) {
                    "row"
                } else {
                    "composite"
                });
                for field in &decl.fields {
                    let _ = write!(
                        sig,
                        "\n{} {}",
                        field.ident,
                        field.ty.name_for(field.nullable)
                    );
                }
            }
        }
        sig
    }

    pub fn as_row(&self) -> Option<&RowDecl> {
        match self {
            TypeDecl::Row(decl) => Some(decl),
            _ => None,
        }
    }
}

impl RowDecl {
    /// Decode position of `column`. Row decoding looks positions up by
    /// name so a catalog that reorders columns after resolution does not
    /// misassign values.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.column == column)
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.fields.iter().map(|field| field.column.as_str())
    }
}
