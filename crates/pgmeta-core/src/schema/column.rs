use crate::ty::TypeDescriptor;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// Field identifier in the row-accessor type.
    pub ident: String,

    /// 1-based position in the catalog at resolution time.
    pub ordinal: usize,

    /// Canonical native type name.
    pub native: String,

    pub ty: TypeDescriptor,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// May appear in an update.
    pub mutable: bool,

    /// Has a catalog-declared default expression.
    pub has_default: bool,

    /// True if the column is the table's primary key
    pub primary_key: bool,

    /// Carries a single-column uniqueness constraint.
    pub unique: bool,

    /// The column this one references through a foreign key.
    pub references: Option<ColumnRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl Column {
    /// Target type name, honoring nullability.
    pub fn type_name(&self) -> &str {
        self.ty.name_for(self.nullable)
    }
}
