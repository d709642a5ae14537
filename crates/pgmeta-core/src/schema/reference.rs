use serde::Serialize;

/// This table's foreign key pointing at another table's primary key.
///
/// Outgoing references are always one-to-one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingReference {
    /// Field identifier holding the referenced row.
    pub field: String,

    /// Referencing column on this table.
    pub column: String,

    /// Referenced table.
    pub points_to: String,

    /// Referenced column, the primary key of `points_to`.
    pub points_to_column: String,

    /// True when the referencing column is nullable.
    pub nullable: bool,
}

/// Another table's foreign key pointing at this table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomingReference {
    /// Field identifier holding the referencing row(s).
    pub field: String,

    /// Referencing table.
    pub points_from: String,

    /// Referencing column on `points_from`.
    pub column: String,

    /// Referenced column on this table.
    pub points_to_column: String,

    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// The referencing column is unique, so at most one row points here.
    OneToOne,
    OneToMany,
}

impl IncomingReference {
    pub fn is_one_to_one(&self) -> bool {
        self.cardinality == Cardinality::OneToOne
    }
}
