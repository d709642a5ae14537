use super::{Column, IncludeSpec, IncomingReference, OutgoingReference};
use crate::ty::{RowDecl, RowField, TypeDescriptor};

use serde::Serialize;

/// A table resolved against the catalog and its configuration.
///
/// Built once per resolution run and not modified after relationships are
/// attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableModel {
    /// Native table name.
    pub name: String,

    /// Name of the row-accessor type.
    pub type_name: String,

    /// Columns in canonical order. Field-mask bits and row decoding both
    /// follow this order.
    pub columns: Vec<Column>,

    /// Index of the primary key in `columns`.
    pub primary_key: usize,

    pub created_at: Option<TimestampColumn>,
    pub updated_at: Option<TimestampColumn>,

    /// Soft-delete column. Rows with a non-null value here are treated as
    /// deleted by the emitted accessors.
    pub deleted_at: Option<TimestampColumn>,

    pub box_results: bool,

    /// References from this table's foreign keys.
    pub outgoing: Vec<OutgoingReference>,

    /// References from other tables' foreign keys to this one.
    pub incoming: Vec<IncomingReference>,

    /// Everything reachable through outgoing references.
    pub include: IncludeSpec,
}

/// A created/updated/deleted timestamp column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampColumn {
    pub column: String,
    pub nullable: bool,
    pub has_timezone: bool,
}

impl TableModel {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key_column(&self) -> &Column {
        &self.columns[self.primary_key]
    }

    pub fn primary_key_type(&self) -> &TypeDescriptor {
        &self.primary_key_column().ty
    }

    pub fn column_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// True if the table's column names are exactly `names`, in any order.
    pub fn has_column_set<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> bool {
        let mut count = 0;
        for name in names {
            if self.column(name).is_none() {
                return false;
            }
            count += 1;
        }
        count == self.columns.len()
    }

    /// The row-accessor declaration, with fields in canonical column order.
    pub fn row_decl(&self) -> RowDecl {
        RowDecl {
            name: self.type_name.clone(),
            fields: self
                .columns
                .iter()
                .map(|column| RowField {
                    column: column.name.clone(),
                    ident: column.ident.clone(),
                    ty: column.ty.clone(),
                    nullable: column.nullable,
                })
                .collect(),
        }
    }

    pub fn outgoing_reference(&self, column: &str) -> Option<&OutgoingReference> {
        self.outgoing
            .iter()
            .find(|reference| reference.column == column)
    }
}
