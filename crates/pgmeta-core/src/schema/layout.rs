use super::{FieldSet, TableModel};

use indexmap::IndexMap;
use serde::Serialize;

/// Field-mask bit assignments for one table.
///
/// A column's bit is its position in the table's canonical column order,
/// so indices are contiguous and start at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BitLayout {
    pub table: String,

    /// Column name to bit index.
    indices: IndexMap<String, usize>,

    all: FieldSet,
    mutable: FieldSet,
    defaultable: FieldSet,
}

impl BitLayout {
    pub fn for_table(table: &TableModel) -> BitLayout {
        let mut indices = IndexMap::with_capacity(table.columns.len());
        let mut mutable = FieldSet::new();
        let mut defaultable = FieldSet::new();

        for (index, column) in table.columns.iter().enumerate() {
            indices.insert(column.name.clone(), index);

            if column.mutable {
                mutable.insert(index);
            }

            if column.has_default {
                defaultable.insert(index);
            }
        }

        BitLayout {
            table: table.name.clone(),
            all: FieldSet::filled(indices.len()),
            indices,
            mutable,
            defaultable,
        }
    }

    /// Every column.
    pub fn all(&self) -> &FieldSet {
        &self.all
    }

    /// Columns that may appear in an update.
    pub fn mutable(&self) -> &FieldSet {
        &self.mutable
    }

    /// Columns with a catalog-declared default expression.
    pub fn defaultable(&self) -> &FieldSet {
        &self.defaultable
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.indices.get(column).copied()
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = (&str, usize)> + '_ {
        self.indices.iter().map(|(name, index)| (name.as_str(), *index))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The highest assigned bit, `None` for a table without columns.
    pub fn max_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// A mask of the named columns. Unknown names are ignored.
    pub fn mask<'a>(&self, columns: impl IntoIterator<Item = &'a str>) -> FieldSet {
        columns
            .into_iter()
            .filter_map(|column| self.index_of(column))
            .collect()
    }
}
