use super::NativeType;

/// Raw catalog facts about one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFacts {
    pub name: String,

    /// Columns in ordinal order.
    pub columns: Vec<ColumnFacts>,

    /// The column of the catalog-declared primary key, if there is one.
    pub primary_key: Option<String>,

    /// Columns carrying a single-column uniqueness constraint or unique
    /// index. Includes the primary key column.
    pub unique_columns: Vec<String>,

    pub foreign_keys: Vec<ForeignKeyFacts>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFacts {
    pub name: String,
    pub ty: NativeType,
    pub nullable: bool,

    /// True if the column has a default expression (including `serial`
    /// sequences and identity columns).
    pub has_default: bool,

    /// 1-based position within the table.
    pub ordinal: usize,
}

/// A single-column foreign key: `table.column -> references_table.references_column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyFacts {
    pub column: String,
    pub references_table: String,
    pub references_column: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionFacts {
    pub name: String,

    /// Declared argument names, positionally. Unnamed arguments are `None`.
    pub arg_names: Vec<Option<String>>,

    pub arg_types: Vec<NativeType>,
}

/// What the server reports for a statement prepared but not executed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Description {
    /// Positional parameter types, `$1` first.
    pub params: Vec<NativeType>,

    /// Result columns in the order the statement returns them. Empty for
    /// statements that return no rows.
    pub columns: Vec<DescribedColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescribedColumn {
    pub name: String,
    pub ty: NativeType,
}

impl TableFacts {
    pub fn column(&self, name: &str) -> Option<&ColumnFacts> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn is_unique(&self, column: &str) -> bool {
        self.unique_columns.iter().any(|unique| unique == column)
    }
}

impl DescribedColumn {
    pub fn new(name: impl Into<String>, ty: NativeType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}
