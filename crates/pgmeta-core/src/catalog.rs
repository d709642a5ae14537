mod facts;
pub use facts::{ColumnFacts, DescribedColumn, Description, ForeignKeyFacts, FunctionFacts, TableFacts};

mod native;
pub use native::{NativeField, NativeKind, NativeType};

use crate::{async_trait, Result};

use std::fmt::Debug;

/// Read-only access to the live database's self-describing metadata.
///
/// One implementation exists per database client; tests substitute a
/// fixture. All calls made during one resolution run go through the same
/// instance, so implementations should share a single session across them.
#[async_trait]
pub trait Catalog: Debug + Send + Sync {
    /// Columns and constraints of `table`.
    ///
    /// Fails with a schema-not-found error if the table does not exist.
    async fn table(&self, table: &str) -> Result<TableFacts>;

    /// Argument names and types of the stored function `name`.
    ///
    /// Fails with a schema-not-found error if the function does not exist.
    async fn function(&self, name: &str) -> Result<FunctionFacts>;

    /// Prepares `sql` without executing it and reports its parameter and
    /// result column types.
    ///
    /// `param_hints` pins the types of the leading parameters; an empty
    /// slice lets the database infer every parameter.
    async fn describe(&self, sql: &str, param_hints: &[NativeType]) -> Result<Description>;
}
