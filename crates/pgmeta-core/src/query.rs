//! Resolved queries, stored-function calls, and statements.

use crate::ty::TypeDescriptor;
use serde::Serialize;

/// A query returning rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryModel {
    /// Configured name.
    pub name: String,

    /// SQL text, executed as-is with positional arguments.
    pub body: String,

    pub args: Vec<Arg>,

    pub returns: ReturnShape,

    /// The accessor returns exactly one row and fails with a not-found
    /// error when none match.
    pub single_result: bool,

    /// More than one result column; the accessor yields rows rather than
    /// bare values.
    pub multi_return: bool,

    pub box_results: bool,
}

/// A stored function, called as `SELECT * FROM name($1, ...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionModel {
    /// Native function name.
    pub name: String,

    /// The call the accessor issues.
    pub body: String,

    pub args: Vec<Arg>,
    pub returns: ReturnShape,
    pub multi_return: bool,
}

/// A statement returning only an affected-row count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementModel {
    pub name: String,
    pub body: String,
    pub args: Vec<Arg>,
}

/// A positional argument. `args[0]` binds `$1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arg {
    /// Configured or defaulted (`arg0`, ...) name.
    pub name: String,

    /// Parameter identifier in the accessor signature.
    pub ident: String,

    pub ty: TypeDescriptor,

    /// The argument takes the nullable-wrapped type.
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ReturnShape {
    /// Rows decode into an existing table's row-accessor type.
    Table { table: String, type_name: String },

    /// Rows decode into a row-accessor type synthesized for this query.
    Row { type_name: String },

    /// A single result column, returned as a bare value.
    Scalar { ty: TypeDescriptor, nullable: bool },
}

impl Arg {
    /// Target type name, honoring nullability.
    pub fn type_name(&self) -> &str {
        self.ty.name_for(self.nullable)
    }
}

impl ReturnShape {
    /// Name of the type one result decodes into.
    pub fn type_name(&self) -> &str {
        match self {
            ReturnShape::Table { type_name, .. } | ReturnShape::Row { type_name } => type_name,
            ReturnShape::Scalar { ty, nullable } => ty.name_for(*nullable),
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, ReturnShape::Table { .. })
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, ReturnShape::Scalar { .. })
    }

    /// The reused table, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            ReturnShape::Table { table, .. } => Some(table),
            _ => None,
        }
    }
}
