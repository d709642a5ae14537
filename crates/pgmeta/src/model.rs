use pgmeta_core::{
    query::{FunctionModel, QueryModel, StatementModel},
    schema::{BitLayout, TableModel},
    ty::{TypeDecl, TypeDescriptor},
};

use indexmap::IndexMap;
use serde::Serialize;

/// Everything a resolution run produces, keyed by stable name.
///
/// Tables, queries, functions, and statements keep configuration order.
/// Type declarations keep first-registration order and appear once each.
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    pub tables: IndexMap<String, TableModel>,
    pub queries: IndexMap<String, QueryModel>,
    pub stored_functions: IndexMap<String, FunctionModel>,
    pub statements: IndexMap<String, StatementModel>,

    /// Field-mask layouts, keyed by table name.
    pub layouts: IndexMap<String, BitLayout>,

    /// Declarations the emitted code needs: enums, composites, and row types.
    pub types: Vec<TypeDecl>,

    /// Every resolved type, keyed by canonical native name.
    pub descriptors: IndexMap<String, TypeDescriptor>,
}

impl Model {
    pub fn table(&self, name: &str) -> Option<&TableModel> {
        self.tables.get(name)
    }

    pub fn query(&self, name: &str) -> Option<&QueryModel> {
        self.queries.get(name)
    }

    pub fn stored_function(&self, name: &str) -> Option<&FunctionModel> {
        self.stored_functions.get(name)
    }

    pub fn statement(&self, name: &str) -> Option<&StatementModel> {
        self.statements.get(name)
    }

    pub fn layout(&self, table: &str) -> Option<&BitLayout> {
        self.layouts.get(table)
    }

    pub fn type_decl(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|decl| decl.name() == name)
    }
}
