//! Target-language type descriptors and the registry that hands them out.
//!
//! Every native type reachable from a table column, query argument, or query
//! result maps onto exactly one [`TypeDescriptor`], keyed by the native
//! type's canonical name. Types that need a declaration of their own in the
//! emitted code (enums, composites, row types) additionally register a
//! [`TypeDecl`] under their target name.

mod builtin;

mod decl;
pub use decl::{EnumDecl, EnumVariant, RowDecl, RowField, TypeDecl};

mod descriptor;
pub use descriptor::TypeDescriptor;

mod hook;
pub use hook::Hook;

mod ident;
pub use ident::{field_ident, variant_ident};

mod registry;
pub use registry::TypeRegistry;
