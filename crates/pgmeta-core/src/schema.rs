mod column;
pub use column::{Column, ColumnRef};

mod field_set;
pub use field_set::FieldSet;

mod include;
pub use include::{IncludeEdge, IncludeSpec};

mod layout;
pub use layout::BitLayout;

mod reference;
pub use reference::{Cardinality, IncomingReference, OutgoingReference};

mod table;
pub use table::{TableModel, TimestampColumn};
