use serde::Serialize;
use std::fmt;

/// Which related rows a "fetch with related rows" operation fills in.
///
/// Renders as `users.{profiles, posts.{comments}}`. Each node names a table;
/// its edges are the references followed from that table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeSpec {
    pub table: String,
    pub includes: Vec<IncludeEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeEdge {
    /// Reference field followed to reach `spec.table`.
    pub field: String,
    pub spec: IncludeSpec,
}

impl IncludeSpec {
    /// A spec including only the table itself.
    pub fn leaf(table: impl Into<String>) -> IncludeSpec {
        IncludeSpec {
            table: table.into(),
            includes: vec![],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.includes.is_empty()
    }

    /// Number of nodes, the table itself included.
    pub fn len(&self) -> usize {
        1 + self.includes.iter().map(|edge| edge.spec.len()).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .includes
            .iter()
            .map(|edge| edge.spec.depth())
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for IncludeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.table)?;
        if self.includes.is_empty() {
            return Ok(());
        }

        f.write_str(".{")?;
        for (i, edge) in self.includes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(&edge.spec, f)?;
        }
        f.write_str("}")
    }
}
