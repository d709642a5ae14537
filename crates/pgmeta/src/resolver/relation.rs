use indexmap::IndexMap;
use pgmeta_core::{
    schema::{
        Cardinality, IncludeEdge, IncludeSpec, IncomingReference, OutgoingReference, TableModel,
    },
    ty::field_ident,
};
use std::collections::{HashMap, HashSet};
use std_util::str;

/// A foreign key between two configured tables.
struct Edge {
    owner: String,
    column: String,
    target: String,
    target_column: String,
    unique: bool,
    nullable: bool,
}

/// Attaches outgoing and incoming references to every table, then builds
/// each table's include spec.
///
/// Foreign keys into tables that are not configured are skipped.
pub(super) fn link(tables: &mut IndexMap<String, TableModel>) {
    let mut edges = vec![];

    for table in tables.values() {
        for column in &table.columns {
            let Some(reference) = &column.references else {
                continue;
            };

            if !tables.contains_key(&reference.table) {
                tracing::warn!(
                    table = %table.name,
                    column = %column.name,
                    references = %reference.table,
                    "foreign key references an unconfigured table; skipping"
                );
                continue;
            }

            edges.push(Edge {
                owner: table.name.clone(),
                column: column.name.clone(),
                target: reference.table.clone(),
                target_column: reference.column.clone(),
                unique: column.unique,
                nullable: column.nullable,
            });
        }
    }

    // Number of foreign keys each owner has into each target. Incoming
    // names are only qualified by column when an owner has several.
    let mut fan_in: HashMap<(String, String), usize> = HashMap::new();
    for edge in &edges {
        *fan_in
            .entry((edge.owner.clone(), edge.target.clone()))
            .or_default() += 1;
    }

    for edge in &edges {
        if let Some(owner) = tables.get_mut(&edge.owner) {
            let field = outgoing_field(owner, &edge.column);
            owner.outgoing.push(OutgoingReference {
                field,
                column: edge.column.clone(),
                points_to: edge.target.clone(),
                points_to_column: edge.target_column.clone(),
                nullable: edge.nullable,
            });
        }

        let cardinality = if edge.unique {
            Cardinality::OneToOne
        } else {
            Cardinality::OneToMany
        };

        let mut field = match cardinality {
            Cardinality::OneToOne => str::singularize(&edge.owner),
            Cardinality::OneToMany => str::pluralize(&edge.owner),
        };
        if fan_in[&(edge.owner.clone(), edge.target.clone())] > 1 {
            field = format!("{field}_by_{}", edge.column);
        }

        if let Some(target) = tables.get_mut(&edge.target) {
            target.incoming.push(IncomingReference {
                field: field_ident(&field),
                points_from: edge.owner.clone(),
                column: edge.column.clone(),
                points_to_column: edge.target_column.clone(),
                cardinality,
            });
        }
    }

    let includes: Vec<_> = tables
        .keys()
        .map(|name| (name.clone(), include_spec(tables, name)))
        .collect();

    for (name, include) in includes {
        if let Some(table) = tables.get_mut(&name) {
            tracing::trace!(table = %name, include = %include, "include spec");
            table.include = include;
        }
    }

    tracing::debug!(references = edges.len(), "linked tables");
}

/// `author_id` becomes `author`. Columns without the suffix, or whose
/// stripped name is taken by another column, get `_ref` appended instead.
fn outgoing_field(table: &TableModel, column: &str) -> String {
    match column.strip_suffix("_id") {
        Some(stripped) if !stripped.is_empty() && table.column(stripped).is_none() => {
            field_ident(stripped)
        }
        _ => field_ident(&format!("{column}_ref")),
    }
}

/// Every path from `root` through outgoing references. A table already on
/// the path being expanded appears as a leaf, which ends self-references
/// and cycles; a table reached again along a different path is expanded
/// again.
fn include_spec(tables: &IndexMap<String, TableModel>, root: &str) -> IncludeSpec {
    let mut path = HashSet::new();
    expand(tables, root, &mut path)
}

fn expand(
    tables: &IndexMap<String, TableModel>,
    name: &str,
    path: &mut HashSet<String>,
) -> IncludeSpec {
    let mut spec = IncludeSpec::leaf(name);
    let Some(table) = tables.get(name) else {
        return spec;
    };

    path.insert(name.to_string());

    for reference in &table.outgoing {
        let child = if path.contains(&reference.points_to) {
            IncludeSpec::leaf(&reference.points_to)
        } else {
            expand(tables, &reference.points_to, path)
        };

        spec.includes.push(IncludeEdge {
            field: reference.field.clone(),
            spec: child,
        });
    }

    path.remove(name);
    spec
}
