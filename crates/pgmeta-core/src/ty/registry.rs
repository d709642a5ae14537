use super::{
    builtin, field_ident, variant_ident, EnumDecl, EnumVariant, RowDecl, RowField, TypeDecl,
    TypeDescriptor,
};
use crate::{
    catalog::{NativeKind, NativeType},
    config::TypeOverride,
    Error, Result,
};

use indexmap::IndexMap;
use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard, PoisonError},
};
use std_util::str;

/// Resolves native types to [`TypeDescriptor`]s and collects the type
/// declarations the emitted code needs.
///
/// Both maps are create-if-absent: the first registration under a key wins
/// and later callers get the existing entry. The registry is shared by
/// reference across concurrent resolution tasks; a single lock makes the
/// first resolution of a key block any concurrent resolution of the same key.
#[derive(Debug)]
pub struct TypeRegistry {
    /// User overrides keyed by canonical native name.
    overrides: HashMap<String, TypeDescriptor>,

    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    /// Resolved descriptors keyed by canonical native name.
    descriptors: IndexMap<String, TypeDescriptor>,

    /// Declarations keyed by target name, in first-registration order.
    decls: IndexMap<String, TypeDecl>,

    /// Row type names of configured tables.
    reserved: HashSet<String>,
}

impl TypeRegistry {
    pub fn new() -> TypeRegistry {
        TypeRegistry {
            overrides: HashMap::new(),
            state: Mutex::new(State::default()),
        }
    }

    /// A registry applying `overrides` ahead of the built-in mappings.
    pub fn with_overrides(overrides: &[TypeOverride]) -> Result<TypeRegistry> {
        let mut registry = TypeRegistry::new();

        for type_override in overrides {
            let key = NativeType::parse(&type_override.pg_type_name).name;
            let descriptor = match &type_override.nullable_rust_type_name {
                Some(null_name) => TypeDescriptor::with_null_name(
                    key.clone(),
                    type_override.rust_type_name.clone(),
                    null_name.clone(),
                ),
                None => TypeDescriptor::plain(key.clone(), type_override.rust_type_name.clone()),
            };

            if registry.overrides.insert(key.clone(), descriptor).is_some() {
                return Err(Error::invalid_config(format!(
                    "type `{key}` is overridden more than once"
                )));
            }
        }

        Ok(registry)
    }

    /// Resolves `native` to its descriptor, registering declarations for any
    /// enum or composite types it reaches on first use.
    pub fn resolve(&self, native: &NativeType) -> Result<TypeDescriptor> {
        let mut state = self.lock();
        self.resolve_locked(&mut state, native)
    }

    /// Registers a declaration discovered during resolution.
    ///
    /// Registering the same shape twice under one name is a no-op; a
    /// different shape under an existing name is a duplicate type error.
    pub fn emit_on_demand(&self, decl: TypeDecl) -> Result<()> {
        let mut state = self.lock();
        emit_locked(&mut state, decl)
    }

    /// Claims `names` for table row types ahead of resolution. An enum or
    /// composite whose declaration name would be reserved is suffixed with
    /// its kind instead, `status` becoming `StatusEnum` next to a `statuses`
    /// table's `Status` row.
    pub fn reserve_row_names<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock()
            .reserved
            .extend(names.into_iter().map(Into::into));
    }

    /// Every registered declaration, each exactly once, in first-registration
    /// order.
    pub fn declarations(&self) -> Vec<TypeDecl> {
        self.lock().decls.values().cloned().collect()
    }

    pub fn declaration(&self, name: &str) -> Option<TypeDecl> {
        self.lock().decls.get(name).cloned()
    }

    /// Every descriptor resolved so far, keyed by canonical native name.
    pub fn descriptors(&self) -> IndexMap<String, TypeDescriptor> {
        self.lock().descriptors.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Nothing panics while holding the lock with the maps half-updated.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve_locked(&self, state: &mut State, native: &NativeType) -> Result<TypeDescriptor> {
        if let Some(descriptor) = state.descriptors.get(&native.name) {
            return Ok(descriptor.clone());
        }

        let descriptor = self.build(state, native)?;
        let descriptor = state
            .descriptors
            .entry(native.name.clone())
            .or_insert(descriptor)
            .clone();

        tracing::trace!(native = %native, target = %descriptor.name, "resolved type");
        Ok(descriptor)
    }

    fn build(&self, state: &mut State, native: &NativeType) -> Result<TypeDescriptor> {
        let key = &native.name;

        if let Some(descriptor) = self.overrides.get(key) {
            return Ok(descriptor.clone());
        }

        match &native.kind {
            NativeKind::Simple => builtin::lookup(key).ok_or_else(|| Error::unknown_type(key)),
            NativeKind::Array(element) => {
                let element = self.resolve_locked(state, element)?;
                Ok(builtin::array(key, &element))
            }
            NativeKind::Domain(base) => {
                let base = self.resolve_locked(state, base)?;
                Ok(TypeDescriptor {
                    key: key.clone(),
                    ..base
                })
            }
            NativeKind::Enum(labels) => {
                let name = decl_name(state, key, "Enum");
                emit_locked(
                    state,
                    TypeDecl::Enum(EnumDecl {
                        name: name.clone(),
                        native: key.clone(),
                        variants: enum_variants(labels),
                    }),
                )?;
                Ok(TypeDescriptor::plain(key.clone(), name.clone()).with_decl(name))
            }
            NativeKind::Composite(fields) => {
                let name = decl_name(state, key, "Composite");
                let fields = fields
                    .iter()
                    .map(|field| {
                        Ok(RowField {
                            column: field.name.clone(),
                            ident: field_ident(&field.name),
                            ty: self.resolve_locked(state, &field.ty)?,
                            // attributes of a composite carry no NOT NULL
                            nullable: true,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                emit_locked(
                    state,
                    TypeDecl::Composite(RowDecl {
                        name: name.clone(),
                        fields,
                    }),
                )?;
                Ok(TypeDescriptor::plain(key.clone(), name.clone()).with_decl(name))
            }
            NativeKind::Pseudo => Err(Error::unknown_type(key)),
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn decl_name(state: &State, key: &str, kind: &str) -> String {
    let name = str::upper_camel_case(key);
    if state.reserved.contains(&name) {
        format!("{name}{kind}")
    } else {
        name
    }
}

fn emit_locked(state: &mut State, decl: TypeDecl) -> Result<()> {
    match state.decls.get(decl.name()) {
        Some(existing) if existing.signature() == decl.signature() => Ok(()),
        Some(_) => Err(Error::duplicate_type(decl.name())),
        None => {
            tracing::trace!(name = decl.name(), "registered type declaration");
            state.decls.insert(decl.name().to_string(), decl);
            Ok(())
        }
    }
}

/// Variant identifiers are made unique by suffixing a counter, since
/// distinct labels can fold onto the same identifier (`a b`, `a_b`).
fn enum_variants(labels: &[String]) -> Vec<EnumVariant> {
    let mut seen = HashMap::new();
    labels
        .iter()
        .map(|label| {
            let base = variant_ident(label);
            let count = seen.entry(base.clone()).or_insert(0usize);
            *count += 1;
            let ident = if *count == 1 {
                base
            } else {
                format!("{base}{count}")
            };
            EnumVariant {
                ident,
                label: label.clone(),
            }
        })
        .collect()
}
