use super::Resolver;

use pgmeta_core::{catalog::NativeType, err, query::Arg, ty::field_ident, Error, Result};

/// Where a positional argument list gets its names and types.
pub(super) struct ArgList<'a> {
    /// Configured names.
    pub(super) names: Option<&'a [String]>,

    /// Names declared in the catalog, used where none are configured.
    pub(super) declared_names: &'a [Option<String>],

    /// Configured native type names.
    pub(super) types: Option<&'a [String]>,

    /// Types declared in the catalog, used where none are configured.
    pub(super) declared_types: &'a [NativeType],

    pub(super) nullable: bool,
}

impl<'a> ArgList<'a> {
    pub(super) fn new(
        names: Option<&'a [String]>,
        types: Option<&'a [String]>,
        nullable: bool,
    ) -> ArgList<'a> {
        ArgList {
            names,
            declared_names: &[],
            types,
            declared_types: &[],
            nullable,
        }
    }

    /// Type hints for `describe`.
    pub(super) fn hints(&self) -> Vec<NativeType> {
        match self.types {
            Some(types) => types.iter().map(|ty| NativeType::parse(ty)).collect(),
            None => self.declared_types.to_vec(),
        }
    }

    fn name(&self, index: usize) -> String {
        self.names
            .and_then(|names| names.get(index).cloned())
            .or_else(|| self.declared_names.get(index).cloned().flatten())
            .unwrap_or_else(|| format!("arg{index}"))
    }
}

impl Resolver {
    /// Matches an argument list to the positional parameters the describe
    /// call reported and resolves each argument's type.
    pub(super) fn resolve_args(&self, list: &ArgList<'_>, params: &[NativeType]) -> Result<Vec<Arg>> {
        let count = params.len();

        if let Some(names) = list.names {
            if names.len() != count {
                return Err(Error::argument_count(names.len(), count));
            }
        }

        if let Some(types) = list.types {
            if types.len() != count {
                return Err(Error::argument_count(types.len(), count));
            }
        }

        (0..count)
            .map(|index| {
                let name = list.name(index);
                let native = self.arg_type(list, params, index, &name)?;

                if native.is_pseudo() {
                    return Err(Error::argument_type_ambiguity(
                        name,
                        format!("parameter type is `{native}`; configure `arg_types`"),
                    ));
                }

                let ty = self
                    .registry
                    .resolve(&native)
                    .map_err(|err| err.context(err!("argument `{name}`")))?;

                Ok(Arg {
                    ident: field_ident(&name),
                    name,
                    ty,
                    nullable: list.nullable,
                })
            })
            .collect()
    }

    fn arg_type(
        &self,
        list: &ArgList<'_>,
        params: &[NativeType],
        index: usize,
        name: &str,
    ) -> Result<NativeType> {
        let described = &params[index];

        if let Some(types) = list.types {
            let configured = NativeType::parse(&types[index]);

            // Describe knows the structure (enum labels, composite fields)
            // of a configured name; a bare parse does not.
            return Ok(if configured.name == described.name {
                described.clone()
            } else {
                configured
            });
        }

        if let Some(declared) = list.declared_types.get(index) {
            return Ok(declared.clone());
        }

        if !self.config.infer_arg_types {
            return Err(Error::argument_type_ambiguity(
                name,
                "`infer_arg_types` is disabled and no `arg_types` are configured",
            ));
        }

        Ok(described.clone())
    }
}
