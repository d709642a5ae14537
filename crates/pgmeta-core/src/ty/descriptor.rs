use super::Hook;
use serde::Serialize;

/// The resolved, emission-ready representation of a native type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    /// Canonical native type name this descriptor was resolved from.
    pub key: String,

    /// Target type name, e.g. `i64`.
    pub name: String,

    /// Target type name of the nullable form, e.g. `Option<i64>`.
    pub null_name: String,

    /// Type the row decoder reads when it differs from `name`. Values read
    /// as this type pass through `convert` afterwards.
    pub wire_name: Option<String>,

    /// Binds a value of type `name` as a statement argument.
    pub bind: Hook,

    /// Binds a value of type `null_name` as a statement argument.
    pub bind_null: Hook,

    /// Reads a non-null value from a row, given a column index expression.
    pub receive: Hook,

    /// Reads a nullable value from a row, given a column index expression.
    pub receive_null: Hook,

    /// Post-read conversion from the wire type to `name`.
    pub convert: Option<Hook>,

    /// Post-read conversion from the nullable wire type to `null_name`.
    pub convert_null: Option<Hook>,

    /// Name of the declaration this type refers to, for enums and composites.
    pub decl: Option<String>,
}

impl TypeDescriptor {
    /// A descriptor for a type that is bound and decoded as itself.
    pub fn plain(key: impl Into<String>, name: impl Into<String>) -> TypeDescriptor {
        let name = name.into();
        let null_name = format!("Option<{name}>");
        TypeDescriptor::with_null_name(key, name, null_name)
    }

    pub fn with_null_name(
        key: impl Into<String>,
        name: impl Into<String>,
        null_name: impl Into<String>,
    ) -> TypeDescriptor {
        let name = name.into();
        let null_name = null_name.into();
        TypeDescriptor {
            key: key.into(),
            bind: Hook::new("&{expr}"),
            bind_null: Hook::new("&{expr}"),
            receive: Hook::new(format!("row.try_get::<_, {name}>({{expr}})?")),
            receive_null: Hook::new(format!("row.try_get::<_, {null_name}>({{expr}})?")),
            name,
            null_name,
            wire_name: None,
            convert: None,
            convert_null: None,
            decl: None,
        }
    }

    /// A `json`/`jsonb` value carried as the user type `name` through
    /// `postgres_types::Json`.
    pub fn json(key: impl Into<String>, name: impl Into<String>) -> TypeDescriptor {
        let name = name.into();
        let mut ty = TypeDescriptor::plain(key, name.clone()).through_wire(
            format!("postgres_types::Json<{name}>"),
            Hook::new("{expr}.0"),
            Hook::new("{expr}.map(|json| json.0)"),
        );
        ty.bind = Hook::new("&postgres_types::Json(&{expr})");
        ty.bind_null = Hook::new("&{expr}.as_ref().map(postgres_types::Json)");
        ty
    }

    /// Routes decoding through `wire_name`, converting the decoded value with
    /// `convert` / `convert_null`.
    pub fn through_wire(
        mut self,
        wire_name: impl Into<String>,
        convert: Hook,
        convert_null: Hook,
    ) -> TypeDescriptor {
        let wire_name = wire_name.into();
        self.receive = Hook::new(format!("row.try_get::<_, {wire_name}>({{expr}})?"));
        self.receive_null = Hook::new(format!(
            "row.try_get::<_, Option<{wire_name}>>({{expr}})?"
        ));
        self.wire_name = Some(wire_name);
        self.convert = Some(convert);
        self.convert_null = Some(convert_null);
        self
    }

    pub fn with_decl(mut self, decl: impl Into<String>) -> TypeDescriptor {
        self.decl = Some(decl.into());
        self
    }

    /// The target type name for a value of this type, honoring nullability.
    pub fn name_for(&self, nullable: bool) -> &str {
        if nullable {
            &self.null_name
        } else {
            &self.name
        }
    }
}
