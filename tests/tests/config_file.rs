use pretty_assertions::assert_eq;
use tests::prelude::*;

const CONFIG: &str = r#"
concurrency = 2
emit_sync = true

[[type_override]]
pg_type_name = "citext"
rust_type_name = "String"

[[table]]
name = "users"
immutable_fields = ["email"]
box_result = true

[[query]]
name = "GetUserByNickname"
body = "SELECT * FROM users WHERE nickname = $1"
arg_names = ["nickname"]
single_result = true

[[statement]]
name = "DeleteUser"
body = "DELETE FROM users WHERE id = $1"
arg_names = ["id"]
"#;

fn catalog() -> FixtureCatalog {
    FixtureCatalog::new()
        .table(users_table())
        .describe(
            "SELECT * FROM users WHERE nickname = $1",
            &["text"],
            &[
                ("id", "int4"),
                ("email", "text"),
                ("nickname", "text"),
                ("deleted_at", "timestamptz"),
            ],
        )
        .describe("DELETE FROM users WHERE id = $1", &["int4"], &[])
}

#[test]
fn unknown_keys_are_collected() {
    let config = assert_ok!(Config::from_toml(CONFIG));

    assert_eq!(config.concurrency, 2);
    assert!(config.infer_arg_types);
    assert_eq!(config.type_overrides.len(), 1);
    assert_eq!(config.tables[0].immutable_fields, ["email"]);
    assert!(!config.tables[0].box_results);

    assert_eq!(config.unknown_keys(), ["emit_sync", "table[0].box_result"]);
}

#[test]
fn malformed_file_is_an_error() {
    assert_err!(Config::from_toml("[[table]]\nname = 3\n"));
    assert_err!(Config::from_toml("concurrency = "));
}

#[tokio::test]
async fn resolves_from_file() {
    let config = assert_ok!(Config::from_toml(CONFIG));
    let model = assert_ok!(resolve(catalog(), config).await);

    let users = model.table("users").unwrap();
    assert!(!users.column("email").unwrap().mutable);
    assert!(model.query("GetUserByNickname").unwrap().single_result);
    assert_eq!(model.statement("DeleteUser").unwrap().args[0].name, "id");
}

#[tokio::test]
async fn invalid_config_touches_no_catalog() {
    let cases = [
        "concurrency = 0",
        "[[table]]\nname = \"users\"\n[[table]]\nname = \"users\"",
        "[[query]]\nname = \"Q\"\nbody = \"  \"",
        "[[query]]\nname = \"Q\"\nbody = \"SELECT 1\"\n[[statement]]\nname = \"Q\"\nbody = \"SELECT 1\"",
        "[[table]]\nname = \"users\"\ninclude_columns = [\"email\"]\nexclude_columns = [\"nickname\"]",
    ];

    for src in cases {
        let config = assert_ok!(Config::from_toml(src));
        let catalog = LoggingCatalog::new(catalog());
        let ops = catalog.ops_log_handle();

        let err = assert_err_kind!(Resolver::new(catalog, config), is_invalid_config);
        assert!(ops.lock().unwrap().is_empty(), "{src}: {err}");
    }
}
