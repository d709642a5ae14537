use pretty_assertions::assert_eq;
use tests::prelude::*;

const BY_NICKNAME: &str = "SELECT * FROM users WHERE nickname = $1";

const USER_COLUMNS: &[(&str, &str)] = &[
    ("id", "int4"),
    ("email", "text"),
    ("nickname", "text"),
    ("deleted_at", "timestamptz"),
];

fn catalog() -> FixtureCatalog {
    FixtureCatalog::new()
        .table(users_table())
        .describe(BY_NICKNAME, &["text"], USER_COLUMNS)
}

#[tokio::test]
async fn query_reuses_table_row_type() {
    let config = Config::new().table(TableConfig::new("users")).query(
        QueryConfig::new("GetUserByNickname", BY_NICKNAME)
            .arg_names(["nickname"])
            .single_result(true),
    );

    let model = assert_ok!(resolve(catalog(), config).await);
    let query = model.query("GetUserByNickname").unwrap();

    assert_eq!(query.args.len(), 1);
    assert_eq!(query.args[0].name, "nickname");
    assert_eq!(
        query.args[0].ty,
        model.table("users").unwrap().column("nickname").unwrap().ty
    );
    assert!(!query.args[0].nullable);

    assert_eq!(
        query.returns,
        ReturnShape::Table {
            table: "users".into(),
            type_name: "User".into(),
        }
    );
    assert!(query.single_result);
    assert!(query.multi_return);

    // No ad-hoc row type was synthesized.
    assert!(model.type_decl("GetUserByNicknameRow").is_none());
    let rows: Vec<_> = model
        .types
        .iter()
        .filter(|decl| decl.as_row().is_some())
        .map(|decl| decl.name())
        .collect();
    assert_eq!(rows, ["User"]);
}

#[tokio::test]
async fn column_order_does_not_matter_for_reuse() {
    let sql = "SELECT nickname, deleted_at, email, id FROM users";
    let catalog = catalog().describe(
        sql,
        &[],
        &[
            ("nickname", "text"),
            ("deleted_at", "timestamptz"),
            ("email", "text"),
            ("id", "int4"),
        ],
    );
    let config = Config::new()
        .table(TableConfig::new("users"))
        .query(QueryConfig::new("ListUsers", sql));

    let model = assert_ok!(resolve(catalog, config).await);
    assert!(model.query("ListUsers").unwrap().returns.is_table());
}

#[tokio::test]
async fn partial_column_set_synthesizes_a_row_type() {
    let sql = "SELECT id, email FROM users";
    let catalog = catalog().describe(sql, &[], &[("id", "int4"), ("email", "text")]);
    let config = Config::new()
        .table(TableConfig::new("users"))
        .query(QueryConfig::new("ListEmails", sql).not_null_fields(["id"]));

    let model = assert_ok!(resolve(catalog, config).await);
    let query = model.query("ListEmails").unwrap();

    assert_eq!(
        query.returns,
        ReturnShape::Row {
            type_name: "ListEmailsRow".into()
        }
    );

    let row = model.type_decl("ListEmailsRow").unwrap().as_row().unwrap();
    assert_eq!(row.columns().collect::<Vec<_>>(), ["id", "email"]);
    assert!(!row.fields[0].nullable);
    assert!(row.fields[1].nullable);
}

#[tokio::test]
async fn single_column_is_a_scalar() {
    let sql = "SELECT count(*) AS total FROM users";
    let catalog = catalog().describe(sql, &[], &[("total", "bigint")]);
    let config = Config::new()
        .table(TableConfig::new("users"))
        .query(
            QueryConfig::new("CountUsers", sql)
                .single_result(true)
                .not_null_fields(["total"]),
        );

    let model = assert_ok!(resolve(catalog, config).await);
    let query = model.query("CountUsers").unwrap();

    assert!(!query.multi_return);
    assert!(query.returns.is_scalar());
    assert_eq!(query.returns.type_name(), "i64");
}

#[tokio::test]
async fn default_argument_names() {
    let sql = "SELECT email FROM users WHERE id = $1 OR nickname = $2";
    let catalog = catalog().describe(sql, &["int4", "text"], &[("email", "text")]);
    let config = Config::new()
        .table(TableConfig::new("users"))
        .query(QueryConfig::new("FindEmail", sql).nullable_arguments(true));

    let model = assert_ok!(resolve(catalog, config).await);
    let args = &model.query("FindEmail").unwrap().args;

    let names: Vec<_> = args.iter().map(|arg| arg.name.as_str()).collect();
    assert_eq!(names, ["arg0", "arg1"]);
    assert_eq!(args[0].type_name(), "Option<i32>");
    assert_eq!(args[1].type_name(), "Option<String>");
}

#[tokio::test]
async fn argument_count_mismatch() {
    let config = Config::new().table(TableConfig::new("users")).query(
        QueryConfig::new("GetUserByNickname", BY_NICKNAME).arg_names(["nickname", "email"]),
    );

    let err = assert_err_kind!(resolve(catalog(), config).await, is_argument_count);
    assert_eq!(
        err.to_string(),
        "query `GetUserByNickname`: argument count mismatch: 2 argument(s) configured, 1 expected"
    );
}

#[tokio::test]
async fn unknown_parameter_type_is_ambiguous() {
    let sql = "SELECT $1 AS echo";
    let catalog = catalog().describe(sql, &["unknown"], &[("echo", "text")]);
    let config = Config::new().query(QueryConfig::new("Echo", sql).arg_names(["value"]));

    let err = assert_err_kind!(resolve(catalog.clone(), config).await, is_argument_type_ambiguity);
    assert_eq!(
        err.to_string(),
        "query `Echo`: cannot determine type of argument `value`: parameter type is `unknown`; configure `arg_types`"
    );

    // An explicit type settles it, and reaches `describe` as a hint.
    let config = Config::new().query(
        QueryConfig::new("Echo", sql)
            .arg_names(["value"])
            .arg_types(["text"]),
    );
    let model = assert_ok!(resolve(catalog, config).await);
    assert_eq!(model.query("Echo").unwrap().args[0].type_name(), "String");
}

#[tokio::test]
async fn inference_disabled_requires_arg_types() {
    let config = Config::new()
        .infer_arg_types(false)
        .table(TableConfig::new("users"))
        .query(QueryConfig::new("GetUserByNickname", BY_NICKNAME));

    assert_err_kind!(resolve(catalog(), config).await, is_argument_type_ambiguity);

    let config = Config::new()
        .infer_arg_types(false)
        .table(TableConfig::new("users"))
        .query(QueryConfig::new("GetUserByNickname", BY_NICKNAME).arg_types(["text"]));

    assert_ok!(resolve(catalog(), config).await);
}

#[tokio::test]
async fn arg_types_are_sent_as_hints() {
    let logging = LoggingCatalog::new(catalog());
    let ops = logging.ops_log_handle();

    let config = Config::new().table(TableConfig::new("users")).query(
        QueryConfig::new("GetUserByNickname", BY_NICKNAME)
            .arg_names(["nickname"])
            .arg_types(["character varying"]),
    );

    let model = assert_ok!(Resolver::new(logging, config).unwrap().resolve().await);
    assert_eq!(
        model.query("GetUserByNickname").unwrap().args[0].ty.key,
        "varchar"
    );

    let ops = ops.lock().unwrap();
    assert!(ops.contains(&CatalogOp::Describe {
        sql: BY_NICKNAME.into(),
        hints: vec!["varchar".into()],
    }));
}

#[tokio::test]
async fn query_without_columns_is_rejected() {
    let sql = "UPDATE users SET nickname = NULL";
    let catalog = catalog().describe(sql, &[], &[]);
    let config = Config::new().query(QueryConfig::new("ClearNicknames", sql));

    assert_err_kind!(resolve(catalog, config).await, is_invalid_config);
}

#[tokio::test]
async fn not_null_field_must_be_a_result_column() {
    let sql = "SELECT id, email FROM users";
    let catalog = catalog().describe(sql, &[], &[("id", "int4"), ("email", "text")]);
    let config = Config::new().query(QueryConfig::new("Q", sql).not_null_fields(["nickname"]));

    assert_err_kind!(resolve(catalog, config).await, is_schema_not_found);
}

#[tokio::test]
async fn shared_return_type() {
    let a = "SELECT id, email FROM users WHERE id < 10";
    let b = "SELECT id, email FROM users WHERE id > 10";
    let c = "SELECT id, nickname FROM users";

    let catalog = catalog()
        .describe(a, &[], &[("id", "int4"), ("email", "text")])
        .describe(b, &[], &[("id", "int4"), ("email", "text")])
        .describe(c, &[], &[("id", "int4"), ("nickname", "text")]);

    // Identical shapes share one declaration.
    let config = Config::new()
        .query(QueryConfig::new("A", a).return_type("Contact"))
        .query(QueryConfig::new("B", b).return_type("Contact"));
    let model = assert_ok!(resolve(catalog.clone(), config).await);
    assert_eq!(
        model
            .types
            .iter()
            .filter(|decl| decl.name() == "Contact")
            .count(),
        1
    );

    // Different shapes under one name are a conflict.
    let config = Config::new()
        .query(QueryConfig::new("A", a).return_type("Contact"))
        .query(QueryConfig::new("C", c).return_type("Contact"));
    let err = assert_err_kind!(resolve(catalog, config).await, is_duplicate_type);
    assert_eq!(
        err.to_string(),
        "query `C`: duplicate type `Contact`: two different definitions were registered under one name"
    );
}

#[tokio::test]
async fn enum_result_column() {
    let sql = "SELECT id, mood FROM people";
    let mood = NativeType::enumeration("mood", vec!["sad".into(), "ok".into()]);

    let catalog = FixtureCatalog::new().describe_with(
        sql,
        Description {
            params: vec![],
            columns: vec![
                DescribedColumn::new("id", NativeType::simple("int8")),
                DescribedColumn::new("mood", mood),
            ],
        },
    );
    let config = Config::new().query(QueryConfig::new("ListMoods", sql));

    let model = assert_ok!(resolve(catalog, config).await);
    let names: Vec<_> = model.types.iter().map(|decl| decl.name()).collect();
    assert_eq!(names, ["Mood", "ListMoodsRow"]);
}

#[tokio::test]
async fn statements_type_arguments_only() {
    let sql = "DELETE FROM users WHERE id = $1";
    let catalog = catalog().describe(sql, &["int4"], &[]);
    let config = Config::new()
        .table(TableConfig::new("users"))
        .statement(StatementConfig::new("DeleteUser", sql).arg_names(["id"]));

    let model = assert_ok!(resolve(catalog, config).await);
    let statement = model.statement("DeleteUser").unwrap();

    assert_eq!(statement.args.len(), 1);
    assert_eq!(statement.args[0].type_name(), "i32");
    assert_eq!(statement.body, sql);
}

#[tokio::test]
async fn stored_function() {
    let body = "SELECT * FROM users_since($1)";
    let catalog = catalog()
        .function("users_since", &[("since", "timestamptz")])
        .describe(body, &["timestamptz"], USER_COLUMNS);
    let config = Config::new()
        .table(TableConfig::new("users"))
        .stored_function(FunctionConfig::new("users_since"));

    let model = assert_ok!(resolve(catalog, config).await);
    let function = model.stored_function("users_since").unwrap();

    assert_eq!(function.body, body);
    assert_eq!(function.args[0].name, "since");
    assert_eq!(function.args[0].type_name(), "chrono::DateTime<chrono::Utc>");
    assert_eq!(function.returns.table(), Some("users"));
}

#[tokio::test]
async fn stored_function_scalar_and_unnamed_arguments() {
    let body = "SELECT * FROM add_one($1)";
    let catalog = FixtureCatalog::new()
        .function("add_one", &[("", "int4")])
        .describe(body, &["int4"], &[("add_one", "int4")]);
    let config = Config::new().stored_function(FunctionConfig::new("add_one"));

    let model = assert_ok!(resolve(catalog, config).await);
    let function = model.stored_function("add_one").unwrap();

    assert_eq!(function.args[0].name, "arg0");
    assert_eq!(function.returns.type_name(), "Option<i32>");
    assert!(!function.multi_return);
}

#[tokio::test]
async fn missing_stored_function() {
    let config = Config::new().stored_function(FunctionConfig::new("nope"));
    let err = assert_err_kind!(resolve(FixtureCatalog::new(), config).await, is_schema_not_found);
    assert_eq!(
        err.to_string(),
        "stored function `nope`: function `nope` not found in the catalog"
    );
}
