use pretty_assertions::assert_eq;
use tests::prelude::*;

fn nodes_table() -> TableFixture {
    TableFixture::new("nodes")
        .column("id", "bigint")
        .primary_key()
        .column("parent_id", "bigint")
        .references("nodes", "id")
}

#[tokio::test]
async fn self_referencing_table() {
    let catalog = FixtureCatalog::new().table(nodes_table());
    let config = Config::new().table(TableConfig::new("nodes"));

    let model = assert_ok!(resolve(catalog, config).await);
    let nodes = model.table("nodes").unwrap();

    assert_eq!(nodes.outgoing.len(), 1);
    let parent = &nodes.outgoing[0];
    assert_eq!(parent.field, "parent");
    assert_eq!(parent.column, "parent_id");
    assert_eq!(parent.points_to, "nodes");
    assert_eq!(parent.points_to_column, "id");
    assert!(parent.nullable);

    assert_eq!(nodes.incoming.len(), 1);
    let children = &nodes.incoming[0];
    assert_eq!(children.points_from, "nodes");
    assert_eq!(children.column, "parent_id");
    assert_eq!(children.cardinality, Cardinality::OneToMany);

    // `nodes` is already on the path, so the reference ends in a leaf.
    assert_eq!(nodes.include.to_string(), "nodes.{nodes}");
    assert_eq!(nodes.include.depth(), 2);
}

#[tokio::test]
async fn mutually_referencing_tables() {
    let catalog = FixtureCatalog::new()
        .table(
            TableFixture::new("a")
                .column("id", "bigint")
                .primary_key()
                .column("b_id", "bigint")
                .references("b", "id"),
        )
        .table(
            TableFixture::new("b")
                .column("id", "bigint")
                .primary_key()
                .column("a_id", "bigint")
                .references("a", "id"),
        );
    let config = Config::new()
        .table(TableConfig::new("a"))
        .table(TableConfig::new("b"));

    let model = assert_ok!(resolve(catalog, config).await);

    let a = model.table("a").unwrap();
    let b = model.table("b").unwrap();

    assert_eq!(a.outgoing[0].points_to, "b");
    assert_eq!(b.outgoing[0].points_to, "a");
    assert_eq!(a.incoming[0].points_from, "b");
    assert_eq!(b.incoming[0].points_from, "a");

    assert_eq!(a.include.to_string(), "a.{b.{a}}");
    assert_eq!(b.include.to_string(), "b.{a.{b}}");
}

#[tokio::test]
async fn unique_foreign_key_is_one_to_one() {
    let catalog = FixtureCatalog::new()
        .table(users_table())
        .table(
            TableFixture::new("profiles")
                .column("id", "bigint")
                .primary_key()
                .column("user_id", "int4")
                .not_null()
                .unique()
                .references("users", "id"),
        )
        .table(
            TableFixture::new("posts")
                .column("id", "bigint")
                .primary_key()
                .column("author_id", "int4")
                .not_null()
                .references("users", "id"),
        );
    let config = Config::new()
        .table(TableConfig::new("users"))
        .table(TableConfig::new("profiles"))
        .table(TableConfig::new("posts"));

    let model = assert_ok!(resolve(catalog, config).await);
    let users = model.table("users").unwrap();

    let profile = users
        .incoming
        .iter()
        .find(|r| r.points_from == "profiles")
        .unwrap();
    assert!(profile.is_one_to_one());
    assert_eq!(profile.field, "profile");

    let posts = users
        .incoming
        .iter()
        .find(|r| r.points_from == "posts")
        .unwrap();
    assert_eq!(posts.cardinality, Cardinality::OneToMany);
    assert_eq!(posts.field, "posts");

    let author = &model.table("posts").unwrap().outgoing[0];
    assert_eq!(author.field, "author");
    assert!(!author.nullable);

    assert_eq!(model.table("posts").unwrap().include.to_string(), "posts.{users}");
    assert_eq!(users.include.to_string(), "users");
}

#[tokio::test]
async fn several_keys_into_one_table_are_qualified() {
    let catalog = FixtureCatalog::new().table(users_table()).table(
        TableFixture::new("messages")
            .column("id", "bigint")
            .primary_key()
            .column("sender_id", "int4")
            .references("users", "id")
            .column("recipient_id", "int4")
            .references("users", "id"),
    );
    let config = Config::new()
        .table(TableConfig::new("users"))
        .table(TableConfig::new("messages"));

    let model = assert_ok!(resolve(catalog, config).await);

    let fields: Vec<_> = model
        .table("users")
        .unwrap()
        .incoming
        .iter()
        .map(|r| r.field.as_str())
        .collect();
    assert_eq!(fields, ["messages_by_sender_id", "messages_by_recipient_id"]);

    assert_eq!(
        model.table("messages").unwrap().include.to_string(),
        "messages.{users, users}"
    );
}

#[tokio::test]
async fn references_to_unconfigured_tables_are_skipped() {
    let catalog = FixtureCatalog::new().table(nodes_table()).table(
        TableFixture::new("tags")
            .column("id", "bigint")
            .primary_key()
            .column("node_id", "bigint")
            .references("nodes", "id"),
    );
    let config = Config::new().table(TableConfig::new("tags"));

    let model = assert_ok!(resolve(catalog, config).await);
    let tags = model.table("tags").unwrap();

    assert!(tags.outgoing.is_empty());
    assert_eq!(tags.include.to_string(), "tags");
    // The column still records what it points at.
    assert!(tags.column("node_id").unwrap().references.is_some());
}

#[tokio::test]
async fn outgoing_field_avoids_column_names() {
    let catalog = FixtureCatalog::new().table(nodes_table()).table(
        TableFixture::new("edges")
            .column("id", "bigint")
            .primary_key()
            .column("node", "text")
            .column("node_id", "bigint")
            .references("nodes", "id")
            .column("target", "bigint")
            .references("nodes", "id"),
    );
    let config = Config::new()
        .table(TableConfig::new("nodes"))
        .table(TableConfig::new("edges"));

    let model = assert_ok!(resolve(catalog, config).await);
    let fields: Vec<_> = model
        .table("edges")
        .unwrap()
        .outgoing
        .iter()
        .map(|r| r.field.as_str())
        .collect();

    assert_eq!(fields, ["node_id_ref", "target_ref"]);
}

#[tokio::test]
async fn deep_chain_stops_at_tables_on_the_path() {
    let mut catalog = FixtureCatalog::new();
    let mut config = Config::new();

    for (name, next) in [("t1", "t2"), ("t2", "t3"), ("t3", "t1")] {
        catalog = catalog.table(
            TableFixture::new(name)
                .column("id", "bigint")
                .primary_key()
                .column("next_id", "bigint")
                .references(next, "id")
                .column("first_id", "bigint")
                .references("t1", "id"),
        );
        config = config.table(TableConfig::new(name));
    }

    let model = assert_ok!(resolve(catalog, config).await);
    let include = &model.table("t1").unwrap().include;

    assert_eq!(include.to_string(), "t1.{t2.{t3.{t1, t1}, t1}, t1}");
    assert_eq!(include.depth(), 4);
}

#[tokio::test]
async fn table_reached_by_two_paths_is_expanded_on_both() {
    let catalog = FixtureCatalog::new()
        .table(TableFixture::new("teams").column("id", "bigint").primary_key())
        .table(
            users_table()
                .column("team_id", "bigint")
                .references("teams", "id"),
        )
        .table(
            TableFixture::new("posts")
                .column("id", "bigint")
                .primary_key()
                .column("author_id", "int4")
                .references("users", "id")
                .column("editor_id", "int4")
                .references("users", "id"),
        );
    let config = Config::new()
        .table(TableConfig::new("teams"))
        .table(TableConfig::new("users"))
        .table(TableConfig::new("posts"));

    let model = assert_ok!(resolve(catalog, config).await);
    let include = &model.table("posts").unwrap().include;

    assert_eq!(include.to_string(), "posts.{users.{teams}, users.{teams}}");

    let fields: Vec<_> = include
        .includes
        .iter()
        .map(|edge| (edge.field.as_str(), edge.spec.includes[0].field.as_str()))
        .collect();
    assert_eq!(fields, [("author", "team"), ("editor", "team")]);
    assert_eq!(include.len(), 5);
}
