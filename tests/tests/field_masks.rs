use pgmeta::schema::FieldSet;
use pretty_assertions::assert_eq;
use tests::prelude::*;

fn wide_table(columns: usize) -> TableFixture {
    let mut table = TableFixture::new("wide")
        .column("id", "bigserial")
        .primary_key()
        .has_default();

    for i in 1..columns {
        table = table.column(&format!("c{i}"), "int4");
    }

    table
}

#[tokio::test]
async fn bits_follow_column_order() {
    let config = Config::new().table(TableConfig::new("users"));
    let model = assert_ok!(resolve(FixtureCatalog::new().table(users_table()), config).await);
    let layout = model.layout("users").unwrap();

    let columns: Vec<_> = layout.columns().collect();
    assert_eq!(
        columns,
        [("id", 0), ("email", 1), ("nickname", 2), ("deleted_at", 3)]
    );
    assert_eq!(layout.max_index(), Some(3));

    assert_eq!(layout.all(), &(0..4).collect::<FieldSet>());
    assert_eq!(layout.mutable(), &layout.mask(["email", "nickname", "deleted_at"]));
    assert_eq!(layout.defaultable(), &layout.mask(["id"]));
}

#[tokio::test]
async fn bits_follow_ordinal_not_fetch_order() {
    let catalog = FixtureCatalog::new().table(users_table().shuffle_last_to_front());
    let config = Config::new().table(TableConfig::new("users"));

    let model = assert_ok!(resolve(catalog, config).await);
    let layout = model.layout("users").unwrap();

    assert_eq!(layout.index_of("id"), Some(0));
    assert_eq!(layout.index_of("deleted_at"), Some(3));
}

#[tokio::test]
async fn excluded_columns_get_no_bit() {
    let config = Config::new().table(TableConfig::new("users").exclude_columns(["email"]));
    let model = assert_ok!(resolve(FixtureCatalog::new().table(users_table()), config).await);
    let layout = model.layout("users").unwrap();

    assert_eq!(layout.index_of("email"), None);
    let columns: Vec<_> = layout.columns().collect();
    assert_eq!(columns, [("id", 0), ("nickname", 1), ("deleted_at", 2)]);
    assert_eq!(layout.all().len(), 3);
}

#[tokio::test]
async fn masks_wider_than_one_word() {
    let config = Config::new().table(TableConfig::new("wide"));
    let model = assert_ok!(resolve(FixtureCatalog::new().table(wide_table(70)), config).await);
    let layout = model.layout("wide").unwrap();

    assert_eq!(layout.len(), 70);
    assert_eq!(layout.max_index(), Some(69));
    assert_eq!(layout.all().len(), 70);
    assert_eq!(layout.mutable().len(), 69);
    assert!(!layout.mutable().contains(0));
    assert!(layout.mutable().contains(69));

    // Equality compares every word, regardless of construction order.
    let forward = layout.mask(["c1", "c65", "c69"]);
    let backward = layout.mask(["c69", "c65", "c1"]);
    assert_eq!(forward, backward);
    assert_ne!(forward, layout.mask(["c1", "c65"]));
    assert_ne!(forward, layout.mask(["c1", "c65", "c68"]));

    assert!(forward.is_subset(layout.mutable()));
    assert!(layout.mutable().is_subset(layout.all()));
    assert!(!layout.all().is_subset(layout.mutable()));

    let names: Vec<_> = layout.columns().map(|(name, _)| name).collect();
    assert_eq!(&layout.mask(names), layout.all());
}

#[tokio::test]
async fn unknown_names_are_ignored_by_masks() {
    let config = Config::new().table(TableConfig::new("users"));
    let model = assert_ok!(resolve(FixtureCatalog::new().table(users_table()), config).await);
    let layout = model.layout("users").unwrap();

    assert_eq!(layout.mask(["email", "nope"]), layout.mask(["email"]));
    assert!(layout.mask(["nope"]).is_empty());
}
