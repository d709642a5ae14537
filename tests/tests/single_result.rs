use pgmeta::runtime::expect_one;
use pretty_assertions::assert_eq;
use tests::prelude::*;

#[test]
fn no_rows_is_record_not_found() {
    let err = assert_err_kind!(
        expect_one(Vec::<u8>::new(), "query `GetUser`"),
        is_record_not_found
    );
    assert_eq!(err.to_string(), "record not found: query `GetUser`");
}

#[test]
fn one_row() {
    assert_eq!(assert_ok!(expect_one(["a"], "query `GetUser`")), "a");
}

#[test]
fn more_than_one_row_is_an_error() {
    let err = assert_err_kind!(
        expect_one(["a", "b"], "query `GetUser`"),
        is_too_many_records
    );
    assert!(!err.is_record_not_found());
}

#[test]
fn context_does_not_hide_the_kind() {
    let err = expect_one(Vec::<u8>::new(), "query `GetUser`")
        .map_err(|err| err.context(pgmeta_core::err!("GetUser(7)")))
        .unwrap_err();
    assert!(err.is_record_not_found());
    assert_eq!(err.to_string(), "GetUser(7): record not found: query `GetUser`");
}
