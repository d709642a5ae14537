#[macro_export]
macro_rules! assert_eq_unordered {
    ($actual:expr, $expect:expr) => {
        let mut vals = std::collections::HashSet::new();

        for val in $actual {
            assert!(vals.insert(val));
        }

        for val in $expect {
            assert!(vals.remove(val), "`{:#?}` missing", val);
        }

        assert!(vals.is_empty(), "unexpected values: {:#?}", vals);
    };
}

/// Asserts that an expression is an error satisfying the given predicate
/// and returns the error.
#[macro_export]
macro_rules! assert_err_kind {
    ($e:expr, $pred:ident) => {{
        let err = $crate::assert_err!($e);
        assert!(err.$pred(), "expected `{}`; error={}", stringify!($pred), err);
        err
    }};
}
