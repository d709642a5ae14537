//! Helpers called by generated accessors at run time.

use crate::{Error, Result};

/// Reduces the rows of a single-result query to its one row.
///
/// Zero rows is a not-found error, the error callers branch on for "no such
/// record". More than one row is a too-many-records error: a single-result
/// query matching several rows is a bug in the query, and silently picking
/// one would hide it. Every single-result accessor shares this policy.
pub fn expect_one<T>(rows: impl IntoIterator<Item = T>, context: &str) -> Result<T> {
    let mut rows = rows.into_iter();

    let Some(row) = rows.next() else {
        return Err(Error::record_not_found(context));
    };

    if rows.next().is_some() {
        return Err(Error::too_many_records(format!(
            "{context}: expected one row"
        )));
    }

    Ok(row)
}

/// Unwraps a finite timestamp read through [`postgres_types::Timestamp`].
pub fn finite<T>(value: postgres_types::Timestamp<T>) -> Result<T> {
    match value {
        postgres_types::Timestamp::Value(value) => Ok(value),
        postgres_types::Timestamp::PosInfinity => bail!("timestamp is `infinity`"),
        postgres_types::Timestamp::NegInfinity => bail!("timestamp is `-infinity`"),
    }
}
