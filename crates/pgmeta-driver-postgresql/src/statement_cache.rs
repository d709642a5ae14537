use std::{
    borrow::Cow,
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use postgres::{Error, Statement};
use postgres_types::Type;
use tokio_postgres::Client;

/// Prepared statements keyed by SQL text and parameter type hints.
///
/// Shared by concurrent describe calls. The lock is never held across an
/// await; two calls racing on the same key both prepare, and the second
/// insert replaces an equivalent statement.
#[derive(Debug, Default)]
pub struct StatementCache {
    map: Mutex<HashMap<Key<'static>, Statement>>,
}

impl StatementCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str, types: &[Type]) -> Option<Statement> {
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&Key::new(query, types))
            .map(ToOwned::to_owned)
    }

    pub fn insert(&self, query: &str, types: &[Type], statement: Statement) {
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(Key::new(query, types).into_owned(), statement);
    }

    pub fn len(&self) -> usize {
        self.map.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub async fn prepare_typed(
        &self,
        client: &Client,
        query: &str,
        types: &[Type],
    ) -> Result<Statement, Error> {
        if let Some(statement) = self.get(query, types) {
            Ok(statement)
        } else {
            let stmt = client.prepare_typed(query, types).await?;
            self.insert(query, types, stmt.clone());
            Ok(stmt)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Key<'a> {
    query: Cow<'a, str>,
    types: Cow<'a, [Type]>,
}

impl<'a> Key<'a> {
    #[must_use]
    pub fn new(query: &'a str, types: &'a [Type]) -> Self {
        Self {
            query: query.into(),
            types: types.into(),
        }
    }

    pub fn into_owned(self) -> Key<'static> {
        Key::<'static> {
            query: self.query.into_owned().into(),
            types: self.types.into_owned().into(),
        }
    }
}
