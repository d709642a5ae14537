#[macro_use]
mod error;
pub use error::Error;

pub mod catalog;
pub use catalog::Catalog;

pub mod config;
pub use config::Config;

pub mod query;

pub mod schema;

pub mod runtime;

pub mod ty;

/// A Result type alias that uses pgmeta's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
