mod model;
pub use model::Model;

mod resolver;
pub use resolver::Resolver;

pub use pgmeta_core::{
    catalog, config, query, runtime, schema, ty, Catalog, Config, Error, Result,
};
