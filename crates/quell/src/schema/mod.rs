//! Schema finalization: the immutable [`Schema`] and the
//! [`SchemaBuilder`] that materializes and validates it.

#[allow(clippy::module_inception)]
mod schema;
mod schema_build_error;
mod schema_builder;

pub use schema::Schema;
pub use schema_build_error::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
