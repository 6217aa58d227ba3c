//! `quell` is a server-side GraphQL runtime: a type system and schema
//! builder, an executor with pluggable field scheduling, and
//! introspection.
//!
//! The language layer (lexing, parsing, printing) lives in the
//! `quell-parser` crate and is re-exported here.
//!
//! # Example
//!
//! ```
//! use quell::Field;
//! use quell::ObjectType;
//! use quell::Resolved;
//! use quell::Schema;
//! use quell::TypeAnnotation;
//! use quell::Value;
//! use quell::execute::ExecuteParams;
//! use quell::execute::execute;
//!
//! let query = ObjectType::builder("Query")
//!     .field(
//!         Field::new("hello", TypeAnnotation::named("String"))
//!             .resolve(|_| Ok(Resolved::Value(Value::String("world".to_string())))),
//!     )
//!     .build();
//! let schema = Schema::builder().query(query).build().unwrap();
//!
//! let document = quell::parse("{ hello }").unwrap();
//! let response = execute(ExecuteParams::new(&schema, &document));
//! assert!(response.is_ok());
//! assert_eq!(
//!     response.to_json(),
//!     serde_json::json!({"data": {"hello": "world"}}),
//! );
//! ```

pub mod execute;
mod introspection;
mod loader;
mod request;
mod resolve;
pub mod schema;
mod subscribe;
pub mod types;
pub mod validation;
mod value;
mod values;

pub use execute::ExecuteParams;
pub use execute::ExecutionError;
pub use execute::FieldStrategy;
pub use execute::ParallelStrategy;
pub use execute::RequestContext;
pub use execute::Response;
pub use execute::SerialStrategy;
pub use execute::execute;
pub use loader::Loader;
pub use request::Request;
pub use request::RequestParams;
pub use request::run_request;
pub use resolve::FieldError;
pub use resolve::OpaqueValue;
pub use resolve::ResolveInfo;
pub use resolve::ResolveParams;
pub use resolve::Resolved;
pub use resolve::Resolver;
pub use resolve::Thunk;
pub use subscribe::ResponseStream;
pub use subscribe::SubscribeParams;
pub use subscribe::SubscribeResult;
pub use subscribe::subscribe;
pub use value::Value;

// The most commonly used type-system and schema names, re-exported at the
// crate root.
pub use schema::Schema;
pub use schema::SchemaBuildError;
pub use schema::SchemaBuilder;
pub use types::Argument;
pub use types::DirectiveDef;
pub use types::EnumType;
pub use types::EnumValue;
pub use types::Field;
pub use types::InputField;
pub use types::InputObjectType;
pub use types::InterfaceType;
pub use types::ObjectType;
pub use types::ScalarType;
pub use types::TypeAnnotation;
pub use types::TypeDef;
pub use types::TypeKind;
pub use types::UnionType;

// The language layer, re-exported from `quell-parser`.
pub use quell_parser::ParseOptions;
pub use quell_parser::Source;
pub use quell_parser::SourceLocation;
pub use quell_parser::SyntaxError;
pub use quell_parser::ast;
pub use quell_parser::parse;
pub use quell_parser::parse_with_options;
pub use quell_parser::printer;
