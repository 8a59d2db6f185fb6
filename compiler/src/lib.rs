//! msg-schema-compiler
//!
//! This crate implements:
//!  1) A line-oriented parser for `.sch` message schema files,
//!  2) The type registry and member resolution (kinds, limits, defaults),
//!  3) Code generation of C structure layouts (`compile_schema_to_layout`),
//!  4) Code generation of reflection tables (`compile_schema_to_descriptors`)
//!     for the generic message runtime,
//!  5) The error type (`SchemaError`) and the `Emitter` trait.

pub mod error;
pub mod types;
pub mod utils;
pub mod tokenizer;
pub mod registry;
pub mod resolver;
pub mod parser;
pub mod compiler;
pub mod gen_layout;
pub mod gen_schema;
pub mod traits;

pub use compiler::{compile, compile_to, schema_to_json, Artifacts, LayoutEmitter, Mode, SchemaEmitter};
pub use error::SchemaError;
pub use gen_layout::compile_schema_to_layout;
pub use gen_schema::compile_schema_to_descriptors;
pub use parser::parse_schema;
pub use traits::Emitter;
