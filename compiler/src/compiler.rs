use tracing::debug;
use crate::{
    error::SchemaError,
    gen_layout::compile_schema_to_layout,
    gen_schema::compile_schema_to_descriptors,
    parser::parse_schema,
    traits::Emitter,
    types::Schema,
};

/// Emits the C structure declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEmitter;

impl Emitter for LayoutEmitter {
    fn emit(&self, schema: &Schema) -> String {
        compile_schema_to_layout(schema)
    }
}

/// Emits the reflection tables consumed by the message runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaEmitter;

impl Emitter for SchemaEmitter {
    fn emit(&self, schema: &Schema) -> String {
        compile_schema_to_descriptors(schema)
    }
}

/// Which artifact a compilation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Layout,
    Schema,
}

impl Mode {
    pub fn emitter(self) -> &'static dyn Emitter {
        match self {
            Mode::Layout => &LayoutEmitter,
            Mode::Schema => &SchemaEmitter,
        }
    }
}

/// Both artifacts of one compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub layout: String,
    pub schema: String,
}

/// Parses `text` and renders both artifacts.
pub fn compile(text: &str) -> Result<Artifacts, SchemaError> {
    let schema = parse_schema(text)?;
    Ok(Artifacts {
        layout: LayoutEmitter.emit(&schema),
        schema: SchemaEmitter.emit(&schema),
    })
}

/// Parses `text` and renders the artifact selected by `mode`.
/// Nothing is produced unless the whole input is valid.
pub fn compile_to(text: &str, mode: Mode) -> Result<String, SchemaError> {
    let schema = parse_schema(text)?;
    debug!(?mode, messages = schema.messages.len(), "compiling");
    Ok(mode.emitter().emit(&schema))
}

/// Pretty JSON dump of the parsed model.
pub fn schema_to_json(schema: &Schema) -> Result<String, SchemaError> {
    Ok(serde_json::to_string_pretty(schema)?)
}
