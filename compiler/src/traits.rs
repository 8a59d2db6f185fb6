use crate::types::Schema;

/// Turns a parsed schema into one textual artifact.
pub trait Emitter {
    fn emit(&self, schema: &Schema) -> String;
}
