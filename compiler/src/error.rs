use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: invalid input line: {content}")]
    MalformedLine {
        line:    usize,
        content: String,
    },

    #[error("line {line}: unknown type {name}: {content}")]
    UnknownType {
        name:    String,
        line:    usize,
        content: String,
    },

    #[error("line {line}: {msg}: {content}")]
    DuplicateTypeOrId {
        msg:     String,
        line:    usize,
        content: String,
    },

    #[error("line {line}: exceeded maximal number of members ({max}) in {name}: {content}")]
    MemberLimitExceeded {
        name:    String,
        max:     usize,
        line:    usize,
        content: String,
    },

    #[error("line {line}: struct id {id} is out of range, the maximal struct id is 255: {content}")]
    StructIdOutOfRange {
        id:      String,
        line:    usize,
        content: String,
    },

    #[error("line {line}: array member {name} cannot have a default value: {content}")]
    ArrayWithDefault {
        name:    String,
        line:    usize,
        content: String,
    },

    #[error("line {line}: member {name} of message type cannot have a default value: {content}")]
    MessageWithDefault {
        name:    String,
        line:    usize,
        content: String,
    },

    #[error("line {line}: member {name} is declared twice: {content}")]
    DuplicateMember {
        name:    String,
        line:    usize,
        content: String,
    },

    #[error("line {line}: message {name} has no members: {content}")]
    EmptyMessage {
        name:    String,
        line:    usize,
        content: String,
    },

    #[error("line {line}: message {name} is never closed")]
    UnterminatedMessage {
        name: String,
        line: usize,
    },

    #[error("no message definitions found")]
    EmptySchema,
}

impl SchemaError {
    /// 1-based input line the error was detected on, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            SchemaError::Io(_) | SchemaError::Json(_) | SchemaError::EmptySchema => None,
            SchemaError::MalformedLine { line, .. }
            | SchemaError::UnknownType { line, .. }
            | SchemaError::DuplicateTypeOrId { line, .. }
            | SchemaError::MemberLimitExceeded { line, .. }
            | SchemaError::StructIdOutOfRange { line, .. }
            | SchemaError::ArrayWithDefault { line, .. }
            | SchemaError::MessageWithDefault { line, .. }
            | SchemaError::DuplicateMember { line, .. }
            | SchemaError::EmptyMessage { line, .. }
            | SchemaError::UnterminatedMessage { line, .. } => Some(*line),
        }
    }
}
