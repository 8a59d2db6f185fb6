use tracing::debug;
use crate::types::{ElementType, Member, MemberKind, MessageType, Primitive, Schema};

const TAG_PREFIX: &str = "_BOR_MSG_SCHEMA_";
const ARRAY_BASE: &str = "_BOR_MSG_SCHEMA_ARR_BASE";
const OFFSET_MACRO: &str = "_BOR_MSG_SCHEMA_OFFSET";
const FIELD_TYPE: &str = "bor_msg_schema_field_t";
const SCHEMA_TYPE: &str = "bor_msg_schema_t";

/// Offset slot value of fields that have no length or capacity.
pub const NO_OFFSET: &str = "-1";

fn primitive_tag(p: Primitive) -> String {
    format!("{}{}", TAG_PREFIX, p.name().to_uppercase())
}

fn message_tag() -> String {
    format!("{}MSG", TAG_PREFIX)
}

fn offset_of(message: &str, field: &str) -> String {
    format!("{}({}, {})", OFFSET_MACRO, message, field)
}

fn default_name(message: &str) -> String {
    format!("__{}_default", message)
}

fn fields_name(message: &str) -> String {
    format!("__{}_fields", message)
}

fn schema_name(message: &str) -> String {
    format!("schema_{}", message)
}

fn field_row(owner: &MessageType, member: &Member) -> String {
    let offset = offset_of(&owner.name, &member.name);
    let (tag, size_offset, alloc_offset, sub) = match &member.kind {
        MemberKind::Scalar(p) => (primitive_tag(*p), NO_OFFSET.to_string(), NO_OFFSET.to_string(), None),
        MemberKind::Nested(name) => (message_tag(), NO_OFFSET.to_string(), NO_OFFSET.to_string(), Some(name)),
        MemberKind::Array(element) => {
            let (base, sub) = match element {
                ElementType::Primitive(p) => (primitive_tag(*p), None),
                ElementType::Message(name) => (message_tag(), Some(name)),
            };
            (
                format!("{} + {}", ARRAY_BASE, base),
                offset_of(&owner.name, &member.size_field()),
                offset_of(&owner.name, &member.alloc_field()),
                sub,
            )
        }
    };
    let sub = match sub {
        Some(name) => format!("&{}", schema_name(name)),
        None => "NULL".to_string(),
    };

    format!("    {{{}, {}, {}, {}, {}}}", tag, offset, size_offset, alloc_offset, sub)
}

fn generate_default(message: &MessageType) -> String {
    format!(
        "static {} {} = {};\n",
        message.name,
        default_name(&message.name),
        message.default_value().render()
    )
}

fn generate_descriptor(message: &MessageType) -> String {
    let rows: Vec<String> = message
        .members
        .iter()
        .map(|m| field_row(message, m))
        .collect();

    let mut lines = Vec::new();
    lines.push(format!("static {} {}[] = {{", FIELD_TYPE, fields_name(&message.name)));
    lines.push(rows.join(",\n"));
    lines.push("};".to_string());
    lines.push(format!("static {} {} = {{", SCHEMA_TYPE, schema_name(&message.name)));
    lines.push(format!("    {},", message.id));
    lines.push(format!("    sizeof({}),", message.name));
    lines.push(format!("    {},", message.members.len()));
    lines.push(format!("    {},", fields_name(&message.name)));
    lines.push(format!("    &{}", default_name(&message.name)));
    lines.push("};".to_string());
    lines.push(String::new());
    lines.push(String::new());
    lines.join("\n")
}

/// Renders the reflection tables: every default singleton first, then the
/// field descriptors and struct descriptor of each message. A nested field
/// points at the descriptor of a message emitted before it.
pub fn compile_schema_to_descriptors(schema: &Schema) -> String {
    let mut out = String::new();
    for message in &schema.messages {
        out.push_str(&generate_default(message));
    }
    out.push('\n');
    for message in &schema.messages {
        out.push_str(&generate_descriptor(message));
    }
    debug!(messages = schema.messages.len(), bytes = out.len(), "emitted schema");
    out
}
