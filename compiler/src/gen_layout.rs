use tracing::debug;
use crate::types::{ElementType, Member, MemberKind, MessageType, Schema};

/// C type of a member's value field, without the pointer marker.
fn c_type(kind: &MemberKind) -> &str {
    match kind {
        MemberKind::Scalar(p) => p.c_type(),
        MemberKind::Nested(name) => name.as_str(),
        MemberKind::Array(ElementType::Primitive(p)) => p.c_type(),
        MemberKind::Array(ElementType::Message(name)) => name.as_str(),
    }
}

fn generate_member(member: &Member, out: &mut String) {
    let pointer = if member.kind.is_array() { "*" } else { "" };
    let comment = member.trailing_comment.as_deref().unwrap_or("");
    out.push_str(&format!(
        "    {} {}{};{}\n",
        c_type(&member.kind),
        pointer,
        member.name,
        comment
    ));

    if member.kind.is_array() {
        out.push_str(&format!("    int {};\n", member.size_field()));
        out.push_str(&format!("    int {};\n", member.alloc_field()));
    }
}

fn generate_struct(message: &MessageType, out: &mut String) {
    out.push_str(&message.leading_text);
    out.push_str(&format!("struct _{} {{\n", message.name));
    for member in &message.members {
        generate_member(member, out);
    }
    out.push_str("};\n");
    out.push_str(&format!("typedef struct _{0} {0};\n", message.name));
    out.push_str(&message.trailing_text);
}

/// Renders every message as a C structure declaration plus typedef,
/// surrounded by the verbatim text that accompanied it in the schema.
pub fn compile_schema_to_layout(schema: &Schema) -> String {
    let mut out = String::new();
    for message in &schema.messages {
        generate_struct(message, &mut out);
    }
    debug!(messages = schema.messages.len(), bytes = out.len(), "emitted layout");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    #[test]
    fn test_point_layout() {
        let schema = parse_schema("msg Point 1 {\n    float x\n    float y\n}\n").unwrap();
        assert_eq!(
            compile_schema_to_layout(&schema),
            "struct _Point {\n    float x;\n    float y;\n};\ntypedef struct _Point Point;\n"
        );
    }

    #[test]
    fn test_array_and_nested_layout() {
        let input = "\
// header
msg Point 1 {
    int32 x ; first
}
msg Poly 2 {
    Point[] pts ; vertices
    Point center
    uchar[] tag
}
// footer
";
        let schema = parse_schema(input).unwrap();
        let expected = "\
// header
struct _Point {
    int32_t x; first
};
typedef struct _Point Point;
struct _Poly {
    Point *pts; vertices
    int pts_size;
    int pts_alloc;
    Point center;
    unsigned char *tag;
    int tag_size;
    int tag_alloc;
};
typedef struct _Poly Poly;
// footer
";
        assert_eq!(compile_schema_to_layout(&schema), expected);
    }
}
