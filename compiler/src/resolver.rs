use tracing::trace;
use crate::{
    error::SchemaError,
    registry::{Resolved, TypeRegistry},
    tokenizer::{SourceLine, ARRAY_SUFFIX},
    types::{DefaultValue, ElementType, Member, MemberKind, MAX_MEMBERS},
    utils::quote,
};

/// A member declaration as written, before any lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMember {
    pub type_token: String,
    pub name:       String,
    pub default:    Option<String>,
    pub comment:    Option<String>,
}

/// Turns a raw declaration into the next member of `owner`.
///
/// `existing` are the members already declared in the same body; the new
/// member gets the next sequential id.
pub fn resolve_member(
    registry: &TypeRegistry,
    owner: &str,
    existing: &[Member],
    raw: RawMember,
    line: &SourceLine,
) -> Result<Member, SchemaError> {
    let (base, is_array) = match raw.type_token.strip_suffix(ARRAY_SUFFIX) {
        Some(base) => (base, true),
        None => (raw.type_token.as_str(), false),
    };

    if is_array && raw.default.is_some() {
        return Err(SchemaError::ArrayWithDefault {
            name:    quote(&raw.name),
            line:    line.number,
            content: line.content(),
        });
    }

    let resolved = registry.resolve(base).ok_or_else(|| SchemaError::UnknownType {
        name:    quote(base),
        line:    line.number,
        content: line.content(),
    })?;

    if existing.len() >= MAX_MEMBERS {
        return Err(SchemaError::MemberLimitExceeded {
            name:    quote(owner),
            max:     MAX_MEMBERS,
            line:    line.number,
            content: line.content(),
        });
    }

    if clashes(existing, &raw.name, is_array) {
        return Err(SchemaError::DuplicateMember {
            name:    quote(&raw.name),
            line:    line.number,
            content: line.content(),
        });
    }

    let (kind, default) = match (resolved, is_array) {
        (Resolved::Primitive(p), true) => (MemberKind::Array(ElementType::Primitive(p)), DefaultValue::EmptyArray),
        (Resolved::Message(m), true) => (MemberKind::Array(ElementType::Message(m.name.clone())), DefaultValue::EmptyArray),
        (Resolved::Primitive(p), false) => {
            let default = match &raw.default {
                Some(text) => DefaultValue::Literal(text.clone()),
                None => DefaultValue::Zero(p),
            };
            (MemberKind::Scalar(p), default)
        }
        (Resolved::Message(m), false) => {
            if raw.default.is_some() {
                return Err(SchemaError::MessageWithDefault {
                    name:    quote(&raw.name),
                    line:    line.number,
                    content: line.content(),
                });
            }
            (MemberKind::Nested(m.name.clone()), m.default_value())
        }
    };

    trace!(owner, member = %raw.name, ?kind, "resolved member");

    Ok(Member {
        id: existing.len(),
        name: raw.name,
        line: line.number,
        kind,
        explicit_default: raw.default,
        default,
        trailing_comment: raw.comment,
    })
}

/// Whether `name` (and, for arrays, its generated bookkeeping fields)
/// collides with a field already present in the layout.
fn clashes(existing: &[Member], name: &str, is_array: bool) -> bool {
    let mut taken: Vec<String> = Vec::new();
    for member in existing {
        taken.push(member.name.clone());
        if member.kind.is_array() {
            taken.push(member.size_field());
            taken.push(member.alloc_field());
        }
    }

    let mut wanted = vec![name.to_string()];
    if is_array {
        wanted.push(format!("{}_size", name));
        wanted.push(format!("{}_alloc", name));
    }
    wanted.iter().any(|w| taken.contains(w))
}
