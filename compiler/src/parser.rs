use std::mem;
use tracing::debug;
use crate::{
    error::SchemaError,
    registry::{RegisterError, TypeRegistry},
    resolver::{resolve_member, RawMember},
    tokenizer::{
        parse_struct_id, split_comment, split_lines, tokenize, SourceLine, ARRAY_SUFFIX,
        IDENTIFIER, MSG_KEYWORD, TYPE_TOKEN,
    },
    types::{Member, MessageType, Schema, MAX_STRUCT_ID},
    utils::quote,
};

/// Message whose body is being parsed.
#[derive(Debug)]
struct OpenMessage {
    name:         String,
    id:           u8,
    line:         usize,
    header:       String,
    leading_text: String,
    members:      Vec<Member>,
}

#[derive(Debug)]
enum State {
    /// Collecting verbatim text between definitions.
    Outside,
    Inside(OpenMessage),
}

/// Parses schema text into fully resolved message types, in declaration
/// order. Fails on the first offending line.
pub fn parse_schema(text: &str) -> Result<Schema, SchemaError> {
    let mut registry = TypeRegistry::new();
    let mut verbatim = String::new();
    let mut state = State::Outside;

    for line in split_lines(text) {
        state = match state {
            State::Outside => parse_outside(&mut registry, &mut verbatim, &line)?,
            State::Inside(open) => parse_inside(&mut registry, open, &line)?,
        };
    }

    if let State::Inside(open) = state {
        return Err(SchemaError::UnterminatedMessage {
            name: quote(&open.name),
            line: open.line,
        });
    }

    let mut messages = registry.into_messages();
    let last = messages.last_mut().ok_or(SchemaError::EmptySchema)?;
    last.trailing_text = verbatim;

    Ok(Schema { messages })
}

fn malformed(line: &SourceLine) -> SchemaError {
    SchemaError::MalformedLine {
        line:    line.number,
        content: line.content(),
    }
}

fn parse_outside(
    registry: &mut TypeRegistry,
    verbatim: &mut String,
    line: &SourceLine,
) -> Result<State, SchemaError> {
    let tokens = tokenize(line.raw);
    let is_header = tokens.first() == Some(&MSG_KEYWORD) && tokens.last() == Some(&"{");
    if !is_header {
        verbatim.push_str(line.raw);
        return Ok(State::Outside);
    }

    let (name, id_token) = match tokens.as_slice() {
        [_, name, id, _] if IDENTIFIER.is_match(name) => (*name, *id),
        _ => return Err(malformed(line)),
    };

    let id = match parse_struct_id(id_token) {
        None => return Err(malformed(line)),
        Some(Some(id)) if id <= MAX_STRUCT_ID => id as u8,
        Some(_) => {
            return Err(SchemaError::StructIdOutOfRange {
                id:      id_token.to_string(),
                line:    line.number,
                content: line.content(),
            })
        }
    };

    registry.register(name, id).map_err(|e| {
        let msg = match e {
            RegisterError::DuplicateName(name) => {
                format!("the type {} is defined twice", quote(&name))
            }
            RegisterError::DuplicateId(id, owner) => {
                format!("the struct id {} is already used by {}", id, quote(&owner))
            }
        };
        SchemaError::DuplicateTypeOrId {
            msg,
            line:    line.number,
            content: line.content(),
        }
    })?;

    debug!(name, id, line = line.number, "opened message");

    Ok(State::Inside(OpenMessage {
        name:         name.to_string(),
        id,
        line:         line.number,
        header:       line.content(),
        leading_text: mem::take(verbatim),
        members:      Vec::new(),
    }))
}

fn parse_inside(
    registry: &mut TypeRegistry,
    mut open: OpenMessage,
    line: &SourceLine,
) -> Result<State, SchemaError> {
    let (declaration, comment) = split_comment(line.raw);
    let tokens = tokenize(declaration);

    match tokens.as_slice() {
        // Blank, or a comment with no declaration; the comment text is dropped.
        [] => Ok(State::Inside(open)),
        ["}"] => {
            if open.members.is_empty() {
                return Err(SchemaError::EmptyMessage {
                    name:    quote(&open.name),
                    line:    open.line,
                    content: open.header,
                });
            }
            debug!(name = %open.name, members = open.members.len(), "sealed message");
            registry.seal(MessageType {
                name:          open.name,
                id:            open.id,
                line:          open.line,
                members:       open.members,
                leading_text:  open.leading_text,
                trailing_text: String::new(),
            });
            Ok(State::Outside)
        }
        _ => {
            let raw = parse_member(&tokens, comment, line)?;
            let member = resolve_member(registry, &open.name, &open.members, raw, line)?;
            open.members.push(member);
            Ok(State::Inside(open))
        }
    }
}

/// Accepts `type name`, `type name = default...` and the short
/// `type name default` form, whose default may be wrapped in braces.
/// The array marker goes on either the type or the name.
fn parse_member(
    tokens: &[&str],
    comment: Option<&str>,
    line: &SourceLine,
) -> Result<RawMember, SchemaError> {
    let (type_token, name, default) = match tokens {
        [ty, name] => (*ty, *name, None),
        [ty, name, "=", rest @ ..] if !rest.is_empty() => (*ty, *name, Some(rest.join(" "))),
        [ty, name, value] if *value != "=" => {
            // `int x =5` is `int x = 5`.
            let value = match value.strip_prefix('=') {
                Some(rest) => rest,
                None => value.trim_matches(|c: char| c == '{' || c == '}'),
            };
            if value.is_empty() {
                return Err(malformed(line));
            }
            (*ty, *name, Some(value.to_string()))
        }
        _ => return Err(malformed(line)),
    };

    // `float v[]` is accepted as a spelling of `float[] v`.
    let (type_token, name) = match name.strip_suffix(ARRAY_SUFFIX) {
        Some(base) if !type_token.ends_with(ARRAY_SUFFIX) => (format!("{}{}", type_token, ARRAY_SUFFIX), base),
        Some(_) => return Err(malformed(line)),
        None => (type_token.to_string(), name),
    };

    if !TYPE_TOKEN.is_match(&type_token) || !IDENTIFIER.is_match(name) {
        return Err(malformed(line));
    }

    Ok(RawMember {
        type_token,
        name:       name.to_string(),
        default,
        comment:    comment.map(str::to_string),
    })
}
