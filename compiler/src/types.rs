use serde::Serialize;

/// Maximal number of members a single message may declare.
pub const MAX_MEMBERS: usize = 31;

/// Maximal numeric id of a message.
pub const MAX_STRUCT_ID: u64 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
}

/// `(kind, schema name, C storage type)`, in declaration order of `Primitive`.
pub const PRIMITIVES: [(Primitive, &str, &str); 18] = [
    (Primitive::Int8,   "int8",   "int8_t"),
    (Primitive::UInt8,  "uint8",  "uint8_t"),
    (Primitive::Int16,  "int16",  "int16_t"),
    (Primitive::UInt16, "uint16", "uint16_t"),
    (Primitive::Int32,  "int32",  "int32_t"),
    (Primitive::UInt32, "uint32", "uint32_t"),
    (Primitive::Int64,  "int64",  "int64_t"),
    (Primitive::UInt64, "uint64", "uint64_t"),
    (Primitive::Char,   "char",   "char"),
    (Primitive::UChar,  "uchar",  "unsigned char"),
    (Primitive::Short,  "short",  "short"),
    (Primitive::UShort, "ushort", "unsigned short"),
    (Primitive::Int,    "int",    "int"),
    (Primitive::UInt,   "uint",   "unsigned int"),
    (Primitive::Long,   "long",   "long"),
    (Primitive::ULong,  "ulong",  "unsigned long"),
    (Primitive::Float,  "float",  "float"),
    (Primitive::Double, "double", "double"),
];

impl Primitive {
    /// Name used in schema files.
    pub fn name(self) -> &'static str {
        PRIMITIVES[self as usize].1
    }

    /// C storage type of the field.
    pub fn c_type(self) -> &'static str {
        PRIMITIVES[self as usize].2
    }

    /// C literal used when a member has no explicit default.
    pub fn zero_literal(self) -> String {
        match self {
            Primitive::Float  => "0.f".to_string(),
            Primitive::Double => "0.".to_string(),
            other             => format!("({})0", other.c_type()),
        }
    }

    pub fn from_name(name: &str) -> Option<Primitive> {
        PRIMITIVES.iter().find(|(_, n, _)| *n == name).map(|(p, _, _)| *p)
    }
}

/// Element type of an array member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "lowercase")]
pub enum ElementType {
    Primitive(Primitive),
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "lowercase")]
pub enum MemberKind {
    Scalar(Primitive),
    /// Embedded message, referenced by name.
    Nested(String),
    Array(ElementType),
}

impl MemberKind {
    pub fn is_array(&self) -> bool {
        matches!(self, MemberKind::Array(_))
    }
}

/// Computed default of a member or of a whole message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    /// Explicit literal from the schema, copied verbatim.
    Literal(String),
    Zero(Primitive),
    /// Null data pointer with zero length and zero capacity.
    EmptyArray,
    Aggregate(Vec<DefaultValue>),
}

impl DefaultValue {
    /// Renders the value as a C initializer fragment.
    ///
    /// Arrays occupy three consecutive fields in the layout, so their
    /// default is a flat `NULL, 0, 0` rather than a braced list.
    pub fn render(&self) -> String {
        match self {
            DefaultValue::Literal(text) => text.clone(),
            DefaultValue::Zero(p) => p.zero_literal(),
            DefaultValue::EmptyArray => "NULL, 0, 0".to_string(),
            DefaultValue::Aggregate(values) => {
                let parts: Vec<String> = values.iter().map(DefaultValue::render).collect();
                format!("{{ {} }}", parts.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub id:               usize,
    pub name:             String,
    pub line:             usize,
    pub kind:             MemberKind,
    pub explicit_default: Option<String>,
    pub default:          DefaultValue,
    pub trailing_comment: Option<String>,
}

impl Member {
    /// Name of the generated length field of an array member.
    pub fn size_field(&self) -> String {
        format!("{}_size", self.name)
    }

    /// Name of the generated capacity field of an array member.
    pub fn alloc_field(&self) -> String {
        format!("{}_alloc", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageType {
    pub name:          String,
    pub id:            u8,
    pub line:          usize,
    pub members:       Vec<Member>,
    pub leading_text:  String,
    pub trailing_text: String,
}

impl MessageType {
    pub fn default_value(&self) -> DefaultValue {
        DefaultValue::Aggregate(self.members.iter().map(|m| m.default.clone()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub messages: Vec<MessageType>,
}
