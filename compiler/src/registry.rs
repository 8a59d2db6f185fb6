use std::collections::HashMap;
use crate::types::{MessageType, Primitive};

/// Result of a name lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Primitive(Primitive),
    Message(&'a MessageType),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterError {
    /// The name is a primitive or an already registered message.
    DuplicateName(String),
    /// The id is already taken by the named message.
    DuplicateId(u8, String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    /// Registered by its header, body still being parsed.
    Open,
    Sealed(usize),
}

/// Name table of one compilation run. Entries are never removed or replaced.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    slots:    HashMap<String, Slot>,
    ids:      HashMap<u8, String>,
    messages: Vec<MessageType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `name` and `id` for a message whose body is about to be parsed.
    pub fn register(&mut self, name: &str, id: u8) -> Result<(), RegisterError> {
        if Primitive::from_name(name).is_some() || self.slots.contains_key(name) {
            return Err(RegisterError::DuplicateName(name.to_string()));
        }
        if let Some(owner) = self.ids.get(&id) {
            return Err(RegisterError::DuplicateId(id, owner.clone()));
        }
        self.slots.insert(name.to_string(), Slot::Open);
        self.ids.insert(id, name.to_string());
        Ok(())
    }

    /// Stores the finished message; it becomes resolvable from here on.
    pub fn seal(&mut self, message: MessageType) {
        let index = self.messages.len();
        self.slots.insert(message.name.clone(), Slot::Sealed(index));
        self.messages.push(message);
    }

    /// Looks up a type name. A message still being parsed does not resolve.
    pub fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        if let Some(p) = Primitive::from_name(name) {
            return Some(Resolved::Primitive(p));
        }
        match self.slots.get(name)? {
            Slot::Sealed(index) => Some(Resolved::Message(&self.messages[*index])),
            Slot::Open => None,
        }
    }

    pub fn messages(&self) -> &[MessageType] {
        &self.messages
    }

    /// Sealed messages in declaration order.
    pub fn into_messages(self) -> Vec<MessageType> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: &str, id: u8) -> MessageType {
        MessageType {
            name:          name.to_string(),
            id,
            line:          1,
            members:       Vec::new(),
            leading_text:  String::new(),
            trailing_text: String::new(),
        }
    }

    #[test]
    fn test_resolve_primitives() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.resolve("uint16"), Some(Resolved::Primitive(Primitive::UInt16)));
        assert_eq!(registry.resolve("double"), Some(Resolved::Primitive(Primitive::Double)));
        assert_eq!(registry.resolve("Point"), None);
    }

    #[test]
    fn test_open_message_does_not_resolve() {
        let mut registry = TypeRegistry::new();
        registry.register("Point", 1).unwrap();
        assert_eq!(registry.resolve("Point"), None);

        registry.seal(message("Point", 1));
        assert_eq!(registry.messages().len(), 1);
        match registry.resolve("Point") {
            Some(Resolved::Message(m)) => assert_eq!(m.id, 1),
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_register_duplicates() {
        let mut registry = TypeRegistry::new();
        registry.register("Point", 1).unwrap();
        assert_eq!(
            registry.register("Point", 2),
            Err(RegisterError::DuplicateName("Point".to_string()))
        );
        assert_eq!(
            registry.register("Other", 1),
            Err(RegisterError::DuplicateId(1, "Point".to_string()))
        );
        assert_eq!(
            registry.register("float", 3),
            Err(RegisterError::DuplicateName("float".to_string()))
        );
    }
}
