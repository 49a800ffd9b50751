//! Read-only view of an IMC message schema.
//!
//! The generator only ever queries the schema through [`SchemaIndex`], so
//! any loader (XML, a build-time table, a test fixture) can drive it. The
//! in-memory [`Schema`] is the implementation shipped with the crate.

mod field;

pub use field::{Field, FieldType, Primitive, Width};

use std::collections::HashMap;

/// Queries the generator issues against a schema.
pub trait SchemaIndex {
    /// Abbrevs of all message types, in schema order.
    fn messages(&self) -> Vec<&str>;

    /// Fields of a message type, in schema order. `None` if the type is unknown.
    fn fields_of(&self, message: &str) -> Option<&[Field]>;

    /// Header fields shared by every message type.
    fn header_fields(&self) -> &[Field];

    /// Whether `abbrev` names a message group.
    fn is_group(&self, abbrev: &str) -> bool;

    /// Concrete message types a group resolves to. `None` if not a group.
    fn group_members(&self, group: &str) -> Option<&[String]>;
}

/// A message type: its abbrev and its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageType {
    pub abbrev: String,
    pub fields: Vec<Field>,
}

impl MessageType {
    pub fn new(abbrev: impl Into<String>) -> Self {
        Self {
            abbrev: abbrev.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

/// A named set of message types usable wherever one message type is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub abbrev: String,
    pub members: Vec<String>,
}

impl Group {
    pub fn new<I, S>(abbrev: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            abbrev: abbrev.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

/// In-memory schema.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    header: Vec<Field>,
    messages: Vec<MessageType>,
    groups: Vec<Group>,
    /// Map from message abbrev -> index into `messages`.
    message_index: HashMap<String, usize>,
    /// Map from group abbrev -> index into `groups`.
    group_index: HashMap<String, usize>,
}

impl Schema {
    /// Create an empty schema with the standard IMC header.
    pub fn new() -> Self {
        Self {
            header: Self::imc_header(),
            ..Self::default()
        }
    }

    /// The standard IMC header: `timestamp`, `src`, `src_ent`, `dst`, `dst_ent`.
    pub fn imc_header() -> Vec<Field> {
        vec![
            Field::primitive("timestamp", Primitive::Fp64),
            Field::primitive("src", Primitive::UInt(Width::W16)),
            Field::primitive("src_ent", Primitive::UInt(Width::W8)),
            Field::primitive("dst", Primitive::UInt(Width::W16)),
            Field::primitive("dst_ent", Primitive::UInt(Width::W8)),
        ]
    }

    /// Replace the header fields.
    pub fn with_header(mut self, header: Vec<Field>) -> Self {
        self.header = header;
        self
    }

    /// Add a message type. A later definition with the same abbrev replaces
    /// the earlier one in place.
    pub fn add_message(&mut self, message: MessageType) -> &mut Self {
        match self.message_index.get(&message.abbrev) {
            Some(&idx) => self.messages[idx] = message,
            None => {
                self.message_index
                    .insert(message.abbrev.clone(), self.messages.len());
                self.messages.push(message);
            }
        }
        self
    }

    /// Add a message group.
    pub fn add_group(&mut self, group: Group) -> &mut Self {
        match self.group_index.get(&group.abbrev) {
            Some(&idx) => self.groups[idx] = group,
            None => {
                self.group_index
                    .insert(group.abbrev.clone(), self.groups.len());
                self.groups.push(group);
            }
        }
        self
    }
}

impl SchemaIndex for Schema {
    fn messages(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.abbrev.as_str()).collect()
    }

    fn fields_of(&self, message: &str) -> Option<&[Field]> {
        self.message_index
            .get(message)
            .map(|&idx| self.messages[idx].fields.as_slice())
    }

    fn header_fields(&self) -> &[Field] {
        &self.header
    }

    fn is_group(&self, abbrev: &str) -> bool {
        self.group_index.contains_key(abbrev)
    }

    fn group_members(&self, group: &str) -> Option<&[String]> {
        self.group_index
            .get(group)
            .map(|&idx| self.groups[idx].members.as_slice())
    }
}
