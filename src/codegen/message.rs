//! Construction of randomized message instances.
//!
//! A [`MessageBuilder`] owns the generation context of one instance: the
//! variable it declares, the fields it fills and a counter for the
//! temporaries it introduces. Message-valued fields recurse into a fresh
//! builder whose variable is one of those temporaries, so every name is
//! namespaced by its owner and stays unique across the whole instance tree.

use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use tracing::{debug, trace};

use crate::codegen::emitter::Emitter;
use crate::codegen::value::synthesize;
use crate::schema::{Field, FieldType, Primitive, SchemaIndex};
use crate::Error;

/// Header fields and the setter that assigns each of them, in emission order.
pub const HEADER_SETTERS: [(&str, &str); 5] = [
    ("timestamp", "setTimeStamp"),
    ("src", "setSource"),
    ("src_ent", "setSourceEntity"),
    ("dst", "setDestination"),
    ("dst_ent", "setDestinationEntity"),
];

/// Handles shared by every builder of one generation run.
pub struct Session<'a> {
    /// The schema being walked.
    pub schema: &'a dyn SchemaIndex,
    /// Single source of randomness for the run.
    pub rng: &'a mut dyn RngCore,
    /// Output buffer.
    pub out: Emitter,
    /// Deepest nesting level a message-valued field may reach.
    pub max_depth: usize,
}

impl<'a> Session<'a> {
    pub fn new(schema: &'a dyn SchemaIndex, rng: &'a mut dyn RngCore, max_depth: usize) -> Self {
        Self {
            schema,
            rng,
            out: Emitter::new(),
            max_depth,
        }
    }
}

/// Builds the statements for one message instance.
///
/// Top-level instances go through `declare`, `fill_header`, `fill_fields`
/// and finally `marshall`, which consumes the builder. Nested instances are
/// only declared and filled.
pub struct MessageBuilder<'s, 'a> {
    session: &'s mut Session<'a>,
    var: String,
    abbrev: String,
    fields: &'a [Field],
    next_temp: usize,
    test_nr: usize,
    depth: usize,
}

impl<'s, 'a> MessageBuilder<'s, 'a> {
    /// Create a builder for a top-level instance.
    pub fn new(
        session: &'s mut Session<'a>,
        var: impl Into<String>,
        abbrev: &str,
        test_nr: usize,
    ) -> Result<Self, Error> {
        Self::with_depth(session, var.into(), abbrev, test_nr, 0)
    }

    fn with_depth(
        session: &'s mut Session<'a>,
        var: String,
        abbrev: &str,
        test_nr: usize,
        depth: usize,
    ) -> Result<Self, Error> {
        if depth > session.max_depth {
            return Err(Error::RecursionLimit {
                abbrev: abbrev.to_string(),
                depth,
            });
        }
        let schema = session.schema;
        let fields = schema.fields_of(abbrev).ok_or_else(|| Error::UnknownMessage {
            abbrev: abbrev.to_string(),
        })?;
        Ok(Self {
            session,
            var,
            abbrev: abbrev.to_string(),
            fields,
            next_temp: 0,
            test_nr,
            depth,
        })
    }

    /// Allocate the next temporary name owned by this instance.
    fn make_temp(&mut self) -> String {
        let name = format!("tmp_{}_{}", self.var, self.next_temp);
        self.next_temp += 1;
        name
    }

    fn emit(&mut self, text: impl Into<String>) {
        self.session.out.append(text);
    }

    /// Declare the instance variable.
    pub fn declare(&mut self) {
        let decl = format!("IMC::{} {};", self.abbrev, self.var);
        self.emit(decl);
    }

    /// Assign random values to the five header fields.
    pub fn fill_header(&mut self) -> Result<(), Error> {
        let schema = self.session.schema;
        for (abbrev, setter) in HEADER_SETTERS {
            let field = schema
                .header_fields()
                .iter()
                .find(|f| f.abbrev() == abbrev)
                .ok_or_else(|| Error::MissingHeaderField {
                    abbrev: abbrev.to_string(),
                })?;
            let primitive = match field.field_type() {
                FieldType::Primitive(
                    p @ (Primitive::Int(_) | Primitive::UInt(_) | Primitive::Fp32 | Primitive::Fp64),
                ) => *p,
                other => {
                    return Err(Error::InvalidFieldType {
                        tag: other.to_string(),
                    })
                }
            };
            let value = synthesize(primitive, &mut *self.session.rng);
            let stmt = format!("{}.{}({});", self.var, setter, value);
            self.emit(stmt);
        }
        Ok(())
    }

    /// Fill every declared field in schema order.
    pub fn fill_fields(&mut self) -> Result<(), Error> {
        let fields = self.fields;
        for field in fields {
            self.fill_field(field)?;
        }
        Ok(())
    }

    fn fill_field(&mut self, field: &Field) -> Result<(), Error> {
        let member = field.member_name();
        match field.field_type() {
            FieldType::Primitive(Primitive::Plaintext) => {
                let value = synthesize(Primitive::Plaintext, &mut *self.session.rng);
                let stmt = format!("{}.{}.assign({});", self.var, member, value);
                self.emit(stmt);
            }
            FieldType::Primitive(Primitive::Rawdata) => {
                let tmp = self.make_temp();
                let value = synthesize(Primitive::Rawdata, &mut *self.session.rng);
                self.emit(format!("const char {tmp}[] = {{{value}}};"));
                let stmt = format!("{}.{}.assign({tmp}, {tmp} + sizeof({tmp}));", self.var, member);
                self.emit(stmt);
            }
            FieldType::Primitive(primitive) => {
                let value = synthesize(*primitive, &mut *self.session.rng);
                let stmt = format!("{}.{} = {};", self.var, member, value);
                self.emit(stmt);
            }
            FieldType::Message(reference) => {
                let tmp = self.build_nested(reference.as_deref())?;
                let stmt = format!("{}.{}.set({});", self.var, member, tmp);
                self.emit(stmt);
            }
            FieldType::MessageList(reference) => {
                // At most one element keeps nesting and output size bounded.
                let count = self.session.rng.random_range(0..=1usize);
                for _ in 0..count {
                    let tmp = self.build_nested(reference.as_deref())?;
                    let stmt = format!("{}.{}.push_back({});", self.var, member, tmp);
                    self.emit(stmt);
                }
            }
        }
        Ok(())
    }

    /// Declare and fill a nested instance, returning its variable name.
    fn build_nested(&mut self, reference: Option<&str>) -> Result<String, Error> {
        let tmp = self.make_temp();
        let abbrev = self.resolve(reference)?;
        let depth = self.depth + 1;
        trace!(var = %tmp, msg_type = %abbrev, depth, "nested instance");

        let mut nested = MessageBuilder::with_depth(&mut *self.session, tmp, &abbrev, 0, depth)?;
        nested.declare();
        nested.fill_fields()?;
        Ok(nested.var)
    }

    /// Pick the concrete message type for a message-valued field.
    fn resolve(&mut self, reference: Option<&str>) -> Result<String, Error> {
        let schema = self.session.schema;
        match reference {
            None => schema
                .messages()
                .choose(&mut *self.session.rng)
                .map(|m| m.to_string())
                .ok_or(Error::EmptySchema),
            Some(group) if schema.is_group(group) => {
                let members = schema.group_members(group).unwrap_or(&[]);
                let member = members
                    .choose(&mut *self.session.rng)
                    .ok_or_else(|| Error::EmptyGroup {
                        abbrev: group.to_string(),
                    })?;
                debug!(group, member = %member, "resolved message group");
                Ok(member.clone())
            }
            Some(abbrev) => Ok(abbrev.to_string()),
        }
    }

    /// Emit the round-trip check and finish the instance.
    ///
    /// The instance must deserialize to an equal value, unless serializing
    /// it fails with `InvalidMessageSize`, in which case it must be larger
    /// than the maximum message size.
    pub fn marshall(mut self) {
        let var = self.var.clone();
        let label = format!("{} #{}", self.abbrev, self.test_nr);
        self.emit("");
        self.emit("try\n{");
        self.emit("Utils::ByteBuffer bfr;");
        self.emit(format!("IMC::Packet::serialize(&{var}, bfr);"));
        self.emit(
            "IMC::Message* msg_d = IMC::Packet::deserialize(bfr.getBuffer(), bfr.getSize());",
        );
        self.emit(format!("test.boolean(\"{label}\", {var} == *msg_d);"));
        self.emit("delete msg_d;");
        self.emit("}\ncatch (IMC::InvalidMessageSize& e)\n{\n(void)e;");
        self.emit(format!(
            "test.boolean(\"{label}\", {var}.getSerializationSize() > DUNE_IMC_CONST_MAX_SIZE);"
        ));
        self.emit("}");
    }
}
