//! Field descriptors and the closed set of field types.

use std::fmt;

use crate::Error;

/// Bit width of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    /// Map a bit count onto a supported width.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Width::W8),
            16 => Some(Width::W16),
            32 => Some(Width::W32),
            64 => Some(Width::W64),
            _ => None,
        }
    }

    /// Number of bits.
    pub fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }
}

/// Field types that are synthesized directly as literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `intN_t`
    Int(Width),
    /// `uintN_t`
    UInt(Width),
    /// `fp32_t`
    Fp32,
    /// `fp64_t`
    Fp64,
    /// `plaintext`
    Plaintext,
    /// `rawdata`
    Rawdata,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Int(w) => write!(f, "int{}_t", w.bits()),
            Primitive::UInt(w) => write!(f, "uint{}_t", w.bits()),
            Primitive::Fp32 => f.write_str("fp32_t"),
            Primitive::Fp64 => f.write_str("fp64_t"),
            Primitive::Plaintext => f.write_str("plaintext"),
            Primitive::Rawdata => f.write_str("rawdata"),
        }
    }
}

/// The type of a message field.
///
/// `Message` and `MessageList` carry the referenced message type or group
/// abbrev. `None` means the field accepts any message type of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Primitive(Primitive),
    Message(Option<String>),
    MessageList(Option<String>),
}

impl FieldType {
    /// Parse a schema type tag such as `uint16_t` or `message-list`.
    ///
    /// `message_type` is only consulted for `message` and `message-list`.
    pub fn parse(tag: &str, message_type: Option<&str>) -> Result<Self, Error> {
        let reference = || message_type.map(str::to_string);
        let ty = match tag {
            "fp32_t" => FieldType::Primitive(Primitive::Fp32),
            "fp64_t" => FieldType::Primitive(Primitive::Fp64),
            "plaintext" => FieldType::Primitive(Primitive::Plaintext),
            "rawdata" => FieldType::Primitive(Primitive::Rawdata),
            "message" => FieldType::Message(reference()),
            "message-list" => FieldType::MessageList(reference()),
            _ => {
                if let Some(rest) = tag.strip_prefix("uint") {
                    FieldType::Primitive(Primitive::UInt(parse_width(tag, rest)?))
                } else if let Some(rest) = tag.strip_prefix("int") {
                    FieldType::Primitive(Primitive::Int(parse_width(tag, rest)?))
                } else {
                    return Err(Error::InvalidFieldType {
                        tag: tag.to_string(),
                    });
                }
            }
        };
        Ok(ty)
    }
}

fn parse_width(tag: &str, rest: &str) -> Result<Width, Error> {
    let digits = rest.strip_suffix("_t").unwrap_or(rest);
    digits
        .parse::<u32>()
        .ok()
        .and_then(Width::from_bits)
        .ok_or_else(|| Error::InvalidWidth {
            tag: tag.to_string(),
        })
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Primitive(p) => p.fmt(f),
            FieldType::Message(_) => f.write_str("message"),
            FieldType::MessageList(_) => f.write_str("message-list"),
        }
    }
}

/// A field of a message type or of the schema header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    abbrev: String,
    ty: FieldType,
}

impl Field {
    pub fn new(abbrev: impl Into<String>, ty: FieldType) -> Self {
        Self {
            abbrev: abbrev.into(),
            ty,
        }
    }

    /// Shorthand for a field of a primitive type.
    pub fn primitive(abbrev: impl Into<String>, primitive: Primitive) -> Self {
        Self::new(abbrev, FieldType::Primitive(primitive))
    }

    /// Build a field from its schema type tag.
    pub fn parse(
        abbrev: impl Into<String>,
        tag: &str,
        message_type: Option<&str>,
    ) -> Result<Self, Error> {
        Ok(Self::new(abbrev, FieldType::parse(tag, message_type)?))
    }

    pub fn abbrev(&self) -> &str {
        &self.abbrev
    }

    pub fn field_type(&self) -> &FieldType {
        &self.ty
    }

    /// Name of the generated C++ data member.
    pub fn member_name(&self) -> String {
        self.abbrev.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_tags() {
        assert_eq!(
            FieldType::parse("int8_t", None).unwrap(),
            FieldType::Primitive(Primitive::Int(Width::W8))
        );
        assert_eq!(
            FieldType::parse("uint64_t", None).unwrap(),
            FieldType::Primitive(Primitive::UInt(Width::W64))
        );
        // The `_t` suffix is optional.
        assert_eq!(
            FieldType::parse("int32", None).unwrap(),
            FieldType::Primitive(Primitive::Int(Width::W32))
        );
    }

    #[test]
    fn test_parse_invalid_width() {
        for tag in ["int_t", "uint12_t", "intX_t", "uint"] {
            match FieldType::parse(tag, None) {
                Err(Error::InvalidWidth { tag: t }) => assert_eq!(t, tag),
                other => panic!("expected InvalidWidth for {tag}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_unknown_tag() {
        assert!(matches!(
            FieldType::parse("bool", None),
            Err(Error::InvalidFieldType { .. })
        ));
    }

    #[test]
    fn test_parse_message_tags() {
        assert_eq!(
            FieldType::parse("message", Some("Announce")).unwrap(),
            FieldType::Message(Some("Announce".to_string()))
        );
        assert_eq!(
            FieldType::parse("message-list", None).unwrap(),
            FieldType::MessageList(None)
        );
    }

    #[test]
    fn test_display_round_trips_tag() {
        for tag in ["int16_t", "uint8_t", "fp32_t", "fp64_t", "plaintext", "rawdata"] {
            assert_eq!(FieldType::parse(tag, None).unwrap().to_string(), tag);
        }
    }

    #[test]
    fn test_member_name_is_lowercase() {
        let field = Field::primitive("SysName", Primitive::Plaintext);
        assert_eq!(field.member_name(), "sysname");
    }
}
