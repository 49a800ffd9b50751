//! Random literal synthesis for primitive fields.
//!
//! Integer ranges stop one short of the type's maximum: signed widths draw
//! from `[-2^(W-1), 2^(W-1) - 2]` and unsigned widths from `[0, 2^W - 2]`.
//! Generated programs have always been built against these ranges, so the
//! bounds are kept as they are.

use std::fmt;

use rand::seq::index;
use rand::{Rng, RngCore};

use crate::schema::{Primitive, Width};

/// Symbols sampled for plaintext values.
const PLAINTEXT_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Times the alphabet is repeated to form the sampling pool.
const PLAINTEXT_REPEAT: usize = 10;

/// Minimum length of plaintext and rawdata values.
pub const MIN_SEQUENCE_LEN: usize = 10;

/// Maximum length of plaintext and rawdata values.
pub const MAX_SEQUENCE_LEN: usize = 254;

/// A synthesized value, rendered as a C++ literal through `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i128),
    UInt(u128),
    Float(f64),
    Text(String),
    Bytes(Vec<i8>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}U"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "\"{v}\""),
            Value::Bytes(v) => {
                for (i, b) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{b}")?;
                }
                Ok(())
            }
        }
    }
}

/// Inclusive bounds of the values drawn for a signed width.
pub fn int_bounds(width: Width) -> (i128, i128) {
    let half = 1i128 << (width.bits() - 1);
    (-half, half - 2)
}

/// Inclusive bounds of the values drawn for an unsigned width.
pub fn uint_bounds(width: Width) -> (u128, u128) {
    (0, (1u128 << width.bits()) - 2)
}

/// Draw a random value for a primitive field.
pub fn synthesize(primitive: Primitive, rng: &mut dyn RngCore) -> Value {
    match primitive {
        Primitive::Int(width) => {
            let (lo, hi) = int_bounds(width);
            Value::Int(rng.random_range(lo..=hi))
        }
        Primitive::UInt(width) => {
            let (lo, hi) = uint_bounds(width);
            Value::UInt(rng.random_range(lo..=hi))
        }
        Primitive::Fp32 | Primitive::Fp64 => Value::Float(rng.random::<f64>()),
        Primitive::Plaintext => Value::Text(plaintext(rng)),
        Primitive::Rawdata => Value::Bytes(rawdata(rng)),
    }
}

/// Sample without replacement from the alphabet repeated ten times.
fn plaintext(rng: &mut dyn RngCore) -> String {
    let len = rng.random_range(MIN_SEQUENCE_LEN..=MAX_SEQUENCE_LEN);
    let pool_len = PLAINTEXT_ALPHABET.len() * PLAINTEXT_REPEAT;
    index::sample(rng, pool_len, len)
        .into_iter()
        .map(|i| PLAINTEXT_ALPHABET[i % PLAINTEXT_ALPHABET.len()] as char)
        .collect()
}

fn rawdata(rng: &mut dyn RngCore) -> Vec<i8> {
    let len = rng.random_range(MIN_SEQUENCE_LEN..=MAX_SEQUENCE_LEN);
    (0..len).map(|_| rng.random::<i8>()).collect()
}
