//! Test program generation from a message schema.

mod emitter;
mod message;
mod output;
mod value;

pub use emitter::Emitter;
pub use message::{MessageBuilder, Session, HEADER_SETTERS};
pub use value::{int_bounds, synthesize, uint_bounds, Value};

use std::path::PathBuf;

use rand::RngCore;
use tracing::debug;

use crate::beautify::beautify;
use crate::config::Config;
use crate::schema::SchemaIndex;
use crate::Error;

/// Variable holding each top-level instance.
const TOP_LEVEL_VAR: &str = "msg";

/// Generate the program and write it to the configured output directory.
pub fn compile(
    config: &Config,
    schema: &dyn SchemaIndex,
    rng: &mut dyn RngCore,
) -> Result<PathBuf, Error> {
    let out_dir = config
        .out_dir
        .clone()
        .or_else(|| std::env::var_os("OUT_DIR").map(Into::into))
        .ok_or(Error::MissingOutDir)?;

    let program = generate_program(config, schema, rng)?;
    output::write_program(&out_dir, &config.file_name, &program)
}

/// Generate the beautified source of the test program.
///
/// One block is emitted per message type and repeat, each declaring a
/// top-level instance, filling its header and fields, and checking the
/// serialization round trip. The program returns the aggregate test status.
pub fn generate_program(
    config: &Config,
    schema: &dyn SchemaIndex,
    rng: &mut dyn RngCore,
) -> Result<String, Error> {
    let mut session = Session::new(schema, rng, config.max_depth);

    session.out.append("#include <DUNE/DUNE.hpp>\n");
    session.out.append("using DUNE_NAMESPACES;\n");
    session.out.append("#include \"Test.hpp\"\n");
    session.out.append("int\nmain(void)\n{");
    session
        .out
        .append(format!("Test test(\"{}\");\n", escape(&config.title)));

    for abbrev in schema.messages() {
        debug!(msg_type = abbrev, repeat = config.repeat, "generating test cases");
        for test_nr in 0..config.repeat {
            session.out.append("{");
            let mut msg = MessageBuilder::new(&mut session, TOP_LEVEL_VAR, abbrev, test_nr)?;
            msg.declare();
            msg.fill_header()?;
            msg.fill_fields()?;
            msg.marshall();
            session.out.append("}\n");
        }
    }

    session.out.append("return test.getReturnValue();");
    session.out.append("}");

    beautify(&session.out.into_text())
}

/// Escape text for a C++ string literal.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::schema::{Field, MessageType, Primitive, Schema, Width};

    fn make_schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .add_message(MessageType::new("Heartbeat"))
            .add_message(
                MessageType::new("Temperature")
                    .field(Field::primitive("Value", Primitive::Fp32))
                    .field(Field::primitive("Sensor", Primitive::UInt(Width::W8))),
            );
        schema
    }

    #[test]
    fn test_program_layout() {
        let schema = make_schema();
        let mut rng = StdRng::seed_from_u64(11);
        let program = generate_program(&Config::new(), &schema, &mut rng).unwrap();

        assert!(program.starts_with("#include <DUNE/DUNE.hpp>\n\nusing DUNE_NAMESPACES;\n"));
        assert!(program.contains("int\nmain(void)\n{\n  Test test(\"IMC Serialization/Deserialization\");\n"));
        assert!(program.ends_with("  return test.getReturnValue();\n}\n"));

        // Three cases per message type.
        assert_eq!(program.matches("  IMC::Heartbeat msg;\n").count(), 3);
        assert_eq!(program.matches("  IMC::Temperature msg;\n").count(), 3);
        for n in 0..3 {
            assert!(program.contains(&format!("test.boolean(\"Heartbeat #{n}\", msg == *msg_d);")));
            assert!(program.contains(&format!("test.boolean(\"Temperature #{n}\", msg == *msg_d);")));
        }
    }

    #[test]
    fn test_case_block_is_indented() {
        let schema = make_schema();
        let mut rng = StdRng::seed_from_u64(12);
        let mut config = Config::new();
        config.repeat(1);
        let program = generate_program(&config, &schema, &mut rng).unwrap();
        let expected_prefix = "  {\n    IMC::Heartbeat msg;\n    msg.setTimeStamp(";
        assert!(program.contains(expected_prefix), "{program}");
        assert!(program.contains("\n    try\n    {\n      Utils::ByteBuffer bfr;\n"));
        assert!(program.contains(
            "\n    }\n    catch (IMC::InvalidMessageSize& e)\n    {\n      (void)e;\n"
        ));
    }

    #[test]
    fn test_seed_reproduces_program() {
        let schema = make_schema();
        let config = Config::new();
        let a = generate_program(&config, &schema, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = generate_program(&config, &schema, &mut StdRng::seed_from_u64(5)).unwrap();
        let c = generate_program(&config, &schema, &mut StdRng::seed_from_u64(6)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_title_is_escaped() {
        assert_eq!(escape(r#"say "hi" \o/"#), r#"say \"hi\" \\o/"#);
    }

    #[test]
    fn test_missing_out_dir() {
        let schema = make_schema();
        let mut rng = StdRng::seed_from_u64(0);
        if std::env::var_os("OUT_DIR").is_none() {
            assert!(matches!(
                compile(&Config::new(), &schema, &mut rng),
                Err(Error::MissingOutDir)
            ));
        }
    }
}
