use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use imc_testgen::beautify;
use imc_testgen::schema::{Field, Group, MessageType, Schema};
use imc_testgen::Config;

fn make_schema(messages: usize) -> Schema {
    let mut schema = Schema::new();
    schema.add_group(Group::new("Any", ["Leaf0", "Leaf1"]));
    for i in 0..2 {
        schema.add_message(
            MessageType::new(format!("Leaf{i}"))
                .field(Field::parse("value", "fp64_t", None).unwrap())
                .field(Field::parse("blob", "rawdata", None).unwrap()),
        );
    }
    for i in 0..messages {
        schema.add_message(
            MessageType::new(format!("Message{i}"))
                .field(Field::parse("id", "uint32_t", None).unwrap())
                .field(Field::parse("offset", "int64_t", None).unwrap())
                .field(Field::parse("label", "plaintext", None).unwrap())
                .field(Field::parse("child", "message", Some("Any")).unwrap())
                .field(Field::parse("children", "message-list", Some("Any")).unwrap()),
        );
    }
    schema
}

fn generate_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_program");
    for messages in [1, 16, 128] {
        let schema = make_schema(messages);
        let mut config = Config::new();
        config.seed(0);
        group.bench_with_input(BenchmarkId::new("messages", messages), &schema, |b, schema| {
            b.iter(|| {
                let program = config.generate(schema).unwrap();
                std::hint::black_box(program)
            })
        });
    }
}

fn beautify_program(c: &mut Criterion) {
    let program = Config::new().seed(0).generate(&make_schema(64)).unwrap();
    // Strip indentation so the beautifier does real work.
    let flat: String = program.lines().map(|l| format!("{}\n", l.trim())).collect();

    c.bench_function("beautify", |b| {
        b.iter(|| {
            let out = beautify(std::hint::black_box(&flat)).unwrap();
            std::hint::black_box(out)
        })
    });
}

criterion_group!(benches, generate_program, beautify_program);
criterion_main!(benches);
