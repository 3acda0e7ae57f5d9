use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonschema_engine::{Draft, Validator};
use serde_json::{json, Value};

macro_rules! bench_validate {
    ($b:ident, $name:expr, $schema:tt, $data: tt) => {
        fn $b(c: &mut Criterion) {
            let schema = json!($schema);
            let validator = Validator::new(&schema).expect("A valid schema");
            let data = black_box(json!($data));
            c.bench_function($name, |b| b.iter(|| validator.is_valid(&data)));
        }
    };
}

macro_rules! bench_build {
    ($b:ident, $name:expr, $schema:tt) => {
        fn $b(c: &mut Criterion) {
            let schema = black_box(json!($schema));
            c.bench_function($name, |b| b.iter(|| Validator::new(&schema)));
        }
    };
}

fn person_schema() -> Value {
    json!({
        "$defs": {
            "address": {
                "type": "object",
                "properties": {
                    "street": {"type": "string"},
                    "zip": {"type": "string", "pattern": "^[0-9]{5}$"}
                },
                "required": ["street"]
            }
        },
        "type": "object",
        "properties": {
            "name": {"type": "string", "minLength": 1},
            "email": {"type": "string", "format": "email"},
            "age": {"type": "integer", "minimum": 0, "maximum": 150},
            "addresses": {"type": "array", "items": {"$ref": "#/$defs/address"}, "uniqueItems": true}
        },
        "required": ["name"],
        "unevaluatedProperties": false
    })
}

fn person_benchmark(c: &mut Criterion) {
    let schema = person_schema();
    let validator = Validator::new(&schema).expect("A valid schema");
    let addresses: Vec<Value> = (0..100)
        .map(|idx| json!({"street": format!("Street {}", idx), "zip": "12345"}))
        .collect();
    let data = black_box(json!({
        "name": "Ada",
        "email": "ada@example.com",
        "age": 36,
        "addresses": addresses
    }));
    c.bench_function("person valid", |b| b.iter(|| validator.is_valid(&data)));
    let invalid = black_box(json!({"name": "", "age": -1, "extra": true}));
    c.bench_function("person invalid", |b| b.iter(|| validator.apply(&invalid)));
}

fn recursive_ref_benchmark(c: &mut Criterion) {
    let schema = json!({
        "$id": "http://example.com/tree",
        "$recursiveAnchor": true,
        "type": "object",
        "properties": {"children": {"type": "array", "items": {"$recursiveRef": "#"}}}
    });
    let validator = Validator::options()
        .with_draft(Draft::Draft201909)
        .build(&schema)
        .expect("A valid schema");
    let mut data = json!({"children": []});
    for _ in 0..50 {
        data = json!({"children": [data, {"children": []}]});
    }
    let data = black_box(data);
    c.bench_function("recursive ref", |b| b.iter(|| validator.is_valid(&data)));
}

fn person_build_benchmark(c: &mut Criterion) {
    let schema = black_box(person_schema());
    c.bench_function("person build", |b| b.iter(|| Validator::new(&schema)));
}

bench_build!(build_properties, "build properties", {"properties": {"a": {"type": "integer"}, "b": {"$ref": "#/properties/a"}}});
bench_validate!(additional_properties_valid, "additional properties valid", {"properties": {"foo": {}}, "additionalProperties": false}, {"foo": 1});
bench_validate!(additional_properties_invalid, "additional properties invalid", {"properties": {"foo": {}}, "additionalProperties": false}, {"foo": 1, "bar": 2});
bench_validate!(all_of_valid, "allOf valid", {"allOf": [{"type": "integer"}, {"minimum": 2}]}, 4);
bench_validate!(all_of_invalid, "allOf invalid", {"allOf": [{"type": "integer"}, {"minimum": 2}]}, 1);
bench_validate!(any_of_valid, "anyOf valid", {"anyOf": [{"type": "integer"}, {"minimum": 2}]}, 1);
bench_validate!(any_of_invalid, "anyOf invalid", {"anyOf": [{"type": "integer"}, {"minimum": 2}]}, 1.5);
bench_validate!(one_of_valid, "oneOf valid", {"oneOf": [{"type": "integer"}, {"minimum": 2}]}, 1);
bench_validate!(one_of_invalid, "oneOf invalid", {"oneOf": [{"type": "integer"}, {"minimum": 2}]}, 3);
bench_validate!(enum_valid, "enum valid", {"enum": [1, 2, 3, 4]}, 4);
bench_validate!(enum_invalid, "enum invalid", {"enum": [1, 2, 3, 4]}, 5);
bench_validate!(contains_valid, "contains valid", {"contains": {"minimum": 5}}, [5]);
bench_validate!(contains_invalid, "contains invalid", {"contains": {"minimum": 5}}, [1]);
bench_validate!(const_valid, "const valid", {"const": 1}, 1);
bench_validate!(const_invalid, "const invalid", {"const": 1}, "2");
bench_validate!(false_schema, "false schema", false, 1);
bench_validate!(format_ipv4_valid, "format ipv4 valid", {"format": "ipv4"}, "127.0.0.1");
bench_validate!(format_ipv4_invalid, "format ipv4 invalid", {"format": "ipv4"}, "127.0.0.999");
bench_validate!(pattern_valid, "pattern valid", {"pattern": "^a*$"}, "aaa");
bench_validate!(pattern_invalid, "pattern invalid", {"pattern": "^a*$"}, "abc");
bench_validate!(unique_items_valid, "uniqueItems valid", {"uniqueItems": true}, [1, 2, 3, {"a": 1}, [1]]);
bench_validate!(unique_items_invalid, "uniqueItems invalid", {"uniqueItems": true}, [1, 2, 3, 1.0]);
bench_validate!(unevaluated_properties_valid, "unevaluatedProperties valid", {"allOf": [{"properties": {"a": true}}], "unevaluatedProperties": false}, {"a": 1});
bench_validate!(unevaluated_properties_invalid, "unevaluatedProperties invalid", {"allOf": [{"properties": {"a": true}}], "unevaluatedProperties": false}, {"a": 1, "b": 2});

criterion_group!(
    realistic,
    person_benchmark,
    person_build_benchmark,
    recursive_ref_benchmark
);
criterion_group!(
    keywords,
    build_properties,
    additional_properties_valid,
    additional_properties_invalid,
    all_of_valid,
    all_of_invalid,
    any_of_valid,
    any_of_invalid,
    one_of_valid,
    one_of_invalid,
    enum_valid,
    enum_invalid,
    contains_valid,
    contains_invalid,
    const_valid,
    const_invalid,
    false_schema,
    format_ipv4_valid,
    format_ipv4_invalid,
    pattern_valid,
    pattern_invalid,
    unique_items_valid,
    unique_items_invalid,
    unevaluated_properties_valid,
    unevaluated_properties_invalid
);
criterion_main!(realistic, keywords);
