#![allow(non_snake_case)]

use flexproto_codegen::loader::load_str;
use flexproto_codegen::{ReferenceCodec, SchemaError, Value, generate};

const POINT: &str = r#"
[[struct]]
name = "Point"
fields = [{ name = "x", type = "int32_t" }, { name = "y", type = "int32_t" }]
"#;

const LIST: &str = r#"
[[struct]]
name = "List"
fields = [{ name = "items", type = "array_int32_t" }]
"#;

fn ints(values: &[i128]) -> Value {
    Value::Array(values.iter().copied().map(Value::Int).collect())
}

#[test]
fn point___known_values___encode_to_fixed_bytes_and_back() {
    let doc = load_str(POINT).unwrap();
    let codec = ReferenceCodec::new(&doc);
    let point = Value::structure([("x", Value::Int(-5)), ("y", Value::Int(1_000_000))]);

    let bytes = codec.encode("Point", &point).unwrap();

    assert_eq!(bytes, [0x09, 0x80, 0x89, 0x7A]);
    assert_eq!(codec.decode("Point", &bytes).unwrap(), point);
}

#[test]
fn point___header___declares_layout_and_codecs() {
    let doc = load_str(POINT).unwrap();

    let header = generate(&doc, "point_toml.h").unwrap();

    assert!(header.contains("struct Point\n{\n    int32_t x{};\n    int32_t y{};\n};"));
    assert!(header.contains("    encode(data, end_data, value.x);\n    encode(data, end_data, value.y);"));
    assert!(header.contains(
        "    value.x = decode<int32_t>(data, end_data);\n    value.y = decode<int32_t>(data, end_data);"
    ));
}

#[test]
fn msg_with_type_enum___request_response___numbered_zero_and_one() {
    let doc = load_str(
        r#"
[[type_enum]]
name = "TagEnum"
types = ["Request", "Response"]

[[struct]]
name = "Request"

[[struct]]
name = "Response"

[[struct]]
name = "Msg"
fields = [{ name = "tag", type = "TagEnum" }, { name = "body", type = "blob" }]
"#,
    )
    .unwrap();

    let header = generate(&doc, "tags_toml.h").unwrap();

    assert!(header.contains("enum class TagEnum : uint32_t\n{\n    Request = 0,\n    Response = 1,\n};"));
    assert!(header.contains("template<> struct TagEnum_tag<Request>\n{\n    static constexpr TagEnum value = TagEnum::Request;\n};"));
    assert!(header.contains("template<> struct TagEnum_tag<Response>\n{\n    static constexpr TagEnum value = TagEnum::Response;\n};"));
    assert!(header.contains("struct Msg\n{\n    TagEnum tag{};\n    std::vector<uint8_t> body{};\n};"));
    assert!(header.contains(
        "    encode(data, end_data, static_cast<uint32_t>(value.tag));\n    encode_blob(data, end_data, value.body);"
    ));
    assert!(header.contains(
        "    value.tag = static_cast<TagEnum>(decode<uint32_t>(data, end_data));\n    decode_blob(data, end_data, value.body);"
    ));

    let codec = ReferenceCodec::new(&doc);
    let msg = Value::structure([("tag", Value::Tag(1)), ("body", Value::Blob(vec![0xCA, 0xFE]))]);

    let bytes = codec.encode("Msg", &msg).unwrap();

    assert_eq!(bytes, [0x01, 0x02, 0xCA, 0xFE]);
    assert_eq!(codec.decode("Msg", &bytes).unwrap(), msg);
}

#[test]
fn list___empty_and_three_items___round_trip() {
    let doc = load_str(LIST).unwrap();
    let codec = ReferenceCodec::new(&doc);

    let empty = Value::structure([("items", ints(&[]))]);
    let three = Value::structure([("items", ints(&[1, 2, 3]))]);

    let empty_bytes = codec.encode("List", &empty).unwrap();
    let three_bytes = codec.encode("List", &three).unwrap();

    assert_eq!(empty_bytes, [0x00]);
    assert_eq!(three_bytes, [0x03, 0x02, 0x04, 0x06]);
    assert_eq!(codec.decode("List", &empty_bytes).unwrap(), empty);
    assert_eq!(codec.decode("List", &three_bytes).unwrap(), three);
}

#[test]
fn embedding___a_embeds_b_and_b_refers_back___generates_b_first() {
    let doc = load_str(
        r#"
[[struct]]
name = "A"
fields = [{ name = "b", type = "B" }]

[[struct]]
name = "B"
fields = [{ name = "all_a", type = "array_A" }]
"#,
    )
    .unwrap();

    let header = generate(&doc, "ab_toml.h").unwrap();

    let forward_a = header.find("struct A;").unwrap();
    let forward_b = header.find("struct B;").unwrap();
    let layout_b = header.find("struct B\n{").unwrap();
    let layout_a = header.find("struct A\n{").unwrap();
    assert!(forward_a < layout_b && forward_b < layout_b);
    assert!(layout_b < layout_a);
    assert!(header.contains("    std::vector<A> all_a{};"));
}

#[test]
fn embedding___direct_mutual_embedding___is_rejected() {
    let result = load_str(
        r#"
[[struct]]
name = "A"
fields = [{ name = "b", type = "B" }]

[[struct]]
name = "B"
fields = [{ name = "a", type = "fixarray_2_A" }]
"#,
    );

    match result {
        Err(SchemaError::DirectEmbeddingCycle { path }) => assert_eq!(path, ["A", "B", "A"]),
        other => panic!("Expected DirectEmbeddingCycle, got {other:?}"),
    }
}

#[test]
fn unresolved___unknown_element___names_struct_field_and_token() {
    let err = load_str(
        r#"
[[struct]]
name = "Msg"
fields = [{ name = "items", type = "array_Widget" }]
"#,
    )
    .unwrap_err();

    let message = err.to_string();

    assert!(message.contains("Msg.items"), "{message}");
    assert!(message.contains("array_Widget"), "{message}");
    assert!(message.contains("`Widget`"), "{message}");
}

#[test]
fn malformed___zero_size_fixarray___names_struct_field_and_token() {
    let err = load_str(
        r#"
[[struct]]
name = "Frame"
fields = [{ name = "data", type = "fixarray_0_uint8_t" }]
"#,
    )
    .unwrap_err();

    assert_eq!(err.kind(), "malformed_fixed_array_size");
    let message = err.to_string();
    assert!(message.contains("Frame.data"), "{message}");
    assert!(message.contains("fixarray_0_uint8_t"), "{message}");
}

#[test]
fn generate___full_schema___is_deterministic() {
    let text = r#"
namespace = "game"
includes = ["vec3.h"]
external_structs = ["Vec3"]

[[enum]]
name = "Team"
repr = "uint8_t"
constants = [{ name = "Red" }, { name = "Blue" }]

[[type_enum]]
name = "Message"
types = ["Spawn", "Despawn"]

[[struct]]
name = "Spawn"
fields = [
    { name = "id", type = "uint64_t" },
    { name = "team", type = "Team" },
    { name = "position", type = "Vec3" },
    { name = "name", type = "string" },
    { name = "loadout", type = "fixarray_4_uint16_t" },
]

[[struct]]
name = "Despawn"
fields = [{ name = "id", type = "uint64_t" }, { name = "reason", type = "blob" }]
"#;

    let first = generate(&load_str(text).unwrap(), "game_toml.h").unwrap();
    let second = generate(&load_str(text).unwrap(), "game_toml.h").unwrap();

    assert_eq!(first, second);
    assert!(first.contains("namespace game\n{"));
    assert!(first.contains("    std::array<uint16_t, 4> loadout{};"));
    assert!(first.contains("encode(data, end_data, static_cast<uint8_t>(value.team));"));
    assert!(first.contains("value.team = static_cast<Team>(decode<uint8_t>(data, end_data));"));
}
