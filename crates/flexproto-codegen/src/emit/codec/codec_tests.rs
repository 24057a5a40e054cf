#![allow(non_snake_case)]

use super::*;
use crate::schema::{EnumDef, Field, TypeEnumDef};
use test_case::test_case;

fn doc() -> SchemaDocument {
    SchemaDocument {
        enums: vec![EnumDef {
            name: "Color".into(),
            repr: IntType::UINT8,
            constants: vec![],
        }],
        type_enums: vec![TypeEnumDef {
            name: "TagEnum".into(),
            members: vec![],
        }],
        ..Default::default()
    }
}

fn field(name: &str, ty: FieldType) -> Field {
    Field {
        name: name.into(),
        ty,
        token: String::new(),
    }
}

fn int32() -> FieldType {
    FieldType::FixedInt(IntType::INT32)
}

#[test_case(int32(), "encode(data, end_data, v);")]
#[test_case(FieldType::String, "encode_string(data, end_data, v);")]
#[test_case(FieldType::Blob, "encode_blob(data, end_data, v);")]
#[test_case(FieldType::StructRef("Point".into()), "encode_other(data, end_data, v);")]
#[test_case(FieldType::EnumRef("Color".into()), "encode(data, end_data, static_cast<uint8_t>(v));")]
#[test_case(FieldType::TypeEnumRef("TagEnum".into()), "encode(data, end_data, static_cast<uint32_t>(v));")]
fn Strategy___encode_stmt___per_kind(ty: FieldType, expected: &str) {
    let strategy = Strategy::new(&ty, &doc()).unwrap();

    assert_eq!(strategy.encode_stmt("v", 0), expected);
}

#[test_case(int32(), "v = decode<int32_t>(data, end_data);")]
#[test_case(FieldType::String, "decode_string(data, end_data, v);")]
#[test_case(FieldType::Blob, "decode_blob(data, end_data, v);")]
#[test_case(FieldType::StructRef("Point".into()), "decode_other(data, end_data, v);")]
#[test_case(FieldType::EnumRef("Color".into()), "v = static_cast<Color>(decode<uint8_t>(data, end_data));")]
#[test_case(FieldType::TypeEnumRef("TagEnum".into()), "v = static_cast<TagEnum>(decode<uint32_t>(data, end_data));")]
fn Strategy___decode_stmt___per_kind(ty: FieldType, expected: &str) {
    let strategy = Strategy::new(&ty, &doc()).unwrap();

    assert_eq!(strategy.decode_stmt("v", 0), expected);
}

#[test]
fn Strategy___variable_array___wraps_element_in_lambda() {
    let ty = FieldType::VariableArray(Box::new(int32()));
    let strategy = Strategy::new(&ty, &doc()).unwrap();

    assert_eq!(
        strategy.encode_stmt("value.items", 0),
        "encode_variable_array(data, end_data, value.items, [&](const auto & e0) { encode(data, end_data, e0); });"
    );
    assert_eq!(
        strategy.decode_stmt("value.items", 0),
        "decode_variable_array(data, end_data, value.items, [&](auto & e0) { e0 = decode<int32_t>(data, end_data); });"
    );
}

#[test]
fn Strategy___nested_arrays___use_distinct_element_names() {
    let ty = FieldType::FixedArray(
        Box::new(FieldType::VariableArray(Box::new(FieldType::String))),
        2,
    );
    let strategy = Strategy::new(&ty, &doc()).unwrap();

    let encode = strategy.encode_stmt("value.grid", 0);

    assert_eq!(
        encode,
        "encode_fixed_array(data, end_data, value.grid, [&](const auto & e0) { encode_variable_array(data, end_data, e0, [&](const auto & e1) { encode_string(data, end_data, e1); }); });"
    );
}

#[test]
fn Strategy___unknown_enum___is_unknown_reference() {
    let result = Strategy::new(&FieldType::EnumRef("Missing".into()), &doc());

    assert!(matches!(result, Err(SchemaError::UnknownReference(ref name)) if name == "Missing"));
}

#[test]
fn CodecPlan___point___emits_matching_encoder_and_decoder() {
    let def = StructDef {
        name: "Point".into(),
        fields: vec![field("x", int32()), field("y", int32())],
        external: false,
    };
    let doc = doc();

    let plan = CodecPlan::new(&def, &doc).unwrap();

    assert_eq!(
        plan.emit_encoder(),
        "inline auto encode_other(uint8_t *& data, uint8_t * end_data, const Point & value) -> void\n\
         {\n    encode(data, end_data, value.x);\n    encode(data, end_data, value.y);\n}\n"
    );
    assert_eq!(
        plan.emit_decoder(),
        "inline auto decode_other(const uint8_t *& data, const uint8_t * end_data, Point & value) -> void\n\
         {\n    value.x = decode<int32_t>(data, end_data);\n    value.y = decode<int32_t>(data, end_data);\n}\n"
    );
}

#[test]
fn CodecPlan___fields___follow_declaration_order() {
    let def = StructDef {
        name: "Mixed".into(),
        fields: vec![
            field("name", FieldType::String),
            field("color", FieldType::EnumRef("Color".into())),
            field("raw", FieldType::Blob),
        ],
        external: false,
    };
    let doc = doc();

    let plan = CodecPlan::new(&def, &doc).unwrap();
    let names: Vec<&str> = plan.fields().iter().map(|(name, _)| *name).collect();

    assert_eq!(plan.struct_name(), "Mixed");
    assert_eq!(names, vec!["name", "color", "raw"]);
}

#[test]
fn emit_prototypes___declares_both_directions() {
    let def = StructDef {
        name: "List".into(),
        fields: vec![],
        external: false,
    };

    let code = emit_prototypes([&def]);

    assert_eq!(
        code,
        "inline auto encode_other(uint8_t *& data, uint8_t * end_data, const List & value) -> void;\n\
         inline auto decode_other(const uint8_t *& data, const uint8_t * end_data, List & value) -> void;\n"
    );
}

#[test]
fn emit_codec___places_decoder_after_encoder() {
    let def = StructDef {
        name: "List".into(),
        fields: vec![field("items", FieldType::VariableArray(Box::new(int32())))],
        external: false,
    };

    let code = emit_codec(&def, &doc()).unwrap();

    let encoder = code.find("encode_other").unwrap();
    let decoder = code.find("decode_other").unwrap();
    assert!(encoder < decoder);
    assert!(code.contains("encode_variable_array(data, end_data, value.items"));
    assert!(code.contains("decode_variable_array(data, end_data, value.items"));
}
