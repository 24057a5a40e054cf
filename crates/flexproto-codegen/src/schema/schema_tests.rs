#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("int8_t", IntType::INT8)]
#[test_case("int64_t", IntType::INT64)]
#[test_case("uint16_t", IntType::UINT16)]
#[test_case("uint32_t", IntType::UINT32)]
fn IntType___from_token___finds_basic_type(token: &str, expected: IntType) {
    assert_eq!(IntType::from_token(token), Some(expected));
}

#[test_case("int"; "plain int")]
#[test_case("i32"; "rust spelling")]
#[test_case("int128_t"; "unsupported width")]
#[test_case(""; "empty")]
fn IntType___from_token___rejects_other_tokens(token: &str) {
    assert_eq!(IntType::from_token(token), None);
}

#[test]
fn IntType___c_name___round_trips_for_all() {
    for ty in IntType::ALL {
        assert_eq!(IntType::from_token(ty.c_name()), Some(ty));
    }
}

#[test_case(IntType::INT8, -128, 127)]
#[test_case(IntType::UINT8, 0, 255)]
#[test_case(IntType::INT32, i32::MIN as i128, i32::MAX as i128)]
#[test_case(IntType::UINT64, 0, u64::MAX as i128)]
#[test_case(IntType::INT64, i64::MIN as i128, i64::MAX as i128)]
fn IntType___range___matches_width(ty: IntType, min: i128, max: i128) {
    assert_eq!(ty.min(), min);
    assert_eq!(ty.max(), max);
    assert!(ty.contains(min));
    assert!(!ty.contains(max + 1));
}

#[test]
fn FieldType___embedded_struct___sees_through_fixed_arrays() {
    let nested = FieldType::FixedArray(
        Box::new(FieldType::FixedArray(
            Box::new(FieldType::StructRef("Cell".into())),
            3,
        )),
        3,
    );

    assert_eq!(nested.embedded_struct(), Some("Cell"));
}

#[test]
fn FieldType___embedded_struct___variable_array_is_indirection() {
    let ty = FieldType::VariableArray(Box::new(FieldType::StructRef("Node".into())));

    assert_eq!(ty.embedded_struct(), None);
}

#[test]
fn TypeEnumDef___tag_of___is_position() {
    let def = TypeEnumDef {
        name: "TagEnum".into(),
        members: vec![
            TypeEnumMember {
                name: "Request".into(),
                ty: FieldType::StructRef("Request".into()),
            },
            TypeEnumMember {
                name: "Response".into(),
                ty: FieldType::StructRef("Response".into()),
            },
        ],
    };

    assert_eq!(def.tag_of("Request"), Some(0));
    assert_eq!(def.tag_of("Response"), Some(1));
    assert_eq!(def.tag_of("Other"), None);
}

#[test]
fn SchemaDocument___local_structs___skips_external() {
    let doc = SchemaDocument {
        external_structs: vec!["Vec3".into()],
        structs: vec![
            StructDef {
                name: "Vec3".into(),
                fields: vec![],
                external: true,
            },
            StructDef {
                name: "Body".into(),
                fields: vec![],
                external: false,
            },
        ],
        ..Default::default()
    };

    let names: Vec<&str> = doc.local_structs().map(|s| s.name.as_str()).collect();

    assert_eq!(names, vec!["Body"]);
    assert!(doc.is_external("Vec3"));
    assert!(doc.struct_def("Vec3").is_some());
}
