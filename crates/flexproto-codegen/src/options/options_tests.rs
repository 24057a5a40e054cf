#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn GeneratorOptions___default___uses_flexproto_header() {
    let options = GeneratorOptions::default();

    assert_eq!(options.runtime_header, "flexproto.h");
    assert_eq!(options.include_guard, None);
    assert!(options.banner);
}

#[test]
fn GeneratorOptions___empty_toml___equals_default() {
    let options = GeneratorOptions::from_toml("").unwrap();

    assert_eq!(options, GeneratorOptions::default());
}

#[test_case(r#"runtime_header = "wire/flex.h""#, "wire/flex.h")]
#[test_case(r#"runtime_header = "<flexproto.h>""#, "<flexproto.h>")]
fn GeneratorOptions___runtime_header_toml___parses(text: &str, expected: &str) {
    let options = GeneratorOptions::from_toml(text).unwrap();

    assert_eq!(options.runtime_header, expected);
}

#[test]
fn GeneratorOptions___guard_and_banner___parse() {
    let options = GeneratorOptions::from_toml("include_guard = \"MY_GUARD\"\nbanner = false").unwrap();

    assert_eq!(options.include_guard.as_deref(), Some("MY_GUARD"));
    assert!(!options.banner);
}

#[test]
fn GeneratorOptions___unknown_key___is_rejected() {
    let result = GeneratorOptions::from_toml("indent = 2");

    assert!(result.is_err());
}

#[test]
fn GeneratorOptions___builders___override_fields() {
    let options = GeneratorOptions::new()
        .with_runtime_header("rt.h")
        .with_include_guard("G");

    assert_eq!(options.runtime_header, "rt.h");
    assert_eq!(options.include_guard.as_deref(), Some("G"));
}
