//! Unit tests for guard generation.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    errors::errors::ErrorImpl,
    parser::{parse_type_spec, ParameterBinding, TypedParameter},
    Position, Span,
};

use super::codegen::{coercion, generate_guards, runtime_type_name, violation_test};

fn binding(parameters: &[(&str, &str)]) -> ParameterBinding {
    let file = Rc::new("test.js".to_string());
    parameters
        .iter()
        .enumerate()
        .map(|(index, (name, annotation))| {
            (
                name.to_string(),
                TypedParameter {
                    spec: parse_type_spec(annotation).unwrap(),
                    span: Span {
                        start: Position(index as u32 * 10, Rc::clone(&file)),
                        end: Position(index as u32 * 10 + 5, Rc::clone(&file)),
                    },
                },
            )
        })
        .collect()
}

fn guards(parameters: &[(&str, &str)]) -> String {
    generate_guards(&binding(parameters)).unwrap()
}

#[test]
fn test_scalar_guard() {
    assert_eq!(
        guards(&[("name", "String")]),
        "\nif(typeof(name) != 'string'){\n    throw new TypeError(\"Expected parameter name to be of type String, got \" + (name === null ? 'null' : name === undefined ? 'undefined' : name.constructor?.name ?? typeof(name)));\n}\n"
    );
}

#[test]
fn test_instance_guard() {
    let out = guards(&[("when", "Date")]);
    assert!(out.starts_with("\nif(!(when instanceof Date)){\n"));
    assert!(out.contains("to be of type Date, got "));
}

#[test]
fn test_uncontained_container_uses_instanceof() {
    let out = guards(&[("items", "Array"), ("lookup", "Map")]);
    assert!(out.contains("if(!(items instanceof Array)){"));
    assert!(out.contains("if(!(lookup instanceof Map)){"));
}

#[test]
fn test_nullable_guard() {
    let out = guards(&[("x", "nullable Number")]);
    assert!(out.starts_with("\nif(x != null && typeof(x) != 'number'){\n"));
    assert!(out.contains("to be of type Number or null/undefined, got "));
}

#[test]
fn test_strict_nullable_guard() {
    let out = guards(&[("x", "strict nullable Boolean")]);
    assert!(out.starts_with("\nif(x !== null && typeof(x) != 'boolean'){\n"));
    assert!(out.contains("to be of type Boolean or null, got "));
}

#[test]
fn test_implicit_scalar_coerces() {
    assert_eq!(
        guards(&[("count", "implicit Number")]),
        "\nif(typeof(count) != 'number'){\n    count = Number(count);\n}\n"
    );
}

#[test]
fn test_implicit_instance_coerces() {
    assert_eq!(
        guards(&[("when", "implicit nullable Date")]),
        "\nif(when != null && !(when instanceof Date)){\n    when = new Date(when);\n}\n"
    );
}

#[test]
fn test_implicit_array_spreads() {
    assert_eq!(coercion(&parse_type_spec("Array").unwrap(), "xs"), "[...xs]");
    assert_eq!(coercion(&parse_type_spec("Set").unwrap(), "xs"), "new Set(xs)");
    assert_eq!(coercion(&parse_type_spec("Symbol").unwrap(), "xs"), "Symbol(xs)");
}

#[test]
fn test_violation_test_on_expression() {
    assert_eq!(
        violation_test(&parse_type_spec("nullable String").unwrap(), "xs[i]"),
        "xs[i] != null && typeof(xs[i]) != 'string'"
    );
}

#[test]
fn test_runtime_type_name() {
    assert_eq!(
        runtime_type_name("e[0]"),
        "(e[0] === null ? 'null' : e[0] === undefined ? 'undefined' : e[0].constructor?.name ?? typeof(e[0]))"
    );
}

#[test]
fn test_array_contents_guard() {
    let out = guards(&[("xs", "Array[Number]")]);
    let expected_contents = format!(
        "\nif(xs.some(e => typeof(e) != 'number')){{\n    throw new TypeError(\"Expected parameter xs to only contain values of type Number, got \" + xs.filter(e => typeof(e) != 'number').map(e => {})[0]);\n}}\n",
        runtime_type_name("e")
    );

    assert!(out.starts_with("\nif(!(xs instanceof Array)){\n"));
    assert!(out.ends_with(&expected_contents));
}

#[test]
fn test_contents_nullability_is_independent() {
    let out = guards(&[("xs", "nullable Array[strict nullable String]")]);
    assert!(out.contains("if(xs != null && !(xs instanceof Array)){"));
    assert!(out.contains("if(xs != null && xs.some(e => e !== null && typeof(e) != 'string')){"));
    assert!(out.contains("to only contain values of type String or null, got "));
}

#[test]
fn test_set_contents_guard() {
    let out = guards(&[("tags", "Set[String]")]);
    assert!(out.contains("if([...tags].some(e => typeof(e) != 'string')){"));
    assert!(out.contains("[...tags].filter(e => typeof(e) != 'string')"));
}

#[test]
fn test_object_contents_guard() {
    let out = guards(&[("scores", "Object[Number]")]);
    assert!(out.contains("if(Object.values(scores).some(e => typeof(e) != 'number')){"));
}

#[test]
fn test_implicit_array_contents_copies_before_coercing() {
    let out = guards(&[("xs", "Array[implicit Number]")]);
    assert!(out.ends_with(
        "\nif(xs.some(e => typeof(e) != 'number')){\n    xs = [...xs];\n    for(let xsIndex = 0; xsIndex < xs.length; xsIndex++){\n        if(typeof(xs[xsIndex]) != 'number'){\n            xs[xsIndex] = Number(xs[xsIndex]);\n        }\n    }\n}\n"
    ));
}

#[test]
fn test_implicit_set_contents_rebuilds_set() {
    let out = guards(&[("tags", "Set[implicit String]")]);
    assert!(out.contains("    let tagsValues = [...tags];\n"));
    assert!(out.contains("            tagsValues[tagsIndex] = String(tagsValues[tagsIndex]);\n"));
    assert!(out.contains("    tags = new Set(tagsValues);\n"));
}

#[test]
fn test_implicit_object_contents_copies_before_coercing() {
    let out = guards(&[("o", "Object[implicit nullable Date]")]);
    assert!(out.contains("    o = {...o};\n    for(const oKey of Object.keys(o)){\n"));
    assert!(out.contains("        if(o[oKey] != null && !(o[oKey] instanceof Date)){\n            o[oKey] = new Date(o[oKey]);\n"));
}

#[test]
fn test_map_checks_keys_then_values() {
    let out = guards(&[("m", "Map[String, Number]")]);
    let keys = out
        .find("if([...m].some(e => typeof(e[0]) != 'string')){")
        .unwrap();
    let values = out
        .find("if([...m].some(e => typeof(e[1]) != 'number')){")
        .unwrap();

    assert!(keys < values);
    assert!(out.contains("to only contain keys of type String, got "));
    assert!(out.contains("to only contain values of type Number, got "));
    assert!(out.contains(".map(e => (e[0] === null ? 'null'"));
}

#[test]
fn test_map_implicit_contents_is_unsupported() {
    let error = generate_guards(&binding(&[("a", "Number"), ("m", "Map[implicit String, Number]")]))
        .unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnsupportedImplicitContents {
            parameter: "m".to_string(),
            type_: "Map[implicit String, Number]".to_string(),
        }
    );
    assert_eq!(error.get_position().0, 10);
}

#[test]
fn test_implicit_map_itself_is_supported() {
    let out = guards(&[("m", "implicit Map[String, Number]")]);
    assert!(out.contains("    m = new Map(m);\n"));
}

#[test]
fn test_parameters_in_declaration_order() {
    let out = guards(&[("b", "Number"), ("a", "String")]);
    assert!(out.find("typeof(b)").unwrap() < out.find("typeof(a)").unwrap());
}

#[test]
fn test_empty_binding() {
    assert_eq!(guards(&[]), "");
}
