//! Guard and coercion generation.
//!
//! For every typed parameter, in declaration order, this emits:
//!
//! 1. A base type check that either throws a `TypeError` or, for
//!    `implicit` types, converts the value in place.
//! 2. For containers with contents, an element check over the container's
//!    elements (`Array`, `Set`), own values (`Object`), or keys and values
//!    separately (`Map`).
//!
//! The output is plain JavaScript text meant to be spliced directly after a
//! function body's opening brace.

use crate::{
    errors::errors::{Error, ErrorImpl},
    parser::{ContainerKind, Contents, ParameterBinding, TypeSpec, TypedParameter},
    MK_GUARD, MK_TYPE_ERROR,
};

/// Arrow parameter used by element predicates.
const ELEMENT: &str = "e";

/// Generates the statements for every parameter of a binding.
pub fn generate_guards(bindings: &ParameterBinding) -> Result<String, Error> {
    let mut out = String::new();

    for (name, parameter) in bindings {
        generate_parameter_guard(&mut out, name, parameter)?;
    }

    Ok(out)
}

fn generate_parameter_guard(
    out: &mut String,
    name: &str,
    parameter: &TypedParameter,
) -> Result<(), Error> {
    let spec = &parameter.spec;

    if spec.container_kind() == Some(ContainerKind::Map) && spec.has_implicit_contents() {
        return Err(Error::new(
            ErrorImpl::UnsupportedImplicitContents {
                parameter: name.to_string(),
                type_: spec.to_string(),
            },
            parameter.span.start.clone(),
        ));
    }

    let condition = violation_test(spec, name);
    if spec.implicit {
        MK_GUARD!(out, condition, format!("{} = {};", name, coercion(spec, name)));
    } else {
        MK_GUARD!(
            out,
            condition,
            MK_TYPE_ERROR!(
                name,
                format!("be of type {}", spec.expected_name()),
                runtime_type_name(name)
            )
        );
    }

    match &spec.contents {
        Some(Contents::Single(inner)) => generate_contents_guard(out, name, spec, inner),
        Some(Contents::Pair(keys, values)) => {
            generate_entry_guard(out, name, spec, keys, 0, "keys");
            generate_entry_guard(out, name, spec, values, 1, "values");
        }
        None => {}
    }

    Ok(())
}

/// Checks the elements of an `Array` or `Set`, or the own values of an `Object`.
fn generate_contents_guard(out: &mut String, name: &str, outer: &TypeSpec, inner: &TypeSpec) {
    let Some(kind) = outer.container_kind() else {
        return;
    };

    let sequence = match kind {
        ContainerKind::Array => name.to_string(),
        ContainerKind::Set => format!("[...{}]", name),
        ContainerKind::Object => format!("Object.values({})", name),
        ContainerKind::Map => return,
    };

    let predicate = format!("{} => {}", ELEMENT, violation_test(inner, ELEMENT));
    let condition = format!("{}{}.some({})", null_skip(outer, name), sequence, predicate);

    if inner.implicit {
        MK_GUARD!(out, condition, coerce_contents(kind, name, inner));
    } else {
        MK_GUARD!(
            out,
            condition,
            MK_TYPE_ERROR!(
                name,
                format!("only contain values of type {}", inner.expected_name()),
                format!(
                    "{}.filter({}).map({} => {})[0]",
                    sequence,
                    predicate,
                    ELEMENT,
                    runtime_type_name(ELEMENT)
                )
            )
        );
    }
}

/// Checks one slot (0 for keys, 1 for values) of every entry of a `Map`.
fn generate_entry_guard(
    out: &mut String,
    name: &str,
    outer: &TypeSpec,
    inner: &TypeSpec,
    slot: usize,
    label: &str,
) {
    let entry = format!("{}[{}]", ELEMENT, slot);
    let sequence = format!("[...{}]", name);
    let predicate = format!("{} => {}", ELEMENT, violation_test(inner, &entry));
    let condition = format!("{}{}.some({})", null_skip(outer, name), sequence, predicate);

    MK_GUARD!(
        out,
        condition,
        MK_TYPE_ERROR!(
            name,
            format!("only contain {} of type {}", label, inner.expected_name()),
            format!(
                "{}.filter({}).map({} => {})[0]",
                sequence,
                predicate,
                ELEMENT,
                runtime_type_name(&entry)
            )
        )
    );
}

/// Copies the container, then converts every non-conforming element of the
/// copy. The caller's container is never written to.
fn coerce_contents(kind: ContainerKind, name: &str, inner: &TypeSpec) -> String {
    let index = format!("{}Index", name);

    match kind {
        ContainerKind::Array => {
            let element = format!("{}[{}]", name, index);
            format!(
                "{name} = [...{name}];\n{}",
                coerce_each_index(name, &index, &element, inner),
                name = name
            )
        }
        ContainerKind::Set => {
            let values = format!("{}Values", name);
            let element = format!("{}[{}]", values, index);
            format!(
                "let {values} = [...{name}];\n{}\n{name} = new Set({values});",
                coerce_each_index(&values, &index, &element, inner),
                values = values,
                name = name
            )
        }
        ContainerKind::Object => {
            let key = format!("{}Key", name);
            let element = format!("{}[{}]", name, key);
            format!(
                "{name} = {{...{name}}};\nfor(const {key} of Object.keys({name})){{\n    if({test}){{\n        {element} = {coerced};\n    }}\n}}",
                name = name,
                key = key,
                test = violation_test(inner, &element),
                element = element,
                coerced = coercion(inner, &element)
            )
        }
        ContainerKind::Map => String::new(),
    }
}

fn coerce_each_index(array: &str, index: &str, element: &str, inner: &TypeSpec) -> String {
    format!(
        "for(let {index} = 0; {index} < {array}.length; {index}++){{\n    if({test}){{\n        {element} = {coerced};\n    }}\n}}",
        index = index,
        array = array,
        test = violation_test(inner, element),
        element = element,
        coerced = coercion(inner, element)
    )
}

/// A JavaScript condition that is true when `value` does not satisfy `spec`.
pub fn violation_test(spec: &TypeSpec, value: &str) -> String {
    let test = if spec.is_scalar() {
        format!(
            "typeof({}) != '{}'",
            value,
            spec.base_type.to_lowercase()
        )
    } else {
        format!("!({} instanceof {})", value, spec.base_type)
    };

    format!("{}{}", null_skip(spec, value), test)
}

/// The short-circuit prefix that lets null (and undefined, unless strict) through.
fn null_skip(spec: &TypeSpec, value: &str) -> String {
    if spec.strict_nullable {
        format!("{} !== null && ", value)
    } else if spec.nullable {
        format!("{} != null && ", value)
    } else {
        String::new()
    }
}

/// A JavaScript expression converting `value` to the type of `spec`.
pub fn coercion(spec: &TypeSpec, value: &str) -> String {
    if spec.is_scalar() {
        format!("{}({})", spec.base_type, value)
    } else if spec.container_kind() == Some(ContainerKind::Array) {
        format!("[...{}]", value)
    } else {
        format!("new {}({})", spec.base_type, value)
    }
}

/// A JavaScript expression naming the runtime type of `value`.
pub fn runtime_type_name(value: &str) -> String {
    format!(
        "({v} === null ? 'null' : {v} === undefined ? 'undefined' : {v}.constructor?.name ?? typeof({v}))",
        v = value
    )
}
