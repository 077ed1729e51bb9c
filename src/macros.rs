//! Text emission macros for the code generator.
//!
//! - `MK_GUARD!` - Appends an `if` block to a generated JavaScript buffer
//! - `MK_TYPE_ERROR!` - Builds a `throw new TypeError(...)` statement
//!
//! Generated statements are plain text, so these keep the layout of every
//! emitted block identical.

/// Appends `if(<condition>){ <body> }` to `$out`.
///
/// Every body argument may span several lines; each line is indented one
/// level inside the block.
///
/// # Example
///
/// ```ignore
/// MK_GUARD!(out, "typeof(x) != 'string'", "x = String(x);");
/// ```
#[macro_export]
macro_rules! MK_GUARD {
    ($out:expr, $condition:expr, $($body:expr),+ $(,)?) => {{
        $out.push_str(&format!("\nif({}){{\n", $condition));
        $(
            for line in $body.lines() {
                $out.push_str("    ");
                $out.push_str(line);
                $out.push('\n');
            }
        )+
        $out.push_str("}\n");
    }};
}

/// Builds a statement throwing a `TypeError` about a parameter.
///
/// # Arguments
///
/// * `$parameter` - The parameter name
/// * `$expectation` - What the parameter should be, e.g. `be of type String`
/// * `$actual` - A JavaScript expression naming what was received
#[macro_export]
macro_rules! MK_TYPE_ERROR {
    ($parameter:expr, $expectation:expr, $actual:expr) => {
        format!(
            "throw new TypeError(\"Expected parameter {} to {}, got \" + {});",
            $parameter, $expectation, $actual
        )
    };
}
