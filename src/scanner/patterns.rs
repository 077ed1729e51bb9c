use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `class`, an optional name and `extends` clause, then the body's `{`.
    pub static ref CLASS_PATTERN: Regex =
        Regex::new(r"^class\b(?:\s+[\w$]+)??(?:\s+extends\s+[\w$.]+)?\s*\{").unwrap();

    /// `function`, an optional `*` and name, then `(`. Only used where the
    /// keyword itself starts; a bare `(` is recognised without a regex.
    pub static ref FUNCTION_PATTERN: Regex =
        Regex::new(r"^function\b\s*(?:\*\s*)?(?:[\w$]+\s*)?\(").unwrap();

    /// What must follow the `)` of a method or `function`.
    pub static ref BLOCK_BODY_PATTERN: Regex = Regex::new(r"^\s*\{").unwrap();

    /// What must follow the `)` of an arrow function.
    pub static ref ARROW_BODY_PATTERN: Regex = Regex::new(r"^\s*=>\s*\{").unwrap();
}
