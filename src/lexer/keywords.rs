use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Words the host language reserves. Nothing matching one of these may be
    /// read as a type name or parameter name.
    pub static ref RESERVED_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for word in [
            "async", "await", "break", "case", "catch", "class", "const", "continue",
            "debugger", "default", "delete", "do", "else", "enum", "export", "extends",
            "false", "finally", "for", "function", "if", "implements", "import", "in",
            "instanceof", "interface", "let", "new", "null", "package", "private",
            "protected", "public", "return", "super", "switch", "static", "this",
            "throw", "try", "true", "typeof", "var", "void", "while", "with", "yield",
        ] {
            set.insert(word);
        }
        set
    };

    /// Modifiers of the annotation grammar. They are not reserved by the host
    /// language, but cannot name a type.
    pub static ref GRAMMAR_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("implicit");
        set.insert("nullable");
        set.insert("strict");
        set
    };

    /// Types checked with `typeof` and converted by calling the type as a function.
    pub static ref SCALAR_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("String");
        set.insert("Number");
        set.insert("Boolean");
        set.insert("Symbol");
        set
    };
}

pub fn is_reserved(word: &str) -> bool {
    RESERVED_LOOKUP.contains(word)
}

pub fn is_grammar_keyword(word: &str) -> bool {
    GRAMMAR_LOOKUP.contains(word)
}

pub fn is_scalar(type_name: &str) -> bool {
    SCALAR_LOOKUP.contains(type_name)
}

pub fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}
