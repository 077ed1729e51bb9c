//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn unsupported() -> Error {
    Error::new(
        ErrorImpl::UnsupportedImplicitContents {
            parameter: "lookup".to_string(),
            type_: "Map".to_string(),
        },
        Position(17, Rc::new("test.js".to_string())),
    )
}

#[test]
fn test_error_name() {
    assert_eq!(unsupported().get_error_name(), "UnsupportedImplicitContents");
}

#[test]
fn test_error_position() {
    let error = unsupported();
    assert_eq!(error.get_position().0, 17);
    assert_eq!(error.get_position().1.as_str(), "test.js");
}

#[test]
fn test_error_tip_names_parameter() {
    match unsupported().get_tip() {
        ErrorTip::Suggestion(tip) => {
            assert!(tip.contains("`lookup`"));
            assert!(tip.contains("`Map`"));
        }
        ErrorTip::None => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_display() {
    assert_eq!(
        unsupported().to_string(),
        "implicit contents are not supported for parameter \"lookup\" of type Map at test.js:17"
    );
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
