//! Testing helpers
//!
//! [BasicCommandLine] is a small host configuration object with one slot per value type,
//! declared the way a real host would declare its own. Tests bind into it and then look
//! at plain struct fields instead of going through a `ValueMap`.
//!
//! [assert_tokens] panics with the full token stream on mismatch so failures are
//! readable without a debugger.

use crate::argbind::conversion::Value;
use crate::argbind::lexing::lex;
use crate::argbind::schema::{ParameterDescriptor, SlotRef, Slots};
use crate::argbind::token::TokenKind;

/// Host fixture: one slot per value type, plus a path slot with two aliases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicCommandLine {
    pub test_param: String,
    pub test_bool: bool,
    pub test_int32: i32,
    pub test_int64: i64,
    pub test_float: f64,
    pub path: String,
}

impl BasicCommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema matching the fields above.
    pub fn descriptors() -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::string("test_param").alias("testParam"),
            ParameterDescriptor::boolean("test_bool").alias("testBool"),
            ParameterDescriptor::int32("test_int32").alias("testInt32"),
            ParameterDescriptor::int64("test_int64").alias("testInt64"),
            ParameterDescriptor::float("test_float").alias("testFloat"),
            ParameterDescriptor::string("path").aliases(["path", "filename"]),
        ]
    }
}

impl Slots for BasicCommandLine {
    fn assign(&mut self, slot: &SlotRef, value: Value) {
        match (slot.name(), value) {
            ("test_param", Value::String(v)) => self.test_param = v,
            ("test_bool", Value::Bool(v)) => self.test_bool = v,
            ("test_int32", Value::Int32(v)) => self.test_int32 = v,
            ("test_int64", Value::Int64(v)) => self.test_int64 = v,
            ("test_float", Value::Float(v)) => self.test_float = v,
            ("path", Value::String(v)) => self.path = v,
            (name, value) => panic!("Unexpected write of {:?} into slot {}", value, name),
        }
    }
}

/// Assert that lexing `source` yields exactly `expected` as (kind, lexeme) pairs.
pub fn assert_tokens(source: &str, expected: &[(TokenKind, &str)]) {
    let tokens = lex(source).unwrap_or_else(|e| panic!("Lexing {:?} failed: {}", source, e));
    let actual: Vec<(TokenKind, &str)> = tokens
        .iter()
        .map(|token| (token.kind, token.lexeme.as_str()))
        .collect();
    assert_eq!(
        actual, expected,
        "Token mismatch for {:?}\nGot: {:#?}",
        source, tokens
    );
}
