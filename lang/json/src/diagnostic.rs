//! Marker types naming JSON grammar productions, for callers building their
//! own "expected X" messages on top of the core `Diagnostic` trait.

use stratify_core::traits::Diagnostic;

pub struct ObjectOpen;
pub struct ObjectClose;
pub struct ArrayOpen;
pub struct ArrayClose;
pub struct Colon;
pub struct Comma;
pub struct StringValue;
pub struct NumberValue;
pub struct BooleanValue;
pub struct NullValue;

impl Diagnostic for ObjectOpen {
    fn fmt() -> &'static str {
        "`{`"
    }
}

impl Diagnostic for ObjectClose {
    fn fmt() -> &'static str {
        "`}`"
    }
}

impl Diagnostic for ArrayOpen {
    fn fmt() -> &'static str {
        "`[`"
    }
}

impl Diagnostic for ArrayClose {
    fn fmt() -> &'static str {
        "`]`"
    }
}

impl Diagnostic for Colon {
    fn fmt() -> &'static str {
        "`:`"
    }
}

impl Diagnostic for Comma {
    fn fmt() -> &'static str {
        "`,`"
    }
}

impl Diagnostic for StringValue {
    fn fmt() -> &'static str {
        "a string"
    }
}

impl Diagnostic for NumberValue {
    fn fmt() -> &'static str {
        "a number"
    }
}

impl Diagnostic for BooleanValue {
    fn fmt() -> &'static str {
        "`true` or `false`"
    }
}

impl Diagnostic for NullValue {
    fn fmt() -> &'static str {
        "`null`"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_and_value_productions_name_themselves() {
        assert_eq!(ObjectOpen::fmt(), "`{`");
        assert_eq!(ArrayClose::fmt(), "`]`");
        assert_eq!(StringValue::fmt(), "a string");
        assert_eq!(BooleanValue::fmt(), "`true` or `false`");
    }
}
