//! Marker types naming ZON grammar productions, for callers building their
//! own "expected X" messages on top of the core `Diagnostic` trait.

use stratify_core::traits::Diagnostic;

pub struct StructOpen;
pub struct StructClose;
pub struct FieldName;
pub struct Equals;
pub struct Import;
pub struct EnumLiteral;

impl Diagnostic for StructOpen {
    fn fmt() -> &'static str {
        "`.{`"
    }
}

impl Diagnostic for StructClose {
    fn fmt() -> &'static str {
        "`}`"
    }
}

impl Diagnostic for FieldName {
    fn fmt() -> &'static str {
        "a `.field` name"
    }
}

impl Diagnostic for Equals {
    fn fmt() -> &'static str {
        "`=`"
    }
}

impl Diagnostic for Import {
    fn fmt() -> &'static str {
        "`@import`"
    }
}

impl Diagnostic for EnumLiteral {
    fn fmt() -> &'static str {
        "an enum literal (`.Identifier`)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn struct_and_field_productions_name_themselves() {
        assert_eq!(StructOpen::fmt(), "`.{`");
        assert_eq!(FieldName::fmt(), "a `.field` name");
        assert_eq!(Equals::fmt(), "`=`");
        assert_eq!(Import::fmt(), "`@import`");
    }
}
