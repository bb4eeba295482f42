//! ZON's reserved words: JSON's three plus the `@import` builtin. The
//! lexer recognizes them directly; this table exists for callers that
//! need to name or validate them without re-deriving the set from token
//! kinds.

pub const KEYWORDS: &[&str] = &["true", "false", "null", "@import"];

pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_import_alongside_the_json_keywords() {
        assert!(is_keyword("@import"));
        assert!(is_keyword("true"));
        assert!(!is_keyword("@Import"));
    }
}
