//! Identifier hardening for SQL assembled from request input.
//!
//! Metadata queries are built as SQL text, so catalog/schema/table names
//! taken from request parameters must never carry quoting or punctuation.
//! Identifiers are checked against a strict allow-list; values placed in
//! string-literal position are additionally quote-escaped.

use crate::error::EngineError;

const MAX_IDENT_LEN: usize = 128;

/// Validate a catalog/schema/table identifier against the allow-list
/// `[A-Za-z_][A-Za-z0-9_$]*`, length-bounded.
pub fn validate_identifier(kind: &str, value: &str) -> Result<(), EngineError> {
    if value.is_empty() || value.len() > MAX_IDENT_LEN {
        return Err(EngineError::InvalidIdentifier(format!(
            "{} name must be between 1 and {} characters",
            kind, MAX_IDENT_LEN
        )));
    }

    let first_ok = value
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
    let rest_ok = value
        .chars()
        .skip(1)
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if !(first_ok && rest_ok) {
        return Err(EngineError::InvalidIdentifier(format!(
            "{} name '{}' contains characters outside [A-Za-z0-9_$]",
            kind, value
        )));
    }

    Ok(())
}

/// Escape a value for use inside a single-quoted SQL literal.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_identifiers() {
        assert!(validate_identifier("catalog", "tpch").is_ok());
        assert!(validate_identifier("schema", "_internal").is_ok());
        assert!(validate_identifier("table", "orders_2024$archive").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert!(validate_identifier("catalog", "").is_err());
        let long = "a".repeat(MAX_IDENT_LEN + 1);
        assert!(validate_identifier("catalog", &long).is_err());
    }

    #[test]
    fn test_rejects_injection_attempts() {
        assert!(validate_identifier("catalog", "tpch; DROP TABLE users").is_err());
        assert!(validate_identifier("schema", "x' OR '1'='1").is_err());
        assert!(validate_identifier("table", "a.b").is_err());
        assert!(validate_identifier("catalog", "1starts_with_digit").is_err());
    }

    #[test]
    fn test_escape_literal_doubles_quotes() {
        assert_eq!(escape_literal("plain"), "plain");
        assert_eq!(escape_literal("o'hare"), "o''hare");
    }
}
