//! In-memory materialization of a query result.

use serde_json::Value;

use crate::error::EngineError;

/// An ordered sequence of named columns with heterogeneous row values.
///
/// Created once per query, consumed by the caller, never cached and never
/// mutated after creation. No size limit is enforced; bounding the result
/// is the caller's responsibility.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// First value of the first row, if any.
    pub fn scalar(&self) -> Option<&Value> {
        self.rows.first().and_then(|row| row.first())
    }

    /// Values of the named column rendered as strings, in row order.
    ///
    /// Non-string values are rendered through their JSON representation.
    pub fn string_column(&self, name: &str) -> Result<Vec<String>, EngineError> {
        let idx = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| {
                EngineError::query(format!("Result is missing expected column '{}'", name))
            })?;

        Ok(self
            .rows
            .iter()
            .map(|row| match row.get(idx) {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ResultTable {
        ResultTable::new(
            vec!["name".to_string(), "ordinal".to_string()],
            vec![
                vec![json!("orders"), json!(1)],
                vec![json!("lineitem"), json!(2)],
            ],
        )
    }

    #[test]
    fn test_string_column_in_row_order() {
        let table = sample();
        assert_eq!(
            table.string_column("name").unwrap(),
            vec!["orders".to_string(), "lineitem".to_string()]
        );
        // Non-string values fall back to their JSON rendering
        assert_eq!(
            table.string_column("ordinal").unwrap(),
            vec!["1".to_string(), "2".to_string()]
        );
    }

    #[test]
    fn test_string_column_missing_is_query_error() {
        let err = sample().string_column("nope").unwrap_err();
        assert!(matches!(err, EngineError::Query(_)));
    }

    #[test]
    fn test_scalar() {
        assert_eq!(sample().scalar(), Some(&json!("orders")));
        assert_eq!(ResultTable::default().scalar(), None);
    }
}
