use serde::{Deserialize, Serialize};

/// One column of a table, as reported by the engine's information schema.
///
/// `is_nullable` carries the information-schema convention ("YES"/"NO")
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsResponse {
    pub columns: Vec<ColumnDescriptor>,
}
