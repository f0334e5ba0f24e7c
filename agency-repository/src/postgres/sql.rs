//! SQL text helpers for the dynamic per-collection statements.

use crate::errors::BackendError;
use crate::types::{Row, IMMUTABLE_COLUMNS};

/// PostgreSQL's identifier length limit.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Validate a snake_case column name and return it double-quoted.
pub(crate) fn quote_ident(name: &str) -> Result<String, BackendError> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if !valid_start || !valid_rest || name.len() > MAX_IDENTIFIER_LEN {
        return Err(BackendError::rejected(format!("invalid column name: {name:?}")));
    }
    Ok(format!("\"{name}\""))
}

/// Quoted column list for an insert. Backend-assigned columns may be supplied.
pub(crate) fn insert_columns(fields: &Row) -> Result<Vec<String>, BackendError> {
    fields.keys().map(|key| quote_ident(key)).collect()
}

/// Quoted column list for an update. Backend-assigned columns are immutable.
pub(crate) fn patch_columns(patch: &Row) -> Result<Vec<String>, BackendError> {
    patch
        .keys()
        .map(|key| {
            if IMMUTABLE_COLUMNS.contains(&key.as_str()) {
                Err(BackendError::rejected(format!("column {key} is immutable")))
            } else {
                quote_ident(key)
            }
        })
        .collect()
}

/// `SELECT` that reads every row of `table` newest first.
pub(crate) fn select_all(table: &str) -> String {
    format!("SELECT to_jsonb(t.*) FROM {table} AS t ORDER BY t.created_at DESC")
}

/// `INSERT ... RETURNING` for the given quoted columns; `$1` is the JSON document.
pub(crate) fn insert(table: &str, columns: &[String]) -> String {
    if columns.is_empty() {
        return format!("INSERT INTO {table} AS t DEFAULT VALUES RETURNING to_jsonb(t.*)");
    }
    let columns = columns.join(", ");
    format!(
        "INSERT INTO {table} AS t ({columns}) \
         SELECT {columns} FROM jsonb_populate_record(NULL::{table}, $1) \
         RETURNING to_jsonb(t.*)"
    )
}

/// `UPDATE ... RETURNING` for the given quoted columns; `$1` is the JSON patch,
/// `$2` the row id. An empty column list selects the current row instead.
pub(crate) fn update(table: &str, columns: &[String]) -> String {
    match columns {
        [] => format!("SELECT to_jsonb(t.*) FROM {table} AS t WHERE t.id = $2 AND $1::jsonb IS NOT NULL"),
        [column] => format!(
            "UPDATE {table} AS t SET {column} = \
             (SELECT {column} FROM jsonb_populate_record(NULL::{table}, $1)) \
             WHERE t.id = $2 RETURNING to_jsonb(t.*)"
        ),
        _ => {
            let columns = columns.join(", ");
            format!(
                "UPDATE {table} AS t SET ({columns}) = \
                 (SELECT {columns} FROM jsonb_populate_record(NULL::{table}, $1)) \
                 WHERE t.id = $2 RETURNING to_jsonb(t.*)"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("client_id").unwrap(), "\"client_id\"");
        assert_eq!(quote_ident("_hidden2").unwrap(), "\"_hidden2\"");
        assert!(quote_ident("").is_err());
        assert!(quote_ident("Status").is_err());
        assert!(quote_ident("2fa").is_err());
        assert!(quote_ident("status\"; DROP TABLE clients; --").is_err());
        assert!(quote_ident(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_patch_columns_reject_immutable() {
        let err = patch_columns(&row(json!({ "status": "pending", "id": "x" }))).unwrap_err();
        assert!(matches!(err, BackendError::Rejected(_)));

        let columns = patch_columns(&row(json!({ "status": "pending" }))).unwrap();
        assert_eq!(columns, vec!["\"status\"".to_string()]);
    }

    #[test]
    fn test_update_statement_shapes() {
        let single = update("contents", &["\"status\"".to_string()]);
        assert!(single.contains("SET \"status\" = (SELECT \"status\""));

        let multiple = update("contents", &["\"status\"".to_string(), "\"title\"".to_string()]);
        assert!(multiple.contains("SET (\"status\", \"title\") = (SELECT \"status\", \"title\""));

        let empty = update("contents", &[]);
        assert!(empty.starts_with("SELECT to_jsonb(t.*) FROM contents"));
    }

    #[test]
    fn test_insert_statement_shapes() {
        assert_eq!(
            insert("clients", &[]),
            "INSERT INTO clients AS t DEFAULT VALUES RETURNING to_jsonb(t.*)"
        );
        let statement = insert("clients", &["\"name\"".to_string()]);
        assert!(statement.contains("jsonb_populate_record(NULL::clients, $1)"));
    }
}
