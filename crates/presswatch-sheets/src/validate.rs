//! Sheet schema validation.

use crate::gviz::SheetRow;

/// Returns the required columns absent from the sheet.
///
/// Only the first row is inspected; the schema is assumed uniform across a
/// sheet. An empty result means proceed. An entirely empty sheet has no
/// schema to violate and also passes.
pub fn missing_columns(rows: &[SheetRow], required: &[&str]) -> Vec<String> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    required
        .iter()
        .filter(|column| !first.contains_key(**column))
        .map(|column| column.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(keys: &[&str]) -> SheetRow {
        keys.iter()
            .map(|k| (k.to_string(), "x".to_string()))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn test_all_columns_present() {
        let rows = vec![row(&["project_id", "project_name", "category"])];
        let missing = missing_columns(&rows, &["project_id", "project_name", "category"]);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_missing_column_reported() {
        let rows = vec![row(&["project_id", "project_name"])];
        let missing = missing_columns(&rows, &["project_id", "project_name", "category"]);
        assert_eq!(missing, vec!["category".to_string()]);
    }

    #[test]
    fn test_only_first_row_checked() {
        let rows = vec![
            row(&["project_id", "project_name", "category"]),
            row(&["project_id"]),
        ];
        let missing = missing_columns(&rows, &["project_id", "project_name", "category"]);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_empty_sheet_passes() {
        let missing = missing_columns(&[], &["project_id"]);
        assert!(missing.is_empty());
    }
}
