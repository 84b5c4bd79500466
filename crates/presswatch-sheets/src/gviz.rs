//! Client for the gviz JSON export of a public Google spreadsheet.
//!
//! The endpoint (`.../spreadsheets/d/{id}/gviz/tq?tqx=out:json`) answers
//! with a JSONP-wrapped payload. Unwrapping and row extraction are pure
//! functions so they can be tested against canned payloads without any
//! network access.

use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SheetsError};

/// Base URL for the spreadsheets endpoint.
const DEFAULT_ENDPOINT: &str = "https://docs.google.com/spreadsheets/d";

/// Request timeout for sheet fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// One sheet row, keyed by header-row column names.
pub type SheetRow = HashMap<String, String>;

/// Identifies a sheet tab within the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    /// Select by tab name.
    Name(String),
    /// Select by numeric gid.
    Gid(String),
}

impl SheetSelector {
    /// Query parameter for the gviz request.
    fn query_param(&self) -> (&'static str, &str) {
        match self {
            SheetSelector::Name(name) => ("sheet", name),
            SheetSelector::Gid(gid) => ("gid", gid),
        }
    }

    /// Human-readable label for error messages.
    pub fn label(&self) -> &str {
        match self {
            SheetSelector::Name(name) => name,
            SheetSelector::Gid(gid) => gid,
        }
    }
}

/// HTTP client for one public spreadsheet.
#[derive(Debug, Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    endpoint: String,
    spreadsheet_id: String,
}

impl SheetClient {
    /// Creates a client for the given spreadsheet.
    pub fn new(spreadsheet_id: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, spreadsheet_id)
    }

    /// Creates a client against a custom endpoint (used by tests).
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        spreadsheet_id: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            spreadsheet_id: spreadsheet_id.into(),
        })
    }

    /// Fetches all rows of one sheet tab.
    pub async fn fetch_rows(&self, selector: &SheetSelector) -> Result<Vec<SheetRow>> {
        let url = format!("{}/{}/gviz/tq", self.endpoint, self.spreadsheet_id);
        let (key, value) = selector.query_param();

        debug!(sheet = selector.label(), "fetching sheet");

        let response = self
            .http
            .get(&url)
            .query(&[("tqx", "out:json"), (key, value)])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SheetsError::SheetNotFound(selector.label().to_string()));
        }
        if !status.is_success() {
            return Err(SheetsError::Status(status));
        }

        let body = response.text().await?;
        parse_gviz(&body, selector.label())
    }
}

#[derive(Debug, Deserialize)]
struct GvizResponse {
    status: String,
    #[serde(default)]
    errors: Vec<GvizError>,
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizError {
    #[serde(default)]
    reason: String,
    #[serde(default)]
    detailed_message: String,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<GvizCol>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizCol {
    #[serde(default)]
    id: String,
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: serde_json::Value,
    #[serde(default)]
    f: Option<String>,
}

/// Parses a JSONP-wrapped gviz payload into row maps.
///
/// The `sheet` label only feeds error messages.
pub fn parse_gviz(body: &str, sheet: &str) -> Result<Vec<SheetRow>> {
    let json = strip_jsonp(body)?;

    let response: GvizResponse = serde_json::from_str(json)
        .map_err(|e| SheetsError::Malformed(format!("invalid payload JSON: {e}")))?;

    if response.status == "error" {
        // An unknown tab name comes back as an invalid_query error rather
        // than an HTTP failure.
        if response.errors.iter().any(|e| e.reason == "invalid_query") {
            return Err(SheetsError::SheetNotFound(sheet.to_string()));
        }
        let detail = response
            .errors
            .first()
            .map(|e| {
                if e.detailed_message.is_empty() {
                    e.reason.clone()
                } else {
                    e.detailed_message.clone()
                }
            })
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(SheetsError::Malformed(detail));
    }

    let table = response
        .table
        .ok_or_else(|| SheetsError::Malformed("payload has no table".to_string()))?;

    Ok(rows_from_table(table))
}

/// Strips the `google.visualization.Query.setResponse(...)` wrapper.
fn strip_jsonp(body: &str) -> Result<&str> {
    let open = body
        .find('(')
        .ok_or_else(|| SheetsError::Malformed("no JSONP wrapper found".to_string()))?;
    let close = body
        .rfind(')')
        .filter(|&close| close > open)
        .ok_or_else(|| SheetsError::Malformed("unterminated JSONP wrapper".to_string()))?;
    Ok(&body[open + 1..close])
}

/// Builds row maps from the gviz table.
///
/// Column keys come from the column labels. When the sheet has no frozen
/// header the labels are empty and the first data row is promoted to the
/// header instead.
fn rows_from_table(table: GvizTable) -> Vec<SheetRow> {
    let labelled = table.cols.iter().any(|c| !c.label.trim().is_empty());

    let mut data: Vec<Vec<String>> = table
        .rows
        .into_iter()
        .map(|row| {
            let mut cells: Vec<String> = row.c.iter().map(cell_text).collect();
            // Short rows still need a slot per column.
            cells.resize(table.cols.len().max(cells.len()), String::new());
            cells
        })
        .collect();

    let keys: Vec<String> = if labelled {
        table
            .cols
            .iter()
            .map(|c| {
                let label = c.label.trim();
                if label.is_empty() {
                    c.id.clone()
                } else {
                    label.to_string()
                }
            })
            .collect()
    } else {
        if data.is_empty() {
            return Vec::new();
        }
        data.remove(0).iter().map(|s| s.trim().to_string()).collect()
    };

    data.into_iter()
        .map(|cells| {
            keys.iter()
                .cloned()
                .zip(cells)
                .filter(|(key, _)| !key.is_empty())
                .collect()
        })
        .collect()
}

/// Text value of one cell, preferring the formatted string over the raw
/// value so dates come out as the sheet displays them.
fn cell_text(cell: &Option<GvizCell>) -> String {
    let Some(cell) = cell else {
        return String::new();
    };

    if let Some(formatted) = &cell.f {
        return formatted.clone();
    }

    match &cell.v {
        serde_json::Value::String(s) => date_value_to_text(s).unwrap_or_else(|| s.clone()),
        serde_json::Value::Number(n) => {
            // Sheets hands integers back as floats.
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    format!("{}", f as i64)
                }
                _ => n.to_string(),
            }
        }
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Converts a gviz `Date(year,month,day)` value into day/month/year text.
///
/// The month in the payload is zero-based.
fn date_value_to_text(value: &str) -> Option<String> {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    let re = DATE_RE.get_or_init(|| {
        Regex::new(r"^Date\((\d+),(\d+),(\d+)(?:,\d+)*\)$").expect("valid regex")
    });

    let caps = re.captures(value.trim())?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse::<u32>().ok()?.checked_add(1)?;
    let day: u32 = caps[3].parse().ok()?;

    Some(format!("{day:02}/{month:02}/{year:04}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(json: &str) -> String {
        format!(
            "/*O_o*/\ngoogle.visualization.Query.setResponse({json});"
        )
    }

    #[test]
    fn test_parse_labelled_columns() {
        let body = wrap(
            r#"{"version":"0.6","status":"ok","table":{
                "cols":[{"id":"A","label":"project_id","type":"string"},
                        {"id":"B","label":"project_name","type":"string"}],
                "rows":[{"c":[{"v":"1"},{"v":"Bridge"}]},
                        {"c":[{"v":"2"},{"v":"Metro"}]}]}}"#,
        );

        let rows = parse_gviz(&body, "projects").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["project_id"], "1");
        assert_eq!(rows[1]["project_name"], "Metro");
    }

    #[test]
    fn test_parse_first_row_header_fallback() {
        let body = wrap(
            r#"{"status":"ok","table":{
                "cols":[{"id":"A","label":""},{"id":"B","label":""}],
                "rows":[{"c":[{"v":"project_id"},{"v":"project_name"}]},
                        {"c":[{"v":"1"},{"v":"Bridge"}]}]}}"#,
        );

        let rows = parse_gviz(&body, "projects").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["project_id"], "1");
        assert_eq!(rows[0]["project_name"], "Bridge");
    }

    #[test]
    fn test_parse_prefers_formatted_value() {
        let body = wrap(
            r#"{"status":"ok","table":{
                "cols":[{"id":"A","label":"date_announced"}],
                "rows":[{"c":[{"v":"Date(2020,1,15)","f":"15/02/2020"}]}]}}"#,
        );

        let rows = parse_gviz(&body, "1").unwrap();
        assert_eq!(rows[0]["date_announced"], "15/02/2020");
    }

    #[test]
    fn test_parse_date_value_without_formatted_text() {
        let body = wrap(
            r#"{"status":"ok","table":{
                "cols":[{"id":"A","label":"date_announced"}],
                "rows":[{"c":[{"v":"Date(2020,1,15)"}]}]}}"#,
        );

        let rows = parse_gviz(&body, "1").unwrap();
        // gviz months are zero-based: month 1 is February.
        assert_eq!(rows[0]["date_announced"], "15/02/2020");
    }

    #[test]
    fn test_parse_numeric_cell_trims_float() {
        let body = wrap(
            r#"{"status":"ok","table":{
                "cols":[{"id":"A","label":"project_id"}],
                "rows":[{"c":[{"v":3.0}]}]}}"#,
        );

        let rows = parse_gviz(&body, "projects").unwrap();
        assert_eq!(rows[0]["project_id"], "3");
    }

    #[test]
    fn test_parse_null_cells_become_empty() {
        let body = wrap(
            r#"{"status":"ok","table":{
                "cols":[{"id":"A","label":"headline"},{"id":"B","label":"party"}],
                "rows":[{"c":[null,{"v":null}]}]}}"#,
        );

        let rows = parse_gviz(&body, "1").unwrap();
        assert_eq!(rows[0]["headline"], "");
        assert_eq!(rows[0]["party"], "");
    }

    #[test]
    fn test_parse_invalid_query_maps_to_sheet_not_found() {
        let body = wrap(
            r#"{"status":"error","errors":[{"reason":"invalid_query",
                "detailed_message":"Invalid query: NO_COLUMN"}]}"#,
        );

        let err = parse_gviz(&body, "99").unwrap_err();
        match err {
            SheetsError::SheetNotFound(sheet) => assert_eq!(sheet, "99"),
            other => panic!("expected SheetNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_other_error_is_malformed() {
        let body = wrap(
            r#"{"status":"error","errors":[{"reason":"access_denied",
                "detailed_message":"no access"}]}"#,
        );

        assert!(matches!(
            parse_gviz(&body, "projects").unwrap_err(),
            SheetsError::Malformed(_)
        ));
    }

    #[test]
    fn test_parse_non_jsonp_body_is_malformed() {
        assert!(matches!(
            parse_gviz("<html>sign in</html>", "projects").unwrap_err(),
            SheetsError::Malformed(_)
        ));
    }

    #[test]
    fn test_parse_empty_table() {
        let body = wrap(r#"{"status":"ok","table":{"cols":[],"rows":[]}}"#);
        let rows = parse_gviz(&body, "projects").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_short_rows_padded_to_column_count() {
        let body = wrap(
            r#"{"status":"ok","table":{
                "cols":[{"id":"A","label":"headline"},{"id":"B","label":"party"}],
                "rows":[{"c":[{"v":"Only headline"}]}]}}"#,
        );

        let rows = parse_gviz(&body, "1").unwrap();
        assert_eq!(rows[0]["headline"], "Only headline");
        assert_eq!(rows[0]["party"], "");
    }
}
