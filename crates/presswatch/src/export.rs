//! Standalone HTML timeline export.
//!
//! Writes a single self-contained page that feeds the mapped item batch to
//! the vis-timeline widget loaded from a CDN. The item cards are already
//! escaped HTML; the JSON blob itself is additionally `</script>`-escaped
//! before being embedded.

use std::fs;
use std::path::Path;

use presswatch_timeline::MappedBatch;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const VIS_JS: &str = "https://unpkg.com/vis-timeline@7.7.3/standalone/umd/vis-timeline-graph2d.min.js";
const VIS_CSS: &str = "https://unpkg.com/vis-timeline@7.7.3/styles/vis-timeline-graph2d.min.css";

/// Writes the timeline page for one project.
pub fn write_page(path: &Path, project_id: &str, batch: &MappedBatch) -> Result<()> {
    let html = render_page(project_id, batch)?;
    fs::write(path, html)?;
    Ok(())
}

/// Renders the full HTML document.
pub fn render_page(project_id: &str, batch: &MappedBatch) -> Result<String> {
    let items = serde_json::to_string(&batch.items)?;
    // A `</script>` inside a JSON string would terminate the script block.
    let items = items.replace("</", "<\\/");

    let empty_note = if batch.is_empty() {
        "<p class=\"empty\">No media coverage recorded for this project yet.</p>"
    } else {
        ""
    };

    let skipped_note = if batch.skipped.is_empty() {
        String::new()
    } else {
        format!(
            "<p class=\"skipped\">{} rows skipped (unreadable dates)</p>",
            batch.skipped.len()
        )
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Media coverage — project {project_id}</title>
<link rel="stylesheet" href="{VIS_CSS}">
<style>
  body {{ font-family: system-ui, sans-serif; margin: 1rem; }}
  #timeline {{ border: 1px solid #ccc; }}
  .card {{ max-width: 24rem; font-size: 0.85rem; }}
  .card__media {{ font-weight: 600; margin-right: 0.5rem; }}
  .card__date {{ color: #666; margin-right: 0.5rem; }}
  .card__party {{ background: #eee; border-radius: 3px; padding: 0 0.3rem; }}
  .card__headline {{ margin: 0.3rem 0; font-size: 1rem; }}
  .card__desc--missing {{ color: #999; font-style: italic; }}
  .card--incomplete .card__missing {{ color: #b00; font-style: italic; }}
  .skipped, .empty {{ color: #666; }}
</style>
</head>
<body>
<h1>Media coverage — project {project_id}</h1>
{empty_note}{skipped_note}
<div id="timeline"></div>
<script src="{VIS_JS}"></script>
<script>
  var items = {items};
  items.forEach(function (item) {{ item.start = new Date(item.start); }});
  var timeline = new vis.Timeline(
    document.getElementById("timeline"),
    new vis.DataSet(items),
    {{ zoomable: true, stack: true }}
  );
  timeline.fit();
</script>
</body>
</html>
"#
    ))
}
