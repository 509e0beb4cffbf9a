//! HTML report generator - Single file dashboard

use crate::export::{to_xlsx_bytes, XLSX_MIME_TYPE};
use crate::models::{DataSource, Presentation};
use crate::reporter::Reporter;
use crate::utils::{data_uri, script_safe_json};
use anyhow::{Context, Result};

pub struct HtmlReporter;

impl Reporter for HtmlReporter {
    fn generate(presentation: &Presentation) -> Result<String> {
        let json_data = script_safe_json(&serde_json::to_string(presentation)?);

        // Only real reports get a download; the sample data is not a report
        let download = match &presentation.source {
            DataSource::Real { file } => {
                let bytes = to_xlsx_bytes(&presentation.view.table)
                    .with_context(|| format!("failed to export {}", file.name))?;
                format!(
                    r#"<a class="download-btn" download="{}" href="{}">Download Excel Report</a>"#,
                    file.name.replace('"', ""),
                    data_uri(XLSX_MIME_TYPE, &bytes)
                )
            }
            DataSource::Demo { .. } => String::new(),
        };

        Ok(format!(r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Invoice Validation Dashboard</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #0f172a; color: #e2e8f0; line-height: 1.6;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; padding: 20px; }}
        h1 {{ font-size: 1.8rem; margin-bottom: 10px; }}
        h2 {{ font-size: 1.3rem; margin: 20px 0 10px; color: #94a3b8; }}

        .header {{
            background: linear-gradient(90deg, #1e3a8a 0%, #b45309 100%);
            padding: 30px; border-radius: 12px; margin-bottom: 20px;
        }}
        .header-info {{ color: #e2e8f0; font-size: 0.9rem; }}

        .notice {{
            background: #713f12; color: #fde047; padding: 15px; border-radius: 8px;
            margin-bottom: 20px; border-left: 4px solid #eab308;
        }}

        .grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 20px; }}
        .card {{
            background: #1e293b; border-radius: 12px; padding: 20px;
            border: 1px solid #334155;
        }}
        .card-title {{ font-size: 0.85rem; color: #64748b; text-transform: uppercase; margin-bottom: 10px; }}
        .card-value {{ font-size: 2rem; font-weight: bold; }}

        .stats-row {{ display: flex; gap: 10px; flex-wrap: wrap; margin-top: 10px; }}
        .stat {{ background: #334155; padding: 8px 12px; border-radius: 6px; font-size: 0.85rem; }}

        .bar-row {{ display: flex; align-items: center; gap: 10px; margin: 8px 0; }}
        .bar-label {{ width: 220px; font-size: 0.9rem; }}
        .bar-track {{ flex: 1; background: #334155; border-radius: 4px; height: 18px; overflow: hidden; }}
        .bar-fill {{ height: 100%; background: #3b82f6; }}
        .bar-count {{ width: 50px; text-align: right; font-family: monospace; }}

        .table-wrap {{ max-height: 500px; overflow: auto; }}
        table {{ width: 100%; border-collapse: collapse; font-size: 0.85rem; }}
        th, td {{ padding: 6px 10px; border-bottom: 1px solid #334155; text-align: left; white-space: nowrap; }}
        th {{ position: sticky; top: 0; background: #1e293b; color: #94a3b8; }}

        .download-btn {{
            display: inline-block; margin-top: 15px;
            background: #3b82f6; color: white; text-decoration: none;
            padding: 8px 16px; border-radius: 6px; font-size: 0.9rem; font-weight: 500;
        }}
        .download-btn:hover {{ background: #2563eb; }}

        footer {{ text-align: center; padding: 30px; color: #64748b; font-size: 0.85rem; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Invoice Validation Dashboard</h1>
            <div class="header-info" id="title"></div>
            {download}
        </div>

        <div class="notice" id="notice" style="display:none"></div>

        <div class="grid" id="metrics"></div>

        <div class="card" style="margin-top: 20px;">
            <div class="card-title">Status</div>
            <div class="stats-row" id="statuses"></div>
        </div>

        <h2>Issues by Type</h2>
        <div class="card" id="chart"></div>

        <div id="rows-section">
            <h2>Validation Results</h2>
            <div class="card table-wrap">
                <table id="rows"></table>
            </div>
        </div>
    </div>

    <footer>
        Generated by delta-dashboard
    </footer>

    <script>
    const data = {json_data};

    function cellText(value) {{
        if (value === null || value === undefined) return '';
        return String(value);
    }}

    function el(tag, text, className) {{
        const node = document.createElement(tag);
        if (text !== undefined) node.textContent = text;
        if (className) node.className = className;
        return node;
    }}

    function init() {{
        const source = data.source;
        const counters = data.view.counters;
        const statuses = data.view.statuses;
        const isDemo = source.kind === 'demo';

        document.getElementById('title').textContent = isDemo
            ? 'Sample Data (no report available)'
            : 'Latest Report: ' + source.file.name + ' (' + source.file.date + ')';

        if (isDemo) {{
            const notice = document.getElementById('notice');
            notice.textContent = 'Sample data. ' + source.reason;
            notice.style.display = 'block';
            document.getElementById('rows-section').style.display = 'none';
        }}

        // Metrics
        const metrics = isDemo
            ? [['Total Issues', counters.total], ['High Priority', counters.high_priority], ['Resolved', statuses.resolved]]
            : [['Total Issues', counters.total], ['High Priority', counters.high_priority],
               ['GST Issues', counters.gst_issues], ['Duplicates', counters.duplicate_issues]];
        const metricsEl = document.getElementById('metrics');
        metrics.forEach(([label, value]) => {{
            const card = el('div', undefined, 'card');
            card.appendChild(el('div', label, 'card-title'));
            card.appendChild(el('div', value.toLocaleString(), 'card-value'));
            metricsEl.appendChild(card);
        }});

        // Statuses
        const statusEl = document.getElementById('statuses');
        [['Pending', statuses.pending], ['Under Review', statuses.under_review],
         ['Resolved', statuses.resolved], ['Other', statuses.other]].forEach(([label, value]) => {{
            if (label === 'Other' && value === 0) return;
            statusEl.appendChild(el('div', label + ': ' + value, 'stat'));
        }});

        // Chart
        const chart = document.getElementById('chart');
        const max = Math.max(1, ...data.view.chart.map(b => b.count));
        data.view.chart.forEach(bar => {{
            const row = el('div', undefined, 'bar-row');
            row.appendChild(el('div', bar.label, 'bar-label'));
            const track = el('div', undefined, 'bar-track');
            const fill = el('div', undefined, 'bar-fill');
            fill.style.width = (bar.count / max * 100) + '%';
            track.appendChild(fill);
            row.appendChild(track);
            row.appendChild(el('div', bar.count, 'bar-count'));
            chart.appendChild(row);
        }});

        // Rows
        if (!isDemo) {{
            const table = document.getElementById('rows');
            const head = el('tr');
            data.view.table.columns.forEach(c => head.appendChild(el('th', c)));
            table.appendChild(head);
            data.view.table.rows.forEach(r => {{
                const tr = el('tr');
                r.cells.forEach(c => tr.appendChild(el('td', cellText(c))));
                table.appendChild(tr);
            }});
        }}
    }}

    init();
    </script>
</body>
</html>"##))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, ReportFile, ReportTable};
    use crate::report::{present, present_demo};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn test_demo_has_no_download() {
        let html = HtmlReporter::generate(&present_demo("no reports")).unwrap();
        assert!(html.contains("Invoice Validation Dashboard"));
        assert!(!html.contains("download-btn\" download"));
        assert!(html.contains("\"kind\":\"demo\""));
    }

    #[test]
    fn test_real_report_embeds_export() {
        let table = ReportTable::from_raw(
            vec!["issue_type".to_string()],
            vec![vec![CellValue::Text("</script>Duplicate Invoice".to_string())]],
        );
        let file = ReportFile {
            name: "delta_report_2024-06-01.xlsx".to_string(),
            path: PathBuf::from("data/delta_report_2024-06-01.xlsx"),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            size_bytes: 0,
        };
        let html = HtmlReporter::generate(&present(file, table)).unwrap();
        assert!(html.contains(&format!("href=\"data:{};base64,", XLSX_MIME_TYPE)));
        assert!(html.contains("download=\"delta_report_2024-06-01.xlsx\""));
        // embedded cell text must not close the script element
        assert_eq!(html.matches("</script>").count(), 1);
    }
}
