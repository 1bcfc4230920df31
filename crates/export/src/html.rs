use chrono::{DateTime, Utc};

use almacen_ledger::CardRow;

use crate::csv_export::{card_record, CARD_HEADERS};
use crate::filters::ExportFilters;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Plain bordered table, the only widget the printed reports use.
pub fn table_html(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table>\n<thead>\n<tr>");
    for header in headers {
        out.push_str(&format!("<th>{}</th>", escape(header)));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

/// Control-card body: one table per article, preceded by the article name
/// when the card spans several articles.
pub fn control_card_html(rows: &[CardRow], grouped: bool) -> String {
    if !grouped {
        let records: Vec<Vec<String>> = rows.iter().map(card_record).collect();
        return table_html(&CARD_HEADERS, &records);
    }

    let mut out = String::new();
    let mut index = 0;
    while index < rows.len() {
        let article = rows[index].article_id();
        let name = match &rows[index] {
            CardRow::Opening(r) => r.article_name.clone(),
            CardRow::Movement(r) => r.article_name.clone(),
        };
        let section_end = rows[index..]
            .iter()
            .position(|r| r.article_id() != article)
            .map(|offset| index + offset)
            .unwrap_or(rows.len());
        let records: Vec<Vec<String>> = rows[index..section_end].iter().map(card_record).collect();
        out.push_str(&format!(
            "<div class=\"section-title\">Artículo: {}</div>\n",
            escape(&name)
        ));
        out.push_str(&table_html(&CARD_HEADERS, &records));
        index = section_end;
    }
    out
}

/// Wrap a report body in the printable page: institution header, filter
/// banner, content, and a generation footer.
pub fn render_page(
    title: &str,
    content: &str,
    filters: &ExportFilters,
    generated_at: DateTime<Utc>,
) -> String {
    let stamp = generated_at.format("%d/%m/%Y %H:%M");
    let filter_banner = match filters.summary() {
        Some(summary) => format!(
            "<div class=\"filters-info\">Filtros aplicados: {}</div>\n",
            escape(&summary)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 20px; background: white; color: #000; }}
.header {{ display: flex; justify-content: space-between; margin-bottom: 20px; padding-bottom: 15px; border-bottom: 2px solid #000; }}
.header h1 {{ margin: 0; font-size: 24px; }}
.header .meta {{ text-align: right; font-size: 12px; color: #666; }}
.company-info {{ margin-bottom: 10px; font-weight: bold; }}
.filters-info {{ margin-bottom: 15px; padding: 10px; background-color: #f0f0f0; border: 1px solid #ccc; font-size: 12px; }}
.section-title {{ margin-top: 12px; font-size: 12px; font-weight: bold; }}
table {{ border-collapse: collapse; width: 100%; font-size: 11px; margin-top: 10px; }}
th, td {{ border: 1px solid #000; padding: 6px 8px; text-align: left; }}
th {{ background-color: #f0f0f0; }}
.footer {{ margin-top: 30px; font-size: 10px; color: #666; text-align: center; border-top: 1px solid #ccc; padding-top: 10px; }}
@media print {{ body {{ margin: 0; }} }}
</style>
</head>
<body>
<div class="header">
<div>
<div class="company-info">Sistema de Control de Inventario</div>
<div class="company-info">Alcaldía Municipal de Cabañas Oeste</div>
<h1>{title}</h1>
<div>{stamp}</div>
</div>
<div class="meta">
<div>Unidad de Informática</div>
</div>
</div>
{filter_banner}{content}
<div class="footer">Sistema de Control de Inventario - Generado automáticamente el {stamp}</div>
</body>
</html>"#,
        title = escape(title),
        stamp = stamp,
        filter_banner = filter_banner,
        content = content,
    )
}
