//! HTML renderer for report documents
//!
//! Produces a standalone page suitable for browser viewing. All content is
//! escaped; the document model carries plain text only.

use super::document::{Block, Document, Table};

/// Escape HTML special characters
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render a document as a standalone HTML page
pub fn render(doc: &Document) -> String {
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>\n", escape(&doc.title)));
    for line in &doc.subtitle {
        body.push_str(&format!("<p class=\"subtitle\"><em>{}</em></p>\n", escape(line)));
    }

    for section in &doc.sections {
        body.push_str(&format!("<h2>{}</h2>\n", escape(&section.heading)));
        for block in &section.blocks {
            match block {
                Block::Paragraph(text) => {
                    body.push_str(&format!("<p>{}</p>\n", escape(text)));
                }
                Block::Bullets(items) => {
                    body.push_str("<ul>\n");
                    for item in items {
                        body.push_str(&format!("<li>{}</li>\n", escape(item)));
                    }
                    body.push_str("</ul>\n");
                }
                Block::Table(table) => {
                    body.push_str(&render_table(table));
                }
                Block::Note(text) => {
                    body.push_str(&format!("<p class=\"note\"><em>{}</em></p>\n", escape(text)));
                }
            }
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 900px;
            margin: 2rem auto;
            padding: 0 1rem;
            line-height: 1.6;
            color: #333;
        }}
        .subtitle {{
            color: #666;
            margin: 0;
        }}
        .note {{
            color: #666;
            background: #f5f5f5;
            padding: 0.5rem 1rem;
            border-left: 3px solid #ccc;
        }}
        table {{
            border-collapse: collapse;
            width: 100%;
            margin: 1rem 0;
        }}
        th, td {{
            border: 1px solid #ddd;
            padding: 0.5rem;
            text-align: left;
        }}
        th {{
            background: #f0f0f0;
        }}
    </style>
</head>
<body>
{body}</body>
</html>
"#,
        title = escape(&doc.title),
        body = body
    )
}

fn render_table(table: &Table) -> String {
    let mut out = String::new();
    out.push_str("<table>\n<tr>");
    for header in &table.headers {
        out.push_str(&format!("<th>{}</th>", escape(header)));
    }
    out.push_str("</tr>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}
