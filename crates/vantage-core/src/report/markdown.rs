//! Markdown renderer for report documents

use super::document::{Block, Document, Table};

/// Render a document as Markdown
pub fn render(doc: &Document) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n", doc.title));
    for line in &doc.subtitle {
        out.push_str(&format!("_{}_\n", line));
    }

    for section in &doc.sections {
        out.push_str(&format!("\n## {}\n", section.heading));
        for block in &section.blocks {
            match block {
                Block::Paragraph(text) => {
                    out.push_str(&format!("\n{}\n", text));
                }
                Block::Bullets(items) => {
                    out.push('\n');
                    for item in items {
                        out.push_str(&format!("- {}\n", item));
                    }
                }
                Block::Table(table) => {
                    out.push('\n');
                    out.push_str(&render_table(table));
                }
                Block::Note(text) => {
                    out.push_str(&format!("\n> {}\n", text));
                }
            }
        }
    }

    out
}

fn render_table(table: &Table) -> String {
    let mut out = String::new();
    out.push_str(&format!("| {} |\n", table.headers.join(" | ")));
    let dashes: Vec<String> = table.headers.iter().map(|h| "-".repeat(h.len().max(3))).collect();
    out.push_str(&format!("|{}|\n", dashes.join("|")));
    for row in &table.rows {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out
}
