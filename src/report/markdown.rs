//! Markdown rendering of a [`Report`].

use crate::report::format::NumberFormat;
use crate::report::types::{DateSection, Report};

/// Renders the report as a markdown document.
///
/// ```text
/// # Major Platform Version Distribution
///
/// Report for MyApp on 2024-01-01.
///
/// ## 2024-01-01
///
/// 150 in Total.
///
/// | **Release** | **Total** | **Percentage** |
/// | - | - | - |
/// | iOS 17 | 100 | 66.7 % |
/// | iOS 16 | 50 | 33.3 % |
/// ```
pub fn render(report: &Report, format: &NumberFormat) -> String {
    let mut out = format!("# {}\n\n{}\n\n", report.title, report.description());
    for section in &report.sections {
        push_section(&mut out, section, format);
    }
    out
}

fn push_section(out: &mut String, section: &DateSection, format: &NumberFormat) {
    out.push_str(&format!("## {}\n\n", section.date));
    out.push_str(&format!("{} in Total.\n\n", format.count(section.total)));

    out.push_str("| **Release** | **Total** | **Percentage** |\n");
    out.push_str("| - | - | - |\n");
    for row in &section.releases {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&row.release),
            format.count(row.total),
            format.percentage(row.percentage)
        ));
    }
    out.push('\n');
}

/// Pipes would split the cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
