//! Markdown rendering of search results.

use crate::search::models::{CandidateRecord, SearchCriteria, CSV_HEADERS};

/// `### Candidates for <job title> in <location>`
pub fn results_heading(criteria: &SearchCriteria) -> String {
    format!(
        "### Candidates for {} in {}",
        criteria.job_title, criteria.location
    )
}

/// Renders records as a GitHub-flavoured markdown table, in the order given.
pub fn render_table(records: &[CandidateRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(table_row(CSV_HEADERS));
    lines.push(table_row(CSV_HEADERS.map(|_| "---")));
    lines.extend(records.iter().map(|r| table_row(r.fields())));
    lines.join("\n")
}

/// Heading, blank line, table.
pub fn render_results(criteria: &SearchCriteria, records: &[CandidateRecord]) -> String {
    format!("{}\n\n{}", results_heading(criteria), render_table(records))
}

fn table_row(cells: [&str; 6]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
    format!("| {} |", cells.join(" | "))
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}
