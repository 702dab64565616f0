// Prompt template for candidate generation.

use crate::search::models::{SearchCriteria, CSV_HEADERS};

/// Number of candidates requested per search.
pub const CANDIDATE_COUNT: usize = 10;

/// Job sites named in the prompt as stylistic grounding. Never fetched.
pub const JOB_SITES: &[&str] = &[
    "linkedin.com/in/",
    "pnet.co.za",
    "careers24.com",
    "careerjunction.co.za",
    "za.indeed.com",
    "gumtree.co.za/s-jobs",
    "executiveplacements.com",
];

/// Candidate search prompt. Replace: {count}, {job_sites}, {job_title}, {skills},
/// {location}, {header_row}
pub const SEARCH_PROMPT_TEMPLATE: &str = r#"Act as an expert HR Recruitment Specialist for the South African market.
Your task is to generate a list of {count} fictional, but highly plausible, candidate profiles who are ideal matches for the following role.
Base these profiles on the kind of data you would typically find on top South African job sites like {job_sites}.

Job Role: {job_title}
Required Skills: {skills}
Location: {location}, South Africa

For each candidate, create a realistic name, a current job title, a primary location, a 2-sentence summary of their experience, and a list of 3-5 key skills.

IMPORTANT INSTRUCTION: Format the entire output as a CSV (Comma-Separated Values) string ONLY, with no other text or explanation.
The header row must be: {header_row}
Quote every field. Return exactly {count} data rows.
For the "Source Profile URL", create a realistic-looking but fake URL from one of the listed job sites."#;

/// The literal header row the provider must reproduce.
pub fn header_row() -> String {
    CSV_HEADERS
        .iter()
        .map(|h| format!("\"{h}\""))
        .collect::<Vec<_>>()
        .join(",")
}

/// Builds the generation prompt. Pure: same criteria, same bytes.
pub fn build_search_prompt(criteria: &SearchCriteria) -> String {
    let count = CANDIDATE_COUNT.to_string();
    let job_sites = JOB_SITES.join(", ");
    let header_row = header_row();
    fill_template(
        SEARCH_PROMPT_TEMPLATE,
        &[
            ("count", count.as_str()),
            ("job_sites", job_sites.as_str()),
            ("header_row", header_row.as_str()),
            ("job_title", criteria.job_title.as_str()),
            ("skills", criteria.skills.as_str()),
            ("location", criteria.location.as_str()),
        ],
    )
}

/// Single-pass `{name}` substitution. Substituted values are never re-scanned,
/// so braces typed into a search field come through untouched.
fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = vars.iter().find(|(name, _)| {
            tail.strip_prefix(*name)
                .is_some_and(|after| after.starts_with('}'))
        });
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
