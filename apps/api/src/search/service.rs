//! Candidate search: the request handler behind the form.
//!
//! Flow: validate → credential check → build prompt → provider call →
//!       strip fences → parse CSV → render table → write artifact.
//!
//! Each call is independent. The only shared state is read-only: the provider,
//! the credential and the export directory.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Credential;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::search::cleanup::strip_csv_fences;
use crate::search::export::write_export;
use crate::search::models::{SearchCriteria, SearchResult};
use crate::search::parser::parse_candidates;
use crate::search::prompts::build_search_prompt;
use crate::search::render::render_results;

#[derive(Clone)]
pub struct CandidateSearch {
    generator: Arc<dyn TextGenerator>,
    credential: Credential,
    export_dir: PathBuf,
}

impl CandidateSearch {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        credential: Credential,
        export_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            generator,
            credential,
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &std::path::Path {
        &self.export_dir
    }

    /// Runs one search. Either both the table and the artifact are produced,
    /// or an error is returned and nothing is written.
    pub async fn generate(&self, criteria: &SearchCriteria) -> Result<SearchResult, AppError> {
        let search_id = Uuid::new_v4();

        // Step 1: Validation
        let criteria = criteria.validated()?;

        // Step 2: Credential
        if !self.credential.is_configured() {
            warn!("Search {search_id} rejected: GEMINI_API_KEY is not configured");
            return Err(AppError::Unconfigured);
        }

        info!(
            "Search {search_id}: '{}' in '{}'",
            criteria.job_title, criteria.location
        );

        // Step 3: Prompt
        let prompt = build_search_prompt(&criteria);

        // Step 4: Provider call, single attempt
        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            warn!("Search {search_id}: provider call failed: {e}");
            AppError::GenerationFailure(e.to_string())
        })?;

        // Steps 5 + 6: Cleanup and parse
        let candidates = parse_candidates(strip_csv_fences(&raw)).inspect_err(|_| {
            warn!("Search {search_id}: unparseable response ({} bytes)", raw.len());
        })?;
        info!("Search {search_id}: parsed {} candidates", candidates.len());

        // Step 7: Artifacts
        let markdown = render_results(&criteria, &candidates);
        let export_path = write_export(&self.export_dir, &candidates, Local::now()).await?;

        Ok(SearchResult {
            markdown,
            candidates,
            export_path,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::LlmError;
    use crate::search::export::is_export_file_name;
    use crate::search::parser::tests::{csv_with_rows, HEADER};

    /// Canned provider that records every prompt it receives.
    pub struct MockGenerator {
        reply: Result<String, String>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        pub fn replying(text: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.into()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(LlmError::Api {
                    status: 429,
                    message: message.clone(),
                }),
            }
        }
    }

    fn configured() -> Credential {
        Credential::Configured("test-key".to_string())
    }

    fn data_scientist() -> SearchCriteria {
        SearchCriteria::new("Data Scientist", "Python, SQL", "Johannesburg")
    }

    fn exported_files(dir: &std::path::Path) -> Vec<String> {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_missing_input_makes_no_call() {
        let tmp = tempfile::tempdir().unwrap();
        let mock = MockGenerator::replying(csv_with_rows(1));
        let search = CandidateSearch::new(mock.clone(), configured(), tmp.path());

        for criteria in [
            SearchCriteria::new("", "Python", "Johannesburg"),
            SearchCriteria::new("Data Scientist", " ", "Johannesburg"),
            SearchCriteria::new("Data Scientist", "Python", ""),
        ] {
            let result = search.generate(&criteria).await;
            assert!(matches!(result, Err(AppError::MissingInput)));
        }
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_input_wins_over_unconfigured() {
        let tmp = tempfile::tempdir().unwrap();
        let mock = MockGenerator::replying(csv_with_rows(1));
        let search = CandidateSearch::new(mock.clone(), Credential::Unconfigured, tmp.path());

        let result = search.generate(&SearchCriteria::default()).await;
        assert!(matches!(result, Err(AppError::MissingInput)));
    }

    #[tokio::test]
    async fn test_unconfigured_makes_no_call() {
        let tmp = tempfile::tempdir().unwrap();
        let mock = MockGenerator::replying(csv_with_rows(1));
        let search = CandidateSearch::new(mock.clone(), Credential::Unconfigured, tmp.path());

        let result = search.generate(&data_scientist()).await;

        assert!(matches!(result, Err(AppError::Unconfigured)));
        assert_eq!(mock.calls(), 0);
        assert!(exported_files(tmp.path()).is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_is_generation_failure_without_retry() {
        let tmp = tempfile::tempdir().unwrap();
        let mock = MockGenerator::failing("quota exceeded");
        let search = CandidateSearch::new(mock.clone(), configured(), tmp.path());

        match search.generate(&data_scientist()).await {
            Err(AppError::GenerationFailure(detail)) => assert!(detail.contains("quota exceeded")),
            other => panic!("expected GenerationFailure, got {other:?}"),
        }
        assert_eq!(mock.calls(), 1);
        assert!(exported_files(tmp.path()).is_empty());
    }

    #[tokio::test]
    async fn test_malformed_response_is_parse_failure_and_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let truncated = format!("{HEADER}\n\"Thabo Molefe\",\"Analyst\",\"Soweto\"");
        let mock = MockGenerator::replying(truncated);
        let search = CandidateSearch::new(mock.clone(), configured(), tmp.path());

        let result = search.generate(&data_scientist()).await;

        assert!(matches!(result, Err(AppError::ParseFailure(_))));
        assert!(exported_files(tmp.path()).is_empty());
    }

    #[tokio::test]
    async fn test_fenced_ten_row_response_succeeds() {
        let tmp = tempfile::tempdir().unwrap();
        let mock = MockGenerator::replying(format!("```csv\n{}\n```", csv_with_rows(10)));
        let search = CandidateSearch::new(mock.clone(), configured(), tmp.path());

        let result = search.generate(&data_scientist()).await.unwrap();

        assert_eq!(result.candidates.len(), 10);
        assert_eq!(result.candidates[0].full_name, "Candidate 1");
        assert_eq!(result.candidates[9].full_name, "Candidate 10");
    }

    #[tokio::test]
    async fn test_single_row_scenario() {
        let tmp = tempfile::tempdir().unwrap();
        let reply = format!(
            "{HEADER}\n\"Nomvula Dlamini\",\"Senior Analyst\",\"Rosebank\",\"Pandas, Tableau\",\"Leads insurance analytics. Ships dashboards weekly.\",\"https://www.pnet.co.za/cv/nomvula-dlamini\""
        );
        let mock = MockGenerator::replying(reply);
        let search = CandidateSearch::new(mock.clone(), configured(), tmp.path());

        let result = search.generate(&data_scientist()).await.unwrap();

        // Criteria only show up in the heading line.
        let mut lines = result.markdown.lines();
        assert_eq!(
            lines.next(),
            Some("### Candidates for Data Scientist in Johannesburg")
        );
        let body: Vec<&str> = lines.filter(|l| l.starts_with('|')).collect();
        assert_eq!(body.len(), 3, "header, separator and one data row");
        assert!(body[2].starts_with("| Nomvula Dlamini | Senior Analyst | Rosebank |"));
        assert!(!body.iter().any(|l| l.contains("Johannesburg") || l.contains("Data Scientist")));

        let file_name = result
            .export_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert!(is_export_file_name(&file_name), "{file_name}");
        assert_eq!(exported_files(tmp.path()), vec![file_name]);
        assert!(result.export_path.exists());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_sent_uses_trimmed_criteria() {
        let tmp = tempfile::tempdir().unwrap();
        let mock = MockGenerator::replying(csv_with_rows(1));
        let search = CandidateSearch::new(mock.clone(), configured(), tmp.path());

        let padded = SearchCriteria::new("  Data Scientist ", "Python, SQL", "Johannesburg\n");
        search.generate(&padded).await.unwrap();

        let prompts = mock.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], build_search_prompt(&data_scientist()));
    }
}
