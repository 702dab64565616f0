use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Column headers, in the only order the provider is allowed to use.
pub const CSV_HEADERS: [&str; 6] = [
    "Full Name",
    "Current Role",
    "Location",
    "Key Skills",
    "Profile Summary",
    "Source Profile URL",
];

/// The three free-text search fields. Absent fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub location: String,
}

impl SearchCriteria {
    pub fn new(
        job_title: impl Into<String>,
        skills: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            job_title: job_title.into(),
            skills: skills.into(),
            location: location.into(),
        }
    }

    /// Returns trimmed criteria, or `MissingInput` if any field is blank.
    pub fn validated(&self) -> Result<SearchCriteria, AppError> {
        let trimmed = SearchCriteria::new(
            self.job_title.trim(),
            self.skills.trim(),
            self.location.trim(),
        );
        if trimmed.job_title.is_empty() || trimmed.skills.is_empty() || trimmed.location.is_empty()
        {
            return Err(AppError::MissingInput);
        }
        Ok(trimmed)
    }
}

/// One generated (fictional) candidate, one CSV row.
/// CSV headers are matched on the way in; JSON output uses the field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(rename(deserialize = "Full Name"))]
    pub full_name: String,
    #[serde(rename(deserialize = "Current Role"))]
    pub current_role: String,
    #[serde(rename(deserialize = "Location"))]
    pub location: String,
    #[serde(rename(deserialize = "Key Skills"))]
    pub key_skills: String,
    #[serde(rename(deserialize = "Profile Summary"))]
    pub profile_summary: String,
    #[serde(rename(deserialize = "Source Profile URL"))]
    pub source_profile_url: String,
}

impl CandidateRecord {
    /// Field values in header order.
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.full_name,
            &self.current_role,
            &self.location,
            &self.key_skills,
            &self.profile_summary,
            &self.source_profile_url,
        ]
    }
}

/// Outcome of one successful search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Header line followed by the markdown table.
    pub markdown: String,
    pub candidates: Vec<CandidateRecord>,
    pub export_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_trims_fields() {
        let criteria = SearchCriteria::new("  Data Scientist ", "Python, SQL\n", " Johannesburg");
        let validated = criteria.validated().unwrap();
        assert_eq!(
            validated,
            SearchCriteria::new("Data Scientist", "Python, SQL", "Johannesburg")
        );
    }

    #[test]
    fn test_any_blank_field_is_missing_input() {
        let cases = [
            SearchCriteria::new("", "Python", "Cape Town"),
            SearchCriteria::new("Engineer", "   ", "Cape Town"),
            SearchCriteria::new("Engineer", "Python", "\t"),
            SearchCriteria::default(),
        ];
        for criteria in cases {
            assert!(matches!(criteria.validated(), Err(AppError::MissingInput)));
        }
    }

    #[test]
    fn test_absent_json_fields_default_to_empty() {
        let criteria: SearchCriteria = serde_json::from_str(r#"{"job_title": "Nurse"}"#).unwrap();
        assert_eq!(criteria.skills, "");
        assert!(criteria.validated().is_err());
    }

    #[test]
    fn test_fields_follow_header_order() {
        let record = CandidateRecord {
            full_name: "a".into(),
            current_role: "b".into(),
            location: "c".into(),
            key_skills: "d".into(),
            profile_summary: "e".into(),
            source_profile_url: "f".into(),
        };
        assert_eq!(record.fields(), ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_json_uses_field_names() {
        let record = CandidateRecord {
            full_name: "Ayanda Zulu".into(),
            current_role: "Analyst".into(),
            location: "Durban".into(),
            key_skills: "SQL".into(),
            profile_summary: "Builds reports.".into(),
            source_profile_url: "https://pnet.co.za/cv/1".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["full_name"], "Ayanda Zulu");
        assert_eq!(json["source_profile_url"], "https://pnet.co.za/cv/1");
        assert!(json.get("Full Name").is_none());
    }
}
