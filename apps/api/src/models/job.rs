use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a posting on the external job platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-form applicant fields forwarded verbatim to the platform.
pub type CandidateData = Map<String, Value>;

/// A scored pairing of the candidate's résumé with a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub id: u64,
    pub title: String,
    pub match_score: u8, // 0 – 100
    pub why_match: String,
    pub responsibilities: Vec<String>,
    pub why_excel: String,
}

/// A listing returned by the external platform for a title query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    /// Human-relative age of the posting, e.g. "2 days ago".
    #[serde(rename = "posted", alias = "postedRelative")]
    pub posted_relative: String,
    pub remote: bool,
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_match_serializes_camel_case() {
        let m = JobMatch {
            id: 1,
            title: "Backend Engineer".to_string(),
            match_score: 88,
            why_match: "Rust".to_string(),
            responsibilities: vec!["Build services".to_string()],
            why_excel: "Systems background".to_string(),
        };
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["matchScore"], 88);
        assert_eq!(value["whyMatch"], "Rust");
        assert_eq!(value["whyExcel"], "Systems background");
    }

    #[test]
    fn test_job_posting_accepts_either_posted_key() {
        let base = json!({
            "id": 101,
            "title": "Engineer",
            "company": "Acme",
            "location": "Remote",
            "salary": "$100K",
            "description": "Build things",
            "remote": true,
            "link": "https://jobs.example.com/101"
        });

        let mut a = base.clone();
        a["posted"] = json!("2 days ago");
        let mut b = base;
        b["postedRelative"] = json!("2 days ago");

        let pa: JobPosting = serde_json::from_value(a).unwrap();
        let pb: JobPosting = serde_json::from_value(b).unwrap();
        assert_eq!(pa, pb);
        assert_eq!(pa.id, JobId(101));
        assert_eq!(serde_json::to_value(&pa).unwrap()["posted"], "2 days ago");
    }
}
