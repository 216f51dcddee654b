//! Job matching: pluggable, trait-based ranking of roles against résumé text.
//!
//! Default: `KeywordJobMatcher` (pure-Rust, deterministic, fully testable).
//! Optional: `LlmJobMatcher` (semantic, via Claude) which degrades to the
//! keyword matcher whenever the LLM fails or answers with nothing usable.
//!
//! `AppState` holds an `Arc<dyn JobMatcher>`, chosen at startup via config.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::llm_client::LlmClient;
use crate::matching::catalog::{RoleProfile, ROLE_CATALOG};
use crate::matching::prompts::{match_system, MATCH_PROMPT_TEMPLATE};
use crate::models::job::JobMatch;

/// Score given to a role with no keyword evidence at all.
const SCORE_FLOOR: f32 = 40.0;
/// Score given to a role whose every keyword is present.
const SCORE_CEILING: f32 = 98.0;
/// Résumé text beyond this many chars is not sent to the LLM.
const MAX_PROMPT_RESUME_CHARS: usize = 12_000;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Ranks roles for a résumé. Infallible: poor input yields a best-effort list,
/// never an error, and the list is never empty.
#[async_trait]
pub trait JobMatcher: Send + Sync {
    async fn match_resume(&self, resume_text: &str) -> Vec<JobMatch>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordJobMatcher: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Keyword-coverage matcher over `ROLE_CATALOG`.
///
/// Algorithm:
/// 1. For each role, sum the weights of its keywords mentioned as whole words.
/// 2. score = FLOOR + coverage × (CEILING − FLOOR), coverage = matched / total weight
/// 3. Sort by score descending (catalog order breaks ties), keep `limit`.
#[derive(Debug, Clone)]
pub struct KeywordJobMatcher {
    limit: usize,
}

impl KeywordJobMatcher {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }
}

#[async_trait]
impl JobMatcher for KeywordJobMatcher {
    async fn match_resume(&self, resume_text: &str) -> Vec<JobMatch> {
        rank_by_keywords(resume_text, self.limit)
    }
}

fn rank_by_keywords(resume_text: &str, limit: usize) -> Vec<JobMatch> {
    let text = resume_text.to_lowercase();

    let mut matches: Vec<JobMatch> = ROLE_CATALOG
        .iter()
        .map(|role| score_role(role, &text))
        .collect();

    // Stable sort keeps catalog order among equal scores.
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches.truncate(limit);
    matches
}

fn score_role(role: &RoleProfile, text: &str) -> JobMatch {
    let total: f32 = role.keywords.iter().map(|(_, w)| w).sum();
    let mut matched = 0.0_f32;
    let mut evidence: Vec<&str> = Vec::new();

    for (keyword, weight) in role.keywords {
        if mentions(text, keyword) {
            matched += *weight;
            evidence.push(*keyword);
        }
    }

    let coverage = if total > 0.0 { matched / total } else { 0.0 };
    let score = (SCORE_FLOOR + coverage * (SCORE_CEILING - SCORE_FLOOR)).round();

    let why_match = if evidence.is_empty() {
        role.why_match.to_string()
    } else {
        let shown: Vec<&str> = evidence.iter().take(3).copied().collect();
        format!(
            "Your résumé mentions {}, which this role relies on.",
            shown.join(", ")
        )
    };

    JobMatch {
        id: role.id,
        title: role.title.to_string(),
        match_score: score.clamp(0.0, 100.0) as u8,
        why_match,
        responsibilities: role.responsibilities.iter().map(|r| r.to_string()).collect(),
        why_excel: role.why_excel.to_string(),
    }
}

/// Whole-word containment: `keyword` must not be flanked by alphanumerics.
fn mentions(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + keyword.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

// ────────────────────────────────────────────────────────────────────────────
// LlmJobMatcher: semantic matcher with keyword fallback
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LlmMatchResponse {
    #[serde(default)]
    job_matches: Vec<LlmMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmMatch {
    #[serde(default)]
    title: String,
    #[serde(default, alias = "match_score")]
    match_score: f64,
    #[serde(default, alias = "why_match")]
    why_match: String,
    #[serde(default)]
    responsibilities: Vec<String>,
    #[serde(default, alias = "why_excel")]
    why_excel: String,
}

pub struct LlmJobMatcher {
    llm: LlmClient,
    fallback: KeywordJobMatcher,
    limit: usize,
}

impl LlmJobMatcher {
    pub fn new(llm: LlmClient, limit: usize) -> Self {
        Self {
            llm,
            fallback: KeywordJobMatcher::new(limit),
            limit: limit.max(1),
        }
    }
}

#[async_trait]
impl JobMatcher for LlmJobMatcher {
    async fn match_resume(&self, resume_text: &str) -> Vec<JobMatch> {
        if resume_text.trim().is_empty() {
            return self.fallback.match_resume(resume_text).await;
        }

        let excerpt: String = resume_text.chars().take(MAX_PROMPT_RESUME_CHARS).collect();
        let prompt = MATCH_PROMPT_TEMPLATE
            .replace("{max_matches}", &self.limit.to_string())
            .replace("{resume_text}", &excerpt);

        match self
            .llm
            .call_json::<LlmMatchResponse>(&prompt, &match_system())
            .await
        {
            Ok(response) => {
                let matches = normalize_llm_matches(response.job_matches, self.limit);
                if matches.is_empty() {
                    warn!("LLM returned no usable matches; falling back to keyword matcher");
                    return self.fallback.match_resume(resume_text).await;
                }
                info!("LLM matcher produced {} matches", matches.len());
                matches
            }
            Err(e) => {
                warn!("LLM matching failed ({e}); falling back to keyword matcher");
                self.fallback.match_resume(resume_text).await
            }
        }
    }
}

/// Drops untitled entries, clamps scores into 0–100, ranks and numbers them.
fn normalize_llm_matches(raw: Vec<LlmMatch>, limit: usize) -> Vec<JobMatch> {
    let mut matches: Vec<JobMatch> = raw
        .into_iter()
        .filter(|m| !m.title.trim().is_empty())
        .map(|m| JobMatch {
            id: 0,
            title: m.title.trim().to_string(),
            match_score: m.match_score.round().clamp(0.0, 100.0) as u8,
            why_match: m.why_match,
            responsibilities: m.responsibilities,
            why_excel: m.why_excel,
        })
        .collect();

    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches.truncate(limit);
    for (m, id) in matches.iter_mut().zip(1..) {
        m.id = id;
    }
    matches
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const FRONTEND_RESUME: &str = r#"
        Jane Doe, Frontend Engineer
        5 years building React and TypeScript applications. Migrated a large
        JavaScript codebase to TypeScript, led CSS architecture for the design system,
        and cut page load time by 40% through performance work.
    "#;

    const DEVOPS_RESUME: &str = r#"
        Platform engineer. Built CI/CD pipelines on GitHub Actions, ran Kubernetes
        clusters on AWS, wrote Terraform modules and Docker images for 30 services.
    "#;

    #[tokio::test]
    async fn test_frontend_resume_ranks_frontend_first() {
        let matches = KeywordJobMatcher::new(5).match_resume(FRONTEND_RESUME).await;
        assert_eq!(matches[0].title, "Senior Frontend Developer");
        assert!(matches[0].why_match.contains("react"));
    }

    #[tokio::test]
    async fn test_devops_resume_ranks_devops_first() {
        let matches = KeywordJobMatcher::new(5).match_resume(DEVOPS_RESUME).await;
        assert_eq!(matches[0].title, "DevOps Engineer");
    }

    #[tokio::test]
    async fn test_scores_bounded_and_output_non_empty() {
        for text in [FRONTEND_RESUME, DEVOPS_RESUME, "x", "rust rust rust"] {
            let matches = KeywordJobMatcher::new(5).match_resume(text).await;
            assert!(!matches.is_empty());
            assert!(matches.iter().all(|m| m.match_score <= 100));
        }
    }

    #[tokio::test]
    async fn test_empty_text_returns_best_effort_floor_scores() {
        let matches = KeywordJobMatcher::new(5).match_resume("   ").await;
        assert_eq!(matches.len(), 5);
        assert!(matches
            .iter()
            .all(|m| m.match_score == SCORE_FLOOR as u8));
        // Ties keep catalog order.
        assert_eq!(matches[0].id, ROLE_CATALOG[0].id);
    }

    #[tokio::test]
    async fn test_limit_respected_and_at_least_one() {
        assert_eq!(KeywordJobMatcher::new(2).match_resume(FRONTEND_RESUME).await.len(), 2);
        assert_eq!(KeywordJobMatcher::new(0).match_resume(FRONTEND_RESUME).await.len(), 1);
        assert_eq!(
            KeywordJobMatcher::new(100).match_resume(FRONTEND_RESUME).await.len(),
            ROLE_CATALOG.len()
        );
    }

    #[tokio::test]
    async fn test_output_sorted_descending() {
        let matches = KeywordJobMatcher::new(8).match_resume(DEVOPS_RESUME).await;
        assert!(matches
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
    }

    #[test]
    fn test_full_coverage_hits_ceiling() {
        let role = &ROLE_CATALOG[7]; // Mobile Developer
        let text = "ios android swift kotlin react native flutter";
        let m = score_role(role, text);
        assert_eq!(m.match_score, SCORE_CEILING as u8);
    }

    #[test]
    fn test_mentions_requires_word_boundaries() {
        assert!(mentions("i write go and rust", "go"));
        assert!(mentions("node.js services", "node"));
        assert!(mentions("built ci/cd pipelines", "ci/cd"));
        assert!(!mentions("good at google docs", "go"));
        assert!(!mentions("leadership", "lead"));
    }

    #[test]
    fn test_normalize_llm_matches_clamps_and_ranks() {
        let raw = vec![
            LlmMatch {
                title: "Data Engineer".into(),
                match_score: 140.0,
                why_match: "Spark".into(),
                responsibilities: vec![],
                why_excel: String::new(),
            },
            LlmMatch {
                title: "   ".into(),
                match_score: 99.0,
                why_match: String::new(),
                responsibilities: vec![],
                why_excel: String::new(),
            },
            LlmMatch {
                title: "Analyst".into(),
                match_score: -12.0,
                why_match: String::new(),
                responsibilities: vec![],
                why_excel: String::new(),
            },
            LlmMatch {
                title: "ML Engineer".into(),
                match_score: 71.6,
                why_match: String::new(),
                responsibilities: vec![],
                why_excel: String::new(),
            },
        ];

        let matches = normalize_llm_matches(raw, 5);
        let summary: Vec<(&str, u8, u64)> = matches
            .iter()
            .map(|m| (m.title.as_str(), m.match_score, m.id))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Data Engineer", 100, 1),
                ("ML Engineer", 72, 2),
                ("Analyst", 0, 3)
            ]
        );
    }

    #[test]
    fn test_llm_response_accepts_snake_case_fields() {
        let parsed: LlmMatchResponse = serde_json::from_str(
            r#"{"job_matches": [{"title": "SRE", "match_score": 80, "why_match": "k8s",
                "responsibilities": ["On-call"], "why_excel": "calm"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.job_matches[0].match_score, 80.0);
        assert_eq!(parsed.job_matches[0].why_match, "k8s");
    }

    #[test]
    fn test_llm_response_missing_list_is_empty() {
        let parsed: LlmMatchResponse = serde_json::from_str("{}").unwrap();
        assert!(normalize_llm_matches(parsed.job_matches, 5).is_empty());
    }
}
