// LLM prompt constants for résumé matching.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Persona for the matcher; `JSON_ONLY_SYSTEM` is appended at call time.
pub const MATCH_SYSTEM_PERSONA: &str = "You are an experienced technical recruiter \
    who matches candidates to roles based only on evidence in their résumé.";

pub fn match_system() -> String {
    format!("{MATCH_SYSTEM_PERSONA} {JSON_ONLY_SYSTEM}")
}

/// Matching prompt. Replace `{max_matches}` and `{resume_text}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Read the résumé below and propose the {max_matches} job titles this candidate is best suited for.

Return a JSON object with this EXACT schema (no extra fields):
{
  "job_matches": [
    {
      "title": "Senior Frontend Developer",
      "matchScore": 92,
      "whyMatch": "One or two sentences citing résumé evidence.",
      "responsibilities": ["Typical responsibility", "Another responsibility", "A third one"],
      "whyExcel": "One sentence on what would make the candidate stand out."
    }
  ]
}

Rules:
- matchScore is an integer from 0 to 100.
- Order matches from best to worst.
- Cite only skills and experience present in the résumé.

RÉSUMÉ:
{resume_text}"#;
