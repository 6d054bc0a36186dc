//! Keyword Match Scorer — pluggable, trait-based scorer that measures a
//! stored resume profile against a raw job description.
//!
//! Default: `KeywordMatchScorer` (pure-Rust, fast, deterministic, fully
//! testable). `AppState` holds an `Arc<dyn MatchScorer>` so handlers never
//! hard-code the backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Scoring input
// ────────────────────────────────────────────────────────────────────────────

/// The text representation of a stored resume used as scoring input.
///
/// Built from the provider's structured extraction by serializing it to one
/// comparable JSON blob. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct ResumeProfile {
    text: String,
}

impl ResumeProfile {
    /// Wraps an already-serialized profile text.
    pub fn from_text(text: String) -> Self {
        Self { text }
    }

    /// Serializes the stored `parsed` JSON into the comparable text blob.
    pub fn from_parsed_json(parsed: &Value) -> Self {
        Self {
            text: parsed.to_string(),
        }
    }

    pub fn as_text(&self) -> &str {
        &self.text
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Keyword-level breakdown of a match. Sub-scores are derived from the
/// overall score by fixed offsets, clamped to 100; they are not measured
/// independently against resume content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub skills_match: u32,
    pub experience_match: u32,
    pub education_match: u32,
    /// Matched job keywords, first 20 in encounter order.
    pub keywords_match: Vec<String>,
    /// Unmatched job keywords, first 10 in encounter order.
    pub missing_keywords: Vec<String>,
}

/// Full match result returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_score: u32, // 0 – 100
    pub details: MatchDetails,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer trait. Implement this to swap backends without touching
/// the endpoint, handler, or caller code.
///
/// Carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(
        &self,
        profile: &ResumeProfile,
        job_description: &str,
    ) -> Result<MatchResult, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Pure-Rust keyword overlap scorer. Fast, deterministic, no LLM call.
///
/// Algorithm:
/// 1. Lower-case both texts.
/// 2. Job keywords = maximal runs of word characters (ASCII letters, digits,
///    underscore) of length ≥ 3, deduplicated in first-seen order.
/// 3. A keyword is matched when it occurs anywhere in the resume text as a
///    substring ("manage" matches inside "management").
/// 4. match_score = round(matched / total_unique × 100); zero keywords yield
///    score 0 with empty lists — the function is total and never fails.
/// 5. Sub-scores: skills = score+10, experience = score+5, education = score,
///    each clamped to 100.
pub struct KeywordMatchScorer;

#[async_trait]
impl MatchScorer for KeywordMatchScorer {
    async fn score(
        &self,
        profile: &ResumeProfile,
        job_description: &str,
    ) -> Result<MatchResult, AppError> {
        Ok(compute_keyword_match(profile.as_text(), job_description))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core keyword match algorithm
// ────────────────────────────────────────────────────────────────────────────

const MIN_KEYWORD_LEN: usize = 3;
const MATCHED_KEYWORDS_CAP: usize = 20;
const MISSING_KEYWORDS_CAP: usize = 10;
const SKILLS_OFFSET: u32 = 10;
const EXPERIENCE_OFFSET: u32 = 5;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Extracts candidate keywords from a job description: lower-cased maximal
/// word-character runs of length ≥ 3, deduplicated preserving first-seen
/// order.
fn job_keywords(job_description: &str) -> Vec<String> {
    let lowered = job_description.to_lowercase();
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for run in lowered.split(|c| !is_word_char(c)) {
        if run.len() >= MIN_KEYWORD_LEN && seen.insert(run.to_string()) {
            keywords.push(run.to_string());
        }
    }

    keywords
}

/// Computes the keyword overlap between a resume's profile text and a job
/// description. Pure and idempotent: identical inputs always produce an
/// identical `MatchResult`.
pub fn compute_keyword_match(resume_text: &str, job_description: &str) -> MatchResult {
    let resume_lowered = resume_text.to_lowercase();
    let keywords = job_keywords(job_description);

    if keywords.is_empty() {
        return MatchResult {
            match_score: 0,
            details: MatchDetails {
                skills_match: 0,
                experience_match: 0,
                education_match: 0,
                keywords_match: vec![],
                missing_keywords: vec![],
            },
        };
    }

    let total = keywords.len();
    let (matched, missing): (Vec<String>, Vec<String>) = keywords
        .into_iter()
        .partition(|keyword| resume_lowered.contains(keyword.as_str()));

    let match_score = ((matched.len() as f64 / total as f64) * 100.0).round() as u32;

    MatchResult {
        match_score,
        details: MatchDetails {
            skills_match: (match_score + SKILLS_OFFSET).min(100),
            experience_match: (match_score + EXPERIENCE_OFFSET).min(100),
            education_match: match_score.min(100),
            keywords_match: matched.into_iter().take(MATCHED_KEYWORDS_CAP).collect(),
            missing_keywords: missing.into_iter().take(MISSING_KEYWORDS_CAP).collect(),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_all_keywords_present_scores_100() {
        let result = compute_keyword_match(
            "rust engineer with kubernetes and postgres experience",
            "rust kubernetes postgres",
        );
        assert_eq!(result.match_score, 100);
        assert!(result.details.missing_keywords.is_empty());
        assert_eq!(
            result.details.keywords_match,
            vec!["rust", "kubernetes", "postgres"]
        );
    }

    #[test]
    fn test_no_overlap_scores_zero_with_empty_matches() {
        let result = compute_keyword_match("gardening and pottery", "rust kubernetes postgres");
        assert_eq!(result.match_score, 0);
        assert!(result.details.keywords_match.is_empty());
        assert_eq!(
            result.details.missing_keywords,
            vec!["rust", "kubernetes", "postgres"]
        );
    }

    #[test]
    fn test_empty_job_description_scores_zero() {
        let result = compute_keyword_match("any resume text", "");
        assert_eq!(result.match_score, 0);
        assert_eq!(result.details.skills_match, 0);
        assert_eq!(result.details.experience_match, 0);
        assert_eq!(result.details.education_match, 0);
        assert!(result.details.keywords_match.is_empty());
        assert!(result.details.missing_keywords.is_empty());
    }

    #[test]
    fn test_short_tokens_yield_no_keywords() {
        // Every run is shorter than 3 word characters, so nothing qualifies.
        let result = compute_keyword_match("any resume text", "a an to of is it");
        assert_eq!(result.match_score, 0);
        assert!(result.details.keywords_match.is_empty());
        assert!(result.details.missing_keywords.is_empty());
    }

    #[test]
    fn test_keywords_deduplicated_in_first_seen_order() {
        let result = compute_keyword_match("", "python java python rust java python");
        // 0/3 matched, but encounter order is preserved in the missing list.
        assert_eq!(
            result.details.missing_keywords,
            vec!["python", "java", "rust"]
        );
    }

    #[test]
    fn test_substring_containment_matches_inside_longer_words() {
        let result = compute_keyword_match("senior management role", "manage");
        assert_eq!(result.match_score, 100);
        assert_eq!(result.details.keywords_match, vec!["manage"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let result = compute_keyword_match("Expert In PYTHON Development", "Python DEVELOPMENT");
        assert_eq!(result.match_score, 100);
        assert_eq!(result.details.keywords_match, vec!["python", "development"]);
    }

    #[test]
    fn test_underscores_and_digits_are_word_characters() {
        let result = compute_keyword_match("shipped node_js services on es2015", "node_js es2015");
        assert_eq!(result.match_score, 100);
    }

    #[test]
    fn test_non_ascii_separates_keyword_runs() {
        // "café" splits into "caf" (kept, length 3) and a dropped 1-char run.
        let result = compute_keyword_match("worked in a caf", "café");
        assert_eq!(result.details.keywords_match, vec!["caf"]);
        assert_eq!(result.match_score, 100);
    }

    #[test]
    fn test_matched_keywords_capped_at_20() {
        let words: Vec<String> = (0..30).map(|i| format!("skill{i:02}")).collect();
        let resume = words.join(" ");
        let jd = words.join(" ");
        let result = compute_keyword_match(&resume, &jd);
        assert_eq!(result.match_score, 100);
        assert_eq!(result.details.keywords_match.len(), 20);
        assert_eq!(result.details.keywords_match[0], "skill00");
        assert_eq!(result.details.keywords_match[19], "skill19");
    }

    #[test]
    fn test_missing_keywords_capped_at_10() {
        let words: Vec<String> = (0..30).map(|i| format!("skill{i:02}")).collect();
        let jd = words.join(" ");
        let result = compute_keyword_match("nothing relevant here", &jd);
        assert_eq!(result.match_score, 0);
        assert_eq!(result.details.missing_keywords.len(), 10);
        assert_eq!(result.details.missing_keywords[0], "skill00");
        assert_eq!(result.details.missing_keywords[9], "skill09");
    }

    #[test]
    fn test_sub_scores_clamped_at_100() {
        let result = compute_keyword_match("rust rust rust", "rust");
        assert_eq!(result.match_score, 100);
        assert_eq!(result.details.skills_match, 100);
        assert_eq!(result.details.experience_match, 100);
        assert_eq!(result.details.education_match, 100);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // 1 of 8 keywords matched → 12.5 → 13, as in JS Math.round.
        let result = compute_keyword_match(
            "alpha",
            "alpha beta gamma delta epsilon zeta theta kappa",
        );
        assert_eq!(result.match_score, 13);
    }

    #[test]
    fn test_known_mixed_scenario() {
        let resume = "Experienced software engineer skilled in python and databases";
        let jd = "Looking for a python developer with database experience";
        let result = compute_keyword_match(resume, jd);

        // 7 unique keywords ("a" is too short), 3 matched → 43.
        assert_eq!(result.match_score, 43);
        assert_eq!(result.details.skills_match, 53);
        assert_eq!(result.details.experience_match, 48);
        assert_eq!(result.details.education_match, 43);
        assert_eq!(
            result.details.keywords_match,
            vec!["python", "database", "experience"]
        );
        assert_eq!(
            result.details.missing_keywords,
            vec!["looking", "for", "developer", "with"]
        );
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let resume = "python and postgres, five years";
        let jd = "senior python role with postgres and kafka";
        let first = compute_keyword_match(resume, jd);
        let second = compute_keyword_match(resume, jd);
        assert_eq!(first, second);
    }

    #[test]
    fn test_profile_from_parsed_json_matches_field_values_and_keys() {
        let parsed = json!({
            "skills": ["python", "postgres"],
            "experience": [{"company": "Acme", "position": "Engineer"}]
        });
        let profile = ResumeProfile::from_parsed_json(&parsed);
        let result = compute_keyword_match(profile.as_text(), "python experience acme");

        // JSON keys count as resume text, so "experience" matches via the
        // serialized field name — parity with the original behavior.
        assert_eq!(result.match_score, 100);
    }

    #[tokio::test]
    async fn test_keyword_scorer_through_trait_object() {
        let scorer: Arc<dyn MatchScorer> = Arc::new(KeywordMatchScorer);
        let profile = ResumeProfile::from_text("rust and sql".to_string());

        let result = scorer.score(&profile, "rust sql kafka").await.unwrap();
        assert_eq!(result.match_score, 67);
        assert_eq!(result.details.keywords_match, vec!["rust", "sql"]);
        assert_eq!(result.details.missing_keywords, vec!["kafka"]);
    }
}
