//! Resume analysis — delegates parsing and scoring to the AI provider and
//! types its JSON output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analysis::prompts::{RESUME_ANALYSIS_PROMPT_TEMPLATE, RESUME_ANALYSIS_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Temperature for structured extraction; colder than prose generation.
const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// One work-history entry from the provider's extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

/// One education entry from the provider's extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

/// Structured fields the provider extracted from the resume text.
/// Serialized as a whole, this is the scoring input for job matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// The provider's qualitative assessment of the resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub overall_score: u32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub ats_score: u32,
    #[serde(default)]
    pub keyword_density: HashMap<String, u32>,
}

/// Full structured output of resume analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedResume {
    pub parsed_data: ParsedResume,
    pub analysis: ResumeAnalysis,
}

/// Analyzes raw resume text via the LLM and returns the typed result.
pub async fn analyze_resume(
    llm: &LlmClient,
    resume_text: &str,
) -> Result<AnalyzedResume, AppError> {
    let prompt = RESUME_ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    llm.call_json::<AnalyzedResume>(&prompt, RESUME_ANALYSIS_SYSTEM, Some(ANALYSIS_TEMPERATURE))
        .await
        .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))
}
