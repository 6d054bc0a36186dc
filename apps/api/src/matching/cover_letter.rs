//! Cover-letter generation against the parsed resume and a job description.

use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};

/// Temperature for cover-letter prose; warmer than structured extraction.
const COVER_LETTER_TEMPERATURE: f32 = 0.7;

/// Generates a cover letter from the stored parsed resume and the raw job
/// description. Returns the letter as plain text.
pub async fn generate_cover_letter(
    llm: &LlmClient,
    parsed_resume: &Value,
    job_description: &str,
) -> Result<String, AppError> {
    let prompt = COVER_LETTER_PROMPT_TEMPLATE
        .replace("{resume_json}", &parsed_resume.to_string())
        .replace("{jd_text}", job_description);

    llm.call_text(&prompt, COVER_LETTER_SYSTEM, Some(COVER_LETTER_TEMPERATURE))
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))
}
