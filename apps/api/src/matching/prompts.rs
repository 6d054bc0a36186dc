// LLM prompt constants for the matching module.

/// System prompt for cover-letter generation — prose output, no JSON.
pub const COVER_LETTER_SYSTEM: &str =
    "You are a professional career counselor. Generate a personalized cover \
    letter based on the resume data and job description provided. Make it \
    compelling, professional, and tailored to the specific role. \
    Respond with the cover letter text only — no preamble, no commentary.";

/// Cover-letter prompt template. Replace `{resume_json}` and `{jd_text}`
/// before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Resume Summary: {resume_json}

Job Description: {jd_text}

Please generate a professional cover letter."#;
