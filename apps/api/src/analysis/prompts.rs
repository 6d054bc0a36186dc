// LLM prompt constants for the Analysis module.

/// System prompt for resume analysis — enforces JSON-only output.
pub const RESUME_ANALYSIS_SYSTEM: &str =
    "You are an expert HR professional and resume analyzer. \
    Analyze the provided resume and return structured information. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume analysis prompt template. Replace `{resume_text}` before sending.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and extract structured information.

Return a JSON object with this EXACT schema (no extra fields):
{
  "parsed_data": {
    "name": "Full Name",
    "email": "email@example.com",
    "phone": "phone number",
    "skills": ["skill1", "skill2"],
    "experience": [
      {"company": "Company", "position": "Role", "duration": "Period", "description": "Details"}
    ],
    "education": [
      {"institution": "School", "degree": "Degree", "year": "Year"}
    ],
    "summary": "Professional summary"
  },
  "analysis": {
    "overall_score": 85,
    "strengths": ["strength1", "strength2"],
    "weaknesses": ["weakness1", "weakness2"],
    "suggestions": ["suggestion1", "suggestion2"],
    "ats_score": 78,
    "keyword_density": {"skill1": 5, "skill2": 3}
  }
}

Rules:
- "name", "email", "phone", and "summary" may be null when the resume does not state them.
- Scores are integers from 0 to 100.
- "keyword_density" maps notable keywords to their occurrence counts.

RESUME:
{resume_text}"#;
