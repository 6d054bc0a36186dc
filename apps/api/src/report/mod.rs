//! Career report generation.
//!
//! The report body is assembled as Typst markup by a pure builder, then
//! compiled to PDF by the `typst` binary in a temporary directory. The
//! builder is the testable part; the compile step is a thin subprocess call.

pub mod handlers;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::analysis::analyzer::ResumeAnalysis;
use crate::errors::AppError;
use crate::matching::scorer::MatchDetails;
use crate::models::job_match::JobMatchRow;
use crate::models::resume::ResumeRow;

/// A generated PDF returned as an attachment download.
pub struct PdfResponse {
    pub data: Vec<u8>,
    pub filename: String,
}

impl IntoResponse for PdfResponse {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.filename),
                ),
            ],
            self.data,
        )
            .into_response()
    }
}

/// Escapes text for safe interpolation into Typst markup.
fn escape_typst(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '#' | '*' | '_' | '$' | '@' | '<' | '>' | '[' | ']' | '`' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Builds the Typst source for a career analysis report. Pure: the only
/// ambient input is the generation date stamped into the header.
pub fn build_report_markup(
    resume: &ResumeRow,
    job_match: Option<&JobMatchRow>,
) -> Result<String, AppError> {
    let analysis: ResumeAnalysis = serde_json::from_value(resume.analysis.clone())
        .map_err(|e| AppError::Report(format!("Stored analysis is malformed: {e}")))?;

    let mut markup = String::new();
    markup.push_str("= Career Analysis Report\n\n");
    markup.push_str(&format!(
        "Generated on: {}\n\n",
        Utc::now().format("%Y-%m-%d")
    ));

    markup.push_str("== Resume Analysis\n\n");
    markup.push_str(&format!("- Overall Score: {}/100\n", analysis.overall_score));
    markup.push_str(&format!("- ATS Score: {}/100\n\n", analysis.ats_score));

    markup.push_str("=== Strengths\n\n");
    for strength in &analysis.strengths {
        markup.push_str(&format!("- {}\n", escape_typst(strength)));
    }

    markup.push_str("\n=== Areas for Improvement\n\n");
    for weakness in &analysis.weaknesses {
        markup.push_str(&format!("- {}\n", escape_typst(weakness)));
    }

    if let Some(job_match) = job_match {
        let details: MatchDetails = serde_json::from_value(job_match.match_details.clone())
            .map_err(|e| AppError::Report(format!("Stored match details are malformed: {e}")))?;

        markup.push_str("\n== Job Match Analysis\n\n");
        markup.push_str(&format!("- Match Score: {}%\n", job_match.match_score));
        markup.push_str(&format!("- Skills Match: {}%\n", details.skills_match));
        markup.push_str(&format!(
            "- Experience Match: {}%\n",
            details.experience_match
        ));
        markup.push_str(&format!(
            "- Education Match: {}%\n",
            details.education_match
        ));

        if !details.missing_keywords.is_empty() {
            markup.push_str("\n=== Missing Keywords\n\n");
            for keyword in &details.missing_keywords {
                markup.push_str(&format!("- {}\n", escape_typst(keyword)));
            }
        }
    }

    Ok(markup)
}

/// Compiles Typst markup to PDF bytes via the `typst` binary.
pub async fn compile_report_pdf(markup: &str) -> Result<Vec<u8>, AppError> {
    let dir = tempfile::tempdir().map_err(|e| AppError::Report(format!("tempdir: {e}")))?;
    let source_path = dir.path().join("report.typ");
    let output_path = dir.path().join("report.pdf");

    tokio::fs::write(&source_path, markup)
        .await
        .map_err(|e| AppError::Report(format!("Failed to write report source: {e}")))?;

    let output = tokio::process::Command::new("typst")
        .arg("compile")
        .arg(&source_path)
        .arg(&output_path)
        .output()
        .await
        .map_err(|e| AppError::Report(format!("Failed to execute typst: {e}")))?;

    if !output.status.success() {
        return Err(AppError::Report(format!(
            "Typst compilation failed: {}",
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    tokio::fs::read(&output_path)
        .await
        .map_err(|e| AppError::Report(format!("Failed to read compiled PDF: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn make_resume(analysis: serde_json::Value) -> ResumeRow {
        ResumeRow {
            id: Uuid::new_v4(),
            user_id: "anonymous".to_string(),
            file_name: "resume.pdf".to_string(),
            original_text: "text".to_string(),
            parsed: json!({}),
            analysis,
            uploaded_at: Utc::now(),
        }
    }

    fn make_match(score: i32, details: serde_json::Value) -> JobMatchRow {
        JobMatchRow {
            id: Uuid::new_v4(),
            resume_id: Uuid::new_v4(),
            job_description: "jd".to_string(),
            match_score: score,
            match_details: details,
            cover_letter: "letter".to_string(),
            created_at: Utc::now(),
        }
    }

    fn sample_analysis() -> serde_json::Value {
        json!({
            "overall_score": 82,
            "strengths": ["Clear impact metrics"],
            "weaknesses": ["Sparse education section"],
            "suggestions": [],
            "ats_score": 70,
            "keyword_density": {}
        })
    }

    #[test]
    fn test_report_contains_scores_and_sections() {
        let resume = make_resume(sample_analysis());
        let markup = build_report_markup(&resume, None).unwrap();

        assert!(markup.contains("= Career Analysis Report"));
        assert!(markup.contains("Generated on: "));
        assert!(markup.contains("Overall Score: 82/100"));
        assert!(markup.contains("ATS Score: 70/100"));
        assert!(markup.contains("Clear impact metrics"));
        assert!(markup.contains("Sparse education section"));
        assert!(!markup.contains("Job Match Analysis"));
    }

    #[test]
    fn test_report_includes_match_section_when_present() {
        let resume = make_resume(sample_analysis());
        let job_match = make_match(
            43,
            json!({
                "skills_match": 53,
                "experience_match": 48,
                "education_match": 43,
                "keywords_match": ["python"],
                "missing_keywords": ["kafka", "terraform"]
            }),
        );

        let markup = build_report_markup(&resume, Some(&job_match)).unwrap();
        assert!(markup.contains("== Job Match Analysis"));
        assert!(markup.contains("Match Score: 43%"));
        assert!(markup.contains("Skills Match: 53%"));
        assert!(markup.contains("- kafka"));
        assert!(markup.contains("- terraform"));
    }

    #[test]
    fn test_malformed_stored_analysis_is_a_report_error() {
        let resume = make_resume(json!({"overall_score": "not a number"}));
        let err = build_report_markup(&resume, None).unwrap_err();
        assert!(matches!(err, AppError::Report(_)));
    }

    #[test]
    fn test_typst_special_characters_are_escaped() {
        assert_eq!(escape_typst("C# and *bold*"), "C\\# and \\*bold\\*");
        assert_eq!(escape_typst("plain text"), "plain text");
        assert_eq!(escape_typst("a_b [x]"), "a\\_b \\[x\\]");
    }
}
