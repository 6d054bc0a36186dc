//! Resume file text extraction.
//!
//! PDF text comes out of `pdf-extract`; plain-text files are decoded as
//! UTF-8. Other formats are rejected up front with an extraction error.

use crate::errors::AppError;

/// File extensions this service can turn into text.
const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt"];

/// Returns the lower-cased extension of a file name, if it has one.
pub fn file_extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Extracts the text content of an uploaded resume file.
pub fn extract_resume_text(file_name: &str, data: &[u8]) -> Result<String, AppError> {
    let ext = file_extension(file_name).ok_or_else(|| {
        AppError::Extraction(format!("File '{file_name}' has no extension"))
    })?;

    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::Extraction(format!(
            "Unsupported file format '.{ext}'. Supported: {}",
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }

    let text = match ext.as_str() {
        "pdf" => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| AppError::Extraction(format!("Failed to read PDF: {e}")))?,
        _ => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Extraction("Text file is not valid UTF-8".to_string()))?,
    };

    if text.trim().is_empty() {
        return Err(AppError::Extraction(
            "No extractable text found in the uploaded file".to_string(),
        ));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension_is_lowercased() {
        assert_eq!(file_extension("Resume.PDF"), Some("pdf".to_string()));
        assert_eq!(file_extension("notes.txt"), Some("txt".to_string()));
        assert_eq!(file_extension("noext"), None);
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = extract_resume_text("resume.txt", b"Senior Rust engineer").unwrap();
        assert_eq!(text, "Senior Rust engineer");
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = extract_resume_text("resume.docx", b"PK\x03\x04").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        let err = extract_resume_text("resume", b"text").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_whitespace_only_content_is_rejected() {
        let err = extract_resume_text("resume.txt", b"  \n\t ").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_invalid_utf8_text_is_rejected() {
        let err = extract_resume_text("resume.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
