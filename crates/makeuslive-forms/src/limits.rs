//! File rules: size limits, content-type allowlist, filename hygiene.

use makeuslive_core::constants::MAX_FILENAME_LENGTH;

use crate::error::SubmissionError;
use crate::submission::FilePart;

/// Effective file rules for one submission, as computed by the caller from
/// workspace defaults and any per-form overrides.
#[derive(Debug, Clone)]
pub struct FileRules {
    pub max_file_size_bytes: usize,
    pub max_total_size_bytes: usize,
    /// Lowercased MIME types, compared after parameter stripping
    pub allowed_content_types: Vec<String>,
}

impl FileRules {
    pub fn new(
        max_file_size_bytes: usize,
        max_total_size_bytes: usize,
        allowed_content_types: Vec<String>,
    ) -> Self {
        FileRules {
            max_file_size_bytes,
            max_total_size_bytes,
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| ct.to_lowercase())
                .collect(),
        }
    }

    /// Check every file part against the rules. Runs before field
    /// validation; the first violation wins.
    pub fn check(&self, files: &[FilePart]) -> Result<(), SubmissionError> {
        let mut total = 0usize;
        for file in files {
            if file.data.is_empty() {
                return Err(SubmissionError::EmptyFile(file.filename.clone()));
            }
            if file.data.len() > self.max_file_size_bytes {
                return Err(SubmissionError::FileTooLarge {
                    filename: file.filename.clone(),
                    size: file.data.len(),
                    max: self.max_file_size_bytes,
                });
            }
            let normalized = normalize_mime_type(&file.content_type).to_lowercase();
            if !self.allowed_content_types.iter().any(|ct| *ct == normalized) {
                return Err(SubmissionError::UnsupportedContentType {
                    filename: file.filename.clone(),
                    content_type: file.content_type.clone(),
                });
            }
            total += file.data.len();
        }
        if total > self.max_total_size_bytes {
            return Err(SubmissionError::TotalTooLarge {
                total,
                max: self.max_total_size_bytes,
            });
        }
        Ok(())
    }
}

/// Normalize a MIME type by stripping parameters
/// (e.g. "text/plain; charset=utf-8" -> "text/plain").
pub fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Sanitize a filename: basename only, no traversal, bounded length.
pub fn sanitize_filename(filename: &str) -> Result<String, SubmissionError> {
    let name = std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if name.is_empty() || name == "." || name == ".." {
        return Err(SubmissionError::InvalidFilename(filename.to_string()));
    }
    if name.contains("..") || name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(SubmissionError::InvalidFilename(filename.to_string()));
    }
    if name.len() > MAX_FILENAME_LENGTH {
        return Err(SubmissionError::InvalidFilename(format!(
            "{} (longer than {} characters)",
            name, MAX_FILENAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(filename: &str, content_type: &str, len: usize) -> FilePart {
        FilePart {
            field: "attachment".to_string(),
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            data: vec![0u8; len],
        }
    }

    fn rules() -> FileRules {
        FileRules::new(100, 150, vec!["application/pdf".to_string()])
    }

    #[test]
    fn accepts_file_within_limits() {
        assert!(rules().check(&[part("cv.pdf", "application/pdf", 80)]).is_ok());
    }

    #[test]
    fn rejects_oversized_file() {
        let err = rules()
            .check(&[part("cv.pdf", "application/pdf", 101)])
            .unwrap_err();
        assert!(matches!(err, SubmissionError::FileTooLarge { .. }));
    }

    #[test]
    fn rejects_oversized_aggregate() {
        let err = rules()
            .check(&[
                part("a.pdf", "application/pdf", 80),
                part("b.pdf", "application/pdf", 80),
            ])
            .unwrap_err();
        assert!(matches!(err, SubmissionError::TotalTooLarge { total: 160, .. }));
    }

    #[test]
    fn rejects_disallowed_content_type() {
        let err = rules()
            .check(&[part("a.exe", "application/x-msdownload", 10)])
            .unwrap_err();
        assert!(matches!(err, SubmissionError::UnsupportedContentType { .. }));
    }

    #[test]
    fn mime_parameters_do_not_bypass_allowlist() {
        let rules = FileRules::new(100, 150, vec!["text/plain".to_string()]);
        assert!(rules
            .check(&[part("notes.txt", "text/plain; charset=utf-8", 10)])
            .is_ok());
    }

    #[test]
    fn rejects_empty_file() {
        let err = rules().check(&[part("a.pdf", "application/pdf", 0)]).unwrap_err();
        assert!(matches!(err, SubmissionError::EmptyFile(_)));
    }

    #[test]
    fn filename_sanitization() {
        assert_eq!(sanitize_filename("resume.pdf").unwrap(), "resume.pdf");
        assert_eq!(sanitize_filename("/tmp/up/resume.pdf").unwrap(), "resume.pdf");
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename(&"x".repeat(300)).is_err());
    }
}
