//! Validation of uploaded files before they reach the parser.

/// Security-related constants for input validation
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Share of control bytes above which an upload is treated as binary (1/20)
const MAX_CONTROL_BYTE_RATIO: usize = 20;

/// Extensions accepted for IT and master uploads
const ACCEPTED_EXTENSIONS: [&str; 3] = [".csv", ".txt", ".tsv"];

/// Security validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename: contains path traversal or invalid characters")]
    InvalidFilename,
    #[error("Empty filename provided")]
    EmptyFilename,
    #[error("Unsupported file type: expected .csv, .txt or .tsv")]
    UnsupportedExtension,
    #[error("File content appears to be binary, expected delimited text")]
    InvalidFileContent,
}

/// Secure filename validation to prevent directory traversal and other attacks
///
/// Validates and sanitizes filenames by:
/// - Checking length limits
/// - Preventing directory traversal (../, ..\\)
/// - Removing potentially dangerous characters
/// - Ensuring filename is not empty after sanitization
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` if the filename is empty,
/// `ValidationError::FilenameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidFilename` if it contains invalid characters.
pub fn validate_filename(filename: &str) -> Result<String, ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ValidationError::InvalidFilename);
    }

    if filename.chars().any(|c| c == '\0' || c.is_control()) {
        return Err(ValidationError::InvalidFilename);
    }

    let sanitized = filename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ' | '(' | ')'))
        .collect::<String>();

    if sanitized.trim().is_empty() || sanitized.starts_with('.') {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(sanitized)
}

/// Whether `filename` ends in one of the accepted table extensions
#[must_use]
pub fn has_table_extension(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Reject content that is clearly not delimited text.
///
/// Empty content passes: an empty extract reconciles as an empty table.
///
/// # Errors
///
/// Returns `ValidationError::InvalidFileContent` if more than one byte in
/// twenty is a control character other than tab, CR or LF.
pub fn validate_file_content(content: &[u8]) -> Result<(), ValidationError> {
    let control_count = content
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32) || b == 127)
        .count();

    if control_count > 0 && control_count * MAX_CONTROL_BYTE_RATIO > content.len() {
        return Err(ValidationError::InvalidFileContent);
    }

    Ok(())
}

/// Complete validation for one uploaded extract
///
/// # Errors
///
/// Returns a `ValidationError` if the filename is unsafe or has an unsupported
/// extension, or the content looks binary.
pub fn validate_upload(
    filename: Option<&str>,
    content: &[u8],
) -> Result<Option<String>, ValidationError> {
    let validated_filename = match filename {
        Some(name) => {
            let name = validate_filename(name)?;
            if !has_table_extension(&name) {
                return Err(ValidationError::UnsupportedExtension);
            }
            Some(name)
        }
        None => None,
    };

    validate_file_content(content)?;

    Ok(validated_filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename_safe() {
        assert!(validate_filename("data_it.csv").is_ok());
        assert!(validate_filename("Master Data (Oct).csv").is_ok());
        assert!(validate_filename("tarif-2026.txt").is_ok());
    }

    #[test]
    fn test_validate_filename_dangerous() {
        assert!(validate_filename("../etc/passwd").is_err());
        assert!(validate_filename("..\\windows\\system32").is_err());
        assert!(validate_filename("test/../../secret").is_err());

        assert!(validate_filename("test\0.csv").is_err());
        assert!(validate_filename("test\x01.csv").is_err());

        let long_name = "a".repeat(300);
        assert_eq!(
            validate_filename(&long_name),
            Err(ValidationError::FilenameTooLong)
        );

        assert_eq!(validate_filename(""), Err(ValidationError::EmptyFilename));
        assert_eq!(validate_filename("   "), Err(ValidationError::EmptyFilename));

        assert!(validate_filename(".hidden.csv").is_err());
    }

    #[test]
    fn test_validate_filename_sanitization() {
        let result = validate_filename("data@#$%it.csv").unwrap();
        assert_eq!(result, "datait.csv");
    }

    #[test]
    fn test_table_extension() {
        assert!(has_table_extension("data.CSV"));
        assert!(has_table_extension("master.txt"));
        assert!(!has_table_extension("data.xlsx"));
        assert!(!has_table_extension("data"));
    }

    #[test]
    fn test_validate_file_content() {
        assert!(validate_file_content(b"ORIGIN,DEST\r\nA,B\r\n").is_ok());
        assert!(validate_file_content(b"").is_ok());
        assert!(validate_file_content("SERVICE\nRÉG\n".as_bytes()).is_ok());

        let binary = vec![0u8; 1000];
        assert_eq!(
            validate_file_content(&binary),
            Err(ValidationError::InvalidFileContent)
        );
    }

    #[test]
    fn test_validate_upload() {
        let content = b"SYS_CODE\nK1\n";

        assert_eq!(
            validate_upload(Some("it.csv"), content).unwrap(),
            Some("it.csv".to_string())
        );
        assert_eq!(validate_upload(None, content).unwrap(), None);
        assert!(validate_upload(Some("../it.csv"), content).is_err());
        assert_eq!(
            validate_upload(Some("it.exe"), content),
            Err(ValidationError::UnsupportedExtension)
        );
    }
}
