//! Client-side checks that run before any request is sent.

use thiserror::Error;

/// Largest recording accepted for analysis, inclusive: 50 MB.
///
/// Older builds capped uploads at 30 MB; the backend accepts 50 MB.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Accepted recording extensions, lowercase: MP3 and WAV audio, MP4 video.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["mp3", "wav", "mp4"];

/// Rejections raised before a request is built.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("No file selected")]
    NoFile,
    #[error("{file_name} is not a supported recording (MP3, WAV or MP4)")]
    UnsupportedType { file_name: String },
    #[error("{file_name} is {size_mb:.1} MB; the limit is 50 MB")]
    TooLarge { file_name: String, size_mb: f64 },
    #[error("Could not read {file_name}: {reason}")]
    Unreadable { file_name: String, reason: String },
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Passwords don't match")]
    PasswordMismatch,
}

/// Check a recording's name and size against the upload limits.
pub fn check_recording(file_name: &str, size_bytes: u64) -> Result<(), ValidationError> {
    if !has_accepted_extension(file_name) {
        return Err(ValidationError::UnsupportedType {
            file_name: file_name.to_string(),
        });
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            file_name: file_name.to_string(),
            size_mb: size_bytes as f64 / (1024.0 * 1024.0),
        });
    }
    Ok(())
}

pub fn has_accepted_extension(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

pub fn check_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

pub fn check_registration(
    username: &str,
    password: &str,
    confirm: &str,
) -> Result<(), ValidationError> {
    check_credentials(username, password)?;
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_extensions_case_insensitively() {
        assert!(check_recording("call.MP3", 1024).is_ok());
        assert!(check_recording("call.wav", 1024).is_ok());
        assert!(check_recording("demo.Mp4", 1024).is_ok());
    }

    #[test]
    fn rejects_unsupported_extension() {
        let err = check_recording("notes.txt", 10).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedType {
                file_name: "notes.txt".into()
            }
        );
        assert!(check_recording("no_extension", 10).is_err());
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(check_recording("call.mp3", MAX_UPLOAD_BYTES).is_ok());
        assert!(matches!(
            check_recording("call.mp3", MAX_UPLOAD_BYTES + 1),
            Err(ValidationError::TooLarge { .. })
        ));
        let err = check_recording("big.wav", 60 * 1024 * 1024).unwrap_err();
        assert_eq!(err.to_string(), "big.wav is 60.0 MB; the limit is 50 MB");
    }

    #[test]
    fn registration_requires_matching_passwords() {
        assert_eq!(
            check_registration("sam", "one", "two"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            check_registration(" ", "one", "one"),
            Err(ValidationError::MissingCredentials)
        );
        assert!(check_registration("sam", "one", "one").is_ok());
    }
}
