//! Media reference validation.
//!
//! Storage itself is external (an object store hands the client a URL after
//! upload); the core only ever records the returned reference string. These
//! helpers reject malformed references *before* any store write, so a bad
//! upload can never leave a half-created complaint behind.

use crate::error::CoreError;

/// Maximum length for a stored media reference URL.
pub const MAX_MEDIA_URL_LENGTH: usize = 2_048;

/// Validate and normalize an optional media reference.
///
/// - `None` and empty/whitespace strings normalize to `None` (no evidence).
/// - Non-empty references must be `http://` or `https://` URLs within the
///   length cap.
pub fn normalize_media_ref(reference: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(raw) = reference else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.len() > MAX_MEDIA_URL_LENGTH {
        return Err(CoreError::Validation(format!(
            "Media reference exceeds maximum length of {MAX_MEDIA_URL_LENGTH} characters"
        )));
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(CoreError::Validation(format!(
            "Invalid media reference '{trimmed}'. Expected an http(s) URL"
        )));
    }

    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_blank_refs_normalize_to_none() {
        assert_eq!(normalize_media_ref(None).unwrap(), None);
        assert_eq!(normalize_media_ref(Some("")).unwrap(), None);
        assert_eq!(normalize_media_ref(Some("   ")).unwrap(), None);
    }

    #[test]
    fn valid_urls_pass_and_are_trimmed() {
        let r = normalize_media_ref(Some("  https://storage.example.com/proof.jpg "))
            .unwrap()
            .unwrap();
        assert_eq!(r, "https://storage.example.com/proof.jpg");

        assert!(normalize_media_ref(Some("http://cdn.example.com/a.png")).is_ok());
    }

    #[test]
    fn non_url_refs_are_rejected() {
        assert!(normalize_media_ref(Some("ftp://bad/scheme.jpg")).is_err());
        assert!(normalize_media_ref(Some("just-a-file-name.jpg")).is_err());
        assert!(normalize_media_ref(Some("javascript:alert(1)")).is_err());
    }

    #[test]
    fn overlong_refs_are_rejected() {
        let long = format!("https://x.example/{}", "a".repeat(MAX_MEDIA_URL_LENGTH));
        assert!(normalize_media_ref(Some(&long)).is_err());
    }
}
