use validator::ValidationError;

/// Rejects strings that are empty or whitespace only.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Accepts absolute http(s) URLs and site-relative paths such as `/images/...`.
pub fn web_url(value: &str) -> Result<(), ValidationError> {
    if value.starts_with('/') && !value.starts_with("//") {
        return Ok(());
    }
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => {
            let mut err = ValidationError::new("invalid_url");
            err.message = Some("Must be an http(s) URL or a site path".into());
            Err(err)
        }
    }
}
