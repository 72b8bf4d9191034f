use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path or body identifier, mapping failure to a 400.
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim())
        .map_err(|_| AppError::InvalidInput(format!("Invalid identifier: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_before_parsing() {
        let id = Uuid::new_v4();
        assert_eq!(valid_uuid(&format!(" {} ", id)).unwrap(), id);
        assert!(matches!(valid_uuid("abc"), Err(AppError::InvalidInput(_))));
    }
}
