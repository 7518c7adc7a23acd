//! Common validation utilities.

use chrono::{DateTime, Utc};
use validator::ValidationError;

/// Rejects strings that are empty after trimming.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that an interval does not end before it starts.
pub fn validate_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ValidationError> {
    if end >= start {
        Ok(())
    } else {
        let mut err = ValidationError::new("time_range");
        err.message = Some("End time must not be before start time".into());
        Err(err)
    }
}

/// Validates a page size against an upper bound.
pub fn validate_page_size(limit: i64, max: i64) -> Result<(), ValidationError> {
    if (1..=max).contains(&limit) {
        Ok(())
    } else {
        let mut err = ValidationError::new("page_size");
        err.message = Some(format!("Limit must be between 1 and {}", max).into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Keynote").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t\n").is_err());
    }

    #[test]
    fn test_validate_not_blank_error_message() {
        let err = validate_not_blank("  ").unwrap_err();
        assert_eq!(err.message.unwrap().to_string(), "Value must not be blank");
    }

    #[test]
    fn test_validate_time_range() {
        let start = Utc::now();
        assert!(validate_time_range(start, start).is_ok());
        assert!(validate_time_range(start, start + Duration::hours(1)).is_ok());
        assert!(validate_time_range(start, start - Duration::seconds(1)).is_err());
    }

    #[test]
    fn test_validate_page_size() {
        assert!(validate_page_size(1, 100).is_ok());
        assert!(validate_page_size(100, 100).is_ok());
        assert!(validate_page_size(0, 100).is_err());
        assert!(validate_page_size(101, 100).is_err());
    }
}
