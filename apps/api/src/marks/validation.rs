use crate::errors::AppError;

/// Validates a score pair and returns the percentage rounded to two decimals.
pub fn checked_percentage(marks_scored: f64, total_marks: f64) -> Result<f64, AppError> {
    if !marks_scored.is_finite() || !total_marks.is_finite() {
        return Err(AppError::Validation("Marks must be numbers!".to_string()));
    }
    if total_marks <= 0.0 {
        return Err(AppError::Validation(
            "Total marks must be greater than zero!".to_string(),
        ));
    }
    if marks_scored < 0.0 {
        return Err(AppError::Validation("Marks cannot be negative!".to_string()));
    }
    if marks_scored > total_marks {
        return Err(AppError::Validation(
            "Marks scored cannot exceed total marks!".to_string(),
        ));
    }
    Ok(round_to(marks_scored / total_marks * 100.0, 2))
}

/// Trims the subject name; blank names are rejected.
pub fn normalize_subject(subject: &str) -> Result<String, AppError> {
    let subject = subject.split_whitespace().collect::<Vec<_>>().join(" ");
    if subject.is_empty() {
        return Err(AppError::Validation(
            "Please select or enter a valid subject name!".to_string(),
        ));
    }
    Ok(subject)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounded() {
        assert_eq!(checked_percentage(2.0, 3.0).unwrap(), 66.67);
        assert_eq!(checked_percentage(45.0, 50.0).unwrap(), 90.0);
    }

    #[test]
    fn test_full_marks_allowed() {
        assert_eq!(checked_percentage(100.0, 100.0).unwrap(), 100.0);
    }

    #[test]
    fn test_scored_above_total_rejected() {
        let err = checked_percentage(101.0, 100.0).unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_zero_total_rejected() {
        assert!(checked_percentage(0.0, 0.0).is_err());
        assert!(checked_percentage(-1.0, 10.0).is_err());
        assert!(checked_percentage(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn test_subject_whitespace_collapsed() {
        assert_eq!(normalize_subject("  Home   Science ").unwrap(), "Home Science");
        assert!(normalize_subject("   ").is_err());
    }
}
