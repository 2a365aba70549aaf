//! Registration input validation tests
//!
//! Role-conditional field requirements for the register endpoint.

/// Validate student enrollment fields (mirrors the handler logic for
/// testing)
fn validate_student_fields(
    roll_number: Option<&str>,
    batch: Option<&str>,
    phone: Option<&str>,
) -> Result<(), &'static str> {
    fn required(value: Option<&str>, message: &'static str) -> Result<(), &'static str> {
        match value {
            Some(v) if !v.is_empty() => Ok(()),
            _ => Err(message),
        }
    }

    required(roll_number, "roll_number is required for students")?;
    required(batch, "batch is required for students")?;
    required(phone, "phone is required for students")?;
    Ok(())
}

// ============================================================================
// Student registrations
// ============================================================================

#[test]
fn test_complete_student_fields_accepted() {
    assert!(validate_student_fields(Some("IT-042"), Some("2024"), Some("5550100")).is_ok());
}

#[test]
fn test_missing_roll_number_rejected() {
    let err = validate_student_fields(None, Some("2024"), Some("5550100")).unwrap_err();
    assert!(err.contains("roll_number"));
}

#[test]
fn test_empty_roll_number_rejected() {
    let err = validate_student_fields(Some(""), Some("2024"), Some("5550100")).unwrap_err();
    assert!(err.contains("roll_number"));
}

#[test]
fn test_missing_batch_rejected() {
    let err = validate_student_fields(Some("IT-042"), None, Some("5550100")).unwrap_err();
    assert!(err.contains("batch"));
}

#[test]
fn test_missing_phone_rejected() {
    let err = validate_student_fields(Some("IT-042"), Some("2024"), None).unwrap_err();
    assert!(err.contains("phone"));
}

#[test]
fn test_all_missing_reports_first_field() {
    let err = validate_student_fields(None, None, None).unwrap_err();
    assert!(err.contains("roll_number"));
}
