//! Result type alias for nomad-export

use super::errors::NomadExportError;

/// Result type alias for nomad-export operations
///
/// Uses `NomadExportError` as the error type.
///
/// # Examples
///
/// ```
/// use nomad_export::domain::result::Result;
/// use nomad_export::domain::errors::NomadExportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(NomadExportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, NomadExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
