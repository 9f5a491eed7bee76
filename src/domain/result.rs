//! Result type alias for Minote

use super::errors::MinoteError;

/// Result type alias for Minote operations
///
/// # Examples
///
/// ```
/// use minote::domain::result::Result;
/// use minote::domain::errors::MinoteError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MinoteError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MinoteError>;
