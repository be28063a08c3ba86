//! Validation trait definition

/// Validation for configuration structures
///
/// Errors are plain messages; callers wrap them with context.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
