use thiserror::Error;

pub type CloudResult<T> = Result<T, CloudError>;

/// Failures detected while validating generator parameters.
///
/// Validation always runs before the first random draw, so an error means
/// nothing was generated and no entropy was consumed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CloudError {
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
}

impl CloudError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CloudError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

/// count must be non-negative
pub(crate) fn check_count(field: &'static str, count: i32) -> CloudResult<usize> {
    usize::try_from(count).map_err(|_| CloudError::invalid(field, format!("{count} is negative")))
}

pub(crate) fn check_positive(field: &'static str, value: f32) -> CloudResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CloudError::invalid(field, format!("{value} must be positive and finite")))
    }
}

pub(crate) fn check_non_negative(field: &'static str, value: f32) -> CloudResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CloudError::invalid(field, format!("{value} must be non-negative and finite")))
    }
}

pub(crate) fn check_finite(field: &'static str, value: f32) -> CloudResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CloudError::invalid(field, format!("{value} must be finite")))
    }
}
