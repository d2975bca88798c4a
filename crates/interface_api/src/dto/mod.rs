//! Request and response bodies

pub mod auth;
pub mod audit;
pub mod claims;

use validator::Validate;

use crate::error::ApiError;

/// Runs the derived validation rules on a request body
pub fn validated<T: Validate>(body: T) -> Result<T, ApiError> {
    body.validate()?;
    Ok(body)
}
