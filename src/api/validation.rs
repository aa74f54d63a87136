//! Request-body validation.
//!
//! Each request type converts itself into its validated form or reports
//! every problem it found, one [`FieldError`] per failed rule.

use validator::ValidateEmail;

use crate::database::models::ProductCategory;
use crate::error::FieldError;

pub trait Validate: Sized {
    type Valid;

    fn validate(self) -> Result<Self::Valid, Vec<FieldError>>;
}

/// Collects field errors across several checks.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &str, error: impl Into<String>) {
        self.errors.push(FieldError::new(field, error));
    }

    /// Required text that must contain something other than whitespace.
    pub fn not_blank(&mut self, field: &str, value: &Option<String>, error: &str) -> bool {
        match value {
            Some(v) if !v.trim().is_empty() => true,
            _ => {
                self.reject(field, error);
                false
            }
        }
    }

    /// Optional text that, when present, must not be blank.
    pub fn not_blank_if_present(&mut self, field: &str, value: &Option<String>, error: &str) {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            self.reject(field, error);
        }
    }

    pub fn email(&mut self, field: &str, value: &Option<String>) {
        if let Some(v) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            if !v.validate_email() {
                self.reject(field, "Invalid email format");
            }
        }
    }

    pub fn positive(&mut self, field: &str, value: Option<f64>, error: &str) {
        if let Some(v) = value {
            if !(v.is_finite() && v > 0.0) {
                self.reject(field, error);
            }
        }
    }

    /// Positive and representable as a stock count.
    pub fn positive_count(&mut self, field: &str, value: Option<i64>, error: &str) -> Option<i32> {
        let v = value?;
        match i32::try_from(v) {
            Ok(count) if count > 0 => Some(count),
            _ => {
                self.reject(field, error);
                None
            }
        }
    }

    pub fn category(&mut self, field: &str, value: &Option<String>) -> Option<ProductCategory> {
        let raw = value.as_deref()?;
        match raw.parse::<ProductCategory>() {
            Ok(category) => Some(category),
            Err(e) => {
                self.reject(field, e.to_string());
                None
            }
        }
    }

    pub fn finish<T>(self, valid: impl FnOnce() -> T) -> Result<T, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(valid())
        } else {
            Err(self.errors)
        }
    }
}
