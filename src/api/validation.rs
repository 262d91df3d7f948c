//! Input validation for API requests.
//!
//! Payloads are checked field by field before any store access; every
//! violation is collected into one 422 response via `ValidationErrorBuilder`.
//! Handlers receive already-validated bodies through the [`ValidJson`]
//! extractor.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::db::{BookingRequest, ContactMessage, Hotel, LoginRequest};

use super::error::{ApiError, ValidationErrorBuilder};

lazy_static! {
    /// Local part: RFC 5322 atom characters and dots
    static ref EMAIL_LOCAL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$"
    ).unwrap();

    /// Domain: at least two DNS labels
    static ref EMAIL_DOMAIN_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$"
    ).unwrap();
}

pub const MIN_GUESTS: i64 = 1;
pub const MAX_GUESTS: i64 = 10;
pub const MIN_MESSAGE_LEN: usize = 5;
pub const MAX_RATING: f64 = 5.0;

/// Outcome of a single field check: error kind and message on failure
pub type FieldCheck = Result<(), (&'static str, String)>;

/// A payload with field constraints
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;

    /// Canonicalize fields once validation has passed
    fn normalize(&mut self) {}
}

/// Validate an email address
pub fn validate_email(email: &str) -> FieldCheck {
    let invalid = |reason: &str| {
        Err((
            "value_error",
            format!("value is not a valid email address: {}", reason),
        ))
    };

    if email.len() > 254 {
        return invalid("The email address is too long.");
    }

    let (local, domain) = match email.rsplit_once('@') {
        Some(parts) => parts,
        None => return invalid("An email address must have an @-sign."),
    };

    if local.is_empty() {
        return invalid("There must be something before the @-sign.");
    }
    if local.len() > 64 {
        return invalid("The email address is too long before the @-sign.");
    }
    if !EMAIL_LOCAL_REGEX.is_match(local) {
        return invalid("The part before the @-sign is not valid.");
    }
    if domain.is_empty() {
        return invalid("There must be something after the @-sign.");
    }
    if !EMAIL_DOMAIN_REGEX.is_match(domain) {
        return invalid("The part after the @-sign is not valid.");
    }

    Ok(())
}

/// Lower-case the domain part of an email; the local part is kept as given
pub fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Validate a minimum length in characters
pub fn validate_min_length(value: &str, min: usize) -> FieldCheck {
    if value.chars().count() < min {
        return Err((
            "string_too_short",
            format!("String should have at least {} characters", min),
        ));
    }
    Ok(())
}

/// Validate an inclusive integer range
pub fn validate_int_range(value: i64, min: i64, max: i64) -> FieldCheck {
    if value < min {
        return Err((
            "greater_than_equal",
            format!("Input should be greater than or equal to {}", min),
        ));
    }
    if value > max {
        return Err((
            "less_than_equal",
            format!("Input should be less than or equal to {}", max),
        ));
    }
    Ok(())
}

/// Validate a lower bound on a number
pub fn validate_min_number(value: f64, min: f64) -> FieldCheck {
    if value.is_nan() || value < min {
        return Err((
            "greater_than_equal",
            format!("Input should be greater than or equal to {}", min),
        ));
    }
    Ok(())
}

/// Validate an upper bound on a number
pub fn validate_max_number(value: f64, max: f64) -> FieldCheck {
    if value.is_nan() || value > max {
        return Err((
            "less_than_equal",
            format!("Input should be less than or equal to {}", max),
        ));
    }
    Ok(())
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = ValidationErrorBuilder::new();
        errors.check("email", validate_email(&self.email));
        errors.finish()
    }

    fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
    }
}

impl Validate for BookingRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = ValidationErrorBuilder::new();
        errors.check("user_email", validate_email(&self.user_email));
        errors.check(
            "guests",
            validate_int_range(self.guests, MIN_GUESTS, MAX_GUESTS),
        );
        errors.finish()
    }

    fn normalize(&mut self) {
        self.user_email = normalize_email(&self.user_email);
    }
}

impl Validate for ContactMessage {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = ValidationErrorBuilder::new();
        errors.check("email", validate_email(&self.email));
        errors.check("message", validate_min_length(&self.message, MIN_MESSAGE_LEN));
        errors.finish()
    }

    fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
    }
}

impl Validate for Hotel {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = ValidationErrorBuilder::new();
        errors.check("price_per_night", validate_min_number(self.price_per_night, 0.0));
        errors.check("rating", validate_min_number(self.rating, 0.0));
        errors.check("rating", validate_max_number(self.rating, MAX_RATING));
        errors.finish()
    }
}

/// JSON body extractor that rejects malformed or invalid payloads with 422
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        let mut payload: T = serde_path_to_error::deserialize(body)?;
        payload.validate()?;
        payload.normalize();
        Ok(Self(payload))
    }
}
