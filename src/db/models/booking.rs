//! Booking model.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use super::Entity;

pub const BOOKING_CONFIRMED: &str = "Booking confirmed";

/// Incoming booking payload. Dates are plain calendar dates (`YYYY-MM-DD`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    pub user_email: String,
    pub hotel_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(deserialize_with = "whole_number")]
    pub guests: i64,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Integer field that also accepts floats without a fractional part (`2.0`)
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }

    match number.as_f64() {
        Some(value)
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            Ok(value as i64)
        }
        _ => Err(de::Error::custom(format!(
            "Input should be a valid integer, got {}",
            number
        ))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub user_email: String,
    pub hotel_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i64,
    pub special_requests: Option<String>,
}

impl Entity for Booking {
    const COLLECTION: &'static str = "booking";
}

impl From<BookingRequest> for Booking {
    fn from(req: BookingRequest) -> Self {
        Self {
            user_email: req.user_email,
            hotel_id: req.hotel_id,
            check_in: req.check_in,
            check_out: req.check_out,
            guests: req.guests,
            special_requests: req.special_requests,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingResponse {
    pub id: String,
    pub message: String,
}
