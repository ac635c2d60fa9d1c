use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{ValidateEmail, ValidationError};

use crate::shared::constants::{METER_SCALE, MONEY_SCALE};

lazy_static! {
    /// Regex for phone numbers
    /// Optional leading '+', then digits with optional single spaces or hyphens
    /// - Valid: "01711223344", "+880 1711-223344", "555 0100"
    /// - Invalid: "phone", "+", "12", "0171--1"
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[0-9]+(?:[ -][0-9]+)*$").unwrap();

    /// Regex for flat and building numbers
    /// Alphanumeric segments separated by single hyphens, slashes or spaces
    /// - Valid: "A1", "12-B", "Block C/4"
    /// - Invalid: "-A1", "A1-", "", "A1#"
    pub static ref UNIT_NUMBER_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9]+(?:[-/ ][A-Za-z0-9]+)*$").unwrap();
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Amounts, costs and readouts must be zero or positive
pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("non_negative", "must not be negative"));
    }
    Ok(())
}

/// Whether `value` has no more decimal places than `scale`; trailing zeros don't count
pub fn fits_scale(value: &Decimal, scale: u32) -> bool {
    value.normalize().scale() <= scale
}

/// Non-negative money value storable without rounding
pub fn money(value: &Decimal) -> Result<(), ValidationError> {
    non_negative(value)?;
    if !fits_scale(value, MONEY_SCALE) {
        return Err(error("money_scale", "must have at most 2 decimal places"));
    }
    Ok(())
}

/// Non-negative meter readout or per-unit gas cost storable without rounding
pub fn meter_value(value: &Decimal) -> Result<(), ValidationError> {
    non_negative(value)?;
    if !fits_scale(value, METER_SCALE) {
        return Err(error("meter_scale", "must have at most 3 decimal places"));
    }
    Ok(())
}

/// Rejects strings that are empty once trimmed
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("not_blank", "must not be blank"));
    }
    Ok(())
}

/// Minimum phone digits, on top of `PHONE_REGEX`
pub fn phone_digits(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !(6..=15).contains(&digits) {
        return Err(error("phone_digits", "phone number must contain 6 to 15 digits"));
    }
    Ok(())
}

/// Optional contact email: empty clears the field, anything else must be an email
pub fn email_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim().validate_email() {
        return Ok(());
    }
    Err(error("email", "Invalid email format"))
}

/// Optional contact phone: empty clears the field, anything else must be a phone number
pub fn phone_or_empty(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    if !PHONE_REGEX.is_match(value) {
        return Err(error("phone", "Invalid phone number"));
    }
    phone_digits(value)
}

/// A phone that, when present, may not be blank
pub fn required_phone(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "phone number is required"));
    }
    phone_or_empty(value)
}

/// Trimmed value, or `None` when blank
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
