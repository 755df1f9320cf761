//! Request field validation helpers
//!
//! Small char-based validators shared by the cart and checkout handlers.

use shared::{AppError, AppResult, ErrorCode};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_NOTES_LEN: usize = 500;
pub const MAX_ADDRESS_LEN: usize = 500;
pub const MAX_QUANTITY: i64 = 100;

/// Validate a required text field: non-empty after trim and within `max_len`
pub fn validate_required_text(field: &str, value: &str, max_len: usize) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField).with_detail("field", field));
    }
    if trimmed.chars().count() > max_len {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, format!("{} is too long", field))
                .with_detail("field", field)
                .with_detail("max_len", max_len as i64),
        );
    }
    Ok(())
}

/// Validate an optional text field: length only, empty is fine
pub fn validate_optional_text(field: &str, value: Option<&str>, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, format!("{} is too long", field))
                .with_detail("field", field)
                .with_detail("max_len", max_len as i64),
        );
    }
    Ok(())
}

/// Validate an item quantity: at least 1, at most [`MAX_QUANTITY`]
pub fn validate_quantity(quantity: i64) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    if quantity > MAX_QUANTITY {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, "Quantity is too large")
                .with_detail("max", MAX_QUANTITY),
        );
    }
    Ok(())
}

/// Validate card payment details
///
/// Accepts a 16-digit card number, an MM/YY expiry with a real month,
/// and a 3-digit CVV. Anything else is rejected before any write happens.
pub fn validate_card_details(number: &str, expiry: &str, cvv: &str) -> AppResult<()> {
    if number.len() != 16 || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::invalid_card().with_detail("field", "card_number"));
    }

    let expiry_bytes = expiry.as_bytes();
    let expiry_ok = expiry_bytes.len() == 5
        && expiry_bytes[2] == b'/'
        && expiry_bytes[0].is_ascii_digit()
        && expiry_bytes[1].is_ascii_digit()
        && expiry_bytes[3].is_ascii_digit()
        && expiry_bytes[4].is_ascii_digit()
        && expiry[0..2]
            .parse::<u8>()
            .map(|m| (1..=12).contains(&m))
            .unwrap_or(false);
    if !expiry_ok {
        return Err(AppError::invalid_card().with_detail("field", "expiry"));
    }

    if cvv.len() != 3 || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::invalid_card().with_detail("field", "cvv"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("name", "Latte", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("name", "   ", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("name", "", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("name", &"x".repeat(101), MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text("notes", None, MAX_NOTES_LEN).is_ok());
        assert!(validate_optional_text("notes", Some(""), MAX_NOTES_LEN).is_ok());
        assert!(validate_optional_text("notes", Some("oat milk"), MAX_NOTES_LEN).is_ok());
        assert!(validate_optional_text("notes", Some(&"x".repeat(501)), MAX_NOTES_LEN).is_err());
    }

    #[test]
    fn test_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
        assert!(validate_quantity(101).is_err());
    }

    #[test]
    fn test_card_number() {
        let ok = validate_card_details("4242424242424242", "12/26", "123");
        assert!(ok.is_ok());

        assert!(validate_card_details("4242", "12/26", "123").is_err());
        assert!(validate_card_details("424242424242424a", "12/26", "123").is_err());
        assert!(validate_card_details("42424242424242420", "12/26", "123").is_err());
    }

    #[test]
    fn test_card_expiry() {
        assert!(validate_card_details("4242424242424242", "01/25", "123").is_ok());
        assert!(validate_card_details("4242424242424242", "13/25", "123").is_err());
        assert!(validate_card_details("4242424242424242", "00/25", "123").is_err());
        assert!(validate_card_details("4242424242424242", "1/25", "123").is_err());
        assert!(validate_card_details("4242424242424242", "12-25", "123").is_err());
    }

    #[test]
    fn test_card_cvv() {
        assert!(validate_card_details("4242424242424242", "12/26", "12").is_err());
        assert!(validate_card_details("4242424242424242", "12/26", "1234").is_err());
        assert!(validate_card_details("4242424242424242", "12/26", "12a").is_err());
    }
}
