//! Custom field validators shared by the request DTOs.
//!
//! Every validator trims its input first so that whitespace-only
//! submissions fail the same way missing fields do.

use chrono::{Local, NaiveDate, NaiveTime};

pub fn first_name_required(value: &str, _ctx: &()) -> garde::Result {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(garde::Error::new("First name is required"));
    }
    if trimmed.chars().count() > 50 {
        return Err(garde::Error::new("First name must be less than 50 characters"));
    }
    Ok(())
}

pub fn last_name_required(value: &str, _ctx: &()) -> garde::Result {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(garde::Error::new("Last name is required"));
    }
    if trimmed.chars().count() > 50 {
        return Err(garde::Error::new("Last name must be less than 50 characters"));
    }
    Ok(())
}

/// Minimal shape check: one `@`, a non-empty local part and a dotted domain.
pub fn valid_email(value: &str, _ctx: &()) -> garde::Result {
    let value = value.trim();
    let invalid = || garde::Error::new("Please enter a valid email address");
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || value.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }
    let dot = domain.find('.').ok_or_else(invalid)?;
    if dot == 0 || domain.ends_with('.') {
        return Err(invalid());
    }
    Ok(())
}

/// Accepts common separators and an optional leading `+`, then requires
/// at least ten digits.
pub fn valid_phone(value: &str, _ctx: &()) -> garde::Result {
    if phone_digit_count(value) < 10 {
        return Err(garde::Error::new("Please enter a valid phone number"));
    }
    Ok(())
}

/// Same as [`valid_phone`] but an empty value passes. Used where the
/// caller may omit the field entirely.
pub fn optional_phone(value: &str, ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Ok(());
    }
    valid_phone(value, ctx)
}

fn phone_digit_count(value: &str) -> usize {
    let trimmed = value.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut digits = 0;
    for c in rest.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' => {}
            _ => return 0,
        }
    }
    digits
}

/// `YYYY-MM-DD`, today or later. Today is accepted so same-day walk-in
/// requests can still go through the form.
pub fn future_date(value: &str, _ctx: &()) -> garde::Result {
    let parsed = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| garde::Error::new("Please select a valid future date"))?;
    if parsed < Local::now().date_naive() {
        return Err(garde::Error::new("Please select a valid future date"));
    }
    Ok(())
}

pub fn valid_time(value: &str, _ctx: &()) -> garde::Result {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|_| ())
        .map_err(|_| garde::Error::new("Please enter a valid time in HH:MM format"))
}

pub fn contact_name(value: &str, _ctx: &()) -> garde::Result {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(garde::Error::new("Name is required"));
    }
    if trimmed.chars().count() < 2 {
        return Err(garde::Error::new("Name must be at least 2 characters"));
    }
    if trimmed.chars().count() > 50 {
        return Err(garde::Error::new("Name must be less than 50 characters"));
    }
    Ok(())
}

pub fn contact_subject(value: &str, _ctx: &()) -> garde::Result {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(garde::Error::new("Subject is required"));
    }
    if trimmed.chars().count() < 5 {
        return Err(garde::Error::new("Subject must be at least 5 characters"));
    }
    if trimmed.chars().count() > 100 {
        return Err(garde::Error::new("Subject must be less than 100 characters"));
    }
    Ok(())
}

pub fn contact_message(value: &str, _ctx: &()) -> garde::Result {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(garde::Error::new("Message is required"));
    }
    if trimmed.chars().count() < 10 {
        return Err(garde::Error::new("Message must be at least 10 characters"));
    }
    if trimmed.chars().count() > 1000 {
        return Err(garde::Error::new("Message must be less than 1000 characters"));
    }
    Ok(())
}

pub fn valid_contact_reason(value: &str, _ctx: &()) -> garde::Result {
    use kernel::model::contact::ContactReason;
    use std::str::FromStr;

    ContactReason::from_str(value.trim())
        .map(|_| ())
        .map_err(|_| garde::Error::new("Invalid contact reason"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_separators_and_country_code() {
        assert!(valid_phone("+1 (555) 000-1111", &()).is_ok());
        assert!(valid_phone("5550001111", &()).is_ok());
    }

    #[test]
    fn phone_rejects_short_or_garbled_input() {
        assert!(valid_phone("555-0011", &()).is_err());
        assert!(valid_phone("call me maybe", &()).is_err());
    }

    #[test]
    fn optional_phone_passes_when_empty() {
        assert!(optional_phone("", &()).is_ok());
        assert!(optional_phone("   ", &()).is_ok());
        assert!(optional_phone("123", &()).is_err());
    }

    #[test]
    fn name_parts_are_capped_at_fifty_characters() {
        assert!(first_name_required("Dana", &()).is_ok());
        assert!(first_name_required(&"x".repeat(51), &()).is_err());
        assert!(last_name_required(&"x".repeat(51), &()).is_err());
        assert!(first_name_required("   ", &()).is_err());
    }

    #[test]
    fn date_accepts_today() {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(future_date(&today, &()).is_ok());
    }

    #[test]
    fn date_rejects_past_and_malformed_values() {
        assert!(future_date("2000-01-01", &()).is_err());
        assert!(future_date("next friday", &()).is_err());
    }

    #[test]
    fn time_requires_hh_mm() {
        assert!(valid_time("19:00", &()).is_ok());
        assert!(valid_time("7pm", &()).is_err());
        assert!(valid_time("25:00", &()).is_err());
    }

    #[test]
    fn email_requires_dotted_domain() {
        assert!(valid_email("guest@example.com", &()).is_ok());
        assert!(valid_email("guest@example", &()).is_err());
        assert!(valid_email("not-an-email", &()).is_err());
    }

    #[test]
    fn contact_reason_must_be_known() {
        assert!(valid_contact_reason("complaint", &()).is_ok());
        assert!(valid_contact_reason("telepathy", &()).is_err());
    }
}
