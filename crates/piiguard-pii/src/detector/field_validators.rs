//! Permissive shape heuristics, one per identifier type.
//!
//! These never fail: anything that does not fit the shape is simply `false`.

const PHONE_DIGITS: usize = 10;
const NATIONAL_ID_DIGITS: usize = 12;
const PASSPORT_LEN: usize = 8;
const IPV4_OCTETS: usize = 4;

/// Keep only the ASCII digits of `text`
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digit_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}

pub fn is_email(text: &str) -> bool {
    text.contains('@') && text.contains('.')
}

pub fn is_phone(text: &str) -> bool {
    digit_count(text) == PHONE_DIGITS
}

pub fn is_national_id(text: &str) -> bool {
    digit_count(text) == NATIONAL_ID_DIGITS
}

pub fn is_passport(text: &str) -> bool {
    let text = text.trim();
    if text.chars().count() != PASSPORT_LEN {
        return false;
    }

    let mut chars = text.chars();
    chars.next().is_some_and(char::is_alphabetic) && chars.all(|c| c.is_ascii_digit())
}

pub fn is_payment_handle(text: &str) -> bool {
    text.split('@').count() == 2
}

pub fn is_ipv4(text: &str) -> bool {
    let octets: Vec<&str> = text.split('.').collect();
    if octets.len() != IPV4_OCTETS {
        return false;
    }

    octets.iter().all(|octet| {
        octet
            .trim()
            .parse::<i64>()
            .is_ok_and(|value| (0..=255).contains(&value))
    })
}
