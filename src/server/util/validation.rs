//! Field validators shared by the parameter models.

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Normalizes a mobile number to `+<country><number>`.
///
/// Spaces and dashes are ignored. A bare ten-digit number is treated as Indian (`+91`).
/// Returns `None` when the value is not a plausible E.164 number.
pub fn normalize_mobile(value: &str) -> Option<String> {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    let (has_plus, digits) = match compact.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, compact.as_str()),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    match (has_plus, digits.len()) {
        (false, 10) => Some(format!("+91{}", digits)),
        (true, 11..=15) => Some(format!("+{}", digits)),
        _ => None,
    }
}

/// Lowercases and trims an email, returning `None` when it is obviously malformed.
pub fn normalize_email(value: &str) -> Option<String> {
    let email = value.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;

    let valid = !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
        && email.matches('@').count() == 1;

    valid.then_some(email)
}

/// Six-digit Indian postal code.
pub fn is_valid_pincode(value: &str) -> bool {
    value.len() == 6 && value.chars().all(|c| c.is_ascii_digit()) && !value.starts_with('0')
}

/// IFSC: four letters, a literal `0`, then six letters or digits.
pub fn is_valid_ifsc(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 11
        && bytes[..4].iter().all(u8::is_ascii_uppercase)
        && bytes[4] == b'0'
        && bytes[5..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Absolute http(s) URL.
pub fn is_valid_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

pub fn is_valid_password(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LEN
}

/// Trims a string, mapping blank values to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
