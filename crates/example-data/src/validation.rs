//! Registration field validation mirroring backend constraints.
//!
//! These rules match the backend's `ResidentProfile` validation in
//! `backend/src/domain/account/profile.rs`. Keeping them in sync ensures
//! generated residents always pass registration when consumed by the backend.
//!
//! # Validation Rules
//!
//! - Name: at least 2 characters once trimmed
//! - Email: `local@domain.tld` with no whitespace
//! - Phone: at least 10 characters
//! - Password: at least 6 characters

/// Minimum allowed length for a resident name.
pub const NAME_MIN: usize = 2;

/// Minimum allowed length for a phone number.
pub const PHONE_MIN: usize = 10;

/// Minimum allowed length for a resident password.
pub const PASSWORD_MIN: usize = 6;

/// Validates a resident name against backend constraints.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_resident_name;
///
/// assert!(is_valid_resident_name("John Doe"));
/// assert!(!is_valid_resident_name("J"));
/// assert!(!is_valid_resident_name("   "));
/// ```
#[must_use]
pub fn is_valid_resident_name(name: &str) -> bool {
    name.trim().chars().count() >= NAME_MIN
}

/// Validates the shape of an email address.
///
/// The check is structural only: exactly one `@`, a non-empty local part, and
/// a domain containing an inner dot.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_email;
///
/// assert!(is_valid_email("john@example.com"));
/// assert!(!is_valid_email("john@example"));
/// assert!(!is_valid_email("john doe@example.com"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .split_once('.')
        .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

/// Validates a phone number length.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().count() >= PHONE_MIN
}

/// Validates a password length.
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN
}

/// Lowercases a name and keeps only ASCII letters, for use in email locals.
#[must_use]
pub(crate) fn email_local_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    //! Covers registration field validation behaviour.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Jo", true)]
    #[case("John Doe", true)]
    #[case("J", false)]
    #[case("", false)]
    #[case("  J  ", false)]
    fn resident_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_resident_name(name), expected);
    }

    #[rstest]
    #[case("john@example.com", true)]
    #[case("a.b@mail.co.in", true)]
    #[case("john@example", false)]
    #[case("@example.com", false)]
    #[case("john@.com", false)]
    #[case("john@example.", false)]
    #[case("john@@example.com", false)]
    #[case("john doe@example.com", false)]
    #[case("", false)]
    fn email_shapes(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(email), expected);
    }

    #[rstest]
    #[case("1234567890", true)]
    #[case("123-456-7890", true)]
    #[case("123456789", false)]
    fn phone_lengths(#[case] phone: &str, #[case] expected: bool) {
        assert_eq!(is_valid_phone(phone), expected);
    }

    #[test]
    fn password_length_boundary() {
        assert!(is_valid_password(&"x".repeat(PASSWORD_MIN)));
        assert!(!is_valid_password(&"x".repeat(PASSWORD_MIN - 1)));
    }

    #[test]
    fn email_local_part_strips_punctuation() {
        assert_eq!(email_local_part("O'Brien"), "obrien");
        assert_eq!(email_local_part("Mary-Ann"), "maryann");
    }
}
