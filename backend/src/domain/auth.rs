//! Authentication primitives such as login credentials.
//!
//! Keep form parsing outside the stores by exposing constructors that
//! validate string inputs before a caller talks to the registry.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when login form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing.
    EmptyEmail,
    /// Password was missing.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the session.
///
/// ## Invariants
/// - Both values are non-empty.
/// - Neither value is trimmed; the registry compares them exactly as typed.
///
/// # Examples
/// ```
/// use secudeliv::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("john@example.com", "password123").unwrap();
/// assert_eq!(creds.email(), "john@example.com");
/// assert_eq!(creds.password(), "password123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
