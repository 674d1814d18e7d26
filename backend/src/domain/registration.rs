//! Registration payloads and their validation.
//!
//! Inbound form values arrive as a [`RegistrationRequest`] of raw strings.
//! [`ResidentProfile::try_from`] applies the registration rules once so the
//! rest of the domain only ever sees validated profiles.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::domain::account::{Occupancy, Password};

/// Minimum length of a resident name once trimmed.
pub const NAME_MIN_CHARS: usize = 2;
/// Minimum length of a phone number.
pub const PHONE_MIN_CHARS: usize = 10;
/// Minimum length of a password.
pub const PASSWORD_MIN_CHARS: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether the resident owns or rents, as chosen on the registration form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OccupancyKind {
    /// The resident owns the apartment.
    #[default]
    Owner,
    /// The resident rents; owner details become mandatory.
    Tenant,
}

/// Raw registration form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Full name, letters and spaces only.
    pub name: String,
    /// Apartment number, e.g. `A-101`.
    pub apartment: String,
    /// Login email.
    pub email: String,
    /// Ten-digit phone number.
    pub phone: String,
    /// At least six characters.
    pub password: String,
    /// Owner or tenant.
    pub occupancy: OccupancyKind,
    /// Apartment owner's name; tenants only.
    pub owner_name: String,
    /// Apartment owner's phone or email; tenants only.
    pub owner_contact: String,
}

/// Reasons a registration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("apartment number is required")]
    MissingApartment,
    #[error("please enter a valid email address")]
    InvalidEmail,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("please enter a valid phone number")]
    PhoneTooShort { min: usize },
    #[error("owner name is required for tenants")]
    MissingOwnerName,
    #[error("owner contact is required for tenants")]
    MissingOwnerContact,
}

impl RegistrationError {
    /// Stable identifier of the failing rule.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NameTooShort { .. } => "name_too_short",
            Self::MissingApartment => "missing_apartment",
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::PhoneTooShort { .. } => "phone_too_short",
            Self::MissingOwnerName => "missing_owner_name",
            Self::MissingOwnerContact => "missing_owner_contact",
        }
    }

    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameTooShort { .. } => "name",
            Self::MissingApartment => "apartment",
            Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } => "password",
            Self::PhoneTooShort { .. } => "phone",
            Self::MissingOwnerName => "ownerName",
            Self::MissingOwnerContact => "ownerContact",
        }
    }
}

/// Contact fields shared by residents and administrators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    /// Display name.
    pub name: String,
    /// Apartment, or the office for administrators.
    pub apartment: String,
    /// Login email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
}

/// A validated resident registration.
///
/// ## Invariants
/// - Every field passed the registration rules.
/// - Tenants carry a non-empty owner name and owner contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentProfile {
    contact: ContactDetails,
    password: Password,
    occupancy: Occupancy,
}

impl ResidentProfile {
    /// Contact fields of the profile.
    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    /// Occupancy chosen at registration.
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    pub(crate) fn into_parts(self) -> (ContactDetails, Password, Occupancy) {
        (self.contact, self.password, self.occupancy)
    }
}

impl TryFrom<RegistrationRequest> for ResidentProfile {
    type Error = RegistrationError;

    fn try_from(request: RegistrationRequest) -> Result<Self, Self::Error> {
        let RegistrationRequest {
            name,
            apartment,
            email,
            phone,
            password,
            occupancy,
            owner_name,
            owner_contact,
        } = request;

        let name = name.trim();
        if name.chars().count() < NAME_MIN_CHARS {
            return Err(RegistrationError::NameTooShort {
                min: NAME_MIN_CHARS,
            });
        }
        let apartment = apartment.trim();
        if apartment.is_empty() {
            return Err(RegistrationError::MissingApartment);
        }
        if !email_regex().is_match(&email) {
            return Err(RegistrationError::InvalidEmail);
        }
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(RegistrationError::PasswordTooShort {
                min: PASSWORD_MIN_CHARS,
            });
        }
        if phone.chars().count() < PHONE_MIN_CHARS {
            return Err(RegistrationError::PhoneTooShort {
                min: PHONE_MIN_CHARS,
            });
        }

        let occupancy = match occupancy {
            OccupancyKind::Owner => Occupancy::Owner,
            OccupancyKind::Tenant => {
                let owner_name = owner_name.trim();
                if owner_name.is_empty() {
                    return Err(RegistrationError::MissingOwnerName);
                }
                let owner_contact = owner_contact.trim();
                if owner_contact.is_empty() {
                    return Err(RegistrationError::MissingOwnerContact);
                }
                Occupancy::Tenant {
                    owner_name: owner_name.to_owned(),
                    owner_contact: owner_contact.to_owned(),
                }
            }
        };

        Ok(Self {
            contact: ContactDetails {
                name: name.to_owned(),
                apartment: apartment.to_owned(),
                email,
                phone,
            },
            password: Password::new(password),
            occupancy,
        })
    }
}

/// Profile of a seeded administrator.
///
/// Administrators are never self-registered, so only the name and email are
/// checked. The apartment field holds the post, e.g. `Security Office`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminProfile {
    contact: ContactDetails,
    password: Option<Password>,
}

impl AdminProfile {
    /// Build an administrator profile.
    pub fn try_new(
        contact: ContactDetails,
        password: Option<Password>,
    ) -> Result<Self, RegistrationError> {
        if contact.name.trim().chars().count() < NAME_MIN_CHARS {
            return Err(RegistrationError::NameTooShort {
                min: NAME_MIN_CHARS,
            });
        }
        if !email_regex().is_match(&contact.email) {
            return Err(RegistrationError::InvalidEmail);
        }
        Ok(Self { contact, password })
    }

    pub(crate) fn into_parts(self) -> (ContactDetails, Option<Password>) {
        (self.contact, self.password)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for registration rules.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn owner_request() -> RegistrationRequest {
        RegistrationRequest {
            name: "Priya Shah".to_owned(),
            apartment: "B-204".to_owned(),
            email: "priya@example.com".to_owned(),
            phone: "9123456780".to_owned(),
            password: "secret1".to_owned(),
            occupancy: OccupancyKind::Owner,
            owner_name: String::new(),
            owner_contact: String::new(),
        }
    }

    #[rstest]
    fn owner_request_is_accepted(owner_request: RegistrationRequest) {
        let profile = ResidentProfile::try_from(owner_request).expect("valid profile");
        assert_eq!(profile.contact().apartment, "B-204");
        assert_eq!(profile.occupancy(), &Occupancy::Owner);
    }

    #[rstest]
    fn owner_fields_are_ignored_for_owners(mut owner_request: RegistrationRequest) {
        owner_request.owner_name = "Someone Else".to_owned();
        let profile = ResidentProfile::try_from(owner_request).expect("valid profile");
        assert_eq!(profile.occupancy().owner_name(), None);
    }

    #[rstest]
    fn tenant_request_carries_owner_details(mut owner_request: RegistrationRequest) {
        owner_request.occupancy = OccupancyKind::Tenant;
        owner_request.owner_name = " Meera Rao ".to_owned();
        owner_request.owner_contact = "9000000001".to_owned();

        let profile = ResidentProfile::try_from(owner_request).expect("valid profile");
        assert_eq!(
            profile.occupancy(),
            &Occupancy::Tenant {
                owner_name: "Meera Rao".to_owned(),
                owner_contact: "9000000001".to_owned(),
            }
        );
    }

    #[rstest]
    #[case::short_name(|r: &mut RegistrationRequest| r.name = " J ".to_owned(), "name_too_short")]
    #[case::blank_apartment(|r: &mut RegistrationRequest| r.apartment = "  ".to_owned(), "missing_apartment")]
    #[case::missing_at(|r: &mut RegistrationRequest| r.email = "priya.example.com".to_owned(), "invalid_email")]
    #[case::missing_tld(|r: &mut RegistrationRequest| r.email = "priya@example".to_owned(), "invalid_email")]
    #[case::short_password(|r: &mut RegistrationRequest| r.password = "abc".to_owned(), "password_too_short")]
    #[case::short_phone(|r: &mut RegistrationRequest| r.phone = "12345".to_owned(), "phone_too_short")]
    #[case::tenant_without_owner(|r: &mut RegistrationRequest| r.occupancy = OccupancyKind::Tenant, "missing_owner_name")]
    #[case::tenant_without_contact(
        |r: &mut RegistrationRequest| {
            r.occupancy = OccupancyKind::Tenant;
            r.owner_name = "Meera Rao".to_owned();
        },
        "missing_owner_contact"
    )]
    fn invalid_requests_are_rejected(
        mut owner_request: RegistrationRequest,
        #[case] mutate: fn(&mut RegistrationRequest),
        #[case] expected_code: &str,
    ) {
        mutate(&mut owner_request);
        let error = ResidentProfile::try_from(owner_request).expect_err("invalid request");
        assert_eq!(error.code(), expected_code);
    }

    #[rstest]
    fn errors_name_their_field() {
        assert_eq!(RegistrationError::MissingOwnerContact.field(), "ownerContact");
        assert_eq!(
            RegistrationError::PasswordTooShort { min: 6 }.to_string(),
            "password must be at least 6 characters"
        );
    }

    #[rstest]
    fn admin_profile_requires_valid_email() {
        let contact = ContactDetails {
            name: "Security Head".to_owned(),
            apartment: "Security Office".to_owned(),
            email: "not-an-email".to_owned(),
            phone: "9876543210".to_owned(),
        };
        let error = AdminProfile::try_new(contact, None).expect_err("invalid email");
        assert_eq!(error, RegistrationError::InvalidEmail);
    }
}
