//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests or
//! when the `test-support` feature is enabled.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Account, AccountId, AccountStatus, AdminProfile, Community, ContactDetails, OccupancyKind,
    Password, RegistrationRequest, ResidentProfile,
};

/// Clock whose current instant is set by the test.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// A clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    pub fn advance_millis(&self, millis: i64) {
        *self.lock_clock() += TimeDelta::milliseconds(millis);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Instant every test clock starts from.
pub fn test_epoch() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).single() {
        Some(instant) => instant,
        None => panic!("test epoch must be a valid timestamp"),
    }
}

/// Shared [`MutableClock`] starting at [`test_epoch`].
pub fn test_clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(test_epoch()))
}

/// Registration form values for an owner.
pub fn owner_request(name: &str, apartment: &str, email: &str) -> RegistrationRequest {
    RegistrationRequest {
        name: name.to_owned(),
        apartment: apartment.to_owned(),
        email: email.to_owned(),
        phone: "9123456780".to_owned(),
        password: "resident1".to_owned(),
        occupancy: OccupancyKind::Owner,
        owner_name: String::new(),
        owner_contact: String::new(),
    }
}

/// Validated owner profile; panics if the values break registration rules.
pub fn owner_profile(name: &str, apartment: &str, email: &str) -> ResidentProfile {
    match ResidentProfile::try_from(owner_request(name, apartment, email)) {
        Ok(profile) => profile,
        Err(error) => panic!("test profile must be valid: {error}"),
    }
}

fn parse_id(raw: &str) -> AccountId {
    match AccountId::new(raw) {
        Ok(id) => id,
        Err(error) => panic!("test account id must be valid: {error}"),
    }
}

/// The seeded security administrator (`admin@example.com` / `admin123`).
pub fn admin_account() -> Account {
    let contact = ContactDetails {
        name: "Security Head".to_owned(),
        apartment: "Security Office".to_owned(),
        email: "admin@example.com".to_owned(),
        phone: "9876543210".to_owned(),
    };
    let profile = match AdminProfile::try_new(contact, Some(Password::new("admin123"))) {
        Ok(profile) => profile,
        Err(error) => panic!("admin profile must be valid: {error}"),
    };
    Account::admin(parse_id("admin-1"), profile, test_epoch())
}

/// The seeded, approved resident John Doe of `A-101`
/// (`john@example.com` / `password123`).
pub fn john_account() -> Account {
    let mut request = owner_request("John Doe", "A-101", "john@example.com");
    request.phone = "1234567890".to_owned();
    request.password = "password123".to_owned();
    let profile = match ResidentProfile::try_from(request) {
        Ok(profile) => profile,
        Err(error) => panic!("john's profile must be valid: {error}"),
    };
    Account::resident(parse_id("user-1"), profile, test_epoch()).with_status(AccountStatus::Approved)
}

/// A community holding the seeded administrator and John Doe, driven by
/// `clock`.
pub fn seeded_community(clock: Arc<MutableClock>) -> Community {
    let mut community = Community::with_plaintext_credentials(clock);
    community.seed_account(admin_account());
    community.seed_account(john_account());
    community
}
