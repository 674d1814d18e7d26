//! Tests for the user registry.

use super::*;
use crate::domain::ports::{
    CredentialVerificationError, MockCredentialVerifier, PlaintextCredentialVerifier,
};
use crate::test_support::{
    MutableClock, admin_account, john_account, owner_profile, test_clock, test_epoch,
};
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> Arc<MutableClock> {
    test_clock()
}

#[fixture]
fn registry(clock: Arc<MutableClock>) -> UserRegistry {
    let mut registry = UserRegistry::new(clock, Arc::new(PlaintextCredentialVerifier));
    registry.seed(admin_account());
    registry.seed(john_account());
    registry
}

#[rstest]
fn register_appends_pending_resident(clock: Arc<MutableClock>) {
    let mut registry = UserRegistry::new(clock.clone(), Arc::new(PlaintextCredentialVerifier));
    registry.seed(john_account());
    clock.advance_seconds(90);
    let account = registry.register(owner_profile("Priya Shah", "B-204", "priya@example.com"));

    assert_eq!(account.role(), Role::Resident);
    assert_eq!(account.status(), AccountStatus::Pending);
    assert_eq!(account.registered_at(), test_epoch() + chrono::TimeDelta::seconds(90));
    assert_eq!(registry.list_all().last(), Some(&account));
}

#[rstest]
fn register_assigns_fresh_ids(mut registry: UserRegistry) {
    let first = registry.register(owner_profile("Priya Shah", "B-204", "priya@example.com"));
    let second = registry.register(owner_profile("Karan Das", "B-205", "karan@example.com"));
    assert_ne!(first.id(), second.id());
}

#[rstest]
#[case("john@example.com", "password123", Some("user-1"))]
#[case("admin@example.com", "admin123", Some("admin-1"))]
#[case("john@example.com", "wrong", None)]
#[case("JOHN@example.com", "password123", None)]
#[case(" john@example.com", "password123", None)]
#[case("nobody@example.com", "password123", None)]
fn find_by_credentials_matches_exactly(
    registry: UserRegistry,
    #[case] email: &str,
    #[case] password: &str,
    #[case] expected: Option<&str>,
) {
    let found = registry.find_by_credentials(email, password);
    assert_eq!(found.map(|account| account.id().as_ref()), expected);
}

#[rstest]
fn find_by_credentials_ignores_status(mut registry: UserRegistry) {
    let account = registry.register(owner_profile("Priya Shah", "B-204", "priya@example.com"));
    let found = registry
        .find_by_credentials("priya@example.com", "resident1")
        .expect("pending accounts are still found");
    assert_eq!(found.id(), account.id());
}

#[rstest]
fn duplicate_emails_resolve_to_first_registration(mut registry: UserRegistry) {
    let first = registry.register(owner_profile("Priya Shah", "B-204", "priya@example.com"));
    registry.register(owner_profile("Priya Again", "B-999", "priya@example.com"));

    let found = registry
        .find_by_credentials("priya@example.com", "resident1")
        .expect("match");
    assert_eq!(found.id(), first.id());
}

#[rstest]
fn verifier_errors_count_as_mismatch(clock: Arc<MutableClock>) {
    let mut verifier = MockCredentialVerifier::new();
    verifier
        .expect_verify()
        .times(1)
        .returning(|_, _| Err(CredentialVerificationError::malformed("no prefix")));

    let mut registry = UserRegistry::new(clock, Arc::new(verifier));
    registry.seed(john_account());

    assert!(
        registry
            .find_by_credentials("john@example.com", "password123")
            .is_none()
    );
}

#[rstest]
fn verifier_is_only_consulted_for_matching_emails(clock: Arc<MutableClock>) {
    let mut verifier = MockCredentialVerifier::new();
    verifier
        .expect_verify()
        .withf(|stored, presented| {
            stored.expose() == "password123" && presented.to_string() == "password123"
        })
        .times(1)
        .returning(|_, _| Ok(true));

    let mut registry = UserRegistry::new(clock, Arc::new(verifier));
    registry.seed(admin_account());
    registry.seed(john_account());

    let found = registry.find_by_credentials("john@example.com", "password123");
    assert_eq!(found.map(Account::name), Some("John Doe"));
}

#[rstest]
fn update_status_replaces_only_the_target(mut registry: UserRegistry) {
    let pending = registry.register(owner_profile("Priya Shah", "B-204", "priya@example.com"));
    let other = registry.register(owner_profile("Karan Das", "B-205", "karan@example.com"));

    let updated = registry
        .update_status(pending.id(), AccountStatus::Approved)
        .expect("known account")
        .clone();

    assert_eq!(updated.status(), AccountStatus::Approved);
    assert_eq!(updated.name(), pending.name());
    assert_eq!(
        registry.find(other.id()).map(Account::status),
        Some(AccountStatus::Pending)
    );
}

#[rstest]
fn update_status_for_unknown_id_is_a_no_op(mut registry: UserRegistry) {
    let before = registry.list_all().to_vec();
    let unknown = AccountId::new("user-404").expect("valid id");

    assert!(
        registry
            .update_status(&unknown, AccountStatus::Approved)
            .is_none()
    );
    assert_eq!(registry.list_all(), before.as_slice());
}

#[rstest]
fn list_pending_excludes_admins_and_decided_residents(clock: Arc<MutableClock>) {
    let mut registry = UserRegistry::new(clock, Arc::new(PlaintextCredentialVerifier));
    registry.seed(admin_account().with_status(AccountStatus::Pending));
    registry.seed(john_account());
    let waiting = registry.register(owner_profile("Priya Shah", "B-204", "priya@example.com"));
    let rejected = registry.register(owner_profile("Karan Das", "B-205", "karan@example.com"));
    registry.update_status(rejected.id(), AccountStatus::Rejected);

    let pending: Vec<_> = registry.list_pending().into_iter().map(Account::id).collect();
    assert_eq!(pending, [waiting.id()]);
}

#[rstest]
fn find_resident_by_apartment_skips_admins(registry: UserRegistry) {
    assert_eq!(
        registry
            .find_resident_by_apartment("A-101")
            .map(|account| account.id().as_ref()),
        Some("user-1")
    );
    assert!(registry.find_resident_by_apartment("Security Office").is_none());
    assert!(registry.find_resident_by_apartment("a-101").is_none());
}
