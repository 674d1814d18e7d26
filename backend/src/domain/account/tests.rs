//! Tests for account types.

use super::*;
use crate::domain::registration::{OccupancyKind, RegistrationRequest};
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn registered_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn tenant_profile() -> ResidentProfile {
    ResidentProfile::try_from(RegistrationRequest {
        name: "Asha Nair".to_owned(),
        apartment: "C-302".to_owned(),
        email: "asha@example.com".to_owned(),
        phone: "9988776655".to_owned(),
        password: "letmein".to_owned(),
        occupancy: OccupancyKind::Tenant,
        owner_name: "Ravi Menon".to_owned(),
        owner_contact: "9000012345".to_owned(),
    })
    .expect("valid profile")
}

#[rstest]
#[case("")]
#[case(" user-1")]
#[case("user-1\n")]
fn account_id_rejects_invalid_values(#[case] raw: &str) {
    assert!(AccountId::new(raw).is_err());
}

#[rstest]
fn random_account_ids_differ() {
    assert_ne!(AccountId::random(), AccountId::random());
}

#[rstest]
fn account_id_deserialization_revalidates() {
    let result: Result<AccountId, _> = serde_json::from_value(json!(""));
    assert!(result.is_err());
}

#[rstest]
fn residents_start_pending(tenant_profile: ResidentProfile, registered_at: DateTime<Utc>) {
    let account = Account::resident(AccountId::random(), tenant_profile, registered_at);

    assert_eq!(account.role(), Role::Resident);
    assert_eq!(account.status(), AccountStatus::Pending);
    assert!(!account.is_approved());
    assert_eq!(account.registered_at(), registered_at);
    assert_eq!(
        account.occupancy().and_then(Occupancy::owner_name),
        Some("Ravi Menon")
    );
}

#[rstest]
fn with_status_keeps_identity(tenant_profile: ResidentProfile, registered_at: DateTime<Utc>) {
    let account = Account::resident(AccountId::random(), tenant_profile, registered_at);
    let id = account.id().clone();

    let approved = account.with_status(AccountStatus::Approved);
    assert_eq!(approved.id(), &id);
    assert!(approved.is_approved());
}

#[rstest]
fn serialization_hides_password(tenant_profile: ResidentProfile, registered_at: DateTime<Utc>) {
    let id = AccountId::new("user-9").expect("valid id");
    let account = Account::resident(id, tenant_profile, registered_at);

    let value = serde_json::to_value(&account).expect("serialize account");
    assert_eq!(value["id"], "user-9");
    assert_eq!(value["status"], "pending");
    assert_eq!(value["occupancy"]["type"], "tenant");
    assert_eq!(value["occupancy"]["ownerContact"], "9000012345");
    assert!(value.get("password").is_none());
}

#[rstest]
fn password_debug_is_redacted() {
    let password = Password::new("hunter22");
    assert_eq!(format!("{password:?}"), "Password(***)");
    assert_eq!(password.expose(), "hunter22");
}

#[rstest]
fn display_label_combines_name_and_apartment(
    tenant_profile: ResidentProfile,
    registered_at: DateTime<Utc>,
) {
    let account = Account::resident(AccountId::random(), tenant_profile, registered_at);
    assert_eq!(account.display_label(), "Asha Nair (C-302)");
}
