//! Tests for the role-gated community flows.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::access_request::DeliveryType;
use crate::domain::registration::OccupancyKind;
use crate::test_support::{MutableClock, owner_request, seeded_community, test_clock};
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> Arc<MutableClock> {
    test_clock()
}

#[fixture]
fn community(clock: Arc<MutableClock>) -> Community {
    seeded_community(clock)
}

fn courier() -> DeliveryDetails {
    DeliveryDetails {
        platform: "Amazon".to_owned(),
        person_name: "Raj".to_owned(),
        delivery_type: DeliveryType::Courier,
    }
}

fn login_admin(community: &mut Community) {
    community
        .login("admin@example.com", "admin123")
        .expect("admin logs in");
}

fn login_john(community: &mut Community) {
    community
        .login("john@example.com", "password123")
        .expect("john logs in");
}

fn due(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[rstest]
fn registration_rejects_tenants_without_owner(mut community: Community) {
    let mut request = owner_request("Priya Shah", "B-204", "priya@example.com");
    request.occupancy = OccupancyKind::Tenant;

    let err = community
        .register_resident(request)
        .expect_err("tenant needs owner");

    assert_eq!(err, RegistrationError::MissingOwnerName);
    assert_eq!(community.registry().list_all().len(), 2);
}

#[rstest]
fn registration_approval_unlocks_login(mut community: Community) {
    let priya = community
        .register_resident(owner_request("Priya Shah", "B-204", "priya@example.com"))
        .expect("valid registration");
    let err = community
        .login("priya@example.com", "resident1")
        .expect_err("pending resident");
    assert_eq!(err.code(), ErrorCode::Forbidden);

    login_admin(&mut community);
    let pending = community.pending_registrations().expect("admin lists pending");
    assert_eq!(pending.len(), 1);
    community
        .review_registration(priya.id(), AccountStatus::Approved)
        .expect("admin approves");
    community.logout();

    let account = community
        .login("priya@example.com", "resident1")
        .expect("approved resident logs in");
    assert_eq!(account.status(), AccountStatus::Approved);
}

#[rstest]
fn empty_credentials_are_invalid_requests(mut community: Community) {
    let err = community.login("", "secret").expect_err("empty email");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
fn admin_login_rejects_residents(mut community: Community) {
    login_admin(&mut community);

    let err = community
        .admin_login("john@example.com", "password123")
        .expect_err("residents cannot use the admin login");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(
        community.current_account().map(|a| a.id().as_ref()),
        Some("admin-1")
    );
}

#[rstest]
fn admin_login_accepts_admins(mut community: Community) {
    let account = community
        .admin_login("admin@example.com", "admin123")
        .expect("admin logs in");
    assert_eq!(account.role(), Role::Admin);
}

#[rstest]
fn delivery_requests_need_a_resident_session(mut community: Community) {
    let err = community
        .request_delivery_access(courier())
        .expect_err("nobody logged in");
    assert_eq!(err.code(), ErrorCode::Unauthorized);

    login_admin(&mut community);
    let err = community
        .request_delivery_access(courier())
        .expect_err("admins use the on-behalf flow");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
fn admin_can_raise_request_for_an_apartment(mut community: Community) {
    login_admin(&mut community);
    let request = community
        .create_request_for_apartment("A-101", courier())
        .expect("resident exists");

    assert!(request.initiated_by_admin());
    assert_eq!(request.user_id().as_ref(), "user-1");

    let err = community
        .create_request_for_apartment("Z-999", courier())
        .expect_err("no resident");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
fn reviewing_a_decided_request_is_rejected(mut community: Community) {
    login_john(&mut community);
    let request = community
        .request_delivery_access(courier())
        .expect("resident request");
    community.logout();
    login_admin(&mut community);

    community
        .review_access_request(request.id(), RequestStatus::Rejected)
        .expect("first review applies");
    let err = community
        .review_access_request(request.id(), RequestStatus::Approved)
        .expect_err("decided requests are final");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&json!({"from": "rejected", "to": "approved"}))
    );
}

#[rstest]
fn reviewing_unknown_request_is_not_found(mut community: Community) {
    login_admin(&mut community);
    let err = community
        .review_access_request(&AccessRequestId::from_millis(7, 0), RequestStatus::Approved)
        .expect_err("unknown request");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
fn residents_only_comment_on_their_own_requests(mut community: Community) {
    let priya = community
        .register_resident(owner_request("Priya Shah", "B-204", "priya@example.com"))
        .expect("valid registration");
    login_admin(&mut community);
    community
        .review_registration(priya.id(), AccountStatus::Approved)
        .expect("admin approves");
    let johns = community
        .create_request_for_apartment("A-101", courier())
        .expect("resident exists");
    community
        .comment_on_request(johns.id(), "courier at gate 2")
        .expect("admins may comment anywhere");
    community.logout();

    community
        .login("priya@example.com", "resident1")
        .expect("priya logs in");
    let err = community
        .comment_on_request(johns.id(), "not mine")
        .expect_err("foreign request");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(community.requests().list_comments(johns.id()).len(), 1);
}

#[rstest]
fn admin_lists_are_admin_only(mut community: Community) {
    login_john(&mut community);
    assert_eq!(
        community
            .filtered_requests(StatusFilter::All, "")
            .expect_err("resident")
            .code(),
        ErrorCode::Forbidden
    );
    assert_eq!(
        community
            .pending_registrations()
            .expect_err("resident")
            .code(),
        ErrorCode::Forbidden
    );
}

#[rstest]
#[case(AccountStatus::Rejected)]
#[case(AccountStatus::Approved)]
fn administrators_are_not_reviewed_as_registrations(
    mut community: Community,
    #[case] status: AccountStatus,
) {
    login_admin(&mut community);
    let admin_id = AccountId::new("admin-1").expect("valid id");

    let err = community
        .review_registration(&admin_id, status)
        .expect_err("admins are not reviewable");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    community
        .pending_registrations()
        .expect("admin keeps access");
    community.logout();
    community
        .admin_login("admin@example.com", "admin123")
        .expect("admin can still log in");
}

#[rstest]
fn registrations_cannot_be_sent_back_to_pending(mut community: Community) {
    login_admin(&mut community);
    let john_id = AccountId::new("user-1").expect("valid id");

    let err = community
        .review_registration(&john_id, AccountStatus::Pending)
        .expect_err("pending is not a review outcome");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let john = community.registry().find(&john_id).expect("john exists");
    assert_eq!(john.status(), AccountStatus::Approved);
}

#[rstest]
fn reviewing_unknown_account_is_not_found(mut community: Community) {
    login_admin(&mut community);
    let ghost = AccountId::new("user-404").expect("valid id");

    let err = community
        .review_registration(&ghost, AccountStatus::Approved)
        .expect_err("unknown account");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
fn invitations_collect_rsvps(mut community: Community) {
    login_john(&mut community);
    let invitation = community
        .host_invitation(InvitationDraft {
            title: "Diwali Get-together".to_owned(),
            schedule: "Sunday, 7 PM".to_owned(),
            message: "Sweets and lamps on the terrace.".to_owned(),
        })
        .expect("resident hosts");
    assert_eq!(invitation.host_label(), "John Doe (A-101)");

    let updated = community
        .respond_to_invitation(invitation.id(), Rsvp::Accepted)
        .expect("known invitation");
    assert_eq!(updated.accepted_count(), 1);
    assert_eq!(community.notices().invitations().len(), 1);
}

#[rstest]
fn broadcasts_are_signed_by_the_admin(mut community: Community) {
    login_admin(&mut community);
    let broadcast = community
        .post_broadcast("Water Supply Interruption", "Tank cleaning on Sunday.")
        .expect("admin posts");
    assert_eq!(broadcast.posted_by, "Security Head");
}

#[rstest]
fn residents_pay_their_own_charges(mut community: Community) {
    login_admin(&mut community);
    let johns = community
        .raise_maintenance_charge("A-101", "Quarterly maintenance", 450_000, due(2026, 2, 1))
        .expect("admin raises charge");
    let other = community
        .raise_maintenance_charge("B-204", "Quarterly maintenance", 450_000, due(2026, 2, 1))
        .expect("admin raises charge");
    community.logout();

    login_john(&mut community);
    assert_eq!(community.my_pending_charges().expect("resident").len(), 1);
    let err = community.pay_charge(other.id).expect_err("not john's");
    assert_eq!(err.code(), ErrorCode::Forbidden);

    community.pay_charge(johns.id).expect("john pays");
    assert!(community.my_pending_charges().expect("resident").is_empty());
    assert_eq!(community.my_payment_history().expect("resident").len(), 1);
}

#[rstest]
fn zero_charges_are_rejected(mut community: Community) {
    login_admin(&mut community);
    let err = community
        .raise_maintenance_charge("A-101", "Nothing", 0, due(2026, 2, 1))
        .expect_err("zero amount");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}
