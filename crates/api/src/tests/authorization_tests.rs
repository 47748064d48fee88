// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal_macros::dec;

use super::helpers::{bulk_request, create_fixture, create_request, mark_request, test_now};
use crate::{
    ApiError, AuthError, AuthenticatedActor, AuthorizationService, Capability, IdentityService,
    Role, bulk_create_fees, compute_fee_capabilities, create_fee, delete_fee, mark_fee_paid,
};

#[test]
fn test_identity_resolves_role_and_department() {
    let fixture = create_fixture();

    assert_eq!(fixture.admin.role, Role::Administrator);
    assert_eq!(fixture.admin.department_id, None);
    assert_eq!(fixture.cs_hod.role, Role::DepartmentHead);
    assert_eq!(fixture.cs_hod.department_id, Some(fixture.cs_department));
    assert_eq!(fixture.me_faculty.role, Role::Faculty);
}

#[test]
fn test_unknown_user_fails_authentication() {
    let mut fixture = create_fixture();

    let result = IdentityService::resolve_actor(&mut fixture.persistence, 999);
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_role_round_trips_through_storage_form() {
    for role in [Role::Administrator, Role::DepartmentHead, Role::Faculty] {
        assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
    }
    assert!("administrator".parse::<Role>().is_err());
}

#[test]
fn test_family_guard_rejects_other_roles() {
    let fixture = create_fixture();

    assert!(AuthorizationService::authorize_family(&fixture.admin, Role::Administrator).is_ok());
    assert!(AuthorizationService::authorize_family(&fixture.cs_hod, Role::DepartmentHead).is_ok());

    let err = AuthorizationService::authorize_family(&fixture.me_faculty, Role::Administrator)
        .unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized { .. }));
    assert!(matches!(
        ApiError::from(err),
        ApiError::Forbidden { .. }
    ));
}

#[test]
fn test_faculty_cannot_write_anything() {
    let mut fixture = create_fixture();
    let fee = fixture.admin_fee(fixture.me_student, dec!(1000));

    let create = create_fee(
        &mut fixture.persistence,
        &fixture.me_faculty,
        &create_request(fixture.me_student, dec!(100)),
        test_now(),
    );
    let bulk = bulk_create_fees(
        &mut fixture.persistence,
        &fixture.me_faculty,
        &bulk_request(None, Some(fixture.me_batch)),
        test_now(),
    );
    let mark = mark_fee_paid(
        &mut fixture.persistence,
        &fixture.me_faculty,
        fee.fee_id,
        &mark_request("PAID", None, Some("CASH")),
        test_now(),
    );
    let delete = delete_fee(&mut fixture.persistence, &fixture.me_faculty, fee.fee_id);

    assert!(matches!(create, Err(ApiError::Forbidden { .. })));
    assert!(matches!(bulk, Err(ApiError::Forbidden { .. })));
    assert!(matches!(mark, Err(ApiError::Forbidden { .. })));
    assert!(matches!(delete, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_capabilities_follow_role() {
    let fixture = create_fixture();

    let admin = compute_fee_capabilities(&fixture.admin);
    assert_eq!(admin.can_create, Capability::Allowed);
    assert_eq!(admin.can_delete, Capability::Allowed);

    let hod = compute_fee_capabilities(&fixture.cs_hod);
    assert_eq!(hod.can_bulk_create, Capability::Allowed);
    assert_eq!(hod.can_mark_paid, Capability::Allowed);

    let faculty = compute_fee_capabilities(&fixture.me_faculty);
    assert!(!faculty.can_create.is_allowed());
    assert!(!faculty.can_bulk_create.is_allowed());
    assert!(!faculty.can_mark_paid.is_allowed());
    assert!(!faculty.can_delete.is_allowed());
}

#[test]
fn test_head_without_department_has_no_capabilities() {
    let orphan = AuthenticatedActor::new(77, Role::DepartmentHead, None);
    let caps = compute_fee_capabilities(&orphan);
    assert_eq!(caps.can_create, Capability::Denied);
    assert_eq!(caps.can_delete, Capability::Denied);
}
