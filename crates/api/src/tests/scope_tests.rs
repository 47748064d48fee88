// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fee_ledger_domain::{FeeScope, FeeStatus};
use rust_decimal_macros::dec;

use super::helpers::{create_fixture, create_request, mark_request, test_now, test_today};
use crate::{
    ApiError, AuthenticatedActor, ListFeesRequest, Role, create_fee, delete_fee, get_fee,
    list_fees, mark_fee_paid, scope_for,
};

#[test]
fn test_scope_per_role() {
    let mut fixture = create_fixture();

    assert_eq!(
        scope_for(&mut fixture.persistence, &fixture.admin).unwrap(),
        FeeScope::Unrestricted
    );
    assert_eq!(
        scope_for(&mut fixture.persistence, &fixture.cs_hod).unwrap(),
        FeeScope::Department(fixture.cs_department)
    );
    assert_eq!(
        scope_for(&mut fixture.persistence, &fixture.me_faculty).unwrap(),
        FeeScope::Batches(vec![fixture.me_batch])
    );
}

#[test]
fn test_head_without_department_is_forbidden() {
    let mut fixture = create_fixture();
    let orphan = AuthenticatedActor::new(77, Role::DepartmentHead, None);

    let result = list_fees(
        &mut fixture.persistence,
        &orphan,
        &ListFeesRequest::default(),
        test_today(),
    );
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_head_lists_only_own_department() {
    let mut fixture = create_fixture();
    fixture.admin_fee(fixture.cs_student, dec!(1000));
    fixture.admin_fee(fixture.cs_student_2, dec!(1000));
    fixture.admin_fee(fixture.me_student, dec!(1000));

    let response = list_fees(
        &mut fixture.persistence,
        &fixture.cs_hod,
        &ListFeesRequest::default(),
        test_today(),
    )
    .unwrap();

    assert_eq!(response.pagination.total_count, 2);
    assert!(
        response
            .fees
            .iter()
            .all(|fee| fee.student.department_id == Some(fixture.cs_department))
    );
}

#[test]
fn test_faculty_lists_only_taught_batches() {
    let mut fixture = create_fixture();
    fixture.admin_fee(fixture.cs_student, dec!(1000));
    let me_fee = fixture.admin_fee(fixture.me_student, dec!(1000));

    let response = list_fees(
        &mut fixture.persistence,
        &fixture.me_faculty,
        &ListFeesRequest::default(),
        test_today(),
    )
    .unwrap();

    let ids: Vec<i64> = response.fees.iter().map(|fee| fee.fee_id).collect();
    assert_eq!(ids, vec![me_fee.fee_id]);
}

#[test]
fn test_out_of_scope_read_is_not_found() {
    let mut fixture = create_fixture();
    let me_fee = fixture.admin_fee(fixture.me_student, dec!(1000));

    let result = get_fee(
        &mut fixture.persistence,
        &fixture.cs_hod,
        me_fee.fee_id,
        test_today(),
    );
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Fee"
    ));
}

#[test]
fn test_head_cannot_create_for_other_department() {
    let mut fixture = create_fixture();

    let result = create_fee(
        &mut fixture.persistence,
        &fixture.cs_hod,
        &create_request(fixture.me_student, dec!(1000)),
        test_now(),
    );
    assert!(matches!(result, Err(ApiError::OutOfScope { .. })));

    let listed = list_fees(
        &mut fixture.persistence,
        &fixture.admin,
        &ListFeesRequest::default(),
        test_today(),
    )
    .unwrap();
    assert_eq!(listed.pagination.total_count, 0);
}

#[test]
fn test_head_cannot_mark_or_delete_other_department() {
    let mut fixture = create_fixture();
    let me_fee = fixture.admin_fee(fixture.me_student, dec!(1000));

    let mark = mark_fee_paid(
        &mut fixture.persistence,
        &fixture.cs_hod,
        me_fee.fee_id,
        &mark_request("PAID", None, Some("CASH")),
        test_now(),
    );
    let delete = delete_fee(&mut fixture.persistence, &fixture.cs_hod, me_fee.fee_id);

    assert!(matches!(mark, Err(ApiError::OutOfScope { .. })));
    assert!(matches!(delete, Err(ApiError::OutOfScope { .. })));

    let unchanged = get_fee(
        &mut fixture.persistence,
        &fixture.admin,
        me_fee.fee_id,
        test_today(),
    )
    .unwrap();
    assert_eq!(unchanged.status, FeeStatus::Pending);
}

#[test]
fn test_head_manages_own_department() {
    let mut fixture = create_fixture();

    let fee = create_fee(
        &mut fixture.persistence,
        &fixture.cs_hod,
        &create_request(fixture.cs_student, dec!(750)),
        test_now(),
    )
    .unwrap();
    assert_eq!(fee.created_by, fixture.cs_hod.user_id);

    let paid = mark_fee_paid(
        &mut fixture.persistence,
        &fixture.cs_hod,
        fee.fee_id,
        &mark_request("PAID", None, Some("UPI")),
        test_now(),
    )
    .unwrap();
    assert_eq!(paid.marked_by, Some(fixture.cs_hod.user_id));

    assert!(delete_fee(&mut fixture.persistence, &fixture.cs_hod, fee.fee_id).is_ok());
}
