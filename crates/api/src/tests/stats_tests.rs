// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fee_ledger_domain::FeeType;
use rust_decimal_macros::dec;

use super::helpers::{create_fixture, create_request, mark_request, test_now, test_today};
use crate::{CreateFeeRequest, FeeStatsRequest, create_fee, fee_stats, mark_fee_paid};

#[test]
fn test_past_due_fee_counts_as_pending_and_overdue() {
    let mut fixture = create_fixture();
    let past_due = CreateFeeRequest {
        due_date: String::from("2024-01-01"),
        ..create_request(fixture.cs_student, dec!(1000))
    };
    create_fee(&mut fixture.persistence, &fixture.admin, &past_due, test_now()).unwrap();

    let stats = fee_stats(
        &mut fixture.persistence,
        &fixture.admin,
        &FeeStatsRequest::default(),
        test_today(),
    )
    .unwrap();

    assert_eq!(stats.overview.total_fees, 1);
    assert_eq!(stats.overview.pending_fees, 1);
    assert_eq!(stats.overview.overdue_fees, 1);
    assert_eq!(stats.overview.pending_amount, dec!(1000));
    assert_eq!(stats.overview.collection_rate, "0.0");
}

#[test]
fn test_empty_ledger_has_zero_rate() {
    let mut fixture = create_fixture();

    let stats = fee_stats(
        &mut fixture.persistence,
        &fixture.cs_hod,
        &FeeStatsRequest::default(),
        test_today(),
    )
    .unwrap();

    assert_eq!(stats.overview.total_fees, 0);
    assert_eq!(stats.overview.collection_rate, "0.0");
    assert!(stats.by_fee_type.is_empty());
}

#[test]
fn test_stats_are_scoped_and_broken_down_by_type() {
    let mut fixture = create_fixture();
    let tuition = fixture.admin_fee(fixture.cs_student, dec!(1000));
    let exam = CreateFeeRequest {
        fee_type: String::from("EXAM"),
        ..create_request(fixture.cs_student_2, dec!(200))
    };
    create_fee(&mut fixture.persistence, &fixture.admin, &exam, test_now()).unwrap();
    fixture.admin_fee(fixture.me_student, dec!(5000));
    mark_fee_paid(
        &mut fixture.persistence,
        &fixture.admin,
        tuition.fee_id,
        &mark_request("PARTIALLY_PAID", Some(dec!(500)), Some("CHEQUE")),
        test_now(),
    )
    .unwrap();

    let stats = fee_stats(
        &mut fixture.persistence,
        &fixture.cs_hod,
        &FeeStatsRequest::default(),
        test_today(),
    )
    .unwrap();

    assert_eq!(stats.overview.total_fees, 2);
    assert_eq!(stats.overview.total_amount, dec!(1200));
    assert_eq!(stats.overview.collected_amount, dec!(500));
    assert_eq!(stats.overview.pending_amount, dec!(700));
    assert_eq!(stats.overview.partially_paid_fees, 1);
    assert_eq!(stats.overview.collection_rate, "41.7");

    let types: Vec<FeeType> = stats.by_fee_type.iter().map(|s| s.fee_type).collect();
    assert_eq!(types, vec![FeeType::Tuition, FeeType::Exam]);
    assert_eq!(stats.by_fee_type[1].stats.total_amount, dec!(200));
}

#[test]
fn test_stats_filter_by_academic_year() {
    let mut fixture = create_fixture();
    fixture.admin_fee(fixture.cs_student, dec!(1000));
    let next_year = CreateFeeRequest {
        academic_year: String::from("2025-26"),
        ..create_request(fixture.cs_student, dec!(3000))
    };
    create_fee(&mut fixture.persistence, &fixture.admin, &next_year, test_now()).unwrap();

    let stats = fee_stats(
        &mut fixture.persistence,
        &fixture.admin,
        &FeeStatsRequest {
            academic_year: Some(String::from("2025-26")),
        },
        test_today(),
    )
    .unwrap();

    assert_eq!(stats.overview.total_fees, 1);
    assert_eq!(stats.overview.total_amount, dec!(3000));
}
