// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    ADMIN_ID, create_test_fee, create_test_fee_with, payment, test_now,
};
use crate::{DomainError, FeeRecord, FeeStatus, PaymentMode, apply_payment};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::macros::datetime;

#[test]
fn test_pending_to_partially_paid() {
    let fee = create_test_fee(dec!(1000));

    let next = apply_payment(&fee, &payment("PARTIALLY_PAID", Some(dec!(400)), None), test_now())
        .unwrap();

    assert_eq!(next.status, FeeStatus::PartiallyPaid);
    assert_eq!(next.amount_paid, dec!(400));
    assert_eq!(next.outstanding(), dec!(600));
    assert_eq!(next.paid_at, Some(test_now()));
    assert_eq!(next.marked_by, Some(ADMIN_ID));
    assert_eq!(next.updated_at, test_now());
}

#[test]
fn test_partial_then_paid_collects_full_amount() {
    let fee = create_test_fee(dec!(1000));
    let partial = apply_payment(&fee, &payment("PARTIALLY_PAID", Some(dec!(400)), None), test_now())
        .unwrap();

    let later = datetime!(2024-07-20 16:00:00 UTC);
    let paid = apply_payment(
        &partial,
        &payment("PAID", None, Some(PaymentMode::Cash)),
        later,
    )
    .unwrap();

    assert_eq!(paid.status, FeeStatus::Paid);
    assert_eq!(paid.amount_paid, dec!(1000));
    assert_eq!(paid.payment_mode, Some(PaymentMode::Cash));
    // The first payment timestamp is kept.
    assert_eq!(paid.paid_at, Some(test_now()));
    assert_eq!(paid.updated_at, later);
}

#[test]
fn test_pending_straight_to_paid() {
    let fee = create_test_fee(dec!(250.50));

    let paid = apply_payment(
        &fee,
        &payment("paid", Some(dec!(1)), Some(PaymentMode::Upi)),
        test_now(),
    )
    .unwrap();

    // Any supplied amount is ignored for PAID.
    assert_eq!(paid.amount_paid, dec!(250.50));
    assert_eq!(paid.status, FeeStatus::Paid);
}

#[test]
fn test_paid_requires_payment_mode() {
    let fee = create_test_fee(dec!(1000));

    let result = apply_payment(&fee, &payment("PAID", None, None), test_now());
    assert_eq!(result, Err(DomainError::MissingPaymentMode));
}

#[test]
fn test_partial_amount_equal_to_total_is_rejected() {
    let fee = create_test_fee(dec!(1000));

    let result = apply_payment(
        &fee,
        &payment("PARTIALLY_PAID", Some(dec!(1000)), None),
        test_now(),
    );
    assert!(matches!(result, Err(DomainError::InvalidAmount { .. })));
}

#[test]
fn test_partial_amount_above_total_is_rejected() {
    let fee = create_test_fee(dec!(1000));

    let result = apply_payment(
        &fee,
        &payment("PARTIALLY_PAID", Some(dec!(1200)), None),
        test_now(),
    );
    assert!(matches!(
        result,
        Err(DomainError::InvalidAmount { amount: Some(a), .. }) if a == dec!(1200)
    ));
}

#[test]
fn test_partial_amount_must_be_positive() {
    let fee = create_test_fee(dec!(1000));

    for amount in [Decimal::ZERO, dec!(-10)] {
        let result = apply_payment(
            &fee,
            &payment("PARTIALLY_PAID", Some(amount), None),
            test_now(),
        );
        assert!(matches!(result, Err(DomainError::InvalidAmount { .. })));
    }
}

#[test]
fn test_partial_without_amount_is_rejected() {
    let fee = create_test_fee(dec!(1000));

    let result = apply_payment(&fee, &payment("PARTIALLY_PAID", None, None), test_now());
    assert!(matches!(
        result,
        Err(DomainError::InvalidAmount { amount: None, .. })
    ));
}

#[test]
fn test_partial_can_be_revised() {
    let fee = create_test_fee_with(1, dec!(1000), FeeStatus::PartiallyPaid, dec!(400));

    let next = apply_payment(
        &fee,
        &payment("PARTIALLY_PAID", Some(dec!(700)), Some(PaymentMode::Online)),
        test_now(),
    )
    .unwrap();

    assert_eq!(next.amount_paid, dec!(700));
    assert_eq!(next.payment_mode, Some(PaymentMode::Online));
}

#[test]
fn test_partial_cannot_drop_below_amount_paid() {
    let fee = create_test_fee_with(1, dec!(1000), FeeStatus::PartiallyPaid, dec!(700));

    let result = apply_payment(&fee, &payment("PARTIALLY_PAID", Some(dec!(100)), None), test_now());
    assert!(matches!(
        result,
        Err(DomainError::InvalidAmount { amount: Some(a), .. }) if a == dec!(100)
    ));

    let same = apply_payment(&fee, &payment("PARTIALLY_PAID", Some(dec!(700)), None), test_now())
        .unwrap();
    assert_eq!(same.amount_paid, dec!(700));
}

#[test]
fn test_waive_keeps_amount_paid() {
    let fee = create_test_fee_with(1, dec!(1000), FeeStatus::PartiallyPaid, dec!(300));

    let mut update = payment("WAIVED", None, None);
    update.remarks = Some(String::from("Scholarship approved"));
    let waived = apply_payment(&fee, &update, test_now()).unwrap();

    assert_eq!(waived.status, FeeStatus::Waived);
    assert_eq!(waived.amount_paid, dec!(300));
    assert_eq!(waived.remarks.as_deref(), Some("Scholarship approved"));
}

#[test]
fn test_settled_fee_cannot_change() {
    for status in [FeeStatus::Paid, FeeStatus::Waived] {
        let fee: FeeRecord = create_test_fee_with(9, dec!(1000), status, dec!(1000));

        let result = apply_payment(
            &fee,
            &payment("PARTIALLY_PAID", Some(dec!(100)), None),
            test_now(),
        );
        assert_eq!(
            result,
            Err(DomainError::AlreadySettled { fee_id: 9, status })
        );
    }
}

#[test]
fn test_settled_check_precedes_target_validation() {
    let fee = create_test_fee_with(9, dec!(1000), FeeStatus::Paid, dec!(1000));

    let result = apply_payment(&fee, &payment("PENDING", None, None), test_now());
    assert!(matches!(result, Err(DomainError::AlreadySettled { .. })));
}

#[test]
fn test_pending_and_overdue_are_not_targets() {
    let fee = create_test_fee(dec!(1000));

    for requested in ["PENDING", "OVERDUE", "REFUNDED", ""] {
        let result = apply_payment(&fee, &payment(requested, None, None), test_now());
        assert_eq!(
            result,
            Err(DomainError::InvalidTransition {
                from: FeeStatus::Pending,
                requested: String::from(requested),
            })
        );
    }
}

#[test]
fn test_remarks_are_kept_when_not_supplied() {
    let mut fee = create_test_fee(dec!(1000));
    fee.remarks = Some(String::from("First instalment"));

    let next = apply_payment(&fee, &payment("PARTIALLY_PAID", Some(dec!(10)), None), test_now())
        .unwrap();
    assert_eq!(next.remarks.as_deref(), Some("First instalment"));
}

#[test]
fn test_rejected_update_leaves_input_untouched() {
    let fee = create_test_fee(dec!(1000));
    let before = fee.clone();

    let _ = apply_payment(
        &fee,
        &payment("PARTIALLY_PAID", Some(dec!(1200)), None),
        test_now(),
    );
    assert_eq!(fee, before);
}
