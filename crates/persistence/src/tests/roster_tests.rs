// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_fixture, new_student};
use crate::{NewStudentData, PersistenceError};

#[test]
fn test_get_student_round_trip() {
    let mut fixture = create_fixture();

    let student = fixture
        .persistence
        .get_student(fixture.cs_student)
        .unwrap()
        .unwrap();

    assert_eq!(student.name, "Asha Rao");
    assert_eq!(student.roll_number, "CS-001");
    assert_eq!(student.department_id, Some(fixture.cs_department));
    assert_eq!(student.batch_id, Some(fixture.cs_batch));
    assert!(student.is_active);
}

#[test]
fn test_unknown_student_is_none() {
    let mut fixture = create_fixture();
    assert!(fixture.persistence.get_student(9_999).unwrap().is_none());
}

#[test]
fn test_inactive_students_are_not_in_cohorts() {
    let mut fixture = create_fixture();
    let mut graduated: NewStudentData =
        new_student("Old Timer", "CS-000", fixture.cs_department, fixture.cs_batch);
    graduated.is_active = false;
    fixture.persistence.create_student(&graduated).unwrap();

    let batch = fixture
        .persistence
        .list_active_students_in_batch(fixture.cs_batch)
        .unwrap();
    let department = fixture
        .persistence
        .list_active_students_in_department(fixture.cs_department)
        .unwrap();

    let rolls: Vec<&str> = batch.iter().map(|s| s.roll_number.as_str()).collect();
    assert_eq!(rolls, vec!["CS-001", "CS-002"]);
    assert_eq!(department.len(), 2);
}

#[test]
fn test_get_batch_reports_department() {
    let mut fixture = create_fixture();

    let batch = fixture.persistence.get_batch(fixture.me_batch).unwrap().unwrap();
    assert_eq!(batch.department_id, fixture.me_department);
    assert_eq!(batch.batch_name, "ME 2024");
    assert!(fixture.persistence.get_batch(9_999).unwrap().is_none());
}

#[test]
fn test_get_user_reports_role_and_department() {
    let mut fixture = create_fixture();

    let hod = fixture.persistence.get_user(fixture.hod_id).unwrap().unwrap();
    assert_eq!(hod.role, "DEPARTMENT_HEAD");
    assert_eq!(hod.department_id, Some(fixture.cs_department));

    let admin = fixture.persistence.get_user(fixture.admin_id).unwrap().unwrap();
    assert_eq!(admin.department_id, None);
}

#[test]
fn test_faculty_batches_are_distinct() {
    let mut fixture = create_fixture();
    fixture
        .persistence
        .assign_subject("ME102", "Fluid Mechanics", fixture.me_batch, fixture.faculty_id)
        .unwrap();
    fixture
        .persistence
        .assign_subject("CS101", "Discrete Maths", fixture.cs_batch, fixture.faculty_id)
        .unwrap();

    let batches = fixture
        .persistence
        .list_batch_ids_for_faculty(fixture.faculty_id)
        .unwrap();

    let mut expected = vec![fixture.cs_batch, fixture.me_batch];
    expected.sort_unstable();
    assert_eq!(batches, expected);
}

#[test]
fn test_unknown_role_is_rejected_by_schema() {
    let mut fixture = create_fixture();

    let result = fixture
        .persistence
        .create_user("intruder", "Intruder", "SUPERUSER", None);
    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}
