// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster seeding.
//!
//! The ledger reads departments, batches, students, users and teaching
//! assignments but never edits them. A deployment owns that data elsewhere;
//! for standalone runs and tests the server can seed it from a JSON roster
//! file. Entries reference each other by code, name and login rather than
//! by generated id.

use std::collections::HashMap;
use std::path::Path;

use fee_ledger_api::Role;
use fee_ledger_persistence::{NewStudentData, Persistence, PersistenceError};
use serde::Deserialize;
use tracing::{debug, info};

/// Errors raised while loading or seeding a roster.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Failed to read roster file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse roster: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Roster references unknown department '{0}'")]
    UnknownDepartment(String),
    #[error("Roster references unknown batch '{0}'")]
    UnknownBatch(String),
    #[error("Roster references unknown faculty login '{0}'")]
    UnknownFaculty(String),
    #[error("Roster user '{login}' has invalid role '{role}'")]
    InvalidRole { login: String, role: String },
    #[error("Failed to store roster: {0}")]
    Storage(#[from] PersistenceError),
}

/// A roster document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub departments: Vec<RosterDepartment>,
    #[serde(default)]
    pub batches: Vec<RosterBatch>,
    #[serde(default)]
    pub students: Vec<RosterStudent>,
    #[serde(default)]
    pub users: Vec<RosterUser>,
    #[serde(default)]
    pub assignments: Vec<RosterAssignment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterDepartment {
    pub code: String,
    pub name: String,
}

/// A batch. Batch names are unique within a roster.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterBatch {
    pub name: String,
    /// Department code.
    pub department: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterStudent {
    pub name: String,
    pub roll_number: String,
    /// Department code. May be absent for an incompletely enrolled student.
    pub department: Option<String>,
    /// Batch name.
    pub batch: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterUser {
    pub login: String,
    pub display_name: String,
    /// `ADMINISTRATOR`, `DEPARTMENT_HEAD` or `FACULTY`.
    pub role: String,
    /// Department code.
    pub department: Option<String>,
}

/// A subject taught by a faculty member to a batch.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterAssignment {
    pub subject_code: String,
    pub subject_name: String,
    /// Batch name.
    pub batch: String,
    /// Faculty login.
    pub faculty: String,
}

/// Identifiers assigned while seeding a roster.
#[derive(Debug, Clone, Default)]
pub struct SeededRoster {
    pub departments: HashMap<String, i64>,
    pub batches: HashMap<String, i64>,
    /// Student ids keyed by roll number.
    pub students: HashMap<String, i64>,
    /// User ids keyed by login.
    pub users: HashMap<String, i64>,
}

/// Parses a roster document.
///
/// # Errors
///
/// Returns an error if the document is not valid roster JSON.
pub fn parse_roster(json: &str) -> Result<Roster, RosterError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a roster file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let json: String = std::fs::read_to_string(path).map_err(|source| RosterError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_roster(&json)
}

/// Writes a roster into the store.
///
/// Entries are inserted in dependency order. Seeding stops at the first
/// bad reference; entries inserted before it remain.
///
/// # Errors
///
/// Returns an error if an entry references an unknown department, batch or
/// faculty login, names an invalid role, or cannot be stored.
pub fn seed_roster(
    persistence: &mut Persistence,
    roster: &Roster,
) -> Result<SeededRoster, RosterError> {
    let mut seeded = SeededRoster::default();

    for department in &roster.departments {
        let id = persistence.create_department(&department.code, &department.name)?;
        seeded.departments.insert(department.code.clone(), id);
    }

    for batch in &roster.batches {
        let department_id = seeded.department(&batch.department)?;
        let id = persistence.create_batch(department_id, &batch.name)?;
        seeded.batches.insert(batch.name.clone(), id);
    }

    for student in &roster.students {
        let data = NewStudentData {
            name: student.name.clone(),
            roll_number: student.roll_number.clone(),
            department_id: student
                .department
                .as_deref()
                .map(|code| seeded.department(code))
                .transpose()?,
            batch_id: student
                .batch
                .as_deref()
                .map(|name| seeded.batch(name))
                .transpose()?,
            is_active: student.is_active,
        };
        let id = persistence.create_student(&data)?;
        seeded.students.insert(student.roll_number.clone(), id);
    }

    for user in &roster.users {
        let role: Role = user.role.parse().map_err(|_| RosterError::InvalidRole {
            login: user.login.clone(),
            role: user.role.clone(),
        })?;
        let department_id = user
            .department
            .as_deref()
            .map(|code| seeded.department(code))
            .transpose()?;
        let id = persistence.create_user(
            &user.login,
            &user.display_name,
            role.as_str(),
            department_id,
        )?;
        debug!(login = %user.login, user_id = id, role = %role, "Seeded user");
        seeded.users.insert(user.login.clone(), id);
    }

    for assignment in &roster.assignments {
        let batch_id = seeded.batch(&assignment.batch)?;
        let faculty_id = *seeded
            .users
            .get(&assignment.faculty)
            .ok_or_else(|| RosterError::UnknownFaculty(assignment.faculty.clone()))?;
        persistence.assign_subject(
            &assignment.subject_code,
            &assignment.subject_name,
            batch_id,
            faculty_id,
        )?;
    }

    info!(
        departments = seeded.departments.len(),
        batches = seeded.batches.len(),
        students = seeded.students.len(),
        users = seeded.users.len(),
        assignments = roster.assignments.len(),
        "Seeded roster"
    );

    Ok(seeded)
}

impl SeededRoster {
    fn department(&self, code: &str) -> Result<i64, RosterError> {
        self.departments
            .get(code)
            .copied()
            .ok_or_else(|| RosterError::UnknownDepartment(code.to_string()))
    }

    fn batch(&self, name: &str) -> Result<i64, RosterError> {
        self.batches
            .get(name)
            .copied()
            .ok_or_else(|| RosterError::UnknownBatch(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const ROSTER: &str = r#"{
        "departments": [{ "code": "CS", "name": "Computer Science" }],
        "batches": [{ "name": "CS-2024", "department": "CS" }],
        "students": [
            { "name": "Asha Rao", "roll_number": "CS-001", "department": "CS", "batch": "CS-2024" },
            { "name": "Old Timer", "roll_number": "CS-000", "department": "CS", "batch": "CS-2024", "is_active": false }
        ],
        "users": [
            { "login": "prof", "display_name": "Prof. Iyer", "role": "FACULTY", "department": "CS" }
        ],
        "assignments": [
            { "subject_code": "CS101", "subject_name": "Programming", "batch": "CS-2024", "faculty": "prof" }
        ]
    }"#;

    #[test]
    fn test_seed_links_entries_by_reference() {
        let mut persistence = Persistence::new_in_memory().unwrap();
        let roster = parse_roster(ROSTER).unwrap();

        let seeded = seed_roster(&mut persistence, &roster).unwrap();

        let batch_id = seeded.batches["CS-2024"];
        let active = persistence.list_active_students_in_batch(batch_id).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].roll_number, "CS-001");
        assert_eq!(
            persistence
                .list_batch_ids_for_faculty(seeded.users["prof"])
                .unwrap(),
            vec![batch_id]
        );
    }

    #[test]
    fn test_unknown_department_reference() {
        let mut persistence = Persistence::new_in_memory().unwrap();
        let roster = parse_roster(r#"{ "batches": [{ "name": "B", "department": "XX" }] }"#).unwrap();

        let result = seed_roster(&mut persistence, &roster);

        assert!(matches!(result, Err(RosterError::UnknownDepartment(code)) if code == "XX"));
    }

    #[test]
    fn test_invalid_role() {
        let mut persistence = Persistence::new_in_memory().unwrap();
        let roster = parse_roster(
            r#"{ "users": [{ "login": "x", "display_name": "X", "role": "DEAN" }] }"#,
        )
        .unwrap();

        let result = seed_roster(&mut persistence, &roster);

        assert!(matches!(result, Err(RosterError::InvalidRole { .. })));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_roster("{"), Err(RosterError::Parse(_))));
    }
}
