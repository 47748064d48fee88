// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Identity itself is established upstream. This module only turns a
//! resolved user id into an [`AuthenticatedActor`] and answers
//! "may this role do that" questions.

use std::str::FromStr;

use fee_ledger_persistence::{Persistence, PersistenceError, UserData};
use tracing::{debug, warn};

use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Institution administrator.
    ///
    /// Sees every fee and may create, bulk-create, record payments on and
    /// delete any of them.
    Administrator,
    /// Head of one department.
    ///
    /// Has the administrator's fee capabilities, restricted to students of
    /// their own department.
    DepartmentHead,
    /// Teaching staff.
    ///
    /// Read-only: sees fees of students in batches they teach.
    Faculty,
}

impl Role {
    /// Returns the stored string form of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "ADMINISTRATOR",
            Self::DepartmentHead => "DEPARTMENT_HEAD",
            Self::Faculty => "FACULTY",
        }
    }

    /// Returns true if this role may mutate the fee ledger at all.
    #[must_use]
    pub const fn can_write_fees(&self) -> bool {
        matches!(self, Self::Administrator | Self::DepartmentHead)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMINISTRATOR" => Ok(Self::Administrator),
            "DEPARTMENT_HEAD" => Ok(Self::DepartmentHead),
            "FACULTY" => Ok(Self::Faculty),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {s}"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
///
/// This is the `(user id, role, department)` triple every fee operation
/// is evaluated against. It is never built from caller-supplied role or
/// department values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user id of this actor.
    pub user_id: i64,
    /// The role assigned to this actor.
    pub role: Role,
    /// The actor's department, if any.
    pub department_id: Option<i64>,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(user_id: i64, role: Role, department_id: Option<i64>) -> Self {
        Self {
            user_id,
            role,
            department_id,
        }
    }
}

/// Authorization service for enforcing role-based access control.
///
/// Checks here depend on the role alone. Whether a particular student or
/// fee is within reach is decided by [`crate::scope`].
pub struct AuthorizationService;

impl AuthorizationService {
    /// Required role text for every fee mutation.
    const FEE_WRITER: &'static str = "ADMINISTRATOR or DEPARTMENT_HEAD role";

    /// Checks that an actor belongs to the given endpoint family.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor's role differs from `family`.
    pub fn authorize_family(actor: &AuthenticatedActor, family: Role) -> Result<(), AuthError> {
        if actor.role == family {
            return Ok(());
        }
        warn!(user_id = actor.user_id, role = %actor.role, family = %family, "Route family rejected");
        Err(AuthError::Unauthorized {
            action: format!("access {} endpoints", family.as_str().to_ascii_lowercase()),
            required_role: format!("{family} role"),
        })
    }

    /// Checks if an actor is authorized to create a single fee.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is faculty.
    pub fn authorize_create_fee(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_fee_writer(actor, "create_fee")
    }

    /// Checks if an actor is authorized to create fees for a cohort.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is faculty.
    pub fn authorize_bulk_create_fees(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_fee_writer(actor, "bulk_create_fees")
    }

    /// Checks if an actor is authorized to record a payment status.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is faculty.
    pub fn authorize_mark_fee_paid(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_fee_writer(actor, "mark_fee_paid")
    }

    /// Checks if an actor is authorized to delete a fee.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is faculty.
    pub fn authorize_delete_fee(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_fee_writer(actor, "delete_fee")
    }

    fn require_fee_writer(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.role.can_write_fees() {
            Ok(())
        } else {
            warn!(user_id = actor.user_id, role = %actor.role, action, "Fee write rejected");
            Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from(Self::FEE_WRITER),
            })
        }
    }
}

/// Adapter over the upstream identity context.
///
/// The gateway in front of this service authenticates the user and passes
/// the user id along; this service looks up the role and department that
/// go with it.
pub struct IdentityService;

impl IdentityService {
    /// Resolves a user id into an authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist, carries an unknown
    /// role, or the lookup fails.
    pub fn resolve_actor(
        persistence: &mut Persistence,
        user_id: i64,
    ) -> Result<AuthenticatedActor, AuthError> {
        let user: UserData = persistence
            .get_user(user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!("Unknown user {user_id}"),
            })?;

        let role: Role = user.role.parse()?;

        debug!(
            user_id,
            role = %role,
            department_id = ?user.department_id,
            "Resolved actor"
        );

        Ok(AuthenticatedActor::new(user.user_id, role, user.department_id))
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
