// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what fee actions an actor may attempt. They are
//! advisory only and do not replace the checks each operation performs.

use crate::auth::{AuthenticatedActor, Role};
use crate::request_response::{Capability, FeeCapabilities};

/// Computes fee capabilities for an authenticated actor.
///
/// Administrators and department heads hold every fee capability (scope
/// still applies per target). Faculty hold none.
#[must_use]
pub const fn compute_fee_capabilities(actor: &AuthenticatedActor) -> FeeCapabilities {
    match actor.role {
        Role::Administrator => FeeCapabilities {
            can_create: Capability::Allowed,
            can_bulk_create: Capability::Allowed,
            can_mark_paid: Capability::Allowed,
            can_delete: Capability::Allowed,
        },
        // A head without a department cannot reach any student.
        Role::DepartmentHead => {
            let writable = Capability::from_bool(actor.department_id.is_some());
            FeeCapabilities {
                can_create: writable,
                can_bulk_create: writable,
                can_mark_paid: writable,
                can_delete: writable,
            }
        }
        Role::Faculty => FeeCapabilities {
            can_create: Capability::Denied,
            can_bulk_create: Capability::Denied,
            can_mark_paid: Capability::Denied,
            can_delete: Capability::Denied,
        },
    }
}
