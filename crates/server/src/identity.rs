// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor extraction for the role-scoped endpoint families.
//!
//! The identity gateway in front of this server authenticates the user and
//! forwards their id in the `X-User-Id` header. The extractor here turns
//! that id into an [`AuthenticatedActor`] and checks that the actor's role
//! matches the endpoint family being called.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use fee_ledger_api::{AuthenticatedActor, AuthorizationService, IdentityService};
use tracing::{debug, warn};

use crate::{FamilyState, HttpError};

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extractor for the actor calling a family route.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     FamilyActor(actor): FamilyActor,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 401 if the header is missing, malformed or names an
/// unknown user, and HTTP 403 if the user's role is not the family's role.
pub struct FamilyActor(pub AuthenticatedActor);

impl FromRequestParts<FamilyState> for FamilyActor {
    type Rejection = IdentityError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &FamilyState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| {
                debug!("Missing {USER_ID_HEADER} header");
                IdentityError::MissingUserHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid {USER_ID_HEADER} header encoding");
                IdentityError::InvalidUserHeader
            })?;

        let user_id: i64 = header.trim().parse().map_err(|_| {
            warn!(header, "{USER_ID_HEADER} header is not a user id");
            IdentityError::InvalidUserHeader
        })?;

        let mut persistence = state.app.persistence.lock().await;
        let actor: AuthenticatedActor = IdentityService::resolve_actor(&mut persistence, user_id)
            .map_err(|e| {
                warn!(user_id, error = %e, "Actor resolution failed");
                IdentityError::UnknownActor(e.to_string())
            })?;
        drop(persistence);

        AuthorizationService::authorize_family(&actor, state.family).map_err(|e| {
            warn!(user_id, role = %actor.role, family = %state.family, "Wrong endpoint family");
            IdentityError::WrongFamily(e.to_string())
        })?;

        Ok(Self(actor))
    }
}

/// Actor extraction errors.
#[derive(Debug)]
pub enum IdentityError {
    /// The user id header is missing.
    MissingUserHeader,
    /// The user id header is not a number.
    InvalidUserHeader,
    /// The user id does not resolve to an actor.
    UnknownActor(String),
    /// The actor's role does not match the endpoint family.
    WrongFamily(String),
}

impl From<IdentityError> for HttpError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::MissingUserHeader => Self {
                status: StatusCode::UNAUTHORIZED,
                message: format!("Missing {USER_ID_HEADER} header"),
            },
            IdentityError::InvalidUserHeader => Self {
                status: StatusCode::UNAUTHORIZED,
                message: format!("Invalid {USER_ID_HEADER} header. Expected a numeric user id"),
            },
            IdentityError::UnknownActor(reason) => Self {
                status: StatusCode::UNAUTHORIZED,
                message: reason,
            },
            IdentityError::WrongFamily(reason) => Self {
                status: StatusCode::FORBIDDEN,
                message: reason,
            },
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        HttpError::from(self).into_response()
    }
}
