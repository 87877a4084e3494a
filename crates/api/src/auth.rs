// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identification and role checks.
//!
//! Sign-in happens at an external provider. Requests arrive carrying the
//! caller's custom user id, and the role comes from the stored mapping.

use parkit_audit::Actor;
use parkit_domain::Role;
use parkit_persistence::Persistence;
use tracing::debug;

use crate::error::AuthError;

/// A caller whose custom user id resolved to a stored role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The custom user id.
    pub id: String,
    /// The role assigned to this id.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns true if the actor is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role)
    }
}

/// Resolves custom user ids to authenticated actors.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Resolves the caller from the custom user id carried by the request.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the id is missing or blank, has no
    /// role assigned, or the lookup fails.
    pub fn authenticate(
        persistence: &mut Persistence,
        user_id: Option<&str>,
    ) -> Result<AuthenticatedActor, AuthError> {
        let user_id: &str = user_id.map(str::trim).unwrap_or_default();
        if user_id.is_empty() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Missing user id"),
            });
        }

        let role: Role = persistence
            .get_user_role(user_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Role lookup failed: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!("Unknown user id '{user_id}'"),
            })?;

        debug!(user_id, role = %role, "Resolved caller");
        Ok(AuthenticatedActor::new(user_id.to_string(), role))
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor is an administrator.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action being attempted, for the error message
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the actor does not have the Admin role.
    pub fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            })
        }
    }

    /// Checks that the actor is either the named user or an administrator.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the actor is neither.
    pub fn require_self_or_admin(
        actor: &AuthenticatedActor,
        user_id: &str,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.id == user_id {
            return Ok(());
        }
        Self::require_admin(actor, action)
    }
}
