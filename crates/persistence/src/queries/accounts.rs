// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use parkit_domain::{Profile, Role};

use crate::data_models::{ProfileRow, UserRoleRow};
use crate::diesel_schema::{profiles, user_roles};
use crate::error::PersistenceError;

/// Retrieves a profile by id.
///
/// # Errors
///
/// Returns `NotFound` if no such profile exists.
pub fn get_profile(
    conn: &mut SqliteConnection,
    profile_id: &str,
) -> Result<Profile, PersistenceError> {
    profiles::table
        .filter(profiles::profile_id.eq(profile_id))
        .select(ProfileRow::as_select())
        .first::<ProfileRow>(conn)
        .optional()?
        .map(Profile::from)
        .ok_or_else(|| PersistenceError::NotFound(format!("profile {profile_id}")))
}

/// Looks up the role assigned to a custom user id.
///
/// Returns `None` for ids with no role assignment.
///
/// # Errors
///
/// Returns an error if the query fails or the stored role is unknown.
pub fn get_user_role(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<Role>, PersistenceError> {
    let row: Option<UserRoleRow> = user_roles::table
        .filter(user_roles::user_id.eq(user_id))
        .select(UserRoleRow::as_select())
        .first::<UserRoleRow>(conn)
        .optional()?;
    row.map(|r| {
        Role::parse_str(&r.role).map_err(|e| PersistenceError::UnreadableRecord(e.to_string()))
    })
    .transpose()
}

/// Counts role assignments.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_user_roles(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(user_roles::table.count().get_result(conn)?)
}
