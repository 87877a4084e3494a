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

/// Creates or replaces a profile.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_profile(
    conn: &mut SqliteConnection,
    profile: &Profile,
) -> Result<(), PersistenceError> {
    diesel::replace_into(profiles::table)
        .values(ProfileRow::from(profile))
        .execute(conn)?;
    Ok(())
}

/// Assigns a role to a custom user id, replacing any previous role.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn set_user_role(
    conn: &mut SqliteConnection,
    user_id: &str,
    role: Role,
) -> Result<(), PersistenceError> {
    diesel::replace_into(user_roles::table)
        .values(UserRoleRow {
            user_id: user_id.to_string(),
            role: role.as_str().to_string(),
        })
        .execute(conn)?;
    Ok(())
}
