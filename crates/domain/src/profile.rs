// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user profile.
///
/// The id is the stable identifier issued by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
}

impl Profile {
    /// Creates a validated profile.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProfile` if any field is invalid.
    pub fn new(
        id: &str,
        email: &str,
        display_name: &str,
        photo_url: Option<String>,
    ) -> Result<Self, DomainError> {
        let profile: Self = Self {
            id: id.trim().to_string(),
            email: email.trim().to_string(),
            display_name: display_name.trim().to_string(),
            photo_url: photo_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
        };
        validate_profile(&profile)?;
        Ok(profile)
    }
}

/// Validates profile fields.
///
/// # Errors
///
/// Returns an error if:
/// - The id is empty
/// - The email is empty or has no `@`
/// - The display name is empty
/// - The photo URL is present but not an `http(s)` URL
pub fn validate_profile(profile: &Profile) -> Result<(), DomainError> {
    if profile.id.is_empty() {
        return Err(DomainError::InvalidProfile(String::from(
            "Profile id cannot be empty",
        )));
    }
    if !profile.email.contains('@') {
        return Err(DomainError::InvalidProfile(String::from(
            "Email must be a valid address",
        )));
    }
    if profile.display_name.is_empty() {
        return Err(DomainError::InvalidProfile(String::from(
            "Display name cannot be empty",
        )));
    }
    if let Some(url) = &profile.photo_url
        && !(url.starts_with("https://") || url.starts_with("http://"))
    {
        return Err(DomainError::InvalidProfile(String::from(
            "Photo URL must be an http(s) URL",
        )));
    }
    Ok(())
}
