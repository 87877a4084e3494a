// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Small enumerations with an explicit wire mapping.
//!
//! Each enum is stored and transmitted through its mapping table rather
//! than its Rust variant name, so renaming a variant never changes what is
//! persisted.

use serde::{Deserialize, Serialize};

/// Generates a closed enum with an explicit bidirectional string mapping.
///
/// The generated type gets `as_str`, a case-insensitive `parse_str`,
/// `Display`, `FromStr` and string-based serde impls.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $err:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$( Self::$variant ),+];

            /// Returns the wire representation.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }

            /// Parses the wire representation (case-insensitive).
            ///
            /// # Errors
            ///
            /// Returns an error if the string is not a known value.
            pub fn parse_str(s: &str) -> Result<Self, $crate::error::DomainError> {
                let trimmed: &str = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($wire) {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::error::DomainError::$err(s.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_str(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let raw: String = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::parse_str(&raw).map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use wire_enum;

wire_enum! {
    /// Booking priority tag chosen on the booking form.
    pub enum PriorityTag: InvalidPriorityTag {
        /// Regular visitor.
        Normal => "Normal",
        /// Staff member.
        Staff => "Staff",
        /// Student.
        Student => "Student",
    }
}

wire_enum! {
    /// Approval state of a reservation request.
    ///
    /// This is distinct from the slot status the request refers to.
    pub enum RequestStatus: InvalidRequestStatus {
        /// Waiting for an admin decision.
        Pending => "Pending",
        /// Approved by an admin.
        Approved => "Approved",
        /// Rejected by an admin.
        Rejected => "Rejected",
    }
}

wire_enum! {
    /// Progress of a reported issue.
    pub enum IssueStatus: InvalidIssueStatus {
        Pending => "Pending",
        InProgress => "In Progress",
        Resolved => "Resolved",
    }
}

wire_enum! {
    /// Caller role, resolved from the custom user id mapping.
    pub enum Role: InvalidRole {
        /// Lot administrator: may change slot status and resolve requests.
        Admin => "admin",
        /// Regular user: may submit requests and report issues.
        User => "user",
    }
}

/// Vehicle type from the booking form.
///
/// Known types use their canonical spelling; anything else is preserved
/// verbatim so user-entered values are never lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleType {
    Car,
    Bike,
    Scooter,
    Van,
    Other(String),
}

impl VehicleType {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Car => "Car",
            Self::Bike => "Bike",
            Self::Scooter => "Scooter",
            Self::Van => "Van",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for VehicleType {
    fn from(value: &str) -> Self {
        let trimmed: &str = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "car" => Self::Car,
            "bike" | "motorbike" | "motorcycle" => Self::Bike,
            "scooter" => Self::Scooter,
            "van" => Self::Van,
            _ => Self::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for VehicleType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<VehicleType> for String {
    fn from(value: VehicleType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
