// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use parkit_domain::{DomainError, Slot, SlotId};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::{BookingChange, IssueChange, LotChange, LotState, TransitionResult};

/// Validates that a slot exists in the lot.
///
/// This is a read-only validation that does not create audit events.
///
/// # Errors
///
/// Returns `DomainError::SlotNotFound` if the slot is not part of the lot.
pub fn validate_slot_exists<'a>(
    state: &'a LotState,
    slot_id: &SlotId,
) -> Result<&'a Slot, DomainError> {
    state.slot(slot_id)
}
