// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `lot`: Slot, booking, history, request and issue writes
//! - `notifications`: Notification inserts and read flags
//! - `accounts`: Profiles and role assignments
//! - `audit`: Audit event persistence
//! - `transition`: `persist_transition`, applying a whole transition in one transaction

pub mod accounts;
pub mod audit;
pub mod lot;
pub mod notifications;
pub mod transition;

pub use accounts::{set_user_role, upsert_profile};
pub use audit::persist_audit_event;
pub use lot::seed_slots;
pub use notifications::{insert_notification, mark_notification_read};
pub use transition::persist_transition;
