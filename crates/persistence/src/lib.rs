// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the `ParkIt` lot.
//!
//! Built on Diesel with the `SQLite` backend. Migrations are embedded and run
//! whenever a database is opened.
//!
//! ## Storage model
//!
//! - `slots`: one row per layout slot, seeded once
//! - `bookings`: at most one active booking per slot
//! - `booking_history`: append-only confirmed bookings, read by analytics
//! - `reservation_requests`, `issues`, `notifications`
//! - `profiles`, `user_roles`
//! - `audit_events`: one row per successful transition
//!
//! A transition is always written in one database transaction; see
//! [`Persistence::persist_transition`].
//!
//! ## Testing
//!
//! Tests run against isolated shared-cache in-memory databases created by
//! [`Persistence::new_in_memory`].

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

use diesel::SqliteConnection;
use parkit::{LotState, TransitionResult};
use parkit_audit::AuditEvent;
use parkit_domain::{
    Booking, Issue, Notification, Profile, RequestStatus, ReservationRequest, Role, Slot, SlotId,
    seed_slots,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::info;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter for the lot store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// so concurrently running tests never share state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path
            .as_ref()
            .to_str()
            .ok_or(PersistenceError::InvalidDatabasePath)?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Lot
    // ========================================================================

    /// Seeds the slot table from the lot layout when it is empty.
    ///
    /// Returns the number of slots inserted (zero if the table already had rows).
    ///
    /// # Errors
    ///
    /// Returns an error if the count or inserts fail.
    pub fn seed_slots_if_empty(&mut self) -> Result<usize, PersistenceError> {
        if queries::lot::count_slots(&mut self.conn)? > 0 {
            return Ok(0);
        }
        let seed: Vec<Slot> = seed_slots();
        let inserted: usize = mutations::seed_slots(&mut self.conn, &seed)?;
        info!(inserted, "Seeded slot table from lot layout");
        Ok(inserted)
    }

    /// Loads the current slot registry and active bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_lot_state(&mut self) -> Result<LotState, PersistenceError> {
        queries::lot::load_lot_state(&mut self.conn)
    }

    /// Lists every slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_slots(&mut self) -> Result<Vec<Slot>, PersistenceError> {
        queries::lot::list_slots(&mut self.conn)
    }

    /// Lists active bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_bookings(&mut self) -> Result<Vec<Booking>, PersistenceError> {
        queries::lot::list_bookings(&mut self.conn)
    }

    /// Lists every confirmed booking ever made, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_booking_history(&mut self) -> Result<Vec<Booking>, PersistenceError> {
        queries::lot::list_history(&mut self.conn)
    }

    /// Persists a transition in one database transaction.
    ///
    /// # Arguments
    ///
    /// * `result` - The transition to persist
    /// * `notifications` - Notification records materialized from the drafts
    /// * `recorded_at` - Timestamp for the audit event
    ///
    /// # Returns
    ///
    /// The event ID of the persisted audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is committed in that case.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
        notifications: &[Notification],
        recorded_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result, notifications, recorded_at)
    }

    // ========================================================================
    // Reservation requests and issues
    // ========================================================================

    /// Retrieves a reservation request by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the request does not exist.
    pub fn get_reservation_request(
        &mut self,
        request_id: &str,
    ) -> Result<ReservationRequest, PersistenceError> {
        queries::requests::get_request(&mut self.conn, request_id)
    }

    /// Lists reservation requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservation_requests(
        &mut self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<ReservationRequest>, PersistenceError> {
        queries::requests::list_requests(&mut self.conn, status)
    }

    /// Retrieves an issue by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the issue does not exist.
    pub fn get_issue(&mut self, issue_id: &str) -> Result<Issue, PersistenceError> {
        queries::issues::get_issue(&mut self.conn, issue_id)
    }

    /// Lists every issue, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_issues(&mut self) -> Result<Vec<Issue>, PersistenceError> {
        queries::issues::list_issues(&mut self.conn)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Stores a single notification outside of a transition.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_notification(
        &mut self,
        notification: &Notification,
    ) -> Result<(), PersistenceError> {
        mutations::insert_notification(&mut self.conn, notification)
    }

    /// Lists the notifications visible to a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_notifications_for_user(
        &mut self,
        user_id: &str,
    ) -> Result<Vec<Notification>, PersistenceError> {
        queries::notifications::list_for_user(&mut self.conn, user_id)
    }

    /// Retrieves a notification by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification does not exist.
    pub fn get_notification(
        &mut self,
        notification_id: &str,
    ) -> Result<Notification, PersistenceError> {
        queries::notifications::get_notification(&mut self.conn, notification_id)
    }

    /// Marks a notification as read.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification does not exist.
    pub fn mark_notification_read(
        &mut self,
        notification_id: &str,
    ) -> Result<(), PersistenceError> {
        mutations::mark_notification_read(&mut self.conn, notification_id)
    }

    // ========================================================================
    // Profiles and roles
    // ========================================================================

    /// Creates or replaces a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_profile(&mut self, profile: &Profile) -> Result<(), PersistenceError> {
        mutations::upsert_profile(&mut self.conn, profile)
    }

    /// Retrieves a profile by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the profile does not exist.
    pub fn get_profile(&mut self, profile_id: &str) -> Result<Profile, PersistenceError> {
        queries::accounts::get_profile(&mut self.conn, profile_id)
    }

    /// Assigns a role to a custom user id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_user_role(&mut self, user_id: &str, role: Role) -> Result<(), PersistenceError> {
        mutations::set_user_role(&mut self.conn, user_id, role)
    }

    /// Looks up the role assigned to a custom user id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_role(&mut self, user_id: &str) -> Result<Option<Role>, PersistenceError> {
        queries::accounts::get_user_role(&mut self.conn, user_id)
    }

    /// Counts role assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_user_roles(&mut self) -> Result<i64, PersistenceError> {
        queries::accounts::count_user_roles(&mut self.conn)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Persists a standalone audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(
        &mut self,
        event: &AuditEvent,
        recorded_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_audit_event(&mut self.conn, event, recorded_at)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the event does not exist.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Lists the audit timeline of one slot, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_events_for_slot(
        &mut self,
        slot_id: &SlotId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::list_for_slot(&mut self.conn, slot_id)
    }
}
