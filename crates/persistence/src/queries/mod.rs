// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `lot`: Slots, active bookings and booking history
//! - `requests`: Reservation requests
//! - `issues`: Issue reports
//! - `notifications`: Per-user notification feeds
//! - `accounts`: Profiles and role lookups
//! - `audit`: Audit timelines

pub mod accounts;
pub mod audit;
pub mod issues;
pub mod lot;
pub mod notifications;
pub mod requests;
