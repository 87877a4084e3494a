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

mod error;
mod message;
mod relay;

#[cfg(test)]
mod tests;

pub use error::PushError;
pub use message::{HIGH_PRIORITY, PushMessage, PushReceipt};
pub use relay::{
    DEFAULT_BASE_URL, DEFAULT_SEGMENT, DisabledPushRelay, HttpPushRelay, PushClient, PushConfig,
    PushRelay,
};
