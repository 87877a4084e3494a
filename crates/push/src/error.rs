// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur while relaying a push notification.
#[derive(Debug, Error)]
pub enum PushError {
    /// The relay was asked to send but has no credentials.
    #[error("Push relay is not configured")]
    NotConfigured,

    /// The HTTP request could not be completed.
    #[error("Push request failed: {0}")]
    RequestFailed(String),

    /// The push service rejected the credentials.
    #[error("Push service rejected the API key")]
    Unauthorized,

    /// The push service returned a non-success status.
    #[error("Push service error (status {status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// The success response could not be decoded.
    #[error("Push response parsing failed: {0}")]
    ResponseParseFailed(String),
}
