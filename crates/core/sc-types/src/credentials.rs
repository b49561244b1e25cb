//! Scoped credentials for per-account access.

use chrono::{DateTime, Utc};
use std::fmt;

/// Access credentials bound to the processing of a single account.
///
/// `Ambient` means the caller's own credentials apply (the scanned account is
/// the caller's account). `Assumed` carries temporary keys from a role
/// assumption. Values are moved into the storage session for that account
/// and dropped when its scan completes.
#[derive(Clone, PartialEq, Eq)]
pub enum ScopedCredentials {
    /// Use the ambient credentials of the running process
    Ambient,

    /// Temporary credentials from role assumption
    Assumed {
        access_key_id: String,
        secret_access_key: String,
        session_token: String,
        expiration: Option<DateTime<Utc>>,
    },
}

impl ScopedCredentials {
    /// Check whether these are the ambient credentials.
    pub fn is_ambient(&self) -> bool {
        matches!(self, Self::Ambient)
    }
}

// Keys must never reach logs.
impl fmt::Debug for ScopedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambient => write!(f, "Ambient"),
            Self::Assumed {
                access_key_id,
                expiration,
                ..
            } => f
                .debug_struct("Assumed")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"<redacted>")
                .field("session_token", &"<redacted>")
                .field("expiration", expiration)
                .finish(),
        }
    }
}
