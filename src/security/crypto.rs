//! Password encoding seam for primary-credential verification.

/// Trait for encoding and verifying account secrets.
///
/// Keys are opaque tokens and never pass through an encoder; this seam
/// only guards the username+secret scheme used by the issuance endpoints.
pub trait PasswordEncoder: Send + Sync {
    /// Encode the raw password.
    fn encode(&self, raw_password: &str) -> String;

    /// Verify a raw password against an encoded password.
    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;
}

/// Pass-through encoder that compares passwords in plain text.
///
/// Suitable for tests and demo stores; a deployment would plug a hashing
/// encoder into the same seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPasswordEncoder;

impl PasswordEncoder for NoOpPasswordEncoder {
    fn encode(&self, raw_password: &str) -> String {
        raw_password.to_string()
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        raw_password == encoded_password
    }
}
