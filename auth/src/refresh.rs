use chrono::Duration;
use rand::rngs::OsRng;
use rand::RngCore;

/// Bytes of OS randomness behind each refresh token (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Default refresh-token lifetime.
pub fn default_refresh_ttl() -> Duration {
    Duration::days(60)
}

/// Generate an opaque refresh token: 32 random bytes, hex encoded.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
