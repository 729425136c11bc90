//! Access and refresh token primitives.
//!
//! Access tokens are short-lived HS256 JWTs carrying [`Claims`]. Refresh
//! tokens are opaque random strings; the server persists only their SHA-256
//! digest (one session row each), so rotation and revocation work without
//! storing any replayable secret.

use atelier_core::hashing::sha256_hex;
use atelier_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the account's internal database id.
    pub sub: DbId,
    /// Role name of the linked team member, when one is assigned.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Mint time, seconds since the Unix epoch.
    pub iat: i64,
    /// Random per-token id (UUID v4).
    pub jti: String,
}

/// Signing secret and lifetimes for both token kinds.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HMAC key; signing and verification both use it.
    pub secret: String,
    /// How long a freshly minted access token stays valid, in minutes.
    pub access_token_expiry_mins: i64,
    /// How long a refresh token (and its session row) lives, in days.
    pub refresh_token_expiry_days: i64,
}

/// Read an expiry knob from the environment, panicking on unparsable values.
fn expiry_knob(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid i64")),
        Err(_) => default,
    }
}

impl JwtConfig {
    /// Load the signing configuration from the environment.
    ///
    /// `JWT_SECRET` is required. `JWT_ACCESS_EXPIRY_MINS` and
    /// `JWT_REFRESH_EXPIRY_DAYS` fall back to 15 minutes and 7 days.
    ///
    /// # Panics
    ///
    /// When `JWT_SECRET` is unset or empty, or an expiry knob is not a
    /// number.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.is_empty(), "JWT_SECRET is empty");

        Self {
            secret,
            access_token_expiry_mins: expiry_knob("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: expiry_knob("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }
}

/// Mint an access token for the given account.
///
/// Carries the account id, the linked member's role name when one exists,
/// issue/expiry times, and a fresh `jti`.
pub fn generate_access_token(
    user_id: DbId,
    role: Option<&str>,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = chrono::Utc::now();
    let expires_at = issued_at + chrono::Duration::minutes(config.access_token_expiry_mins);

    let claims = Claims {
        sub: user_id,
        role: role.map(str::to_string),
        exp: expires_at.timestamp(),
        iat: issued_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(decoded.claims)
}

/// Mint an opaque refresh token as `(plaintext, sha256_hex digest)`.
///
/// The plaintext goes to the client; only the digest is persisted.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let digest = hash_refresh_token(&plaintext);
    (plaintext, digest)
}

/// Digest an incoming refresh token for lookup against stored sessions.
pub fn hash_refresh_token(token: &str) -> String {
    sha256_hex(token.as_bytes())
}
